//! Table rows, highlight classification, sorting and pagination.

use std::cmp::Ordering;

use serde_json::Value;

use crate::models::Row;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Row emphasis chosen from the highlight column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Danger,
    Warning,
}

impl Highlight {
    pub fn css_class(self) -> &'static str {
        match self {
            Highlight::Danger => "bg-danger",
            Highlight::Warning => "bg-warning",
        }
    }
}

/// `> 10` is danger, `> 3` is warning, anything else is plain.
pub fn classify(count: f64) -> Option<Highlight> {
    if count > 10.0 {
        Some(Highlight::Danger)
    } else if count > 3.0 {
        Some(Highlight::Warning)
    } else {
        None
    }
}

/// A row ready for display: optional emphasis plus one text cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub highlight: Option<Highlight>,
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn class(&self) -> &'static str {
        self.highlight.map(Highlight::css_class).unwrap_or("")
    }
}

/// Text shown for a cell. Missing and null values render empty.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn numeric(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Build display rows for `columns`, highlighting by `highlight_column` if given.
pub fn build_rows(rows: &[Row], columns: &[&str], highlight_column: Option<&str>) -> Vec<TableRow> {
    rows.iter()
        .map(|row| TableRow {
            highlight: highlight_column
                .and_then(|col| numeric(row.get(col)))
                .and_then(classify),
            cells: columns.iter().map(|col| cell_text(row.get(*col))).collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn flip(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: usize,
    pub order: SortOrder,
}

impl SortKey {
    /// The key after a header click: same column flips, new column starts ascending.
    pub fn toggled(current: Option<SortKey>, column: usize) -> SortKey {
        match current {
            Some(k) if k.column == column => SortKey {
                column,
                order: k.order.flip(),
            },
            _ => SortKey {
                column,
                order: SortOrder::Ascending,
            },
        }
    }
}

/// Numbers compare numerically and sort before text; text compares case-insensitively.
fn compare_cells(a: &str, b: &str) -> Ordering {
    match (finite(a), finite(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// `"NaN"` and `"inf"` parse as floats but sort as text.
fn finite(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Stable sort of display rows by one column.
pub fn sort_rows(rows: &mut [TableRow], key: SortKey) {
    rows.sort_by(|a, b| {
        let x = a.cells.get(key.column).map(String::as_str).unwrap_or_default();
        let y = b.cells.get(key.column).map(String::as_str).unwrap_or_default();
        let ord = compare_cells(x, y);
        match key.order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Rows per page; `All` shows every row on a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Rows(usize),
    All,
}

impl PageSize {
    /// Parse a page-size selector value (`"10"`, `"all"`).
    pub fn parse(value: &str) -> Option<PageSize> {
        if value.eq_ignore_ascii_case("all") {
            return Some(PageSize::All);
        }
        match value.trim().parse::<usize>() {
            Ok(0) | Err(_) => None,
            Ok(n) => Some(PageSize::Rows(n)),
        }
    }
}

/// Page state over a fixed number of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    size: PageSize,
    total_rows: usize,
}

impl Pager {
    pub fn new(total_rows: usize, size: PageSize) -> Self {
        Pager {
            page: 0,
            size,
            total_rows,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    fn rows_per_page(&self) -> usize {
        match self.size {
            PageSize::Rows(n) => n,
            PageSize::All => self.total_rows.max(1),
        }
    }

    /// Number of pages; an empty table still has one (empty) page.
    pub fn total_pages(&self) -> usize {
        self.total_rows.div_ceil(self.rows_per_page()).max(1)
    }

    /// Index range of rows visible on the current page.
    pub fn range(&self) -> std::ops::Range<usize> {
        let per_page = self.rows_per_page();
        let start = self.page.saturating_mul(per_page).min(self.total_rows);
        let end = start.saturating_add(per_page).min(self.total_rows);
        start..end
    }

    /// Jump to `page`, clamped to the last page.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.total_pages() - 1);
    }

    pub fn first(&mut self) {
        self.page = 0;
    }

    pub fn last(&mut self) {
        self.page = self.total_pages() - 1;
    }

    pub fn next(&mut self) {
        self.page = (self.page + 1).min(self.total_pages() - 1);
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Change the page size. Returns to the first page.
    pub fn set_size(&mut self, size: PageSize) {
        self.size = size;
        self.page = 0;
    }

    /// Replace the row count, keeping the page in bounds.
    pub fn set_total_rows(&mut self, total_rows: usize) {
        self.total_rows = total_rows;
        if self.page >= self.total_pages() {
            self.page = 0;
        }
    }

    pub fn at_first(&self) -> bool {
        self.page == 0
    }

    pub fn at_last(&self) -> bool {
        self.page + 1 >= self.total_pages()
    }

    /// Human-readable position, e.g. `"Page 2 of 5"`.
    pub fn display(&self) -> String {
        format!("Page {} of {}", self.page + 1, self.total_pages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().unwrap().clone()
    }

    // --- Highlighting ---

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(classify(11.0), Some(Highlight::Danger));
        assert_eq!(classify(5.0), Some(Highlight::Warning));
        assert_eq!(classify(2.0), None);
    }

    #[test]
    fn test_classify_boundaries_are_exclusive() {
        assert_eq!(classify(10.0), Some(Highlight::Warning));
        assert_eq!(classify(3.0), None);
    }

    #[test]
    fn test_css_classes() {
        assert_eq!(Highlight::Danger.css_class(), "bg-danger");
        assert_eq!(Highlight::Warning.css_class(), "bg-warning");
    }

    // --- Row building ---

    #[test]
    fn test_build_rows_in_column_order() {
        let rows = vec![row(json!({"neighborhood_district": "Mission", "incidents": 4, "calls": 40}))];
        let out = build_rows(&rows, &["neighborhood_district", "incidents", "calls"], None);
        assert_eq!(out[0].cells, vec!["Mission", "4", "40"]);
        assert!(out[0].highlight.is_none());
        assert_eq!(out[0].class(), "");
    }

    #[test]
    fn test_build_rows_highlight_by_count() {
        let rows = vec![
            row(json!({"address": "A", "count": 11})),
            row(json!({"address": "B", "count": 5})),
            row(json!({"address": "C", "count": 2})),
        ];
        let out = build_rows(&rows, &["address", "count"], Some("count"));
        assert_eq!(out[0].class(), "bg-danger");
        assert_eq!(out[1].class(), "bg-warning");
        assert_eq!(out[2].class(), "");
    }

    #[test]
    fn test_highlight_column_as_string_number() {
        let rows = vec![row(json!({"count": "12"}))];
        let out = build_rows(&rows, &["count"], Some("count"));
        assert_eq!(out[0].highlight, Some(Highlight::Danger));
    }

    #[test]
    fn test_missing_and_null_cells_are_empty() {
        let rows = vec![row(json!({"a": null}))];
        let out = build_rows(&rows, &["a", "b"], Some("b"));
        assert_eq!(out[0].cells, vec!["", ""]);
        assert!(out[0].highlight.is_none());
    }

    #[test]
    fn test_markup_is_kept_as_plain_text() {
        let rows = vec![row(json!({"address": "<b>1 MAIN ST</b>"}))];
        let out = build_rows(&rows, &["address"], None);
        assert_eq!(out[0].cells[0], "<b>1 MAIN ST</b>");
    }

    // --- Sorting ---

    fn text_rows(values: &[&str]) -> Vec<TableRow> {
        values
            .iter()
            .map(|v| TableRow {
                highlight: None,
                cells: vec![v.to_string()],
            })
            .collect()
    }

    fn column(rows: &[TableRow]) -> Vec<&str> {
        rows.iter().map(|r| r.cells[0].as_str()).collect()
    }

    #[test]
    fn test_sort_numeric_not_lexicographic() {
        let mut rows = text_rows(&["10", "9", "100"]);
        sort_rows(&mut rows, SortKey { column: 0, order: SortOrder::Ascending });
        assert_eq!(column(&rows), vec!["9", "10", "100"]);
    }

    #[test]
    fn test_sort_descending_text() {
        let mut rows = text_rows(&["bayview", "Mission", "Castro"]);
        sort_rows(&mut rows, SortKey { column: 0, order: SortOrder::Descending });
        assert_eq!(column(&rows), vec!["Mission", "Castro", "bayview"]);
    }

    #[test]
    fn test_sort_numbers_before_text() {
        let mut rows = text_rows(&["n/a", "3"]);
        sort_rows(&mut rows, SortKey { column: 0, order: SortOrder::Ascending });
        assert_eq!(column(&rows), vec!["3", "n/a"]);
    }

    #[test]
    fn test_sort_nan_and_infinity_as_text() {
        let mut rows = text_rows(&["NaN", "12", "inf", "3", "infinity", "7"]);
        sort_rows(&mut rows, SortKey { column: 0, order: SortOrder::Ascending });
        assert_eq!(column(&rows), vec!["3", "7", "12", "inf", "infinity", "NaN"]);
    }

    #[test]
    fn test_sort_many_numbers_with_nan_cells() {
        let values: Vec<String> = (0..200)
            .map(|i| if i % 7 == 0 { "NaN".to_string() } else { ((i * 37) % 101).to_string() })
            .collect();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let mut rows = text_rows(&refs);
        sort_rows(&mut rows, SortKey { column: 0, order: SortOrder::Ascending });
        let numbers: Vec<f64> = column(&rows)
            .iter()
            .filter_map(|c| c.parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect();
        assert!(numbers.windows(2).all(|w| w[0] <= w[1]));
        assert!(column(&rows)[numbers.len()..].iter().all(|c| *c == "NaN"));
    }

    #[test]
    fn test_toggle_same_column_flips() {
        let k = SortKey::toggled(Some(SortKey { column: 1, order: SortOrder::Ascending }), 1);
        assert_eq!(k.order, SortOrder::Descending);
        let k = SortKey::toggled(Some(k), 2);
        assert_eq!(k, SortKey { column: 2, order: SortOrder::Ascending });
        assert_eq!(SortKey::toggled(None, 0).order, SortOrder::Ascending);
    }

    // --- Pagination ---

    #[test]
    fn test_pager_ranges() {
        let mut p = Pager::new(32, PageSize::Rows(15));
        assert_eq!(p.total_pages(), 3);
        assert_eq!(p.range(), 0..15);
        p.next();
        assert_eq!(p.range(), 15..30);
        p.next();
        assert_eq!(p.range(), 30..32);
        assert!(p.at_last());
        p.next();
        assert_eq!(p.page(), 2);
    }

    #[test]
    fn test_pager_first_prev_last() {
        let mut p = Pager::new(50, PageSize::Rows(10));
        p.prev();
        assert!(p.at_first());
        p.last();
        assert_eq!(p.page(), 4);
        assert_eq!(p.display(), "Page 5 of 5");
        p.prev();
        assert_eq!(p.page(), 3);
        p.first();
        assert_eq!(p.display(), "Page 1 of 5");
    }

    #[test]
    fn test_pager_all_rows() {
        let mut p = Pager::new(40, PageSize::Rows(15));
        p.next();
        p.set_size(PageSize::All);
        assert_eq!(p.page(), 0);
        assert_eq!(p.total_pages(), 1);
        assert_eq!(p.range(), 0..40);
    }

    #[test]
    fn test_pager_empty_table() {
        let p = Pager::new(0, PageSize::Rows(15));
        assert_eq!(p.total_pages(), 1);
        assert_eq!(p.range(), 0..0);
        assert_eq!(p.display(), "Page 1 of 1");
        let p = Pager::new(0, PageSize::All);
        assert_eq!(p.range(), 0..0);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut p = Pager::new(30, PageSize::Rows(10));
        p.set_page(1);
        assert_eq!(p.range(), 10..20);
        p.set_page(9);
        assert_eq!(p.page(), 2);
    }

    #[test]
    fn test_pager_shrinking_rows_resets_page() {
        let mut p = Pager::new(45, PageSize::Rows(15));
        p.last();
        p.set_total_rows(10);
        assert_eq!(p.page(), 0);
    }

    #[test]
    fn test_huge_page_size_range() {
        let mut p = Pager::new(40, PageSize::Rows(usize::MAX));
        assert_eq!(p.total_pages(), 1);
        assert_eq!(p.range(), 0..40);
        p.next();
        assert_eq!(p.range(), 0..40);
        assert_eq!(PageSize::parse(&usize::MAX.to_string()), Some(PageSize::Rows(usize::MAX)));
    }

    #[test]
    fn test_page_size_parse() {
        assert_eq!(PageSize::parse("10"), Some(PageSize::Rows(10)));
        assert_eq!(PageSize::parse("all"), Some(PageSize::All));
        assert_eq!(PageSize::parse("0"), None);
        assert_eq!(PageSize::parse("ten"), None);
    }
}
