use dioxus::prelude::*;
use dispatch_shared::models::Row;
use dispatch_shared::table::{
    build_rows, sort_rows, PageSize, Pager, SortKey, SortOrder, DEFAULT_PAGE_SIZE,
};

const PAGE_SIZE_OPTIONS: [&str; 5] = ["10", "15", "20", "30", "all"];

/// One displayed column: header text and the row field it reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: &'static str,
    pub field: &'static str,
}

/// Sortable, optionally paginated table over API rows.
///
/// Clicking a header sorts by that column (again to reverse). When `paged` is
/// set, a pager with a page-size selector sits under the table.
#[component]
pub fn DataTable(
    columns: Vec<Column>,
    rows: Vec<Row>,
    highlight: Option<&'static str>,
    initial_sort: Option<SortKey>,
    #[props(default)] paged: bool,
) -> Element {
    let mut sort = use_signal(|| initial_sort);
    let mut page_size = use_signal(|| PageSize::Rows(DEFAULT_PAGE_SIZE));
    let mut page = use_signal(|| 0usize);

    let fields: Vec<&str> = columns.iter().map(|c| c.field).collect();
    let mut display = build_rows(&rows, &fields, highlight);
    if let Some(key) = *sort.read() {
        sort_rows(&mut display, key);
    }

    let size = if paged { *page_size.read() } else { PageSize::All };
    let mut pager = Pager::new(display.len(), size);
    pager.set_page(*page.read());
    let visible = &display[pager.range()];
    let position = pager.display();
    let (at_first, at_last) = (pager.at_first(), pager.at_last());
    let mut go = move |step: fn(&mut Pager)| {
        let mut p = pager;
        step(&mut p);
        page.set(p.page());
    };

    rsx! {
        table { class: "table table-sm table-striped",
            thead {
                tr {
                    for (i, col) in columns.iter().enumerate() {
                        th {
                            key: "{col.field}",
                            class: "sortable",
                            onclick: move |_| {
                                let next = SortKey::toggled(*sort.peek(), i);
                                sort.set(Some(next));
                                page.set(0);
                            },
                            "{col.header}"
                            {sort_marker(*sort.read(), i)}
                        }
                    }
                }
            }
            tbody {
                for row in visible.iter() {
                    tr { class: row.class(),
                        for cell in row.cells.iter() {
                            td { "{cell}" }
                        }
                    }
                }
            }
        }
        if paged {
            div { class: "pager",
                button {
                    disabled: at_first,
                    onclick: move |_| go(Pager::first),
                    "First"
                }
                button {
                    disabled: at_first,
                    onclick: move |_| go(Pager::prev),
                    "Prev"
                }
                span { class: "pagedisplay", "{position}" }
                button {
                    disabled: at_last,
                    onclick: move |_| go(Pager::next),
                    "Next"
                }
                button {
                    disabled: at_last,
                    onclick: move |_| go(Pager::last),
                    "Last"
                }
                select {
                    class: "pagesize",
                    "aria-label": "Rows per page",
                    onchange: move |evt: Event<FormData>| {
                        if let Some(size) = PageSize::parse(&evt.value()) {
                            page_size.set(size);
                            page.set(0);
                        }
                    },
                    for opt in PAGE_SIZE_OPTIONS {
                        option {
                            value: opt,
                            selected: PageSize::parse(opt) == Some(*page_size.read()),
                            "{opt}"
                        }
                    }
                }
            }
        }
    }
}

fn sort_marker(sort: Option<SortKey>, column: usize) -> &'static str {
    match sort {
        Some(SortKey { column: c, order: SortOrder::Ascending }) if c == column => " \u{25b2}",
        Some(SortKey { column: c, order: SortOrder::Descending }) if c == column => " \u{25bc}",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_marker_only_on_sorted_column() {
        let key = Some(SortKey { column: 1, order: SortOrder::Ascending });
        assert_eq!(sort_marker(key, 1), " \u{25b2}");
        assert_eq!(sort_marker(key, 0), "");
        assert_eq!(sort_marker(None, 1), "");
    }

    #[test]
    fn test_sort_marker_descending() {
        let key = Some(SortKey { column: 0, order: SortOrder::Descending });
        assert_eq!(sort_marker(key, 0), " \u{25bc}");
    }

    #[test]
    fn test_page_size_options_parse() {
        for opt in PAGE_SIZE_OPTIONS {
            assert!(PageSize::parse(opt).is_some(), "{opt}");
        }
        assert!(PAGE_SIZE_OPTIONS.contains(&DEFAULT_PAGE_SIZE.to_string().as_str()));
    }
}
