//! Deterministic chart colors.

/// Ordered background colors. Requests beyond its length are truncated.
pub const BACKGROUND_COLORS: [&str; 11] = [
    "rgba(227, 26, 28, 0.3)",
    "rgba(31, 120, 180, 0.3)",
    "rgba(178, 223, 138, 0.5)",
    "rgba(106, 61, 154, 0.3)",
    "rgba(255, 127, 0, 0.3)",
    "rgba(251, 154, 153, 0.3)",
    "rgba(253, 191, 111, 0.3)",
    "rgba(51, 160, 44, 0.3)",
    "rgba(141, 211, 199, 0.5)",
    "rgba(202, 178, 214, 0.3)",
    "rgba(243, 128, 255, 0.3)",
];

/// The first `amount` background colors, capped at the palette size.
pub fn background_colors(amount: usize) -> Vec<String> {
    BACKGROUND_COLORS
        .iter()
        .take(amount)
        .map(|c| c.to_string())
        .collect()
}

/// Border colors matching `background_colors(amount)` with full opacity.
pub fn border_colors(amount: usize) -> Vec<String> {
    BACKGROUND_COLORS
        .iter()
        .take(amount)
        .map(|c| opaque(c))
        .collect()
}

/// Replace the alpha channel of an `rgba(r, g, b, a)` string with `1`.
/// Strings that are not four-component `rgba(...)` are returned unchanged.
pub fn opaque(color: &str) -> String {
    let Some(inner) = color
        .strip_prefix("rgba(")
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        return color.to_string();
    };
    match inner.rfind(',') {
        Some(idx) if inner.matches(',').count() == 3 => {
            format!("rgba({}, 1)", &inner[..idx])
        }
        _ => color.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths_are_capped_at_palette_size() {
        for n in 0..=20 {
            let expected = n.min(BACKGROUND_COLORS.len());
            assert_eq!(background_colors(n).len(), expected, "background for {n}");
            assert_eq!(border_colors(n).len(), expected, "border for {n}");
        }
    }

    #[test]
    fn test_border_is_background_with_alpha_one() {
        let bg = background_colors(BACKGROUND_COLORS.len());
        let border = border_colors(BACKGROUND_COLORS.len());
        for (b, o) in bg.iter().zip(&border) {
            let prefix = &b[..b.rfind(',').unwrap()];
            assert_eq!(*o, format!("{prefix}, 1)"));
        }
    }

    #[test]
    fn test_single_color() {
        assert_eq!(background_colors(1), vec!["rgba(227, 26, 28, 0.3)"]);
        assert_eq!(border_colors(1), vec!["rgba(227, 26, 28, 1)"]);
    }

    #[test]
    fn test_opaque_half_alpha() {
        assert_eq!(opaque("rgba(178, 223, 138, 0.5)"), "rgba(178, 223, 138, 1)");
    }

    #[test]
    fn test_opaque_leaves_non_rgba_alone() {
        assert_eq!(opaque("#ff0000"), "#ff0000");
        assert_eq!(opaque("rgb(1, 2, 3)"), "rgb(1, 2, 3)");
    }
}
