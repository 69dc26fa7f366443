//! Palette and highlight policy for the chart.

use plotters::prelude::*;

/// Tableau-10 categorical palette.
/// Order: Blue, Orange, Red, Teal, Green, Yellow, Purple, Pink, Brown, Gray.
const TABLEAU10: [RGBColor; 10] = [
    RGBColor(78, 121, 167),  // blue      (#4E79A7)
    RGBColor(242, 142, 43),  // orange    (#F28E2B)
    RGBColor(225, 87, 89),   // red       (#E15759)
    RGBColor(118, 183, 178), // teal      (#76B7B2)
    RGBColor(89, 161, 79),   // green     (#59A14F)
    RGBColor(237, 201, 72),  // yellow    (#EDC948)
    RGBColor(176, 122, 161), // purple    (#B07AA1)
    RGBColor(255, 157, 167), // pink      (#FF9DA7)
    RGBColor(156, 117, 95),  // brown     (#9C755F)
    RGBColor(186, 176, 172), // gray      (#BAB0AC)
];

/// Get a color from the Tableau palette.
#[inline]
pub fn series_color(idx: usize) -> RGBAColor {
    TABLEAU10[idx % TABLEAU10.len()].to_rgba()
}

/// Opacity of a series line given the hovered key: the hovered series is
/// fully opaque, others recede; with nothing hovered every line sits at 0.8.
pub fn series_opacity(highlight: Option<&str>, key: &str) -> f64 {
    match highlight {
        Some(h) if h == key => 1.0,
        Some(_) => 0.1,
        None => 0.8,
    }
}

/// Opacity of a legend entry: the hovered entry stays at 1.0, others dim to
/// 0.3; uniform full opacity with nothing hovered.
pub fn legend_opacity(highlight: Option<&str>, key: &str) -> f64 {
    match highlight {
        Some(h) if h == key => 1.0,
        Some(_) => 0.3,
        None => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps_around() {
        assert_eq!(series_color(0), series_color(10));
        assert_ne!(series_color(1), series_color(2));
    }

    #[test]
    fn highlight_opacity_policy() {
        assert_eq!(series_opacity(None, "A"), 0.8);
        assert_eq!(series_opacity(Some("A"), "A"), 1.0);
        assert_eq!(series_opacity(Some("A"), "B"), 0.1);

        assert_eq!(legend_opacity(None, "A"), 1.0);
        assert_eq!(legend_opacity(Some("A"), "A"), 1.0);
        assert_eq!(legend_opacity(Some("A"), "B"), 0.3);
    }
}
