use plotters::style::RGBColor;

/// Rainbow-ish colours, picked in order for each site.
const SITE_COLORS: [RGBColor; 8] = [
    RGBColor(128, 0, 255),
    RGBColor(0, 114, 255),
    RGBColor(0, 180, 160),
    RGBColor(110, 200, 40),
    RGBColor(240, 190, 0),
    RGBColor(255, 110, 0),
    RGBColor(220, 20, 60),
    RGBColor(120, 60, 20),
];

/// Line colour for the fitted trendline.
pub const TRENDLINE: RGBColor = RGBColor(176, 196, 222);

/// Colour for the site at `index`; wraps around after the last colour.
pub fn site_color(index: usize) -> RGBColor {
    SITE_COLORS[index % SITE_COLORS.len()]
}

/// `count` evenly spread colours from the palette, as the map legend uses.
pub fn spread(count: usize) -> Vec<RGBColor> {
    if count <= 1 {
        return vec![site_color(0); count];
    }
    let last = SITE_COLORS.len() - 1;
    (0..count)
        .map(|i| SITE_COLORS[(i * last) / (count - 1).max(1) % SITE_COLORS.len()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_color_wraps() {
        assert_eq!(site_color(0), site_color(SITE_COLORS.len()));
        assert_ne!(site_color(0), site_color(1));
    }

    #[test]
    fn test_spread_spans_palette() {
        let colors = spread(4);
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0], SITE_COLORS[0]);
        assert_eq!(colors[3], SITE_COLORS[SITE_COLORS.len() - 1]);
        assert!(spread(0).is_empty());
        assert_eq!(spread(1), vec![SITE_COLORS[0]]);
    }
}
