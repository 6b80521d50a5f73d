//! Monitoring sites on a longitude/latitude frame around Puget Sound.

use crate::palette;
use plotters::prelude::*;
use std::{ops::Range, path::Path};
use wq_core::site::SiteLocation;

/// Longitude extent of the map, degrees east.
pub const LONGITUDE_RANGE: Range<f64> = -125.5..-122.0;

/// Latitude extent of the map, degrees north.
pub const LATITUDE_RANGE: Range<f64> = 46.5..49.5;

const LAND: RGBColor = RGBColor(143, 188, 143);

/// Plot each site as a labelled marker. Sites outside the frame are skipped.
pub fn render_site_map(path: &Path, sites: &[SiteLocation]) -> anyhow::Result<()> {
    let backend = SVGBackend::new(path, (800, 800));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Data Collection Sites In and Around Puget Sound",
            ("sans-serif", 24).into_font(),
        )
        .margin(20i32)
        .x_label_area_size(40u32)
        .y_label_area_size(60u32)
        .build_cartesian_2d(LONGITUDE_RANGE, LATITUDE_RANGE)?;

    chart
        .configure_mesh()
        .x_desc("Longitude")
        .y_desc("Latitude")
        .x_label_formatter(&|lon: &f64| format!("{:.1}\u{b0}W", lon.abs()))
        .y_label_formatter(&|lat: &f64| format!("{:.1}\u{b0}N", lat))
        .light_line_style(LAND.mix(0.3))
        .draw()?;

    let colors = palette::spread(sites.len());
    for (site, color) in sites.iter().zip(colors) {
        if !LONGITUDE_RANGE.contains(&site.longitude) || !LATITUDE_RANGE.contains(&site.latitude) {
            log::warn!("map: {} lies outside the map frame", site.name);
            continue;
        }
        let name = site.name.clone();
        chart
            .draw_series(std::iter::once(
                EmptyElement::at((site.longitude, site.latitude))
                    + Circle::new((0, 0), 6, color.filled())
                    + Text::new(name, (8, -8), ("sans-serif", 14).into_font()),
            ))?
            .label(site.name.as_str())
            .legend(move |(x, y)| Circle::new((x + 10, y), 6, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_site_map() {
        let sites = SiteLocation::get_site_locations().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site_map.svg");
        render_site_map(&path, &sites).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Point Williams"));
    }

    #[test]
    fn test_fixture_sites_lie_inside_frame() {
        for site in SiteLocation::get_site_locations().unwrap() {
            assert!(LONGITUDE_RANGE.contains(&site.longitude), "{}", site.name);
            assert!(LATITUDE_RANGE.contains(&site.latitude), "{}", site.name);
        }
    }
}
