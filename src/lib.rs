//! Attention-based bar geometry for agronomic field charts.
//!
//! Readings arrive already classified (an attention category, or a signed
//! pixel size with a colour class). [`render::render`] turns them into a grid
//! of parcels × parameters with one dotted reference line per cell and one
//! bar per reading, as backend-neutral [`Primitive`]s. [`render::svg`] writes
//! those primitives out as an SVG document.

pub mod attention;
pub mod config;
pub mod errors;
pub mod floor;
pub mod input;
pub mod log;
pub mod render;
pub mod types;

pub use attention::{AttentionCategory, ColorClass, ColorTable, SeverityRank, SeverityTable};
pub use config::ChartConfig;
pub use errors::{ConfigError, InputError};
pub use floor::WidthFloors;
pub use input::{ChartInput, Column, Parcel, Sample, SizedBar, parse_input};
pub use render::{BarRect, BarSpec, Direction, Primitive, RenderedChart, Side, place_bar, render};
pub use types::{Color, Percent, Px};

/// Render chart input JSON to SVG with the default configuration.
///
/// Returns the SVG string on success, or an error with diagnostics.
pub fn render_svg(json: &str) -> Result<String, miette::Report> {
    render_svg_with(json, &ChartConfig::default())
}

/// Render chart input JSON to SVG with an explicit configuration.
pub fn render_svg_with(json: &str, config: &ChartConfig) -> Result<String, miette::Report> {
    let input = parse_input("input.json", json)?;
    Ok(render(&input, config).to_svg())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_single_bar() {
        let svg = render_svg(
            r#"[{ "parcel": "Parcel 1", "samples": [{ "parameter": "K", "attention": "red" }] }]"#,
        )
        .unwrap();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains(r#"data-class="high""#));
        assert!(svg.contains("<title>Parcel: Parcel 1\nParameter: K\nAttention: red\nDirection: right</title>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn empty_input_is_an_empty_chart() {
        let svg = render_svg("[]").unwrap();
        assert_eq!(svg.lines().count(), 2);
    }

    #[test]
    fn malformed_input_reports_a_diagnostic() {
        let err = render_svg(r#"[{ "parcel": 3 }]"#).unwrap_err();
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("fieldbars::input::syntax")
        );
    }

    #[test]
    fn custom_config_is_applied() {
        let config = ChartConfig::from_toml_str("chart.toml", "[layout]\nstripes = true\nrow_height = 48\n").unwrap();
        let json = r#"[
            { "parcel": "A", "samples": [{ "parameter": "pH", "attention": "yellow" }] },
            { "parcel": "B", "samples": [{ "parameter": "pH", "attention": "yellow" }] }
        ]"#;
        let svg = render_svg_with(json, &config).unwrap();
        assert!(svg.contains(r##"fill="#f8fafc""##));
    }
}
