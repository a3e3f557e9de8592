//! Backend-neutral draw primitives.
//!
//! Each primitive knows how to write itself as SVG; the
//! [`Primitive`] enum dispatches to them without boxing.

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use super::svg::{escape_xml, fmt_num};
use crate::attention::ColorClass;
use crate::types::Color;

/// Common behavior for all primitives
#[enum_dispatch]
pub trait Draw {
    /// Append this primitive as a single SVG element.
    fn write_svg(&self, out: &mut String);
}

#[enum_dispatch(Draw)]
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    FilledRect(FilledRect),
    RefDot(RefDot),
    Label(Label),
}

/// A filled, optionally rounded rectangle: bars and row stripes.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledRect {
    /// Top-left corner
    pub origin: DVec2,
    pub size: DVec2,
    pub corner_radius: f64,
    pub fill: Color,
    pub opacity: f64,
    /// Severity class for bars; `None` for decoration.
    pub class: Option<ColorClass>,
    pub tooltip: Option<String>,
}

impl Draw for FilledRect {
    fn write_svg(&self, out: &mut String) {
        out.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            fmt_num(self.origin.x),
            fmt_num(self.origin.y),
            fmt_num(self.size.x),
            fmt_num(self.size.y),
        ));
        if self.corner_radius > 0.0 {
            let r = fmt_num(self.corner_radius);
            out.push_str(&format!(r#" rx="{r}" ry="{r}""#));
        }
        out.push_str(&format!(r#" fill="{}""#, self.fill));
        if self.opacity < 1.0 {
            out.push_str(&format!(r#" fill-opacity="{}""#, fmt_num(self.opacity)));
        }
        if let Some(class) = self.class {
            out.push_str(&format!(r#" data-class="{class}""#));
        }
        match &self.tooltip {
            Some(text) => {
                out.push_str(&format!("><title>{}</title></rect>", escape_xml(text)));
            }
            None => out.push_str("/>"),
        }
    }
}

/// One dot of a dotted reference line.
#[derive(Debug, Clone, PartialEq)]
pub struct RefDot {
    pub center: DVec2,
    pub diameter: f64,
    pub color: Color,
}

impl Draw for RefDot {
    fn write_svg(&self, out: &mut String) {
        out.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            fmt_num(self.center.x),
            fmt_num(self.center.y),
            fmt_num(self.diameter / 2.0),
            self.color,
        ));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Alphabetic,
    Middle,
}

/// Axis and row labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub anchor: DVec2,
    pub text: String,
    pub align: TextAnchor,
    pub baseline: Baseline,
    pub font_size: f64,
    pub color: Color,
}

impl Draw for Label {
    fn write_svg(&self, out: &mut String) {
        out.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="{}""#,
            fmt_num(self.anchor.x),
            fmt_num(self.anchor.y),
            self.align.as_str(),
        ));
        if self.baseline == Baseline::Middle {
            out.push_str(r#" dominant-baseline="middle""#);
        }
        out.push_str(&format!(
            r#" font-family="sans-serif" font-size="{}" fill="{}">{}</text>"#,
            fmt_num(self.font_size),
            self.color,
            escape_xml(&self.text),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> FilledRect {
        FilledRect {
            origin: DVec2::new(36.0, 15.0),
            size: DVec2::new(66.0, 18.0),
            corner_radius: 4.0,
            fill: Color::from_hex(0xef4444),
            opacity: 0.95,
            class: Some(ColorClass::High),
            tooltip: Some("Parcel: A & B".into()),
        }
    }

    #[test]
    fn rect_svg_with_tooltip() {
        let mut out = String::new();
        Primitive::from(bar()).write_svg(&mut out);
        assert_eq!(
            out,
            r##"<rect x="36" y="15" width="66" height="18" rx="4" ry="4" fill="#ef4444" fill-opacity="0.95" data-class="high"><title>Parcel: A &amp; B</title></rect>"##
        );
    }

    #[test]
    fn plain_rect_omits_optional_attributes() {
        let rect = FilledRect {
            corner_radius: 0.0,
            opacity: 1.0,
            class: None,
            tooltip: None,
            ..bar()
        };
        let mut out = String::new();
        rect.write_svg(&mut out);
        assert_eq!(out, r##"<rect x="36" y="15" width="66" height="18" fill="#ef4444"/>"##);
    }

    #[test]
    fn dot_svg_uses_radius() {
        let dot = Primitive::from(RefDot {
            center: DVec2::new(36.0, 3.0),
            diameter: 2.0,
            color: Color::from_hex(0x9ca3af),
        });
        let mut out = String::new();
        dot.write_svg(&mut out);
        assert_eq!(out, r##"<circle cx="36" cy="3" r="1" fill="#9ca3af"/>"##);
    }

    #[test]
    fn label_escapes_text() {
        let label = Label {
            anchor: DVec2::new(72.0, 24.0),
            text: "<Parcel 1>".into(),
            align: TextAnchor::End,
            baseline: Baseline::Middle,
            font_size: 12.0,
            color: Color::from_hex(0x111827),
        };
        let mut out = String::new();
        label.write_svg(&mut out);
        assert_eq!(
            out,
            r##"<text x="72" y="24" text-anchor="end" dominant-baseline="middle" font-family="sans-serif" font-size="12" fill="#111827">&lt;Parcel 1&gt;</text>"##
        );
    }
}
