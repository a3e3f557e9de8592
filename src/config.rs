//! Chart configuration: layout, width floors, rank scale, and lookup tables.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration. Loading validates everything up front; a configuration that
//! loads will never fail at draw time.

use serde::{Deserialize, Serialize};

use crate::attention::{ColorTable, SeverityTable};
use crate::errors::{ConfigError, SourceContext};
use crate::floor::WidthFloors;
use crate::render::defaults;
use crate::render::geometry::RankScale;
use crate::render::stack::OverflowPolicy;
use crate::types::{Color, Percent, Px};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub layout: LayoutConfig,
    pub floors: WidthFloors,
    pub rank_scale: RankScale,
    pub severity: SeverityTable,
    pub colors: ColorTable,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Margin {
    pub top: Px,
    pub right: Px,
    pub bottom: Px,
    pub left: Px,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: defaults::MARGIN_TOP,
            right: defaults::MARGIN_RIGHT,
            bottom: defaults::MARGIN_BOTTOM,
            left: defaults::MARGIN_LEFT,
        }
    }
}

/// The dotted reference line drawn in every cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DotStyle {
    pub diameter: Px,
    pub gap: Px,
    pub top_margin: Px,
    pub color: Color,
}

impl Default for DotStyle {
    fn default() -> Self {
        Self {
            diameter: defaults::DOT_DIAMETER,
            gap: defaults::DOT_GAP,
            top_margin: defaults::DOT_TOP_MARGIN,
            color: Color::from_hex(defaults::DOT_COLOR),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelStyle {
    pub font_size: Px,
    pub offset: Px,
    pub color: Color,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: defaults::FONT_SIZE,
            offset: defaults::LABEL_OFFSET,
            color: Color::from_hex(defaults::LABEL_COLOR),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Minimum canvas width; grows when columns need more room.
    pub width: Px,
    /// Minimum canvas height; grows when `row_height` needs more room.
    pub height: Px,
    pub margin: Margin,
    pub reference_percent: Percent,
    pub min_column_width: Px,
    /// Fixed row height. When unset, rows share the canvas height evenly.
    pub row_height: Option<Px>,
    pub bar_thickness: Px,
    pub max_thickness_ratio: f64,
    pub stack_gap: Px,
    pub corner_radius: Px,
    pub bar_opacity: f64,
    pub overflow: OverflowPolicy,
    /// Shade every other row
    pub stripes: bool,
    pub stripe_color: Color,
    pub dots: DotStyle,
    pub labels: LabelStyle,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: defaults::CANVAS_WIDTH,
            height: defaults::CANVAS_HEIGHT,
            margin: Margin::default(),
            reference_percent: defaults::REFERENCE,
            min_column_width: defaults::MIN_COLUMN_WIDTH,
            row_height: None,
            bar_thickness: defaults::BAR_THICKNESS,
            max_thickness_ratio: defaults::MAX_THICKNESS_RATIO,
            stack_gap: defaults::STACK_GAP,
            corner_radius: defaults::CORNER_RADIUS,
            bar_opacity: defaults::BAR_OPACITY,
            overflow: OverflowPolicy::default(),
            stripes: false,
            stripe_color: Color::from_hex(defaults::STRIPE_COLOR),
            dots: DotStyle::default(),
            labels: LabelStyle::default(),
        }
    }
}

impl LayoutConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = |field: &'static str, value: Px| {
            Px::try_non_negative(value.raw())
                .map(drop)
                .map_err(|reason| ConfigError::InvalidValue { field, reason })
        };
        let positive = |field: &'static str, value: Px| {
            Px::try_positive(value.raw())
                .map(drop)
                .map_err(|reason| ConfigError::InvalidValue { field, reason })
        };

        non_negative("layout.width", self.width)?;
        non_negative("layout.height", self.height)?;
        non_negative("layout.margin.top", self.margin.top)?;
        non_negative("layout.margin.right", self.margin.right)?;
        non_negative("layout.margin.bottom", self.margin.bottom)?;
        non_negative("layout.margin.left", self.margin.left)?;
        non_negative("layout.min_column_width", self.min_column_width)?;
        if let Some(row_height) = self.row_height {
            positive("layout.row_height", row_height)?;
        }
        positive("layout.bar_thickness", self.bar_thickness)?;
        positive("layout.max_thickness_ratio", Px(self.max_thickness_ratio))?;
        non_negative("layout.stack_gap", self.stack_gap)?;
        non_negative("layout.corner_radius", self.corner_radius)?;
        non_negative("layout.dots.diameter", self.dots.diameter)?;
        positive("layout.dots.gap", self.dots.gap)?;
        non_negative("layout.dots.top_margin", self.dots.top_margin)?;
        positive("layout.labels.font_size", self.labels.font_size)?;
        non_negative("layout.labels.offset", self.labels.offset)?;

        if !(0.0..=1.0).contains(&self.bar_opacity) {
            return Err(ConfigError::InvalidValue {
                field: "layout.bar_opacity",
                reason: crate::types::NumericError::OutOfRange,
            });
        }

        let reference = self.reference_percent.raw();
        Percent::try_new(reference).map_err(|_| ConfigError::ReferenceOutOfRange { value: reference })?;

        Ok(())
    }
}

impl ChartConfig {
    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(name: &str, source: &str) -> Result<Self, ConfigError> {
        let ctx = SourceContext::new(name, source);
        let config: ChartConfig = toml::from_str(source).map_err(|e| ConfigError::Syntax {
            message: e.message().to_string(),
            src: ctx.named_source(),
            span: e.span().map(Into::into),
        })?;
        config.validate()
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(name: &str, source: &str) -> Result<Self, ConfigError> {
        let ctx = SourceContext::new(name, source);
        let config: ChartConfig = serde_json::from_str(source).map_err(|e| ConfigError::Syntax {
            message: e.to_string(),
            src: ctx.named_source(),
            span: Some(ctx.offset_of(e.line(), e.column()).into()),
        })?;
        config.validate()
    }

    /// Check the invariants serde cannot express. Width floors validate
    /// themselves on construction.
    pub fn validate(self) -> Result<Self, ConfigError> {
        self.layout.validate()?;
        Ok(self)
    }
}
