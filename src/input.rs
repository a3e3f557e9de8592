//! Chart input: parcels and the readings classified for them.
//!
//! The accepted JSON is either a bare array of parcels or an object with a
//! `parcels` array and an optional explicit `columns` list.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::attention::{AttentionCategory, ColorClass, SeverityRank};
use crate::errors::{InputError, SourceContext};
use crate::render::geometry::Direction;

/// A column of the chart grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Parameter name readings are matched against.
    pub key: String,
    /// Display text; defaults to the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Column {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }
}

/// A category-classified reading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub parameter: String,
    pub attention: AttentionCategory,
    #[serde(default)]
    pub direction: Direction,
    #[serde(
        default,
        deserialize_with = "lenient_severity",
        skip_serializing_if = "Option::is_none"
    )]
    pub severity: Option<SeverityRank>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Any number is taken as an explicit severity. Other values are dropped so
/// the category table decides, instead of failing the whole document.
fn lenient_severity<'de, D>(deserializer: D) -> Result<Option<SeverityRank>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSeverity {
        Number(f64),
        Other(IgnoredAny),
    }

    Ok(match RawSeverity::deserialize(deserializer)? {
        RawSeverity::Number(value) if value.is_finite() => Some(SeverityRank(value)),
        RawSeverity::Number(value) => {
            crate::log::warn!(severity = value, "non-finite severity ignored");
            None
        }
        RawSeverity::Other(_) => {
            crate::log::warn!("non-numeric severity ignored");
            None
        }
    })
}

/// A reading that already carries a signed pixel size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizedBar {
    pub parameter: String,
    /// Negative sizes are drawn left of the reference line.
    pub size: f64,
    pub class: ColorClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One row of the chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub parcel: String,
    #[serde(default)]
    pub samples: Vec<Sample>,
    #[serde(default)]
    pub bars: Vec<SizedBar>,
}

impl Parcel {
    /// Parameters this parcel has readings for, first appearance first.
    /// Category samples come before sized bars.
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.samples
            .iter()
            .map(|s| s.parameter.as_str())
            .chain(self.bars.iter().map(|b| b.parameter.as_str()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartInput {
    /// Explicit column order. When empty, columns are derived from the data.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Column>,
    pub parcels: Vec<Parcel>,
}

impl ChartInput {
    pub fn from_parcels(parcels: Vec<Parcel>) -> Self {
        Self {
            columns: Vec::new(),
            parcels,
        }
    }

    /// The grid's columns: the explicit list, or every parameter in order of
    /// first appearance across parcels.
    pub fn columns(&self) -> Vec<Column> {
        if !self.columns.is_empty() {
            return self.columns.clone();
        }

        let mut columns: Vec<Column> = Vec::new();
        for parameter in self.parcels.iter().flat_map(Parcel::parameters) {
            if !columns.iter().any(|c| c.key == parameter) {
                columns.push(Column::new(parameter));
            }
        }
        columns
    }
}

/// Parse chart input JSON. `name` labels the source in diagnostics.
pub fn parse_input(name: &str, source: &str) -> Result<ChartInput, InputError> {
    let ctx = SourceContext::new(name, source);
    let syntax_error = |e: serde_json::Error| InputError::Syntax {
        message: e.to_string(),
        src: ctx.named_source(),
        span: ctx.offset_of(e.line(), e.column()).into(),
    };

    if source.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<Parcel>>(source)
            .map(ChartInput::from_parcels)
            .map_err(syntax_error)
    } else {
        serde_json::from_str::<ChartInput>(source).map_err(syntax_error)
    }
}
