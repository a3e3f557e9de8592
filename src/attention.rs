//! Attention categories and the tables that map them to severity and colour.
//!
//! Both tables are plain configuration: every lookup has an explicit fallback
//! branch, so unrecognised categories degrade to a neutral rank and a grey
//! fill instead of failing the render.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::Color;

/// Categorical classification of a reading, ordered from least to most urgent.
///
/// Unknown names are kept in [`AttentionCategory::Other`], trimmed and
/// lowercased like the named tiers, and sort after every named tier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttentionCategory {
    LightGreen,
    DarkGreen,
    Yellow,
    Orange,
    Red,
    Other(String),
}

impl AttentionCategory {
    pub fn as_str(&self) -> &str {
        match self {
            AttentionCategory::LightGreen => "light-green",
            AttentionCategory::DarkGreen => "dark-green",
            AttentionCategory::Yellow => "yellow",
            AttentionCategory::Orange => "orange",
            AttentionCategory::Red => "red",
            AttentionCategory::Other(name) => name,
        }
    }

    /// The coarse class used for width floors.
    pub fn class(&self) -> ColorClass {
        match self {
            AttentionCategory::LightGreen | AttentionCategory::DarkGreen => ColorClass::Low,
            AttentionCategory::Yellow | AttentionCategory::Orange => ColorClass::Medium,
            AttentionCategory::Red => ColorClass::High,
            AttentionCategory::Other(_) => ColorClass::Medium,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, AttentionCategory::Other(_))
    }
}

impl From<&str> for AttentionCategory {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light-green" => AttentionCategory::LightGreen,
            "dark-green" => AttentionCategory::DarkGreen,
            "yellow" => AttentionCategory::Yellow,
            "orange" => AttentionCategory::Orange,
            "red" => AttentionCategory::Red,
            other => AttentionCategory::Other(other.to_string()),
        }
    }
}

impl From<String> for AttentionCategory {
    fn from(name: String) -> Self {
        AttentionCategory::from(name.as_str())
    }
}

impl From<AttentionCategory> for String {
    fn from(category: AttentionCategory) -> String {
        category.as_str().to_string()
    }
}

impl fmt::Display for AttentionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-way severity class. Width floors are keyed by this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorClass {
    #[serde(alias = "g", alias = "green")]
    Low,
    #[serde(alias = "yl", alias = "yellow")]
    Medium,
    #[serde(alias = "rd", alias = "red")]
    High,
}

impl ColorClass {
    pub const ALL: [ColorClass; 3] = [ColorClass::Low, ColorClass::Medium, ColorClass::High];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorClass::Low => "low",
            ColorClass::Medium => "medium",
            ColorClass::High => "high",
        }
    }
}

impl fmt::Display for ColorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity rank of a reading. Higher means wider bars.
///
/// Explicit severities are used as given, fractions and negatives included.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeverityRank(pub f64);

impl SeverityRank {
    /// Rank used for categories the table does not know.
    pub const NEUTRAL: SeverityRank = SeverityRank(2.0);
}

/// Category → default severity rank.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeverityTable {
    /// Entries given in configuration replace the defaults one by one.
    #[serde(deserialize_with = "ranks_over_defaults")]
    pub ranks: BTreeMap<AttentionCategory, SeverityRank>,
    pub fallback: SeverityRank,
}

impl Default for SeverityTable {
    fn default() -> Self {
        let ranks = [
            (AttentionCategory::LightGreen, 1.0),
            (AttentionCategory::DarkGreen, 2.0),
            (AttentionCategory::Yellow, 3.0),
            (AttentionCategory::Orange, 3.0),
            (AttentionCategory::Red, 4.0),
        ]
        .into_iter()
        .map(|(category, rank)| (category, SeverityRank(rank)))
        .collect();

        Self {
            ranks,
            fallback: SeverityRank::NEUTRAL,
        }
    }
}

impl SeverityTable {
    /// Table rank for `category`, or the fallback rank.
    pub fn rank(&self, category: &AttentionCategory) -> SeverityRank {
        match self.ranks.get(category) {
            Some(rank) => *rank,
            None => {
                crate::log::debug!(category = category.as_str(), "unknown category, using fallback rank");
                self.fallback
            }
        }
    }

    /// Resolve the rank of a reading. A finite explicit severity always wins.
    pub fn resolve_severity(
        &self,
        category: &AttentionCategory,
        explicit: Option<SeverityRank>,
    ) -> SeverityRank {
        match explicit {
            Some(rank) if rank.0.is_finite() => rank,
            Some(rank) => {
                crate::log::warn!(severity = rank.0, "non-finite severity ignored, using table rank");
                self.rank(category)
            }
            None => self.rank(category),
        }
    }
}

fn ranks_over_defaults<'de, D>(deserializer: D) -> Result<BTreeMap<AttentionCategory, SeverityRank>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut ranks = SeverityTable::default().ranks;
    ranks.extend(BTreeMap::<AttentionCategory, SeverityRank>::deserialize(deserializer)?);
    Ok(ranks)
}

/// Fill colours per coarse class, used by the signed-size encoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassColors {
    pub low: Color,
    pub medium: Color,
    pub high: Color,
}

impl Default for ClassColors {
    fn default() -> Self {
        Self {
            low: Color::from_hex(0x22c55e),
            medium: Color::from_hex(0xfacc15),
            high: Color::from_hex(0xef4444),
        }
    }
}

/// Category → fill colour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorTable {
    #[serde(deserialize_with = "colors_over_defaults")]
    pub categories: BTreeMap<AttentionCategory, Color>,
    pub classes: ClassColors,
    pub fallback: Color,
}

impl Default for ColorTable {
    fn default() -> Self {
        let categories = [
            (AttentionCategory::LightGreen, 0x86efac),
            (AttentionCategory::DarkGreen, 0x15803d),
            (AttentionCategory::Yellow, 0xfacc15),
            (AttentionCategory::Orange, 0xfb923c),
            (AttentionCategory::Red, 0xef4444),
        ]
        .into_iter()
        .map(|(category, hex)| (category, Color::from_hex(hex)))
        .collect();

        Self {
            categories,
            classes: ClassColors::default(),
            fallback: Color::from_hex(0x999999),
        }
    }
}

impl ColorTable {
    pub fn color(&self, category: &AttentionCategory) -> &Color {
        self.categories.get(category).unwrap_or(&self.fallback)
    }

    pub fn class_color(&self, class: ColorClass) -> &Color {
        match class {
            ColorClass::Low => &self.classes.low,
            ColorClass::Medium => &self.classes.medium,
            ColorClass::High => &self.classes.high,
        }
    }
}

fn colors_over_defaults<'de, D>(deserializer: D) -> Result<BTreeMap<AttentionCategory, Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut categories = ColorTable::default().categories;
    categories.extend(BTreeMap::<AttentionCategory, Color>::deserialize(deserializer)?);
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_parse_case_insensitively() {
        assert_eq!(AttentionCategory::from("Red"), AttentionCategory::Red);
        assert_eq!(AttentionCategory::from(" light-green "), AttentionCategory::LightGreen);
        assert_eq!(
            AttentionCategory::from("purple"),
            AttentionCategory::Other("purple".into())
        );
    }

    #[test]
    fn categories_are_totally_ordered() {
        let mut cats: Vec<AttentionCategory> = ["red", "zzz", "yellow", "light-green", "orange", "dark-green"]
            .into_iter()
            .map(AttentionCategory::from)
            .collect();
        cats.sort();
        let names: Vec<&str> = cats.iter().map(AttentionCategory::as_str).collect();
        assert_eq!(names, ["light-green", "dark-green", "yellow", "orange", "red", "zzz"]);
    }

    #[test]
    fn category_classes() {
        assert_eq!(AttentionCategory::DarkGreen.class(), ColorClass::Low);
        assert_eq!(AttentionCategory::Orange.class(), ColorClass::Medium);
        assert_eq!(AttentionCategory::Red.class(), ColorClass::High);
        assert_eq!(AttentionCategory::from("teal").class(), ColorClass::Medium);
    }

    #[test]
    fn explicit_severity_wins() {
        let table = SeverityTable::default();
        let rank = table.resolve_severity(&AttentionCategory::LightGreen, Some(SeverityRank(7.0)));
        assert_eq!(rank, SeverityRank(7.0));
        let rank = table.resolve_severity(&AttentionCategory::Red, Some(SeverityRank(-1.0)));
        assert_eq!(rank, SeverityRank(-1.0));
    }

    #[test]
    fn non_finite_severity_falls_back_to_table() {
        let table = SeverityTable::default();
        let rank = table.resolve_severity(&AttentionCategory::Red, Some(SeverityRank(f64::NAN)));
        assert_eq!(rank, SeverityRank(4.0));
        let rank = table.resolve_severity(&AttentionCategory::Yellow, Some(SeverityRank(f64::INFINITY)));
        assert_eq!(rank, SeverityRank(3.0));
    }

    #[test]
    fn unknown_names_are_normalized() {
        assert_eq!(AttentionCategory::from(" Teal "), AttentionCategory::Other("teal".into()));
        let table: SeverityTable = serde_json::from_str(r#"{ "ranks": { "teal": 1 } }"#).unwrap();
        assert_eq!(table.rank(&AttentionCategory::from("TEAL")), SeverityRank(1.0));
    }

    #[test]
    fn table_ranks() {
        let table = SeverityTable::default();
        assert_eq!(table.resolve_severity(&AttentionCategory::LightGreen, None), SeverityRank(1.0));
        assert_eq!(table.resolve_severity(&AttentionCategory::Orange, None), SeverityRank(3.0));
        assert_eq!(table.resolve_severity(&AttentionCategory::Red, None), SeverityRank(4.0));
    }

    #[test]
    fn unknown_category_falls_back_to_neutral() {
        let table = SeverityTable::default();
        let rank = table.resolve_severity(&AttentionCategory::from("mauve"), None);
        assert_eq!(rank, SeverityRank::NEUTRAL);
    }

    #[test]
    fn unknown_category_gets_fallback_color() {
        let colors = ColorTable::default();
        assert_eq!(colors.color(&AttentionCategory::from("mauve")).to_string(), "#999999");
        assert_eq!(colors.color(&AttentionCategory::Red).to_string(), "#ef4444");
    }

    #[test]
    fn class_aliases_deserialize() {
        let classes: Vec<ColorClass> = serde_json::from_str(r#"["g", "yl", "rd", "medium"]"#).unwrap();
        assert_eq!(
            classes,
            [ColorClass::Low, ColorClass::Medium, ColorClass::High, ColorClass::Medium]
        );
    }

    #[test]
    fn severity_table_deserializes_partial_overrides() {
        let table: SeverityTable = serde_json::from_str(r#"{ "fallback": 3 }"#).unwrap();
        assert_eq!(table.fallback, SeverityRank(3.0));
        assert_eq!(table.rank(&AttentionCategory::Red), SeverityRank(4.0));
    }

    #[test]
    fn rank_overrides_keep_other_defaults() {
        let table: SeverityTable = serde_json::from_str(r#"{ "ranks": { "orange": 4, "teal": 1 } }"#).unwrap();
        assert_eq!(table.rank(&AttentionCategory::Orange), SeverityRank(4.0));
        assert_eq!(table.rank(&AttentionCategory::LightGreen), SeverityRank(1.0));
        assert_eq!(table.rank(&AttentionCategory::from("teal")), SeverityRank(1.0));
    }
}
