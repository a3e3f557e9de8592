//! Per-class minimum bar widths.
//!
//! A floor guarantees that even a zero reading stays visible, and the
//! ordering `low <= medium <= high` guarantees that a more urgent class is
//! never drawn narrower than a calmer one for the same magnitude.

use serde::{Deserialize, Serialize};

use crate::attention::ColorClass;
use crate::errors::ConfigError;
use crate::types::Px;

/// Validated width floors. The ordering invariant holds for every value of
/// this type; it is checked once, when the floors are built or deserialized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFloors", into = "RawFloors")]
pub struct WidthFloors {
    low: Px,
    medium: Px,
    high: Px,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawFloors {
    low: f64,
    medium: f64,
    high: f64,
}

impl Default for RawFloors {
    fn default() -> Self {
        WidthFloors::DEFAULT.into()
    }
}

impl WidthFloors {
    pub const DEFAULT: WidthFloors = WidthFloors {
        low: Px(10.0),
        medium: Px(14.0),
        high: Px(20.0),
    };

    pub fn try_new(low: f64, medium: f64, high: f64) -> Result<Self, ConfigError> {
        let check = |field: &'static str, value: f64| {
            Px::try_non_negative(value).map_err(|reason| ConfigError::InvalidValue { field, reason })
        };
        let floors = WidthFloors {
            low: check("floors.low", low)?,
            medium: check("floors.medium", medium)?,
            high: check("floors.high", high)?,
        };

        for pair in ColorClass::ALL.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if floors.floor(upper) < floors.floor(lower) {
                return Err(ConfigError::FloorOrder {
                    lower,
                    upper,
                    lower_value: floors.floor(lower).raw(),
                    upper_value: floors.floor(upper).raw(),
                });
            }
        }

        Ok(floors)
    }

    pub fn floor(&self, class: ColorClass) -> Px {
        match class {
            ColorClass::Low => self.low,
            ColorClass::Medium => self.medium,
            ColorClass::High => self.high,
        }
    }

    /// `max(|magnitude|, floor[class])`.
    ///
    /// Non-finite magnitudes count as zero, so the result is always a finite,
    /// non-negative width.
    pub fn normalized_width(&self, magnitude: Px, class: ColorClass) -> Px {
        let magnitude = if magnitude.is_finite() {
            magnitude.abs()
        } else {
            crate::log::warn!(magnitude = magnitude.raw(), "non-finite magnitude treated as zero");
            Px::ZERO
        };
        magnitude.max(self.floor(class))
    }
}

impl Default for WidthFloors {
    fn default() -> Self {
        WidthFloors::DEFAULT
    }
}

impl TryFrom<RawFloors> for WidthFloors {
    type Error = ConfigError;

    fn try_from(raw: RawFloors) -> Result<Self, Self::Error> {
        WidthFloors::try_new(raw.low, raw.medium, raw.high)
    }
}

impl From<WidthFloors> for RawFloors {
    fn from(floors: WidthFloors) -> Self {
        RawFloors {
            low: floors.low.raw(),
            medium: floors.medium.raw(),
            high: floors.high.raw(),
        }
    }
}
