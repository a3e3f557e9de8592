//! Bar geometry: where a bar sits relative to its column's reference line.
//!
//! Two input encodings meet here. Category-driven samples carry a severity
//! rank that [`RankScale`] turns into a pixel magnitude; sized bars carry a
//! signed pixel size directly. Both become a [`BarSpec`] and share one
//! placement routine.

use serde::{Deserialize, Serialize};

use crate::attention::{ColorClass, SeverityRank};
use crate::floor::WidthFloors;
use crate::types::{Percent, Px};

/// Which way a reading is biased relative to the reference line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    #[default]
    Right,
    /// Ideal reading: the bar straddles the reference line.
    Center,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Center => "center",
        }
    }
}

/// The side of the reference line a placed bar occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Both,
}

/// Rank → pixel magnitude: `base + rank * per_rank`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankScale {
    pub base: Px,
    pub per_rank: Px,
}

impl Default for RankScale {
    fn default() -> Self {
        Self {
            base: Px(18.0),
            per_rank: Px(12.0),
        }
    }
}

impl RankScale {
    pub fn width(&self, rank: SeverityRank) -> Px {
        self.base + self.per_rank * rank.0
    }
}

/// A bar before placement: a signed magnitude, its class, and its bias.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSpec {
    pub magnitude: Px,
    pub class: ColorClass,
    pub direction: Direction,
}

impl BarSpec {
    /// Signed-size encoding: negative sizes sit left of the reference.
    pub fn from_signed_size(size: Px, class: ColorClass) -> Self {
        let direction = if size.raw() >= 0.0 {
            Direction::Right
        } else if size.raw() < 0.0 {
            Direction::Left
        } else {
            // NaN has no sign to honour
            Direction::Right
        };
        Self {
            magnitude: size,
            class,
            direction,
        }
    }

    /// Rank encoding: the magnitude comes from the rank scale.
    pub fn from_rank(rank: SeverityRank, scale: &RankScale, class: ColorClass, direction: Direction) -> Self {
        Self {
            magnitude: scale.width(rank),
            class,
            direction,
        }
    }
}

/// A placed bar, relative to the reference line of its column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarRect {
    /// Signed distance from the reference line to the bar's left edge.
    pub offset_from_reference: Px,
    /// One-sided extent. A `Both` bar spans twice this.
    pub width: Px,
    pub side: Side,
    /// The column bound cut the bar short of its normalized width.
    pub clamped: bool,
}

impl BarRect {
    /// Total horizontal span of the bar.
    pub fn span(&self) -> Px {
        match self.side {
            Side::Both => self.width * 2.0,
            Side::Left | Side::Right => self.width,
        }
    }

    /// Left edge in the same coordinate space as `reference_x`.
    pub fn left_edge(&self, reference_x: Px) -> Px {
        reference_x + self.offset_from_reference
    }

    /// Right edge in the same coordinate space as `reference_x`.
    pub fn right_edge(&self, reference_x: Px) -> Px {
        self.left_edge(reference_x) + self.span()
    }
}

/// Place a bar inside a column of width `container` whose reference line
/// sits at `reference` percent of that width. References outside `0..=100`
/// are pinned to the nearest column edge.
///
/// Right bars start at the reference and may extend at most to the column's
/// right edge; left bars end at the reference and stop at the column's left
/// edge. Centre bars are cut to the narrower side so both tails stay equal.
pub fn place_bar(spec: &BarSpec, floors: &WidthFloors, reference: Percent, container: Px) -> BarRect {
    let width = floors.normalized_width(spec.magnitude, spec.class);
    let container = container.max(Px::ZERO);
    let reference_x = reference.clamped().of(container);
    let room_left = reference_x.max(Px::ZERO);
    let room_right = (container - reference_x).max(Px::ZERO);

    let (room, side) = match spec.direction {
        Direction::Right => (room_right, Side::Right),
        Direction::Left => (room_left, Side::Left),
        Direction::Center => (room_left.min(room_right), Side::Both),
    };

    let drawn = width.min(room);
    let clamped = drawn < width;
    if clamped {
        crate::log::debug!(
            width = width.raw(),
            room = room.raw(),
            direction = spec.direction.as_str(),
            "bar clamped to column bound"
        );
    }

    let offset_from_reference = match side {
        Side::Right => Px::ZERO,
        Side::Left | Side::Both => -drawn,
    };

    BarRect {
        offset_from_reference,
        width: drawn,
        side,
        clamped,
    }
}
