//! Vertical stacking of bars that share one parcel/parameter cell.

use serde::{Deserialize, Serialize};

use crate::types::Px;

/// What to do when a stack is taller than its row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Keep full bar thickness; the stack may spill past the row edges.
    #[default]
    Overflow,
    /// Cut each slot to the row; slots entirely outside it are dropped.
    Clip,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackLayout {
    pub thickness: Px,
    pub gap: Px,
}

impl StackLayout {
    /// Distance between the tops of consecutive slots.
    pub fn pitch(&self) -> Px {
        self.thickness + self.gap
    }
}

/// `n * thickness + (n - 1) * gap`, or zero for an empty cell.
pub fn stack_extent(count: usize, layout: &StackLayout) -> Px {
    match count {
        0 => Px::ZERO,
        n => layout.thickness * n as f64 + layout.gap * (n - 1) as f64,
    }
}

/// Top offset of each slot, relative to the row top, in input order.
///
/// The whole stack is centred on the row midpoint. The result is not
/// clamped: with [`OverflowPolicy::Overflow`] offsets may be negative or run
/// past `row_height`.
pub fn stack<T>(samples: &[T], row_height: Px, layout: &StackLayout) -> Vec<Px> {
    let extent = stack_extent(samples.len(), layout);
    let first = row_height / 2.0 - extent / 2.0;
    (0..samples.len())
        .map(|i| first + layout.pitch() * i as f64)
        .collect()
}

/// Intersect a slot with `[0, row_height]`. Returns the clipped
/// `(top, height)`, or `None` when nothing of the slot remains.
pub fn clip_slot(top: Px, thickness: Px, row_height: Px) -> Option<(Px, Px)> {
    let clipped_top = top.max(Px::ZERO);
    let clipped_bottom = (top + thickness).min(row_height);
    let height = clipped_bottom - clipped_top;
    if height.raw() > 0.0 {
        Some((clipped_top, height))
    } else {
        None
    }
}
