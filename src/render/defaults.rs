//! Default layout settings (all in canvas pixels unless noted)

use crate::types::{Percent, Px};

pub const CANVAS_WIDTH: Px = Px(800.0);
pub const CANVAS_HEIGHT: Px = Px(400.0);
pub const MARGIN_TOP: Px = Px(40.0);
pub const MARGIN_RIGHT: Px = Px(40.0);
pub const MARGIN_BOTTOM: Px = Px(40.0);
pub const MARGIN_LEFT: Px = Px(80.0);
/// Reference line position inside each column
pub const REFERENCE: Percent = Percent(20.0);
pub const MIN_COLUMN_WIDTH: Px = Px(180.0);
pub const BAR_THICKNESS: Px = Px(18.0);
/// Bars never get thicker than this fraction of the row height
pub const MAX_THICKNESS_RATIO: f64 = 0.4;
pub const STACK_GAP: Px = Px(4.0);
pub const CORNER_RADIUS: Px = Px(4.0);
pub const BAR_OPACITY: f64 = 0.95;
pub const STRIPE_COLOR: u32 = 0xf8fafc;

pub const DOT_DIAMETER: Px = Px(2.0);
pub const DOT_GAP: Px = Px(8.0);
/// Keeps the first dot from touching the row edge
pub const DOT_TOP_MARGIN: Px = Px(2.0);
pub const DOT_COLOR: u32 = 0x9ca3af;

pub const FONT_SIZE: Px = Px(12.0);
/// Distance between the grid and its axis labels
pub const LABEL_OFFSET: Px = Px(8.0);
pub const LABEL_COLOR: u32 = 0x111827;
