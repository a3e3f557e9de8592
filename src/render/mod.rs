//! Chart rendering
//!
//! This module is organized into submodules:
//! - `defaults`: Default layout settings
//! - `geometry`: Bar placement relative to the reference line
//! - `stack`: Vertical slots for bars sharing a cell
//! - `tooltip`: Hover text
//! - `primitives`: Backend-neutral draw primitives
//! - `svg`: SVG generation
//!
//! [`render`] is a pure function: it derives every primitive from scratch on
//! each call and returns a fresh buffer.

pub mod defaults;
pub mod geometry;
pub mod primitives;
pub mod stack;
pub mod svg;
pub mod tooltip;

pub use geometry::{BarRect, BarSpec, Direction, RankScale, Side, place_bar};
pub use primitives::{Baseline, Draw, FilledRect, Label, Primitive, RefDot, TextAnchor};
pub use stack::{OverflowPolicy, StackLayout};

use glam::DVec2;

use crate::config::ChartConfig;
use crate::input::{ChartInput, Column, Parcel};
use crate::types::Px;
use tooltip::{TooltipFields, tooltip_text};

/// The output of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
}

impl RenderedChart {
    pub fn to_svg(&self) -> String {
        svg::to_svg(self)
    }
}

/// Resolved grid dimensions for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub origin: DVec2,
    pub column_width: Px,
    pub row_height: Px,
    pub columns: usize,
    pub rows: usize,
    pub canvas: DVec2,
}

impl GridLayout {
    pub fn new(config: &ChartConfig, columns: usize, rows: usize) -> Self {
        let layout = &config.layout;
        let margin = layout.margin;

        let column_width = if columns == 0 {
            layout.min_column_width
        } else {
            let band = (layout.width - margin.left - margin.right) / columns as f64;
            band.max(layout.min_column_width)
        };

        let row_height = match (layout.row_height, rows) {
            (Some(fixed), _) => fixed,
            (None, 0) => Px::ZERO,
            (None, n) => ((layout.height - margin.top - margin.bottom) / n as f64).max(Px::ZERO),
        };

        let grid_width = margin.left + column_width * columns as f64 + margin.right;
        let grid_height = margin.top + row_height * rows as f64 + margin.bottom;

        Self {
            origin: DVec2::new(margin.left.raw(), margin.top.raw()),
            column_width,
            row_height,
            columns,
            rows,
            canvas: DVec2::new(
                layout.width.max(grid_width).raw(),
                layout.height.max(grid_height).raw(),
            ),
        }
    }

    pub fn column_x(&self, column: usize) -> f64 {
        self.origin.x + self.column_width.raw() * column as f64
    }

    pub fn row_top(&self, row: usize) -> f64 {
        self.origin.y + self.row_height.raw() * row as f64
    }

    pub fn bottom(&self) -> f64 {
        self.row_top(self.rows)
    }
}

/// One bar waiting to be stacked into its cell.
struct CellEntry<'a> {
    spec: BarSpec,
    fill: &'a crate::types::Color,
    attention: String,
    date: Option<&'a str>,
    note: Option<&'a str>,
}

/// Render the chart grid into draw primitives.
///
/// Order: for each parcel row, the optional stripe and the row label, then
/// per column the reference dots followed by that cell's bars in input
/// order; column labels come last.
///
/// The config need not have been through [`ChartConfig::validate`]: a
/// reference position outside `0..=100` is pinned to the column edge.
pub fn render(input: &ChartInput, config: &ChartConfig) -> RenderedChart {
    let columns = input.columns();
    let grid = GridLayout::new(config, columns.len(), input.parcels.len());
    let layout = &config.layout;
    let reference = layout.reference_percent.clamped();

    crate::log::debug!(
        rows = grid.rows,
        columns = grid.columns,
        column_width = grid.column_width.raw(),
        row_height = grid.row_height.raw(),
        canvas_w = grid.canvas.x,
        canvas_h = grid.canvas.y,
        "render grid"
    );

    let stack_layout = StackLayout {
        thickness: layout
            .bar_thickness
            .min(grid.row_height * layout.max_thickness_ratio),
        gap: layout.stack_gap,
    };

    let mut primitives = Vec::new();

    for (row, parcel) in input.parcels.iter().enumerate() {
        let row_top = grid.row_top(row);

        if layout.stripes && row % 2 == 1 {
            primitives.push(Primitive::from(FilledRect {
                origin: DVec2::new(grid.origin.x, row_top),
                size: DVec2::new(
                    grid.column_width.raw() * grid.columns as f64,
                    grid.row_height.raw(),
                ),
                corner_radius: 0.0,
                fill: layout.stripe_color.clone(),
                opacity: 1.0,
                class: None,
                tooltip: None,
            }));
        }

        primitives.push(Primitive::from(Label {
            anchor: DVec2::new(
                grid.origin.x - layout.labels.offset.raw(),
                row_top + grid.row_height.raw() / 2.0,
            ),
            text: parcel.parcel.clone(),
            align: TextAnchor::End,
            baseline: Baseline::Middle,
            font_size: layout.labels.font_size.raw(),
            color: layout.labels.color.clone(),
        }));

        for (index, column) in columns.iter().enumerate() {
            let column_x = grid.column_x(index);
            let reference_x = column_x + reference.of(grid.column_width).raw();

            push_reference_dots(&mut primitives, config, reference_x, row_top, grid.row_height);

            let entries = cell_entries(parcel, column, config);
            let offsets = stack::stack(&entries, grid.row_height, &stack_layout);

            for (entry, offset) in entries.iter().zip(offsets) {
                let rect = place_bar(
                    &entry.spec,
                    &config.floors,
                    reference,
                    grid.column_width,
                );

                let slot = match layout.overflow {
                    OverflowPolicy::Overflow => Some((offset, stack_layout.thickness)),
                    OverflowPolicy::Clip => {
                        stack::clip_slot(offset, stack_layout.thickness, grid.row_height)
                    }
                };
                let Some((top, height)) = slot else {
                    crate::log::debug!(
                        parcel = parcel.parcel.as_str(),
                        parameter = column.key.as_str(),
                        "stacked bar clipped away"
                    );
                    continue;
                };

                let tooltip = tooltip_text(&TooltipFields {
                    parcel: &parcel.parcel,
                    parameter: &column.key,
                    attention: &entry.attention,
                    direction: entry.spec.direction,
                    date: entry.date,
                    note: entry.note,
                });

                primitives.push(Primitive::from(FilledRect {
                    origin: DVec2::new(
                        rect.left_edge(Px(reference_x)).raw(),
                        row_top + top.raw(),
                    ),
                    size: DVec2::new(rect.span().raw(), height.raw()),
                    corner_radius: layout.corner_radius.raw(),
                    fill: entry.fill.clone(),
                    opacity: layout.bar_opacity,
                    class: Some(entry.spec.class),
                    tooltip: Some(tooltip),
                }));
            }
        }
    }

    let label_y = grid.bottom() + layout.labels.offset.raw() + layout.labels.font_size.raw();
    for (index, column) in columns.iter().enumerate() {
        primitives.push(Primitive::from(Label {
            anchor: DVec2::new(
                grid.column_x(index) + grid.column_width.raw() / 2.0,
                label_y,
            ),
            text: column.label().to_string(),
            align: TextAnchor::Middle,
            baseline: Baseline::Alphabetic,
            font_size: layout.labels.font_size.raw(),
            color: layout.labels.color.clone(),
        }));
    }

    RenderedChart {
        width: grid.canvas.x,
        height: grid.canvas.y,
        primitives,
    }
}

/// Number of reference dots that fit entirely inside a row.
pub fn dot_count(row_height: Px, diameter: Px, gap: Px, top_margin: Px) -> usize {
    let room = row_height - top_margin - diameter;
    if room.raw() < 0.0 || gap.raw() <= 0.0 {
        return 0;
    }
    (room.raw() / gap.raw()).floor() as usize + 1
}

fn push_reference_dots(
    primitives: &mut Vec<Primitive>,
    config: &ChartConfig,
    reference_x: f64,
    row_top: f64,
    row_height: Px,
) {
    let dots = &config.layout.dots;
    let count = dot_count(row_height, dots.diameter, dots.gap, dots.top_margin);
    for k in 0..count {
        let top = row_top + dots.top_margin.raw() + dots.gap.raw() * k as f64;
        primitives.push(Primitive::from(RefDot {
            center: DVec2::new(reference_x, top + dots.diameter.raw() / 2.0),
            diameter: dots.diameter.raw(),
            color: dots.color.clone(),
        }));
    }
}

/// The bars of one parcel/parameter cell, in input order: category samples
/// first, then sized bars.
fn cell_entries<'a>(parcel: &'a Parcel, column: &Column, config: &'a ChartConfig) -> Vec<CellEntry<'a>> {
    let samples = parcel
        .samples
        .iter()
        .filter(|s| s.parameter == column.key)
        .map(|s| {
            if !s.attention.is_known() {
                crate::log::debug!(
                    attention = s.attention.as_str(),
                    "unknown attention category, using fallback rank and color"
                );
            }
            let rank = config.severity.resolve_severity(&s.attention, s.severity);
            CellEntry {
                spec: BarSpec::from_rank(rank, &config.rank_scale, s.attention.class(), s.direction),
                fill: config.colors.color(&s.attention),
                attention: s.attention.to_string(),
                date: s.date.as_deref(),
                note: s.note.as_deref(),
            }
        });

    let bars = parcel
        .bars
        .iter()
        .filter(|b| b.parameter == column.key)
        .map(|b| CellEntry {
            spec: BarSpec::from_signed_size(Px(b.size), b.class),
            fill: config.colors.class_color(b.class),
            attention: b.class.to_string(),
            date: b.date.as_deref(),
            note: b.note.as_deref(),
        });

    samples.chain(bars).collect()
}
