//! Cut line guides for card sheets
//!
//! Dashed lines along every column and row boundary of the card grid,
//! extended past the grid so they stay visible once the cards are cut out.

use crate::constants::{CUT_LINE_DASH, CUT_LINE_WIDTH, mm_to_pt};
use crate::layout::LayoutGeometry;
use printpdf::{Color, Line, LineDashPattern, LinePoint, Op, Point, Pt, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutLineOrientation {
    Vertical,
    Horizontal,
}

/// One guide line in page millimeters (y measured from the page top).
///
/// A vertical line runs at x = `position_mm` from y = `start_mm` to `end_mm`;
/// a horizontal line runs at y = `position_mm` from x = `start_mm` to `end_mm`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutLine {
    pub orientation: CutLineOrientation,
    pub position_mm: f32,
    pub start_mm: f32,
    pub end_mm: f32,
}

/// Compute cut lines for a layout.
///
/// Produces `columns + 1` vertical lines followed by `rows + 1` horizontal
/// lines. Each is extended by `extension_mm` beyond the grid on both ends and
/// clamped to the page.
pub fn calculate_cut_lines(layout: &LayoutGeometry, extension_mm: f32) -> Vec<CutLine> {
    let left = layout.origin_x_mm;
    let right = layout.grid_right_mm();
    let top = layout.origin_y_mm;
    let bottom = layout.grid_bottom_mm();

    let mut lines = Vec::with_capacity(layout.columns + layout.rows + 2);

    let y_start = (top - extension_mm).max(0.0);
    let y_end = (bottom + extension_mm).min(layout.page_height_mm);
    for col in 0..=layout.columns {
        let x = if col == layout.columns {
            right
        } else {
            left + col as f32 * (layout.card_width_mm + layout.gap_mm)
        };
        lines.push(CutLine {
            orientation: CutLineOrientation::Vertical,
            position_mm: x,
            start_mm: y_start,
            end_mm: y_end,
        });
    }

    let x_start = (left - extension_mm).max(0.0);
    let x_end = (right + extension_mm).min(layout.page_width_mm);
    for row in 0..=layout.rows {
        let y = if row == layout.rows {
            bottom
        } else {
            top + row as f32 * (layout.card_height_mm + layout.gap_mm)
        };
        lines.push(CutLine {
            orientation: CutLineOrientation::Horizontal,
            position_mm: y,
            start_mm: x_start,
            end_mm: x_end,
        });
    }

    lines
}

/// Generate PDF operations drawing the cut lines as thin black dashes
pub fn generate_cut_line_ops(lines: &[CutLine], page_height_mm: f32) -> Vec<Op> {
    let mut ops = Vec::with_capacity(lines.len() + 5);

    ops.push(Op::SaveGraphicsState);
    ops.push(Op::SetOutlineColor {
        col: Color::Rgb(Rgb {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            icc_profile: None,
        }),
    });
    ops.push(Op::SetOutlineThickness {
        pt: Pt(CUT_LINE_WIDTH),
    });
    ops.push(Op::SetLineDashPattern {
        dash: LineDashPattern {
            offset: 0,
            dash_1: Some(CUT_LINE_DASH.0),
            gap_1: Some(CUT_LINE_DASH.1),
            ..Default::default()
        },
    });

    for line in lines {
        let (start, end) = match line.orientation {
            CutLineOrientation::Vertical => (
                (line.position_mm, line.start_mm),
                (line.position_mm, line.end_mm),
            ),
            CutLineOrientation::Horizontal => (
                (line.start_mm, line.position_mm),
                (line.end_mm, line.position_mm),
            ),
        };
        log::debug!(
            "Cut line {:?}: ({:.1}, {:.1}) -> ({:.1}, {:.1})mm",
            line.orientation,
            start.0,
            start.1,
            end.0,
            end.1
        );
        ops.push(Op::DrawLine {
            line: Line {
                points: vec![
                    line_point(start, page_height_mm),
                    line_point(end, page_height_mm),
                ],
                is_closed: false,
            },
        });
    }

    ops.push(Op::RestoreGraphicsState);
    ops
}

/// Convert a top-down millimeter coordinate to a PDF point
fn line_point((x_mm, y_mm): (f32, f32), page_height_mm: f32) -> LinePoint {
    LinePoint {
        p: Point {
            x: Pt(mm_to_pt(x_mm)),
            y: Pt(mm_to_pt(page_height_mm - y_mm)),
        },
        bezier: false,
    }
}
