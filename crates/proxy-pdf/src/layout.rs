//! Card grid layout calculation
//!
//! Works out where each card slot sits on the page: the printable area inside
//! the margins, card dimensions shrunk to fit when the nominal grid would
//! overflow, and a grid origin that centers everything.
//!
//! Coordinates are millimeters with y measured down from the top edge of the
//! page, except where a function says it returns PDF points.

use crate::constants::mm_to_pt;
use crate::options::ProxyOptions;
use crate::types::PixelSize;

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A rectangular area
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Resolved geometry of the card grid on one page.
///
/// Derived from configuration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutGeometry {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub gap_mm: f32,
    pub columns: usize,
    pub rows: usize,
    /// Page size minus margins
    pub printable_width_mm: f32,
    pub printable_height_mm: f32,
    /// Card size after any shrinking
    pub card_width_mm: f32,
    pub card_height_mm: f32,
    /// Extent of the whole grid, gaps included
    pub grid_width_mm: f32,
    pub grid_height_mm: f32,
    /// Top-left corner of the grid
    pub origin_x_mm: f32,
    pub origin_y_mm: f32,
    /// Whether the configured card width/height had to shrink
    pub width_shrunk: bool,
    pub height_shrunk: bool,
}

impl LayoutGeometry {
    /// Compute the layout for a set of options.
    pub fn compute(options: &ProxyOptions) -> Self {
        calculate_layout(
            options.page_dimensions_mm(),
            (options.card_width_mm, options.card_height_mm),
            options.margin_mm,
            options.gap_mm,
            options.columns,
            options.rows,
        )
    }

    /// Number of card slots on a page
    pub fn slot_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Grid position of the n-th slot (row-major)
    pub fn grid_position(&self, index: usize) -> GridPosition {
        let cols = self.columns.max(1);
        GridPosition::new(index / cols, index % cols)
    }

    /// Top-left corner of a slot in millimeters, y measured from the page top
    pub fn slot_origin(&self, pos: GridPosition) -> (f32, f32) {
        (
            self.origin_x_mm + pos.col as f32 * (self.card_width_mm + self.gap_mm),
            self.origin_y_mm + pos.row as f32 * (self.card_height_mm + self.gap_mm),
        )
    }

    /// Slot bounds in millimeters, y measured from the page top
    pub fn slot_rect(&self, pos: GridPosition) -> Rect {
        let (x, y) = self.slot_origin(pos);
        Rect::new(x, y, self.card_width_mm, self.card_height_mm)
    }

    /// Slot bounds in PDF points, `y` being the bottom edge measured from the page bottom
    pub fn slot_rect_pt(&self, pos: GridPosition) -> Rect {
        let (x, y_top) = self.slot_origin(pos);
        let y_bottom = self.page_height_mm - (y_top + self.card_height_mm);
        Rect::new(
            mm_to_pt(x),
            mm_to_pt(y_bottom),
            mm_to_pt(self.card_width_mm),
            mm_to_pt(self.card_height_mm),
        )
    }

    /// Bitmap size for one card at the given resolution (truncated to whole pixels)
    pub fn card_pixel_size(&self, pixels_per_mm: f32) -> PixelSize {
        PixelSize::new(
            (self.card_width_mm * pixels_per_mm) as u32,
            (self.card_height_mm * pixels_per_mm) as u32,
        )
    }

    /// Right edge of the grid
    pub fn grid_right_mm(&self) -> f32 {
        self.origin_x_mm + self.grid_width_mm
    }

    /// Bottom edge of the grid
    pub fn grid_bottom_mm(&self) -> f32 {
        self.origin_y_mm + self.grid_height_mm
    }

    /// Log the resolved layout
    pub fn log_summary(&self) {
        log::info!(
            "Page {}mm x {}mm, printable {}mm x {}mm, {}x{} grid",
            self.page_width_mm,
            self.page_height_mm,
            self.printable_width_mm,
            self.printable_height_mm,
            self.columns,
            self.rows
        );
        if self.width_shrunk {
            log::warn!(
                "Card grid too wide for the printable area; card width reduced to {:.1}mm",
                self.card_width_mm
            );
        }
        if self.height_shrunk {
            log::warn!(
                "Card grid too tall for the printable area; card height reduced to {:.1}mm",
                self.card_height_mm
            );
        }
        log::info!(
            "Card {:.1}mm x {:.1}mm, grid {:.1}mm x {:.1}mm starting at ({:.1}mm, {:.1}mm)",
            self.card_width_mm,
            self.card_height_mm,
            self.grid_width_mm,
            self.grid_height_mm,
            self.origin_x_mm,
            self.origin_y_mm
        );
    }
}

/// Extent of `count` cards of `card` size separated by `gap`
fn grid_extent(count: usize, card: f32, gap: f32) -> f32 {
    count as f32 * card + count.saturating_sub(1) as f32 * gap
}

/// Shrink `card` so that `count` of them plus gaps fit in `printable`.
///
/// Returns the (possibly reduced) card size and whether it changed.
fn fit_card(count: usize, card: f32, gap: f32, printable: f32) -> (f32, bool) {
    if count == 0 || grid_extent(count, card, gap) <= printable {
        return (card, false);
    }
    let available = (printable - count.saturating_sub(1) as f32 * gap) / count as f32;
    (available, true)
}

/// Create the layout for a page.
///
/// # Arguments
/// * `page` - Page (width, height) in mm
/// * `card` - Nominal card (width, height) in mm
/// * `margin_mm` - Uniform page margin
/// * `gap_mm` - Space between adjacent cards
/// * `columns` / `rows` - Grid shape
pub fn calculate_layout(
    page: (f32, f32),
    card: (f32, f32),
    margin_mm: f32,
    gap_mm: f32,
    columns: usize,
    rows: usize,
) -> LayoutGeometry {
    let (page_width_mm, page_height_mm) = page;

    let printable_width_mm = page_width_mm - 2.0 * margin_mm;
    let printable_height_mm = page_height_mm - 2.0 * margin_mm;

    let (card_width_mm, width_shrunk) = fit_card(columns, card.0, gap_mm, printable_width_mm);
    let (card_height_mm, height_shrunk) = fit_card(rows, card.1, gap_mm, printable_height_mm);

    let grid_width_mm = grid_extent(columns, card_width_mm, gap_mm);
    let grid_height_mm = grid_extent(rows, card_height_mm, gap_mm);

    let origin_x_mm = margin_mm + (printable_width_mm - grid_width_mm) / 2.0;
    let origin_y_mm = margin_mm + (printable_height_mm - grid_height_mm) / 2.0;

    LayoutGeometry {
        page_width_mm,
        page_height_mm,
        margin_mm,
        gap_mm,
        columns,
        rows,
        printable_width_mm,
        printable_height_mm,
        card_width_mm,
        card_height_mm,
        grid_width_mm,
        grid_height_mm,
        origin_x_mm,
        origin_y_mm,
        width_shrunk,
        height_shrunk,
    }
}

// =============================================================================
// Tests
// =============================================================================
