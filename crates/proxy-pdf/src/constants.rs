//! Shared constants for proxy sheet generation
//!
//! This module centralizes magic numbers and constants used throughout
//! fetching, layout, and rendering.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Card Defaults
// =============================================================================

/// Standard trading card width (mm)
pub const DEFAULT_CARD_WIDTH_MM: f32 = 63.0;

/// Standard trading card height (mm)
pub const DEFAULT_CARD_HEIGHT_MM: f32 = 88.0;

/// Bitmap resolution used when normalizing card images
pub const DEFAULT_PIXELS_PER_MM: f32 = 10.0;

/// Resolution handed to the PDF writer for embedded card bitmaps
pub const IMAGE_DPI: f32 = 300.0;

// =============================================================================
// Fetching
// =============================================================================

pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5_000;

pub const DEFAULT_FETCH_MAX_RETRIES: usize = 2;

/// Pause between consecutive downloads
pub const DEFAULT_DOWNLOAD_DELAY_MS: u64 = 300;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

// =============================================================================
// Cut Lines
// =============================================================================

/// How far cut lines run past the card grid (mm)
pub const DEFAULT_CUT_LINE_EXTENSION_MM: f32 = 8.0;

/// Line width for cut lines (points)
pub const CUT_LINE_WIDTH: f32 = 0.05;

/// Dash pattern for cut lines: dash length, gap length (points)
pub const CUT_LINE_DASH: (i64, i64) = (1, 2);

// =============================================================================
// Placeholder
// =============================================================================

pub const PLACEHOLDER_BACKGROUND: [u8; 3] = [240, 240, 240];

pub const PLACEHOLDER_BORDER: [u8; 3] = [200, 200, 200];

/// Border thickness in pixels
pub const PLACEHOLDER_BORDER_WIDTH: u32 = 3;

pub const PLACEHOLDER_LABEL: &str = "No Image";

/// Label color as RGB fractions
pub const PLACEHOLDER_LABEL_COLOR: f32 = 150.0 / 255.0;

/// Font size for the placeholder label (points)
pub const PLACEHOLDER_FONT_SIZE: f32 = 12.0;

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

// =============================================================================
// Output
// =============================================================================

pub const DEFAULT_PAGES_PER_FILE: usize = 12;

/// Base name for generated files
pub const OUTPUT_STEM: &str = "proxy_cards";
