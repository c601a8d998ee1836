use image::RgbImage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Fetch(#[from] FetchFailure),
    #[error("No images to lay out")]
    NoImages,
}

pub type Result<T> = std::result::Result<T, ProxyError>;

/// Signal returned by the fetcher once every attempt for a URL has failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to fetch {url} after {attempts} attempt(s): {last_error}")]
pub struct FetchFailure {
    pub url: String,
    pub attempts: usize,
    pub last_error: String,
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// How a downloaded image is fitted into a card slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitMode {
    /// Resize to the exact slot size, ignoring the source aspect ratio
    #[default]
    Stretch,
    /// Keep the source aspect ratio and center-crop whatever overhangs
    Crop,
}

/// What the batch downloader does when an image cannot be fetched at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailurePolicy {
    /// Abort the whole run; no PDF is written
    #[default]
    Abort,
    /// Substitute a "No Image" placeholder card and keep going
    Placeholder,
}

/// Pixel dimensions of a card bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A card bitmap sized exactly to its slot.
///
/// The only way to build one is through the normalizer or the placeholder
/// generator, both of which guarantee the pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct CardImage {
    pub(crate) pixels: RgbImage,
    pub(crate) caption: Option<String>,
}

impl CardImage {
    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.pixels.width(), self.pixels.height())
    }

    /// Text drawn centered over the card (placeholders only)
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn is_placeholder(&self) -> bool {
        self.caption.is_some()
    }
}

/// One printed sheet: card slots in row-major order.
///
/// Holds at most `columns * rows` cards; trailing slots stay empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub cards: Vec<CardImage>,
}

impl Page {
    pub fn new(cards: Vec<CardImage>) -> Self {
        Self { cards }
    }
}

/// A chunk of pages bound for a single output file
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub file_name: String,
    pub pages: Vec<Page>,
}

/// A document that has been flushed to disk
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenDocument {
    pub path: PathBuf,
    pub page_count: usize,
    pub byte_size: u64,
}

/// Summary of a complete run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunReport {
    pub documents: Vec<WrittenDocument>,
    pub total_pages: usize,
    pub total_bytes: u64,
}

/// Statistics about a run, computed without downloading anything
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyStatistics {
    /// Number of card images requested
    pub cards: usize,
    /// Number of printed pages
    pub pages: usize,
    /// Number of output files
    pub documents: usize,
    /// Page count of each output file, in order
    pub pages_per_document: Vec<usize>,
    /// Unused slots on the last page
    pub empty_slots: usize,
}
