use crate::constants::*;
use crate::layout::LayoutGeometry;
use crate::types::*;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete configuration for a proxy sheet run.
///
/// Every component takes what it needs from here; nothing reads process-wide
/// settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProxyOptions {
    // Card
    pub card_width_mm: f32,
    pub card_height_mm: f32,

    // Page
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub columns: usize,
    pub rows: usize,
    pub margin_mm: f32,
    pub gap_mm: f32,

    // Images
    pub pixels_per_mm: f32,
    pub fit_mode: FitMode,

    // Cut lines
    pub cut_lines: bool,
    pub cut_line_extension_mm: f32,

    // Fetching
    pub fetch_timeout_ms: u64,
    pub fetch_max_retries: usize,
    pub download_delay_ms: u64,
    pub user_agent: String,
    pub on_fetch_failure: FailurePolicy,

    // Output splitting
    pub pages_per_file: usize,
}

impl Default for ProxyOptions {
    fn default() -> Self {
        Self {
            card_width_mm: DEFAULT_CARD_WIDTH_MM,
            card_height_mm: DEFAULT_CARD_HEIGHT_MM,
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            columns: 3,
            rows: 3,
            margin_mm: 0.0,
            gap_mm: 0.0,
            pixels_per_mm: DEFAULT_PIXELS_PER_MM,
            fit_mode: FitMode::Stretch,
            cut_lines: true,
            cut_line_extension_mm: DEFAULT_CUT_LINE_EXTENSION_MM,
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            fetch_max_retries: DEFAULT_FETCH_MAX_RETRIES,
            download_delay_ms: DEFAULT_DOWNLOAD_DELAY_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            on_fetch_failure: FailurePolicy::Abort,
            pages_per_file: DEFAULT_PAGES_PER_FILE,
        }
    }
}

impl ProxyOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ProxyError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ProxyError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Page width and height in millimeters, orientation applied
    pub fn page_dimensions_mm(&self) -> (f32, f32) {
        self.paper_size.dimensions_with_orientation(self.orientation)
    }

    /// Card slots on one page
    pub fn slots_per_page(&self) -> usize {
        self.columns * self.rows
    }

    /// Per-request timeout, also used as the wait between retries
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }

    /// Resolved page geometry for these options
    pub fn layout(&self) -> LayoutGeometry {
        LayoutGeometry::compute(self)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ProxyError::Config(
                "Grid must have at least one column and one row".to_string(),
            ));
        }

        if self.pages_per_file == 0 {
            return Err(ProxyError::Config(
                "Pages per file must be at least 1".to_string(),
            ));
        }

        if !(self.card_width_mm > 0.0 && self.card_height_mm > 0.0) {
            return Err(ProxyError::Config(format!(
                "Card size must be positive, got {}mm x {}mm",
                self.card_width_mm, self.card_height_mm
            )));
        }

        if !(self.pixels_per_mm > 0.0) {
            return Err(ProxyError::Config(format!(
                "Pixels per mm must be positive, got {}",
                self.pixels_per_mm
            )));
        }

        if self.margin_mm < 0.0 || self.gap_mm < 0.0 || self.cut_line_extension_mm < 0.0 {
            return Err(ProxyError::Config(
                "Margin, gap and cut line extension must not be negative".to_string(),
            ));
        }

        // Overflow is resolved by shrinking; only a grid with no room left at all is rejected
        let geometry = self.layout();
        let pixels = geometry.card_pixel_size(self.pixels_per_mm);
        if pixels.width == 0 || pixels.height == 0 {
            let (page_w, page_h) = self.page_dimensions_mm();
            return Err(ProxyError::Config(format!(
                "A {}x{} grid with {}mm margin and {}mm gap leaves no room for cards on a {}mm x {}mm page",
                self.columns, self.rows, self.margin_mm, self.gap_mm, page_w, page_h
            )));
        }

        Ok(())
    }
}
