mod assemble;
pub mod constants;
pub mod fetch;
pub mod layout;
pub mod marks;
mod normalize;
mod options;
mod pipeline;
mod source;
mod stats;
mod types;

pub use assemble::{assemble, document_file_name, megabytes, render_document, write_documents};
pub use fetch::{HttpImageClient, ImageTransport, RetryPolicy, decode_image, fetch_image};
pub use layout::{LayoutGeometry, calculate_layout};
pub use marks::{CutLine, CutLineOrientation, calculate_cut_lines};
pub use normalize::{normalize_card, placeholder_card};
pub use options::*;
pub use pipeline::{build_pages, download_cards, generate, generate_with};
pub use source::{batch_urls, parse_url_list, read_url_file, sample_urls};
pub use stats::calculate_statistics;
pub use types::*;
