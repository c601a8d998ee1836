//! Image URL lists: parsing, the built-in sample set, and per-page batching

use crate::types::Result;
use std::path::Path;

/// Parse a newline-delimited URL list.
///
/// Blank lines and `#` comments are skipped, as is anything that does not
/// start with `http`. Order and duplicates are preserved.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| line.starts_with("http"))
        .map(str::to_string)
        .collect()
}

/// Read a URL list from a file
pub async fn read_url_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let contents = tokio::fs::read_to_string(path.as_ref()).await?;
    Ok(parse_url_list(&contents))
}

/// Nine sample card images, enough for one full page
pub fn sample_urls() -> Vec<String> {
    [
        "https://cards.scryfall.io/large/front/3/3/3398df92-8b6f-4966-b97c-528eeabac678.jpg?1645912000",
        "https://cards.scryfall.io/large/front/4/c/4cebd725-a5d1-4dc9-959f-92ff17d11be9.jpg?1730229457",
        "https://cards.scryfall.io/large/front/5/0/502f514f-574e-4868-8103-b9fd673228d9.jpg?1730229373",
        "https://cards.scryfall.io/large/front/a/2/a260c1e2-8fc3-4745-bc17-97fcdf5242c3.jpg?1562933316",
        "https://cards.scryfall.io/large/front/b/8/b8d8f428-9a6d-40a1-aa86-e8d37a048dcf.jpg?1677135450",
        "https://cards.scryfall.io/large/front/b/9/b962ca61-ac60-459d-bbdf-19cc99b66c66.jpg?1730229354",
        "https://cards.scryfall.io/large/front/d/c/dce700d1-67f8-4232-9009-2753d662b1a5.jpg?1562548543",
        "https://cards.scryfall.io/large/front/f/c/fc30e04f-2afa-4e3d-a704-dfda7f393a90.jpg?1730229450",
        "https://cards.scryfall.io/normal/front/4/1/412ceddd-2b9a-4551-a6bf-ae2830a2010a.jpg?1559591578",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Split sources into consecutive groups of `slots_per_page`.
///
/// Produces `ceil(n / slots_per_page)` groups; only the last may be short.
pub fn batch_urls<T: Clone>(urls: &[T], slots_per_page: usize) -> Vec<Vec<T>> {
    urls.chunks(slots_per_page.max(1))
        .map(<[T]>::to_vec)
        .collect()
}
