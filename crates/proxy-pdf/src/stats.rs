use crate::options::ProxyOptions;
use crate::types::*;

/// Calculate page and file counts for a run without downloading anything
pub fn calculate_statistics(card_count: usize, options: &ProxyOptions) -> Result<ProxyStatistics> {
    options.validate()?;

    if card_count == 0 {
        return Err(ProxyError::NoImages);
    }

    let slots_per_page = options.slots_per_page();
    let pages = card_count.div_ceil(slots_per_page);

    let pages_per_file = options.pages_per_file;
    let documents = pages.div_ceil(pages_per_file);

    let mut pages_per_document = Vec::with_capacity(documents);
    let mut remaining = pages;
    while remaining > 0 {
        let chunk = remaining.min(pages_per_file);
        pages_per_document.push(chunk);
        remaining -= chunk;
    }

    let empty_slots = pages * slots_per_page - card_count;

    Ok(ProxyStatistics {
        cards: card_count,
        pages,
        documents,
        pages_per_document,
        empty_slots,
    })
}
