//! The end-to-end run: URLs in, PDF files out.
//!
//! Everything happens sequentially. Downloads are spaced by the configured
//! delay, pages are built in order, and documents are finalized in order.

use crate::assemble::{assemble, write_documents};
use crate::fetch::{HttpImageClient, ImageTransport, RetryPolicy, fetch_image};
use crate::layout::LayoutGeometry;
use crate::normalize::{normalize_card, placeholder_card};
use crate::options::ProxyOptions;
use crate::source::batch_urls;
use crate::types::*;
use std::path::Path;

/// Download, normalize and collect the cards for one page.
///
/// Under [`FailurePolicy::Abort`] the first image that exhausts its retries
/// ends the run with [`ProxyError::Fetch`].
pub async fn download_cards<T: ImageTransport>(
    transport: &T,
    urls: &[String],
    layout: &LayoutGeometry,
    options: &ProxyOptions,
) -> Result<Vec<CardImage>> {
    let policy = RetryPolicy::from_options(options);
    let target = layout.card_pixel_size(options.pixels_per_mm);
    let delay = options.download_delay();

    log::info!(
        "Downloading {} image(s) ({:.1}s apart, {:.1}s timeout, up to {} retries)",
        urls.len(),
        delay.as_secs_f32(),
        policy.backoff.as_secs_f32(),
        policy.max_retries
    );

    let mut cards = Vec::with_capacity(urls.len());
    for (index, url) in urls.iter().enumerate() {
        log::info!("#{}/{}: downloading {}", index + 1, urls.len(), url);

        match fetch_image(transport, url, &policy).await {
            Ok(image) => {
                let mode = options.fit_mode;
                let card =
                    tokio::task::spawn_blocking(move || normalize_card(&image, target, mode))
                        .await?;
                cards.push(card);
                log::info!("#{}: done", index + 1);
            }
            Err(failure) => match options.on_fetch_failure {
                FailurePolicy::Abort => {
                    log::error!("#{}: download failed, aborting", index + 1);
                    return Err(failure.into());
                }
                FailurePolicy::Placeholder => {
                    log::warn!("#{}: download failed, using a placeholder", index + 1);
                    cards.push(placeholder_card(target));
                }
            },
        }

        if index + 1 < urls.len() {
            pace(options).await;
        }
    }

    Ok(cards)
}

/// Fetch every URL and group the cards into pages
pub async fn build_pages<T: ImageTransport>(
    transport: &T,
    urls: &[String],
    layout: &LayoutGeometry,
    options: &ProxyOptions,
) -> Result<Vec<Page>> {
    let batches = batch_urls(urls, layout.slot_count());
    log::info!("{} page(s) to build", batches.len());

    let mut pages = Vec::with_capacity(batches.len());
    for (index, batch) in batches.iter().enumerate() {
        if index > 0 {
            pace(options).await;
        }
        log::info!(
            "Batch {}/{}: {} image(s)",
            index + 1,
            batches.len(),
            batch.len()
        );
        let cards = download_cards(transport, batch, layout, options).await?;
        pages.push(Page::new(cards));
    }

    Ok(pages)
}

/// Run the whole pipeline with a caller-supplied transport
pub async fn generate_with<T: ImageTransport>(
    transport: &T,
    urls: &[String],
    options: &ProxyOptions,
    output_dir: impl AsRef<Path>,
) -> Result<RunReport> {
    options.validate()?;

    if urls.is_empty() {
        return Err(ProxyError::NoImages);
    }

    let layout = options.layout();
    layout.log_summary();

    let pages = build_pages(transport, urls, &layout, options).await?;
    let total_pages = pages.len();

    let documents = assemble(pages, options.pages_per_file);
    let written = write_documents(documents, &layout, options, output_dir).await?;

    let total_bytes = written.iter().map(|doc| doc.byte_size).sum();
    Ok(RunReport {
        documents: written,
        total_pages,
        total_bytes,
    })
}

/// Run the whole pipeline over HTTP
pub async fn generate(
    urls: &[String],
    options: &ProxyOptions,
    output_dir: impl AsRef<Path>,
) -> Result<RunReport> {
    let client = HttpImageClient::new(options)?;
    generate_with(&client, urls, options, output_dir).await
}

/// Rate-limit pause between consecutive downloads
async fn pace(options: &ProxyOptions) {
    let delay = options.download_delay();
    if !delay.is_zero() {
        log::debug!("Waiting {:.1}s", delay.as_secs_f32());
        tokio::time::sleep(delay).await;
    }
}
