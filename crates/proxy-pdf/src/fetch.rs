//! Card image downloading with bounded retries
//!
//! The fetch primitive reports permanent failure as a [`FetchFailure`] value;
//! deciding whether that ends the run is left to the caller.

use crate::options::ProxyOptions;
use crate::types::{FetchFailure, Result};
use image::{DynamicImage, Rgb, RgbImage};
use std::future::Future;
use std::time::Duration;

/// Source of raw image bytes for a URL
pub trait ImageTransport {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// HTTP transport backed by reqwest.
///
/// Certificate verification is disabled so that card hosts with broken TLS
/// setups can still be read.
#[derive(Debug, Clone)]
pub struct HttpImageClient {
    client: reqwest::Client,
}

impl HttpImageClient {
    pub fn new(options: &ProxyOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(options.user_agent.clone())
            .timeout(options.fetch_timeout())
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self { client })
    }
}

impl ImageTransport for HttpImageClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Retry behavior for a single image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Wait between attempts
    pub backoff: Duration,
    /// Attempts made after the first one fails
    pub max_retries: usize,
}

impl RetryPolicy {
    pub fn from_options(options: &ProxyOptions) -> Self {
        Self {
            backoff: options.fetch_timeout(),
            max_retries: options.fetch_max_retries,
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_retries + 1
    }
}

/// Download and decode one image, retrying on any failure.
///
/// Makes at most `max_retries + 1` attempts with `backoff` between them.
/// The returned bitmap is always plain RGB.
pub async fn fetch_image<T: ImageTransport>(
    transport: &T,
    url: &str,
    policy: &RetryPolicy,
) -> std::result::Result<RgbImage, FetchFailure> {
    let attempts = policy.max_attempts();
    let mut last_error = String::new();

    for attempt in 0..attempts {
        match try_fetch(transport, url).await {
            Ok(image) => {
                if attempt > 0 {
                    log::info!("Retry {}/{} succeeded", attempt, policy.max_retries);
                }
                return Ok(image);
            }
            Err(e) => {
                last_error = e.to_string();
                if attempt + 1 < attempts {
                    log::warn!("Attempt {}/{} failed: {}", attempt + 1, attempts, e);
                    log::info!("Retrying in {:.1}s...", policy.backoff.as_secs_f32());
                    tokio::time::sleep(policy.backoff).await;
                } else {
                    log::error!("Download failed for {}: {}", url, e);
                    log::error!("Reached the retry limit ({})", policy.max_retries);
                }
            }
        }
    }

    Err(FetchFailure {
        url: url.to_string(),
        attempts,
        last_error,
    })
}

async fn try_fetch<T: ImageTransport>(transport: &T, url: &str) -> Result<RgbImage> {
    let bytes = transport.get(url).await?;
    decode_image(&bytes)
}

/// Decode image bytes into an RGB bitmap
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage> {
    let image = image::load_from_memory(bytes)?;
    Ok(flatten_to_rgb(image))
}

/// Convert any color mode to RGB, compositing transparency onto white
pub fn flatten_to_rgb(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.into_rgb8();
    }

    let rgba = image.into_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = u32::from(a);
        let blend = |c: u8| ((u32::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}
