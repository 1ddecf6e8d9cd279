//! Image search with a deterministic placeholder fallback.
//!
//! Media overlays need picture URLs. A stock photo service is used when it
//! is configured and answers with results; otherwise placeholder URLs are
//! derived from the query, so the same query always yields the same images.

use async_trait::async_trait;
use reelfx_core::stable_hash;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ImageSearchConfig;
use crate::error::{AiError, AiResult};

/// Hard cap on images per query.
pub const MAX_IMAGES: usize = 15;

/// Images requested when the caller does not say.
pub const DEFAULT_IMAGE_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Pexels,
    Picsum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResult {
    pub id: String,
    pub url: String,
    pub thumb: String,
    pub alt: String,
    pub photographer: String,
    pub width: u32,
    pub height: u32,
    pub source: ImageSource,
}

/// Images for one query and where they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageResults {
    pub images: Vec<ImageResult>,
    pub source: ImageSource,
}

/// A stock image backend.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    fn name(&self) -> &str;

    async fn search(&self, query: &str, count: usize) -> AiResult<Vec<ImageResult>>;
}

/// Seeded placeholder images for `query`.
pub fn placeholder_images(query: &str, count: usize) -> Vec<ImageResult> {
    (0..count.min(MAX_IMAGES))
        .map(|i| {
            let seed = format!("{query}-{i}");
            let encoded = urlencoding::encode(&seed);
            ImageResult {
                id: format!("picsum-{}-{i}", stable_hash(&seed) % 1000),
                url: format!("https://picsum.photos/seed/{encoded}/800/600"),
                thumb: format!("https://picsum.photos/seed/{encoded}/400/300"),
                alt: query.to_string(),
                photographer: "Lorem Picsum".to_string(),
                width: 800,
                height: 600,
                source: ImageSource::Picsum,
            }
        })
        .collect()
}

/// Search `backend` if present, degrading to placeholders on error or no results.
pub async fn search_images(
    backend: Option<&dyn ImageSearch>,
    query: &str,
    count: usize,
) -> ImageResults {
    let count = count.clamp(1, MAX_IMAGES);
    if let Some(backend) = backend {
        match backend.search(query, count).await {
            Ok(images) if !images.is_empty() => {
                return ImageResults {
                    images,
                    source: ImageSource::Pexels,
                }
            }
            Ok(_) => debug!(backend = backend.name(), query, "no images found"),
            Err(e) => warn!(backend = backend.name(), query, error = %e, "image search failed"),
        }
    }
    ImageResults {
        images: placeholder_images(query, count),
        source: ImageSource::Picsum,
    }
}

// ── Pexels ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct PexelsResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    id: u64,
    width: u32,
    height: u32,
    #[serde(default)]
    photographer: String,
    #[serde(default)]
    alt: Option<String>,
    src: PexelsSrc,
}

#[derive(Debug, Deserialize)]
struct PexelsSrc {
    medium: String,
    small: String,
}

impl PexelsPhoto {
    fn into_result(self, query: &str) -> ImageResult {
        ImageResult {
            id: self.id.to_string(),
            url: self.src.medium,
            thumb: self.src.small,
            alt: self.alt.filter(|a| !a.is_empty()).unwrap_or_else(|| query.to_string()),
            photographer: self.photographer,
            width: self.width,
            height: self.height,
            source: ImageSource::Pexels,
        }
    }
}

pub struct PexelsSearch {
    config: ImageSearchConfig,
    api_key: String,
    client: reqwest::Client,
}

impl PexelsSearch {
    /// `None` when no API key is configured.
    pub fn from_config(config: &ImageSearchConfig, timeout: Duration) -> AiResult<Option<Self>> {
        let Some(api_key) = config.api_key.clone().filter(|k| !k.is_empty()) else {
            return Ok(None);
        };
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Some(Self {
            config: config.clone(),
            api_key,
            client,
        }))
    }
}

#[async_trait]
impl ImageSearch for PexelsSearch {
    fn name(&self) -> &str {
        "pexels"
    }

    async fn search(&self, query: &str, count: usize) -> AiResult<Vec<ImageResult>> {
        let per_page = count.min(self.config.per_page_limit).to_string();
        let response = self
            .client
            .get(&self.config.endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .query(&[("query", query), ("per_page", per_page.as_str()), ("size", "medium")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AiError::Status {
                status: status.as_u16(),
                body: String::new(),
            });
        }
        let body: PexelsResponse = response.json().await?;
        Ok(body.photos.into_iter().map(|p| p.into_result(query)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(AiResult<Vec<ImageResult>>);

    #[async_trait]
    impl ImageSearch for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        async fn search(&self, _query: &str, _count: usize) -> AiResult<Vec<ImageResult>> {
            match &self.0 {
                Ok(images) => Ok(images.clone()),
                Err(_) => Err(AiError::Status {
                    status: 500,
                    body: String::new(),
                }),
            }
        }
    }

    #[test]
    fn test_placeholder_urls_are_seeded() {
        let images = placeholder_images("rocket launch", 2);
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].url, "https://picsum.photos/seed/rocket%20launch-0/800/600");
        assert_eq!(images[1].thumb, "https://picsum.photos/seed/rocket%20launch-1/400/300");
        assert_eq!(images[0].id, format!("picsum-{}-0", stable_hash("rocket launch-0") % 1000));
        assert_eq!(images, placeholder_images("rocket launch", 2));
        assert_eq!(placeholder_images("x", 100).len(), MAX_IMAGES);
    }

    #[test]
    fn test_pexels_photo_mapping() {
        let json = r#"{"photos":[{"id":7,"width":640,"height":480,"photographer":"Ann","alt":"",
            "src":{"medium":"https://m","small":"https://s","original":"https://o"}}]}"#;
        let body: PexelsResponse = serde_json::from_str(json).unwrap();
        let image = body.photos.into_iter().next().unwrap().into_result("sky");
        assert_eq!(image.id, "7");
        assert_eq!(image.url, "https://m");
        assert_eq!(image.thumb, "https://s");
        assert_eq!(image.alt, "sky");
        assert_eq!(image.source, ImageSource::Pexels);
    }

    #[test]
    fn test_pexels_requires_key() {
        let config = ImageSearchConfig::default();
        assert!(PexelsSearch::from_config(&config, Duration::from_secs(5)).unwrap().is_none());
        let keyed = ImageSearchConfig {
            api_key: Some("k".into()),
            ..config
        };
        assert!(PexelsSearch::from_config(&keyed, Duration::from_secs(5)).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_search_degrades_to_placeholders() {
        let none = search_images(None, "city", DEFAULT_IMAGE_COUNT).await;
        assert_eq!(none.source, ImageSource::Picsum);
        assert_eq!(none.images.len(), DEFAULT_IMAGE_COUNT);

        let failing = Canned(Err(AiError::EmptyContent));
        let out = search_images(Some(&failing as &dyn ImageSearch), "city", 3).await;
        assert_eq!(out.source, ImageSource::Picsum);

        let empty = Canned(Ok(Vec::new()));
        let out = search_images(Some(&empty as &dyn ImageSearch), "city", 3).await;
        assert_eq!(out.source, ImageSource::Picsum);

        let mut hit = placeholder_images("city", 1);
        hit[0].source = ImageSource::Pexels;
        let found = Canned(Ok(hit));
        let out = search_images(Some(&found as &dyn ImageSearch), "city", 3).await;
        assert_eq!(out.source, ImageSource::Pexels);
        assert_eq!(out.images.len(), 1);
    }
}
