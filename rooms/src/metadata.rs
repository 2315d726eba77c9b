//! Best-effort enrichment of shared links with a title and a thumbnail.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use jam_model::room::Platform;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkMetadata {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
}

/// Looks up metadata of a shared link. `Ok(None)` means there is nothing to look up or the
/// platform answered without anything useful.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    async fn resolve(&self, url: &str, platform: Platform) -> anyhow::Result<Option<LinkMetadata>>;
}

/// Never finds anything, used when lookups are disabled
#[derive(Debug, Clone, Default)]
pub struct NoMetadata;

#[async_trait]
impl MetadataResolver for NoMetadata {
    async fn resolve(&self, _: &str, _: Platform) -> anyhow::Result<Option<LinkMetadata>> {
        Ok(None)
    }
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
    thumbnail_url: Option<String>,
}

/// Asks the public oEmbed endpoints of SoundCloud, YouTube and Spotify
#[derive(Debug, Clone)]
pub struct OEmbedResolver {
    client: reqwest::Client,
}

impl OEmbedResolver {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("could not build the http client")?;

        Ok(OEmbedResolver { client })
    }
}

/// The oEmbed url for a shared link, `None` for platforms without a public endpoint
pub fn oembed_endpoint(url: &str, platform: Platform) -> Option<Url> {
    let (endpoint, params) = match platform {
        Platform::SoundCloud => (
            "https://soundcloud.com/oembed",
            vec![("format", "json"), ("url", url)],
        ),
        Platform::YouTube => (
            "https://www.youtube.com/oembed",
            vec![("url", url), ("format", "json")],
        ),
        Platform::Spotify => ("https://open.spotify.com/oembed", vec![("url", url)]),
        _ => return None,
    };

    Url::parse_with_params(endpoint, &params).ok()
}

#[async_trait]
impl MetadataResolver for OEmbedResolver {
    async fn resolve(&self, url: &str, platform: Platform) -> anyhow::Result<Option<LinkMetadata>> {
        let Some(endpoint) = oembed_endpoint(url, platform) else {
            return Ok(None);
        };

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .context("oembed request failed")?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let body: OEmbedResponse = response
            .json()
            .await
            .context("could not decode the oembed response")?;

        Ok(Some(LinkMetadata {
            title: body.title.filter(|t| !t.is_empty()),
            thumbnail: body.thumbnail_url.filter(|t| !t.is_empty()),
        }))
    }
}
