//! Directus-backed venue source.
//!
//! The session core assumes a query resolves with the full matching set,
//! so pages are exhausted with limit/offset before a call returns.

use geo::GeoBounds;
use loading::{BoxFuture, SourceError, VenueSource};
use serde::Deserialize;
use venues::Venue;

#[derive(Debug, Deserialize)]
struct ItemsPage {
    data: Vec<Venue>,
}

/// HTTP venue source over a Directus-style items API.
pub struct DirectusVenueSource {
    base_url: String,
    collection: String,
    page_size: usize,
    client: reqwest::Client,
}

impl DirectusVenueSource {
    pub fn new(base_url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            collection: collection.into(),
            page_size: 500,
            client: reqwest::Client::new(),
        }
    }

    /// Page size zero would loop forever, so it is clamped to one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    async fn fetch_all(&self, filters: Vec<(String, String)>) -> Result<Vec<Venue>, SourceError> {
        let url = format!("{}/items/{}", self.base_url, self.collection);
        let mut venues = Vec::new();
        let mut offset = 0usize;

        loop {
            let mut query = filters.clone();
            query.push(("limit".to_string(), self.page_size.to_string()));
            query.push(("offset".to_string(), offset.to_string()));

            let resp = self
                .client
                .get(&url)
                .query(&query)
                .send()
                .await
                .map_err(|e| SourceError::with_source("venue request failed", e))?;

            if !resp.status().is_success() {
                return Err(SourceError::new(format!(
                    "venue source returned {}",
                    resp.status()
                )));
            }

            let page: ItemsPage = resp
                .json()
                .await
                .map_err(|e| SourceError::with_source("malformed venue payload", e))?;

            let got = page.data.len();
            tracing::debug!(offset, got, "venue page fetched");
            venues.extend(page.data);

            match next_offset(offset, got, self.page_size) {
                Some(next) => offset = next,
                None => break,
            }
        }

        Ok(venues)
    }
}

/// A short page means the set is exhausted.
fn next_offset(offset: usize, got: usize, page_size: usize) -> Option<usize> {
    if got < page_size {
        None
    } else {
        Some(offset + page_size)
    }
}

impl VenueSource for DirectusVenueSource {
    fn query_by_bounding_box(
        &self,
        bounds: GeoBounds,
    ) -> BoxFuture<'_, Result<Vec<Venue>, SourceError>> {
        let filters = vec![
            (
                "filter[latitude][_between]".to_string(),
                format!("{},{}", bounds.min_lat, bounds.max_lat),
            ),
            (
                "filter[longitude][_between]".to_string(),
                format!("{},{}", bounds.min_lng, bounds.max_lng),
            ),
        ];
        Box::pin(async move { self.fetch_all(filters).await })
    }

    fn query_by_text(&self, term: &str) -> BoxFuture<'_, Result<Vec<Venue>, SourceError>> {
        let filters = vec![("filter[name][_icontains]".to_string(), term.to_string())];
        Box::pin(async move { self.fetch_all(filters).await })
    }
}
