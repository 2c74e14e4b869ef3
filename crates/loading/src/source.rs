use std::future::Future;
use std::pin::Pin;

use geo::GeoBounds;
use venues::Venue;

/// Failure raised by a venue source, carrying the upstream cause when
/// there is one.
#[derive(Debug)]
pub struct SourceError {
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Boxed future handed back by [`VenueSource`] methods so the trait stays
/// usable behind `dyn`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What a fetch command asks the source for.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceQuery {
    BoundingBox(GeoBounds),
    Text(String),
}

/// Where venues come from.
///
/// The session layer has no notion of a partial answer: a query either
/// yields every matching venue or fails. Backends that paginate are
/// expected to walk all their pages before resolving. Sources are shared
/// across async tasks, hence the `Send + Sync` bound and the
/// [`BoxFuture`] return type.
pub trait VenueSource: Send + Sync {
    /// All venues whose stored coordinates fall inside `bounds`.
    fn query_by_bounding_box(
        &self,
        bounds: GeoBounds,
    ) -> BoxFuture<'_, Result<Vec<Venue>, SourceError>>;

    /// Free-text venue search.
    fn query_by_text(&self, term: &str) -> BoxFuture<'_, Result<Vec<Venue>, SourceError>>;
}

/// In-memory venue source for tests and offline runs.
pub struct MemoryVenueSource {
    venues: Vec<Venue>,
}

impl MemoryVenueSource {
    pub fn new(venues: Vec<Venue>) -> Self {
        Self { venues }
    }

    fn bbox_hits(&self, bounds: GeoBounds) -> Vec<Venue> {
        self.venues
            .iter()
            .filter(|v| v.position().is_some_and(|p| bounds.contains(p)))
            .cloned()
            .collect()
    }

    fn text_hits(&self, term: &str) -> Vec<Venue> {
        let needle = term.to_lowercase();
        self.venues
            .iter()
            .filter(|v| v.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

impl VenueSource for MemoryVenueSource {
    fn query_by_bounding_box(
        &self,
        bounds: GeoBounds,
    ) -> BoxFuture<'_, Result<Vec<Venue>, SourceError>> {
        let hits = self.bbox_hits(bounds);
        Box::pin(async move { Ok(hits) })
    }

    fn query_by_text(&self, term: &str) -> BoxFuture<'_, Result<Vec<Venue>, SourceError>> {
        let hits = self.text_hits(term);
        Box::pin(async move { Ok(hits) })
    }
}
