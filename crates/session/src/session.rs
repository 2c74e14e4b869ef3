use std::collections::BTreeMap;

use geo::LatLng;
use loading::{
    AreaTracker, RadiusQuery, RequestId, SourceError, SourceQuery, area_key, radius_km_for_zoom,
};
use venues::{MapPoint, MarkerCollection, Venue, VenueCategory};

use crate::config::SessionConfig;
use crate::event_log::{EventLog, SessionEvent};
use crate::status::LoadStatus;

/// Why a fetch was issued; decides merge-versus-replace on completion.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FetchKind {
    /// The one wide load seeded by geolocation (or its fallback).
    Initial,
    /// Pan/zoom expansion; merges into the existing collection.
    Incremental,
    /// Explicit "near me" style re-center; replaces the collection.
    Recenter,
    /// Text search; replaces the collection.
    Search,
}

impl FetchKind {
    fn replaces(self) -> bool {
        matches!(self, FetchKind::Recenter | FetchKind::Search)
    }
}

/// An instruction for the driver: run `query` against the venue source and
/// report the outcome back through [`MapSession::complete`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCommand {
    pub request: RequestId,
    pub kind: FetchKind,
    pub query: SourceQuery,
}

#[derive(Debug)]
struct PendingFetch {
    kind: FetchKind,
    /// Present for bounding-box fetches; completion refines results to the
    /// true circle before reconciliation.
    radius: Option<RadiusQuery>,
}

/// The map page's session state machine.
///
/// All state is owned here and mutated from a single thread; the session
/// performs no I/O itself. Triggers hand back [`FetchCommand`]s, the driver
/// executes them (in any order, possibly overlapping) and reports back via
/// [`complete`](Self::complete). No ordering is enforced between in-flight
/// fetches and none are cancelled: completions reconcile
/// last-resolved-wins, which is acceptable for eventually-consistent
/// reference data and keeps stale results harmless.
///
/// Everything is discarded on drop; nothing persists across sessions.
#[derive(Debug)]
pub struct MapSession {
    config: SessionConfig,
    collection: MarkerCollection,
    areas: AreaTracker,
    pending: BTreeMap<RequestId, PendingFetch>,
    next_request: u64,
    location_settled: bool,
    center: Option<LatLng>,
    selected: Option<String>,
    filter: Option<VenueCategory>,
    last_error: Option<String>,
    events: EventLog,
}

impl MapSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            collection: MarkerCollection::new(),
            areas: AreaTracker::new(),
            pending: BTreeMap::new(),
            next_request: 1,
            location_settled: false,
            center: None,
            selected: None,
            filter: None,
            last_error: None,
            events: EventLog::new(),
        }
    }

    fn issue(
        &mut self,
        kind: FetchKind,
        query: SourceQuery,
        radius: Option<RadiusQuery>,
    ) -> FetchCommand {
        let request = RequestId(self.next_request);
        self.next_request += 1;
        self.pending.insert(request, PendingFetch { kind, radius });
        FetchCommand {
            request,
            kind,
            query,
        }
    }

    /// Marks the tile at issue time so an identical settle while this fetch
    /// is still in flight cannot double-fetch.
    fn issue_radius(&mut self, kind: FetchKind, query: RadiusQuery) -> FetchCommand {
        self.areas.mark_fetched(query.center, query.radius_km);
        self.issue(kind, SourceQuery::BoundingBox(query.bounds()), Some(query))
    }

    /// One-shot geolocation outcome.
    ///
    /// `Some` is the device position; `None` stands for denial, timeout, or
    /// a missing capability, and falls back to the configured center. Only
    /// the first resolution seeds the wide initial fetch; whichever path
    /// lands later is ignored, so the success/fallback race can never
    /// double-fetch.
    pub fn resolve_location(&mut self, fix: Option<LatLng>) -> Option<FetchCommand> {
        if self.location_settled {
            self.events
                .emit("location", "ignoring late geolocation result");
            return None;
        }
        self.location_settled = true;

        let center = match fix {
            Some(p) if p.is_valid() => {
                self.events
                    .emit("location", format!("device position {:.4}, {:.4}", p.lat, p.lng));
                p
            }
            _ => {
                let fallback = self.config.fallback_center;
                self.events.emit(
                    "location",
                    format!("falling back to {:.4}, {:.4}", fallback.lat, fallback.lng),
                );
                fallback
            }
        };

        self.center = Some(center);
        Some(self.issue_radius(
            FetchKind::Initial,
            RadiusQuery::new(center, self.config.initial_radius_km),
        ))
    }

    /// Pan/zoom settle from the rendering surface.
    ///
    /// The incremental radius is a step function of zoom. Only novel
    /// (rounded-center, radius) tiles fetch; this is the only trigger that
    /// consults the area tracker.
    pub fn viewport_settled(&mut self, center: LatLng, zoom: f64) -> Option<FetchCommand> {
        let radius_km = radius_km_for_zoom(zoom);
        if !self.areas.should_fetch(center, radius_km) {
            self.events.emit(
                "viewport",
                format!("area already loaded: {}", area_key(center, radius_km)),
            );
            return None;
        }
        Some(self.issue_radius(FetchKind::Incremental, RadiusQuery::new(center, radius_km)))
    }

    /// Authoritative scope reset around an explicit coordinate ("near me").
    ///
    /// Always fetches; completion replaces the collection.
    pub fn recenter_and_load(&mut self, center: LatLng, radius_km: f64) -> FetchCommand {
        self.center = Some(center);
        self.events.emit(
            "recenter",
            format!("recentering to {:.4}, {:.4}", center.lat, center.lng),
        );
        self.issue_radius(FetchKind::Recenter, RadiusQuery::new(center, radius_km))
    }

    /// Authoritative scope reset from a text search.
    pub fn search(&mut self, term: impl Into<String>) -> FetchCommand {
        let term = term.into();
        self.events.emit("search", format!("searching for \"{term}\""));
        self.issue(FetchKind::Search, SourceQuery::Text(term), None)
    }

    /// Feeds a fetch outcome back into the session.
    ///
    /// Bounding-box results are refined to the true circle first. Initial
    /// and incremental fetches merge; recenter and search replace (and drop
    /// the selection, whose point may be gone from the new scope). Failure
    /// records an error status and preserves every marker already loaded.
    pub fn complete(&mut self, request: RequestId, result: Result<Vec<Venue>, SourceError>) {
        let Some(pending) = self.pending.remove(&request) else {
            self.events
                .emit("fetch", format!("completion for unknown request {request:?}"));
            return;
        };

        match result {
            Ok(venues) => {
                let venues = match pending.radius {
                    Some(radius) => radius.refine(venues),
                    None => venues,
                };
                let reconciled = if pending.kind.replaces() {
                    self.selected = None;
                    self.collection.replace(venues)
                } else {
                    self.collection.merge(venues)
                };
                self.last_error = None;
                self.events.emit(
                    "fetch",
                    format!("reconciled {reconciled} venues ({:?})", pending.kind),
                );
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                self.events.emit("fetch", format!("fetch failed: {err}"));
            }
        }
    }

    pub fn status(&self) -> LoadStatus {
        if !self.pending.is_empty() {
            LoadStatus::Loading
        } else if let Some(message) = &self.last_error {
            LoadStatus::Error(message.clone())
        } else {
            LoadStatus::Idle
        }
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Where the map should be centered, once known.
    pub fn center(&self) -> Option<LatLng> {
        self.center
    }

    /// Changing the filter re-derives the render set only; it never issues
    /// a fetch.
    pub fn set_filter(&mut self, filter: Option<VenueCategory>) {
        self.filter = filter;
    }

    pub fn filter(&self) -> Option<VenueCategory> {
        self.filter
    }

    /// The marker subset the renderer should draw, in stable id order.
    ///
    /// The renderer tears down and redraws from this set on every change
    /// rather than diffing individual markers.
    pub fn markers(&self) -> Vec<&MapPoint> {
        self.collection.filtered(self.filter)
    }

    pub fn collection(&self) -> &MarkerCollection {
        &self.collection
    }

    pub fn areas(&self) -> &AreaTracker {
        &self.areas
    }

    /// Marker click. Only ids currently in the collection can be selected;
    /// recentering on the selected point is the renderer's job.
    pub fn select(&mut self, id: &str) -> bool {
        if self.collection.contains(id) {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&MapPoint> {
        self.selected.as_deref().and_then(|id| self.collection.get(id))
    }

    pub fn events(&self) -> &[SessionEvent] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain()
    }
}
