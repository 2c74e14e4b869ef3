use std::future::Future;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use geo::LatLng;
use loading::{SourceQuery, VenueSource};
use session::{FetchCommand, LoadStatus, MapSession, SessionConfig};
use venues::VenueCategory;

mod directus;

use directus::DirectusVenueSource;

/// Interactive-map session driver: loads venues around a coordinate and
/// replays pan events against a Directus-style venue API.
#[derive(Debug, Parser)]
#[command(name = "explorer")]
struct Args {
    /// Base URL of the venue API.
    #[arg(long, env = "VENUE_SOURCE_URL")]
    source_url: String,

    /// Collection holding venue records.
    #[arg(long, default_value = "venues")]
    collection: String,

    /// Device latitude; omit to exercise the fallback path.
    #[arg(long)]
    lat: Option<f64>,

    /// Device longitude.
    #[arg(long)]
    lng: Option<f64>,

    /// Replay a viewport settle, as `lat,lng,zoom`. Repeatable.
    #[arg(long = "pan", value_parser = parse_pan)]
    pans: Vec<(f64, f64, f64)>,

    /// Free-text venue search to run after the initial load.
    #[arg(long)]
    search: Option<String>,

    /// Only print venues of this category.
    #[arg(long, value_enum)]
    category: Option<CategoryArg>,

    /// Bound on how long the geolocation step may take, in seconds.
    #[arg(long, default_value_t = 5)]
    location_timeout_secs: u64,

    /// Artificial delay before the simulated fix resolves, in seconds.
    /// Set it past the timeout to exercise the fallback path.
    #[arg(long, default_value_t = 0)]
    location_delay_secs: u64,

    /// Venue API page size used while exhausting results.
    #[arg(long, default_value_t = 500)]
    page_size: usize,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum CategoryArg {
    Gallery,
    Museum,
    Event,
}

impl From<CategoryArg> for VenueCategory {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Gallery => VenueCategory::Gallery,
            CategoryArg::Museum => VenueCategory::Museum,
            CategoryArg::Event => VenueCategory::Event,
        }
    }
}

fn parse_pan(s: &str) -> Result<(f64, f64, f64), String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err("expected lat,lng,zoom".to_string());
    }
    let lat = parts[0].trim().parse().map_err(|e| format!("bad lat: {e}"))?;
    let lng = parts[1].trim().parse().map_err(|e| format!("bad lng: {e}"))?;
    let zoom = parts[2].trim().parse().map_err(|e| format!("bad zoom: {e}"))?;
    Ok((lat, lng, zoom))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let source = DirectusVenueSource::new(&args.source_url, &args.collection)
        .with_page_size(args.page_size);
    let mut session = MapSession::new(SessionConfig::default());

    let wait = Duration::from_secs(args.location_timeout_secs);
    let fix = await_fix(simulated_fix(&args), wait).await;
    if let Some(cmd) = session.resolve_location(fix) {
        run_command(&source, &mut session, cmd).await;
    }

    for &(lat, lng, zoom) in &args.pans {
        match session.viewport_settled(LatLng::new(lat, lng), zoom) {
            Some(cmd) => run_command(&source, &mut session, cmd).await,
            None => info!(lat, lng, zoom, "area already loaded, skipping fetch"),
        }
    }

    if let Some(term) = &args.search {
        let cmd = session.search(term.clone());
        run_command(&source, &mut session, cmd).await;
    }

    session.set_filter(args.category.map(Into::into));

    if let LoadStatus::Error(message) = session.status() {
        warn!("last fetch failed: {message}");
    }

    println!("{} venues on the map:", session.markers().len());
    for point in session.markers() {
        let p = point.position();
        println!(
            "  [{}] {}  ({:.4}, {:.4})",
            point.category(),
            point.name(),
            p.lat,
            p.lng
        );
    }

    for event in session.drain_events() {
        tracing::debug!(seq = event.seq, kind = event.kind, "{}", event.message);
    }
}

/// Stands in for the platform geolocation prompt: the configured
/// coordinate, surfaced after an optional artificial delay so the bounded
/// wait in [`await_fix`] has something to cut short.
async fn simulated_fix(args: &Args) -> Option<LatLng> {
    if args.location_delay_secs > 0 {
        tokio::time::sleep(Duration::from_secs(args.location_delay_secs)).await;
    }
    match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
        _ => None,
    }
}

/// Applies the bounded-wait rule to a geolocation attempt: the prompt's
/// answer when it arrives in time, the fallback path on denial or expiry.
/// A hanging prompt must never block the initial map population.
async fn await_fix<F>(attempt: F, wait: Duration) -> Option<LatLng>
where
    F: Future<Output = Option<LatLng>>,
{
    match tokio::time::timeout(wait, attempt).await {
        Ok(Some(p)) => {
            info!(lat = p.lat, lng = p.lng, "using device position");
            Some(p)
        }
        Ok(None) => {
            info!("no device position, using fallback center");
            None
        }
        Err(_) => {
            warn!("geolocation timed out, using fallback center");
            None
        }
    }
}

async fn run_command(source: &dyn VenueSource, session: &mut MapSession, cmd: FetchCommand) {
    let FetchCommand {
        request,
        kind,
        query,
    } = cmd;
    info!(?request, ?kind, "issuing fetch");

    let result = match &query {
        SourceQuery::BoundingBox(bounds) => source.query_by_bounding_box(*bounds).await,
        SourceQuery::Text(term) => source.query_by_text(term).await,
    };

    if let Err(err) = &result {
        warn!(?request, "fetch failed: {err}");
    }
    session.complete(request, result);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use geo::LatLng;

    use super::await_fix;

    #[tokio::test]
    async fn prompt_answer_inside_the_wait_wins() {
        let here = LatLng::new(52.52, 13.4);
        let fix = await_fix(async move { Some(here) }, Duration::from_secs(1)).await;
        assert_eq!(fix, Some(here));
    }

    #[tokio::test]
    async fn denied_prompt_falls_back() {
        let fix = await_fix(async { None }, Duration::from_secs(1)).await;
        assert_eq!(fix, None);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_prompt_expires_to_the_fallback() {
        let fix = await_fix(
            std::future::pending::<Option<LatLng>>(),
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(fix, None);
    }
}
