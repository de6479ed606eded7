//! Maps screen state
//!
//! Holds the one-shot position fix, the zoom level, the cumulative
//! offline-tile collection and the latest connectivity reading. Tile
//! downloads are simulated: a fixed delay, then a 10x10 grid at the zoom
//! level that was current when the download started.

use chrono::{DateTime, Utc};
use std::time::Duration;

use super::config::{MAX_ZOOM, MIN_ZOOM};
use super::pending::{Pending, Ticket};
use crate::error::{DownloadRejected, LocationError};
use crate::host::connectivity::ConnectivityStatus;
use crate::host::location::GeoPosition;

/// Tiles per side of one downloaded area
pub const TILE_GRID: u32 = 10;

/// One unit of offline map coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapTile {
    pub x: u32,
    pub y: u32,
    pub z: u8,
    pub downloaded: bool,
}

/// Result of one simulated download
#[derive(Debug, Clone, PartialEq)]
pub struct TileBatch {
    pub zoom: u8,
    pub tiles: Vec<MapTile>,
    pub completed_at: DateTime<Utc>,
}

/// Progress of the position fix
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LocationStatus {
    #[default]
    Locating,
    Located(GeoPosition),
    Failed(LocationError),
}

/// Everything the Maps screen remembers
#[derive(Debug, Clone)]
pub struct MapView {
    location: LocationStatus,
    locate: Pending,
    zoom: u8,
    /// Every tile ever downloaded, duplicates included
    tiles: Vec<MapTile>,
    download: Pending,
    last_download: Option<DateTime<Utc>>,
    connectivity: ConnectivityStatus,
    /// Free-text search box (not wired to any geocoder)
    pub search: String,
}

impl MapView {
    pub fn new(zoom: u8) -> Self {
        Self {
            location: LocationStatus::Locating,
            locate: Pending::new(),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            tiles: Vec::new(),
            download: Pending::new(),
            last_download: None,
            connectivity: ConnectivityStatus::default(),
            search: String::new(),
        }
    }

    // ========== Position ==========

    /// Start the one-shot position query
    pub fn begin_locate(&mut self) -> Ticket {
        self.location = LocationStatus::Locating;
        self.locate.start()
    }

    /// Apply the query's answer. Returns `false` for a stale ticket.
    pub fn finish_locate(&mut self, ticket: Ticket, result: Result<GeoPosition, LocationError>) -> bool {
        if !self.locate.settle(ticket) {
            tracing::debug!("Ignoring stale location fix (ticket {})", ticket.id());
            return false;
        }

        self.location = match result {
            Ok(position) => {
                tracing::info!("📍 Located at {}", position.label());
                LocationStatus::Located(position)
            }
            Err(e) => {
                tracing::warn!("⚠️  Location failed: {}", e);
                LocationStatus::Failed(e)
            }
        };
        true
    }

    pub fn location(&self) -> LocationStatus {
        self.location
    }

    pub fn position(&self) -> Option<GeoPosition> {
        match self.location {
            LocationStatus::Located(position) => Some(position),
            _ => None,
        }
    }

    // ========== Zoom ==========

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn zoom_in(&mut self) -> u8 {
        self.zoom = self.zoom.saturating_add(1).min(MAX_ZOOM);
        self.zoom
    }

    pub fn zoom_out(&mut self) -> u8 {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM);
        self.zoom
    }

    // ========== Offline tiles ==========

    pub fn is_downloading(&self) -> bool {
        self.download.is_pending()
    }

    pub fn can_download(&self) -> bool {
        self.begin_download_check().is_ok()
    }

    fn begin_download_check(&self) -> Result<(), DownloadRejected> {
        if self.position().is_none() {
            return Err(DownloadRejected::NoPosition);
        }
        if self.download.is_pending() {
            return Err(DownloadRejected::InProgress);
        }
        Ok(())
    }

    /// Start downloading the area at the current zoom.
    ///
    /// Returns the ticket and the zoom level the caller must download.
    pub fn begin_download(&mut self) -> Result<(Ticket, u8), DownloadRejected> {
        self.begin_download_check()?;
        let ticket = self.download.start();
        tracing::info!("⬇️  Downloading area at zoom {} (ticket {})", self.zoom, ticket.id());
        Ok((ticket, self.zoom))
    }

    /// Append a finished batch. Returns `false` for a stale ticket.
    pub fn finish_download(&mut self, ticket: Ticket, batch: TileBatch) -> bool {
        if !self.download.settle(ticket) {
            tracing::debug!("Ignoring stale tile batch (ticket {})", ticket.id());
            return false;
        }

        let zoom = batch.zoom;
        self.tiles.extend(batch.tiles);
        self.last_download = Some(batch.completed_at);
        tracing::info!("✅ Offline tiles: {} (last batch at zoom {})", self.tiles.len(), zoom);
        true
    }

    pub fn tiles(&self) -> &[MapTile] {
        &self.tiles
    }

    pub fn last_download(&self) -> Option<DateTime<Utc>> {
        self.last_download
    }

    pub fn is_available_offline(&self) -> bool {
        !self.tiles.is_empty()
    }

    // ========== Connectivity ==========

    pub fn connectivity(&self) -> ConnectivityStatus {
        self.connectivity
    }

    /// Record a connectivity reading. Returns `true` if the status changed.
    pub fn apply_connectivity(&mut self, status: ConnectivityStatus) -> bool {
        if self.connectivity == status {
            return false;
        }
        tracing::info!("Network is now {}", status.label());
        self.connectivity = status;
        true
    }
}

/// The fixed 10x10 grid at `zoom`
pub fn tile_grid(zoom: u8) -> Vec<MapTile> {
    (0..TILE_GRID)
        .flat_map(|x| {
            (0..TILE_GRID).map(move |y| MapTile {
                x,
                y,
                z: zoom,
                downloaded: true,
            })
        })
        .collect()
}

/// Simulated area download: wait, then hand back the grid
pub async fn download_area(delay: Duration, zoom: u8) -> TileBatch {
    tokio::time::sleep(delay).await;
    TileBatch {
        zoom,
        tiles: tile_grid(zoom),
        completed_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_secs(3);

    fn located() -> MapView {
        let mut view = MapView::new(15);
        let ticket = view.begin_locate();
        view.finish_locate(
            ticket,
            Ok(GeoPosition {
                latitude: 48.8584,
                longitude: 2.2945,
            }),
        );
        view
    }

    #[test]
    fn test_tile_grid_shape() {
        let grid = tile_grid(7);
        assert_eq!(grid.len(), 100);
        assert!(grid.iter().all(|t| t.z == 7 && t.downloaded && t.x < 10 && t.y < 10));
        assert_eq!(grid[0], MapTile { x: 0, y: 0, z: 7, downloaded: true });
        assert_eq!(grid[99], MapTile { x: 9, y: 9, z: 7, downloaded: true });
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut view = MapView::new(15);
        for _ in 0..50 {
            view.zoom_in();
        }
        assert_eq!(view.zoom(), 20);

        for _ in 0..100 {
            view.zoom_out();
        }
        assert_eq!(view.zoom(), 1);

        assert_eq!(MapView::new(0).zoom(), 1);
        assert_eq!(MapView::new(200).zoom(), 20);
    }

    #[test]
    fn test_download_needs_position() {
        let mut view = MapView::new(15);
        assert!(!view.can_download());
        assert_eq!(view.begin_download(), Err(DownloadRejected::NoPosition));

        let ticket = view.begin_locate();
        view.finish_locate(ticket, Err(LocationError::PermissionDenied));
        assert_eq!(view.begin_download(), Err(DownloadRejected::NoPosition));
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_downloads_accumulate_duplicates() {
        let mut view = located();

        for n in 1..=4 {
            let (ticket, zoom) = view.begin_download().unwrap();
            assert_eq!(zoom, 15);
            let batch = download_area(DELAY, zoom).await;
            assert!(view.finish_download(ticket, batch));
            assert_eq!(view.tiles().len(), 100 * n);
        }

        assert!(view.is_available_offline());
        assert!(view.last_download().is_some());
        let origin = view.tiles().iter().filter(|t| t.x == 0 && t.y == 0).count();
        assert_eq!(origin, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_download_rejected_while_pending() {
        let mut view = located();
        let (ticket, zoom) = view.begin_download().unwrap();
        assert!(view.is_downloading());
        assert!(!view.can_download());
        assert_eq!(view.begin_download(), Err(DownloadRejected::InProgress));

        view.finish_download(ticket, download_area(DELAY, zoom).await);
        assert!(view.can_download());
        assert_eq!(view.tiles().len(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_download_uses_zoom_at_start() {
        let mut view = located();
        let (ticket, zoom) = view.begin_download().unwrap();
        view.zoom_in();
        view.zoom_in();

        view.finish_download(ticket, download_area(DELAY, zoom).await);
        assert!(view.tiles().iter().all(|t| t.z == 15));
        assert_eq!(view.zoom(), 17);
    }

    #[tokio::test(start_paused = true)]
    async fn test_download_completes_only_after_delay() {
        let early = tokio::time::timeout(Duration::from_millis(2_999), download_area(DELAY, 3)).await;
        assert!(early.is_err());
    }

    #[test]
    fn test_batch_from_torn_down_view_is_ignored() {
        let mut old = located();
        let (ticket, zoom) = old.begin_download().unwrap();

        let mut fresh = located();
        let batch = TileBatch {
            zoom,
            tiles: tile_grid(zoom),
            completed_at: Utc::now(),
        };
        assert!(!fresh.finish_download(ticket, batch));
        assert!(fresh.tiles().is_empty());
    }

    #[test]
    fn test_location_failure_maps_to_message() {
        let cases = [
            (LocationError::PermissionDenied, "Location access denied by user"),
            (LocationError::PositionUnavailable, "Location information is unavailable"),
            (LocationError::Timeout, "Location request timed out"),
            (LocationError::Unknown, "An unknown error occurred"),
        ];
        for (error, message) in cases {
            let mut view = MapView::new(15);
            let ticket = view.begin_locate();
            assert!(view.finish_locate(ticket, Err(error)));
            match view.location() {
                LocationStatus::Failed(e) => assert_eq!(e.to_string(), message),
                other => panic!("unexpected status {:?}", other),
            }
            assert_eq!(view.position(), None);
        }
    }

    #[test]
    fn test_position_is_fixed_once_located() {
        let mut view = located();
        let before = view.position();

        // A duplicate answer for the settled query changes nothing
        let stray = Ticket::issue();
        assert!(!view.finish_locate(stray, Err(LocationError::Timeout)));
        assert_eq!(view.position(), before);
    }

    #[test]
    fn test_connectivity_transitions() {
        let mut view = MapView::new(15);
        assert!(view.connectivity().is_online());

        assert!(!view.apply_connectivity(ConnectivityStatus::Online));
        assert!(view.apply_connectivity(ConnectivityStatus::Offline));
        assert!(!view.connectivity().is_online());
        assert!(view.apply_connectivity(ConnectivityStatus::Online));
    }
}
