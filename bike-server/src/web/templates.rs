//! Askama templates for the web frontend.

use askama::Template;

use crate::config::MapConfig;
use crate::feed::Snapshot;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Dashboard page: map, search box, nearby panel and usage chart.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub map: MapView,
    pub status: SnapshotStatusView,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Map parameters rendered as data attributes for the map script.
#[derive(Debug, Clone)]
pub struct MapView {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub initial_zoom: u8,
    pub station_zoom: u8,
    pub tile_url: String,
    pub tile_attribution: String,
    pub max_cluster_radius: u32,
    pub disable_clustering_at_zoom: u8,
    pub spiderfy_on_max_zoom: bool,
    pub show_coverage_on_hover: bool,
    pub chunk_interval_ms: u32,
    pub chunk_delay_ms: u32,
    /// Milliseconds between station list reloads in the browser.
    pub reload_interval_ms: u128,
}

impl MapView {
    pub fn from_config(map: &MapConfig, reload_interval_ms: u128) -> Self {
        Self {
            center_latitude: map.center.latitude,
            center_longitude: map.center.longitude,
            initial_zoom: map.initial_zoom,
            station_zoom: map.station_zoom,
            tile_url: map.tile_url.clone(),
            tile_attribution: map.tile_attribution.clone(),
            max_cluster_radius: map.cluster.max_cluster_radius,
            disable_clustering_at_zoom: map.cluster.disable_clustering_at_zoom,
            spiderfy_on_max_zoom: map.cluster.spiderfy_on_max_zoom,
            show_coverage_on_hover: map.cluster.show_coverage_on_hover,
            chunk_interval_ms: map.cluster.chunk_interval_ms,
            chunk_delay_ms: map.cluster.chunk_delay_ms,
            reload_interval_ms,
        }
    }
}

/// Header line describing the live snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotStatusView {
    pub station_count: usize,
    pub fetched_at: Option<String>,
}

impl SnapshotStatusView {
    pub fn from_snapshot(snapshot: Option<&Snapshot>) -> Self {
        Self {
            station_count: snapshot.map_or(0, |s| s.len()),
            fetched_at: snapshot.map(|s| s.fetched_at.format("%H:%M:%S").to_string()),
        }
    }

    /// Text for the status line.
    pub fn summary(&self) -> String {
        match &self.fetched_at {
            Some(time) => format!("{} stations, updated {}", self.station_count, time),
            None => "Loading stations…".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_view_from_default_config() {
        let view = MapView::from_config(&MapConfig::default(), 60_000);
        assert_eq!(view.center_latitude, 25.0330);
        assert_eq!(view.initial_zoom, 16);
        assert_eq!(view.max_cluster_radius, 30);
        assert!(!view.show_coverage_on_hover);
        assert_eq!(view.reload_interval_ms, 60_000);
    }

    #[test]
    fn status_before_first_snapshot() {
        let status = SnapshotStatusView::from_snapshot(None);
        assert_eq!(status.station_count, 0);
        assert_eq!(status.summary(), "Loading stations…");
    }

    #[test]
    fn status_with_snapshot() {
        let status = SnapshotStatusView {
            station_count: 1342,
            fetched_at: Some("10:05:40".into()),
        };
        assert_eq!(status.summary(), "1342 stations, updated 10:05:40");
    }

    #[test]
    fn index_renders_map_attributes() {
        let html = IndexTemplate {
            map: MapView::from_config(&MapConfig::default(), 60_000),
            status: SnapshotStatusView::from_snapshot(None),
        }
        .render()
        .unwrap();

        assert!(html.contains("data-center-latitude=\"25.033\""));
        assert!(html.contains("data-max-cluster-radius=\"30\""));
        assert!(html.contains("Loading stations"));
    }

    #[test]
    fn error_page_renders_details() {
        let html = ErrorTemplate {
            title: "Not found".into(),
            message: "No such page".into(),
            details: Some("requested page-42".into()),
        }
        .render()
        .unwrap();

        assert!(html.contains("No such page"));
        assert!(html.contains("requested page-42"));
    }
}
