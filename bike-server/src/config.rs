//! Dashboard configuration.

use std::time::Duration;

use crate::domain::Coordinate;

/// Public YouBike 2.0 real-time feed for Taipei.
///
/// Can be replaced at build time through the `BIKE_FEED_URL` variable.
pub const DEFAULT_FEED_URL: &str = match option_env!("BIKE_FEED_URL") {
    Some(url) => url,
    None => "https://tcgbusfs.blob.core.windows.net/dotapp/youbike/v2/youbike_immediate.json",
};

/// Behavioral parameters of the dashboard core.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Period between feed refreshes.
    pub refresh_interval: Duration,

    /// Radius of the "nearby stations" list, in kilometres.
    pub nearby_radius_km: f64,

    /// Maximum number of search results.
    pub max_search_results: usize,

    /// Wait between re-centering the map and opening a popup,
    /// so the camera animation can finish first.
    pub settle_delay: Duration,

    /// Viewports at most this wide (logical pixels) collapse the side
    /// panel after a list selection.
    pub narrow_viewport_px: u32,
}

impl DashboardConfig {
    /// Set a custom refresh interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Set a custom settle delay.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(60),
            nearby_radius_km: 3.0,
            max_search_results: 5,
            settle_delay: Duration::from_millis(500),
            narrow_viewport_px: 768,
        }
    }
}

/// Marker clustering options handed to the map library.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    pub max_cluster_radius: u32,
    pub disable_clustering_at_zoom: u8,
    pub spiderfy_on_max_zoom: bool,
    pub show_coverage_on_hover: bool,
    pub chunk_interval_ms: u32,
    pub chunk_delay_ms: u32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            max_cluster_radius: 30,
            disable_clustering_at_zoom: 16,
            spiderfy_on_max_zoom: true,
            show_coverage_on_hover: false,
            chunk_interval_ms: 200,
            chunk_delay_ms: 50,
        }
    }
}

/// Map view parameters.
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Initial map center (Taipei city hall area).
    pub center: Coordinate,
    pub initial_zoom: u8,
    /// Zoom used when focusing a single station.
    pub station_zoom: u8,
    /// Zoom used when centering on the user.
    pub user_zoom: u8,
    pub tile_url: String,
    pub tile_attribution: String,
    pub cluster: ClusterConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: Coordinate::new(25.0330, 121.5654),
            initial_zoom: 16,
            station_zoom: 18,
            user_zoom: 16,
            tile_url: "https://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}{r}.png"
                .to_string(),
            tile_attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>".to_string(),
            cluster: ClusterConfig::default(),
        }
    }
}
