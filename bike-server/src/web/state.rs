//! Application state for the web layer.

use std::sync::Arc;

use crate::dashboard::Dashboard;
use crate::usage::UsageHistory;

use super::events::EventHub;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The single dashboard view
    pub dashboard: Arc<Dashboard>,

    /// View commands for connected browsers
    pub events: EventHub,

    /// Static usage data for the chart
    pub usage: Arc<UsageHistory>,
}

impl AppState {
    pub fn new(dashboard: Arc<Dashboard>, events: EventHub, usage: UsageHistory) -> Self {
        Self {
            dashboard,
            events,
            usage: Arc::new(usage),
        }
    }
}
