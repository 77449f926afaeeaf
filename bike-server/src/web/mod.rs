//! Web layer for the bike-share dashboard.
//!
//! Serves the dashboard page, a JSON API over the dashboard state and a
//! server-sent event stream carrying map commands to the browser.

mod dto;
mod events;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use events::EventHub;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
