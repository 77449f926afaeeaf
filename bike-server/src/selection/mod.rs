//! Station selection.
//!
//! Search results, the nearby list and map markers all funnel into one
//! [`SelectStation`] action. The [`SelectionController`] owns the single
//! current selection and asks a [`ViewPresenter`] to move the map, open the
//! station popup and, on narrow screens, collapse the side panel.

mod command;
mod controller;
mod presenter;

pub use command::{SelectStation, SelectionOrigin};
pub use controller::{SelectOutcome, Selection, SelectionController};
pub use presenter::{ViewCommand, ViewPresenter};
