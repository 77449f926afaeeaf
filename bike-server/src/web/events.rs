//! Browser-facing view presenter.

use tokio::sync::broadcast;
use tracing::trace;

use crate::selection::{ViewCommand, ViewPresenter};

/// Commands buffered per subscriber before it starts lagging.
const CHANNEL_CAPACITY: usize = 64;

/// Fans view commands out to every connected browser.
#[derive(Debug, Clone)]
pub struct EventHub {
    sender: broadcast::Sender<ViewCommand>,
}

impl EventHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewCommand> {
        self.sender.subscribe()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewPresenter for EventHub {
    fn present(&self, command: ViewCommand) {
        // No connected browser is fine.
        if self.sender.send(command).is_err() {
            trace!("no view subscribers");
        }
    }
}
