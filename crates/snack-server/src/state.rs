use std::sync::Arc;

use snack_core::{Clock, ItemLabel, SystemClock};
use snack_sheets::RecordSource;

pub type SourceHandle = Arc<dyn RecordSource>;

/// Per-process state shared by every handler. Nothing in it is mutated
/// after startup.
#[derive(Clone)]
pub struct AppState {
    pub(crate) source: SourceHandle,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) item_label: ItemLabel,
    pub(crate) debug: bool,
}

impl AppState {
    pub fn new(source: SourceHandle, item_label: ItemLabel) -> Self {
        Self {
            source,
            clock: Arc::new(SystemClock),
            item_label,
            debug: false,
        }
    }

    /// Replace the wall clock, e.g. with a [`snack_core::FixedClock`].
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Include error details in 500 responses.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
