//! Tracking of requests that must not overlap.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::WorkbenchError;
use crate::session::SessionStore;

/// Backend operations limited to one request at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    /// Fetching stories from the tracker.
    FetchStories,
    /// Uploading a context file.
    UploadContext,
    /// Scraping a page for context.
    ScrapeUrl,
    /// Downloading the spreadsheet export.
    Download,
    /// Pushing test cases to the tracker.
    UploadToTracker,
}

impl Operation {
    /// Human-readable name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FetchStories => "fetching user stories",
            Self::UploadContext => "uploading context",
            Self::ScrapeUrl => "scraping URL",
            Self::Download => "downloading test cases",
            Self::UploadToTracker => "uploading test cases to Jira",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Set of operations currently awaiting the backend.
#[derive(Debug, Default)]
pub(super) struct InFlight {
    active: RefCell<BTreeSet<Operation>>,
}

impl InFlight {
    /// Marks `operation` as started, refusing a second concurrent start.
    pub(super) fn begin(&self, operation: Operation) -> Result<InFlightGuard<'_>, WorkbenchError> {
        if !self.active.borrow_mut().insert(operation) {
            return Err(WorkbenchError::OperationInProgress {
                operation: operation.name().to_owned(),
            });
        }
        Ok(InFlightGuard {
            owner: self,
            operation,
        })
    }

    pub(super) fn is_active(&self, operation: Operation) -> bool {
        self.active.borrow().contains(&operation)
    }
}

/// Clears its operation when dropped, including when the future holding it
/// is dropped mid-request.
#[derive(Debug)]
pub(super) struct InFlightGuard<'a> {
    owner: &'a InFlight,
    operation: Operation,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner.active.borrow_mut().remove(&self.operation);
    }
}

/// Holds the session's generating flag for the duration of one request.
#[derive(Debug)]
pub(super) struct GeneratingGuard<'a> {
    store: &'a SessionStore,
}

impl<'a> GeneratingGuard<'a> {
    pub(super) fn begin(store: &'a SessionStore) -> Result<Self, WorkbenchError> {
        if store.is_generating() {
            return Err(WorkbenchError::GenerationInProgress);
        }
        store.set_generating(true);
        Ok(Self { store })
    }
}

impl Drop for GeneratingGuard<'_> {
    fn drop(&mut self) {
        self.store.set_generating(false);
    }
}

#[cfg(test)]
mod tests {
    use super::{GeneratingGuard, InFlight, Operation};
    use crate::error::WorkbenchError;
    use crate::session::SessionStore;

    #[test]
    fn second_start_is_refused_until_guard_drops() {
        let in_flight = InFlight::default();
        let guard = in_flight
            .begin(Operation::ScrapeUrl)
            .expect("first start should succeed");

        let error = in_flight
            .begin(Operation::ScrapeUrl)
            .expect_err("second start should be refused");
        assert_eq!(
            error,
            WorkbenchError::OperationInProgress {
                operation: "scraping URL".to_owned(),
            }
        );
        assert!(in_flight.begin(Operation::Download).is_ok());

        drop(guard);
        assert!(!in_flight.is_active(Operation::ScrapeUrl));
    }

    #[test]
    fn generating_flag_is_cleared_on_drop() {
        let store = SessionStore::default();
        let guard = GeneratingGuard::begin(&store).expect("flag should be free");
        assert!(store.is_generating());
        assert!(matches!(
            GeneratingGuard::begin(&store),
            Err(WorkbenchError::GenerationInProgress)
        ));

        drop(guard);

        assert!(!store.is_generating());
    }
}
