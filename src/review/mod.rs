//! Review state layered over the generated test cases.
//!
//! Selection and expansion are keyed by row position, not by test case
//! identity. Whenever the store's test cases are replaced the table resets,
//! which keeps the selection a subset of `0..row_count`.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::ops::{Deref, Range};
use std::rc::{Rc, Weak};

use crate::models::TestCase;
use crate::session::{SessionField, SessionStore, SubscriptionId};

mod render;

pub use render::{PageView, render_page};

/// Fixed number of rows shown per page.
pub const ROWS_PER_PAGE: usize = 10;

/// Selection, expansion and pagination state for the review table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewTable {
    row_count: usize,
    selected: BTreeSet<usize>,
    expanded: BTreeSet<usize>,
    page: usize,
}

impl ReviewTable {
    /// Creates a table over `row_count` rows with nothing selected.
    #[must_use]
    pub fn new(row_count: usize) -> Self {
        Self {
            row_count,
            ..Self::default()
        }
    }

    /// Creates a table bound to the store's test cases.
    ///
    /// The table resets itself every time the test cases are replaced.
    /// Dropping the returned handle removes the subscription.
    #[must_use]
    pub fn attach(store: &Rc<SessionStore>) -> BoundReviewTable {
        let table = Rc::new(RefCell::new(Self::new(store.test_script_count())));
        let weak = Rc::downgrade(&table);
        let subscription = store.subscribe(SessionField::TestScripts, move |current, _| {
            if let Some(bound) = weak.upgrade() {
                bound.borrow_mut().reset(current.test_script_count());
            }
        });
        BoundReviewTable {
            table,
            store: Rc::downgrade(store),
            subscription,
        }
    }

    /// Clears all row state for a new set of `row_count` rows.
    pub fn reset(&mut self, row_count: usize) {
        self.row_count = row_count;
        self.selected.clear();
        self.expanded.clear();
        self.page = 0;
    }

    /// Number of rows in the table.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    /// Flips the selection of row `index`; returns the new state.
    ///
    /// Indices outside the table are ignored and report `false`.
    pub fn toggle_selection(&mut self, index: usize) -> bool {
        if index >= self.row_count {
            return false;
        }
        if self.selected.remove(&index) {
            false
        } else {
            self.selected.insert(index);
            true
        }
    }

    /// Selects every row when `checked`, otherwise clears the selection.
    pub fn select_all(&mut self, checked: bool) {
        self.selected = if checked {
            (0..self.row_count).collect()
        } else {
            BTreeSet::new()
        };
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Returns true when row `index` is selected.
    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Number of selected rows.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected row indices in ascending order.
    #[must_use]
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    /// Returns true when the table has rows and all of them are selected.
    #[must_use]
    pub fn is_all_selected(&self) -> bool {
        self.row_count > 0 && self.selected.len() == self.row_count
    }

    /// Returns true when some, but not all, rows are selected.
    #[must_use]
    pub fn is_partially_selected(&self) -> bool {
        !self.selected.is_empty() && !self.is_all_selected()
    }

    /// Flips the expansion of row `index`; returns the new state.
    pub fn toggle_expanded(&mut self, index: usize) -> bool {
        if index >= self.row_count {
            return false;
        }
        if self.expanded.remove(&index) {
            false
        } else {
            self.expanded.insert(index);
            true
        }
    }

    /// Returns true when row `index` shows its steps.
    #[must_use]
    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    /// Current zero-based page.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Number of pages (at least one, even for an empty table).
    #[must_use]
    pub const fn page_count(&self) -> usize {
        if self.row_count == 0 {
            1
        } else {
            self.row_count.div_ceil(ROWS_PER_PAGE)
        }
    }

    /// Moves to `page`, clamped to the last page.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count().saturating_sub(1));
    }

    /// Row indices shown on the current page.
    #[must_use]
    pub fn page_range(&self) -> Range<usize> {
        let start = self.page.saturating_mul(ROWS_PER_PAGE).min(self.row_count);
        let end = start.saturating_add(ROWS_PER_PAGE).min(self.row_count);
        start..end
    }

    /// Test cases to upload: the selected rows, or every row when nothing
    /// is selected.
    #[must_use]
    pub fn cases_to_upload(&self, cases: &[TestCase]) -> Vec<TestCase> {
        if self.selected.is_empty() {
            return cases.to_vec();
        }
        self.selected
            .iter()
            .filter_map(|index| cases.get(*index).cloned())
            .collect()
    }
}

/// A [`ReviewTable`] kept in step with a session store.
///
/// Dereferences to the shared table; dropping it unsubscribes from the
/// store.
#[derive(Debug)]
pub struct BoundReviewTable {
    table: Rc<RefCell<ReviewTable>>,
    store: Weak<SessionStore>,
    subscription: SubscriptionId,
}

impl Deref for BoundReviewTable {
    type Target = RefCell<ReviewTable>;

    fn deref(&self) -> &Self::Target {
        &self.table
    }
}

impl Drop for BoundReviewTable {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.unsubscribe(self.subscription);
        }
    }
}

#[cfg(test)]
mod tests;
