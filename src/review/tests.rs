//! Unit tests for review table state.

use rstest::rstest;

use super::{ROWS_PER_PAGE, ReviewTable};
use crate::models::test_support::sample_cases;
use crate::session::SessionStore;

#[test]
fn select_all_then_deselect_one() {
    let mut table = ReviewTable::new(5);

    table.select_all(true);
    assert_eq!(table.selected_count(), 5);
    assert!(table.is_all_selected());

    assert!(!table.toggle_selection(2));

    assert_eq!(table.selected_count(), 4);
    assert_eq!(table.selected_indices(), vec![0, 1, 3, 4]);
    assert!(table.is_partially_selected());
}

#[test]
fn select_all_unchecked_clears_selection() {
    let mut table = ReviewTable::new(3);
    table.toggle_selection(1);

    table.select_all(false);

    assert_eq!(table.selected_count(), 0);
    assert!(!table.is_partially_selected());
}

#[rstest]
#[case(0)]
#[case(3)]
fn out_of_range_rows_cannot_be_selected(#[case] row_count: usize) {
    let mut table = ReviewTable::new(row_count);

    assert!(!table.toggle_selection(row_count));
    assert!(!table.toggle_expanded(row_count + 4));
    assert_eq!(table.selected_count(), 0);
}

#[test]
fn empty_table_is_never_all_selected() {
    let mut table = ReviewTable::new(0);
    table.select_all(true);

    assert!(!table.is_all_selected());
    assert_eq!(table.page_count(), 1);
    assert_eq!(table.page_range(), 0..0);
}

#[rstest]
#[case(0, 1)]
#[case(10, 1)]
#[case(11, 2)]
#[case(25, 3)]
fn page_count_rounds_up(#[case] rows: usize, #[case] expected: usize) {
    assert_eq!(ReviewTable::new(rows).page_count(), expected);
}

#[test]
fn pages_slice_rows_and_clamp() {
    let mut table = ReviewTable::new(23);

    table.set_page(2);
    assert_eq!(table.page_range(), 20..23);

    table.set_page(9);
    assert_eq!(table.page(), 2);

    table.set_page(1);
    assert_eq!(table.page_range(), ROWS_PER_PAGE..2 * ROWS_PER_PAGE);
}

#[test]
fn replacing_store_scripts_resets_attached_table() {
    let store = SessionStore::shared();
    store.set_test_scripts(sample_cases(12));
    let table = ReviewTable::attach(&store);
    {
        let mut state = table.borrow_mut();
        state.select_all(true);
        state.toggle_expanded(11);
        state.set_page(1);
    }

    store.set_test_scripts(sample_cases(3));

    let state = table.borrow();
    assert_eq!(state.row_count(), 3);
    assert_eq!(state.selected_count(), 0);
    assert!(!state.is_expanded(11));
    assert_eq!(state.page(), 0);
    assert!((0..20).all(|index| index < 3 || !state.is_selected(index)));
}

#[test]
fn cases_to_upload_prefers_selection() {
    let cases = sample_cases(4);
    let mut table = ReviewTable::new(cases.len());

    assert_eq!(table.cases_to_upload(&cases).len(), 4);

    table.toggle_selection(3);
    table.toggle_selection(1);
    let chosen: Vec<String> = table
        .cases_to_upload(&cases)
        .into_iter()
        .map(|case| case.id)
        .collect();

    assert_eq!(chosen, vec!["TC_002".to_owned(), "TC_004".to_owned()]);
}

#[test]
fn dropping_bound_table_removes_its_subscription() {
    let store = SessionStore::shared();
    for _ in 0..5 {
        let table = ReviewTable::attach(&store);
        assert_eq!(store.subscriber_count(), 1);
        drop(table);
    }

    assert_eq!(store.subscriber_count(), 0);
    store.set_test_scripts(sample_cases(2));
}

#[test]
fn bound_table_outliving_store_drops_cleanly() {
    let store = SessionStore::shared();
    let table = ReviewTable::attach(&store);
    drop(store);

    assert_eq!(table.borrow().row_count(), 0);
}
