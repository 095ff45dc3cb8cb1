//! Property tests over the list state: whatever order transitions arrive
//! in, the container's invariants hold.

use demoday_app::{
    errors::ErrorDetail,
    store::{pager, Delta, Keyed, ListState},
};
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: u8,
    name: String,
}

impl Keyed for Row {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

impl pager::Searchable for Row {
    fn matches_query(&self, needle: &str) -> bool {
        pager::contains(&self.name, needle)
    }
}

#[derive(Debug, Clone)]
enum Op {
    BeginLoad,
    CompleteOk(Vec<u8>),
    CompleteErr,
    Insert(u8),
    Update(u8),
    Remove(u8),
    SetPage(usize),
    SetPageSize(usize),
    Search(String),
}

fn row(id: u8) -> Row {
    Row {
        id,
        name: format!("row {id}"),
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::BeginLoad),
        proptest::collection::btree_set(any::<u8>(), 0..20)
            .prop_map(|ids| Op::CompleteOk(ids.into_iter().collect())),
        Just(Op::CompleteErr),
        any::<u8>().prop_map(Op::Insert),
        any::<u8>().prop_map(Op::Update),
        any::<u8>().prop_map(Op::Remove),
        (0usize..100).prop_map(Op::SetPage),
        (0usize..200).prop_map(Op::SetPageSize),
        "[a-z]{0,4}".prop_map(Op::Search),
    ]
}

fn apply(state: &mut ListState<Row>, op: Op) {
    match op {
        Op::BeginLoad => state.begin_load(),
        Op::CompleteOk(ids) => state.complete_load(Ok(ids.into_iter().map(row).collect())),
        Op::CompleteErr => state.complete_load(Err(ErrorDetail::new("boom"))),
        Op::Insert(id) => {
            state.apply_delta(Delta::inserted(row(id)));
        }
        Op::Update(id) => {
            state.apply_delta(Delta::updated(row(id)));
        }
        Op::Remove(id) => {
            state.apply_delta(Delta::removed(id.to_string()));
        }
        Op::SetPage(n) => state.set_page(n),
        Op::SetPageSize(n) => state.set_page_size(n),
        Op::Search(s) => state.set_search_text(s),
    }
}

proptest! {
    #[test]
    fn invariants_hold_under_any_transition_order(
        ops in proptest::collection::vec(op_strategy(), 0..40)
    ) {
        let mut state: ListState<Row> = ListState::new();
        for op in ops {
            apply(&mut state, op);

            // Never both loading and loaded.
            prop_assert!(!(state.is_loading() && state.is_loaded()));

            // Loading always means no stale error on display.
            if state.is_loading() {
                prop_assert!(state.error().is_none());
            }

            // Page index stays inside the collection.
            prop_assert!(state.page() <= state.last_page());

            // Page size is always one of the configured options.
            prop_assert!(
                demoday_app::store::PAGE_SIZE_OPTIONS.contains(&state.page_size())
            );

            // The projection never overflows a page, whatever the state.
            prop_assert!(pager::visible_rows(&state).len() <= state.page_size());

            // Keys stay unique however deltas interleave.
            let mut keys: Vec<String> = state.items().iter().map(Keyed::key).collect();
            keys.sort();
            let before = keys.len();
            keys.dedup();
            prop_assert_eq!(keys.len(), before);
        }
    }
}
