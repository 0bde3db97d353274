//! Desired sets for membership reconciliation.
//!
//! Reconciliation has set semantics: order and repetition in a request do not
//! affect the final membership. The helpers here validate raw names and
//! collect them into insertion-ordered sets (first occurrence wins), so the
//! storage layer never sees the same edge twice in one statement sequence.

use indexmap::IndexSet;

use crate::error::CoreError;
use crate::id::{GroupName, UserId};

/// Duplicate-free group names, in first-seen order.
pub type GroupSet = IndexSet<GroupName>;

/// Duplicate-free user ids, in first-seen order.
pub type UserSet = IndexSet<UserId>;

/// Validates raw group names and returns them as a set.
pub fn desired_group_names(raw: Vec<String>) -> Result<GroupSet, CoreError> {
    raw.into_iter().map(GroupName::new).collect()
}

/// Validates raw user ids and returns them as a set.
pub fn desired_user_ids(raw: Vec<String>) -> Result<UserSet, CoreError> {
    raw.into_iter().map(UserId::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let names = desired_group_names(vec!["b".into(), "a".into(), "b".into()]).unwrap();
        let names: Vec<&str> = names.iter().map(GroupName::as_str).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn empty_input_is_empty_set() {
        assert!(desired_group_names(Vec::new()).unwrap().is_empty());
        assert!(desired_user_ids(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn empty_entry_rejects_whole_set() {
        assert_eq!(
            desired_group_names(vec!["a".into(), String::new()]),
            Err(CoreError::EmptyGroupName)
        );
        assert_eq!(
            desired_user_ids(vec![String::new()]),
            Err(CoreError::EmptyUserId)
        );
    }

    fn raw_names() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec("[a-d]{1,2}", 0..48)
    }

    proptest! {
        #[test]
        fn group_set_keeps_exactly_the_input_names(raw in raw_names()) {
            let set = desired_group_names(raw.clone()).unwrap();
            let expected: BTreeSet<&str> = raw.iter().map(String::as_str).collect();
            let actual: BTreeSet<&str> = set.iter().map(GroupName::as_str).collect();
            prop_assert_eq!(set.len(), expected.len());
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn group_set_is_idempotent(raw in raw_names()) {
            let once = desired_group_names(raw).unwrap();
            let again: Vec<String> = once.iter().map(|n| n.as_str().to_string()).collect();
            prop_assert_eq!(desired_group_names(again).unwrap(), once);
        }

        #[test]
        fn user_set_preserves_first_seen_order(raw in raw_names()) {
            let set = desired_user_ids(raw.clone()).unwrap();
            let firsts: Vec<usize> = set
                .iter()
                .filter_map(|id| raw.iter().position(|r| r == id.as_str()))
                .collect();
            let mut sorted = firsts.clone();
            sorted.sort_unstable();
            prop_assert_eq!(firsts, sorted);
        }
    }
}
