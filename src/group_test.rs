use pretty_assertions::assert_eq;

use crate::error::Error;
use crate::group::{GroupIterator, Pulled, Want};
use crate::hint::WidthHint;
use crate::row;
use crate::source::RowList;
use crate::value::Value;

struct FixedHint(Option<usize>);

impl WidthHint for FixedHint {
    fn expected_values(&self) -> Option<usize> {
        self.0
    }
}

#[test]
fn zero_width_is_rejected_before_any_fetch() {
    let mut root = GroupIterator::over_rows(vec![row!["a", "b"]]);
    assert_eq!(root.group(0).unwrap_err(), Error::ZeroWidth);

    // The failed call must not have moved the cursor.
    let (head, _child) = root.group(1).expect("valid width").expect("row available");
    assert_eq!(head, row!["a"]);
}

#[test]
fn hinted_pull_requires_a_hint() {
    let mut root = GroupIterator::over_rows(vec![row!["a", "b"]]);
    assert!(matches!(root.pull(Want::Hinted), Err(Error::MissingWidth)));

    let source = RowList::new(vec![row!["a", "b"]]);
    let mut root = GroupIterator::with_hint(source, Box::new(FixedHint(None)));
    assert!(matches!(root.pull(Want::Hinted), Err(Error::MissingWidth)));
}

#[test]
fn hinted_pull_reserves_one_slot_for_the_child() {
    let source = RowList::new(vec![row!["a", "b", "c"]]);
    let mut root = GroupIterator::with_hint(source, Box::new(FixedHint(Some(3))));

    // Three slots: two data columns plus the child handle.
    match root.pull(Want::Hinted).expect("hinted pull") {
        Pulled::Group(head, _child) => assert_eq!(head, row!["a", "b"]),
        other => panic!("expected a group, got {other:?}"),
    }
}

#[test]
fn one_slot_hint_leaves_no_columns() {
    let source = RowList::new(vec![row!["a", "b"]]);
    let mut root = GroupIterator::with_hint(source, Box::new(FixedHint(Some(1))));
    assert!(matches!(root.pull(Want::Hinted), Err(Error::ZeroWidth)));
}

#[test]
fn pull_rest_matches_rest() {
    let mut root = GroupIterator::over_rows(vec![row!["a", "b"]]);
    match root.pull(Want::Rest).expect("terminal pull") {
        Pulled::Leaf(values) => assert_eq!(values, row!["a", "b"]),
        other => panic!("expected a leaf, got {other:?}"),
    }
    assert!(matches!(root.pull(Want::Rest), Ok(Pulled::Eof)));
}

#[test]
fn eof_is_latched() {
    let mut root = GroupIterator::over_rows(Vec::new());
    assert!(root.rest().is_none());
    assert!(root.rest().is_none());
    assert!(matches!(root.pull(Want::Columns(1)), Ok(Pulled::Eof)));
}

#[test]
fn repulling_without_draining_the_child_moves_on() {
    // Calling at the same offset twice must not return the same row twice.
    let rows = vec![row!["X", "fizz"], row!["X", "bang"], row!["Y", "pow"]];
    let mut root = GroupIterator::over_rows(rows);

    let (head, _child) = root.group(1).expect("width").expect("first group");
    assert_eq!(head, row!["X"]);

    // The undrained X group is skipped entirely.
    let (head, _child) = root.group(1).expect("width").expect("second group");
    assert_eq!(head, row!["Y"]);

    assert!(root.group(1).expect("width").is_none());
}

#[test]
fn child_created_on_a_group_boundary_sees_its_row() {
    // The row that opens a new depth-0 group carries a short unchanged
    // prefix; the child created from that row must still drain it.
    let rows = vec![row!["X", "p"], row!["Y", "q"]];
    let mut root = GroupIterator::over_rows(rows);

    let (head, mut leaf) = root.group(1).expect("width").expect("group X");
    assert_eq!(head, row!["X"]);
    assert_eq!(leaf.rest(), Some(row!["p"]));
    assert_eq!(leaf.rest(), None);

    let (head, mut leaf) = root.group(1).expect("width").expect("group Y");
    assert_eq!(head, row!["Y"]);
    assert_eq!(leaf.rest(), Some(row!["q"]));
    assert_eq!(leaf.rest(), None);

    assert!(root.group(1).expect("width").is_none());
}

#[test]
fn all_null_rows_are_invisible_at_their_depth() {
    let rows = vec![
        row![Value::Null, Value::Null],
        row!["a", Value::Null],
        row!["a", "b"],
    ];
    let mut root = GroupIterator::over_rows(rows);

    // The fully null row never surfaces, the half-null row only at depth 0.
    let (head, child) = root.group(1).expect("width").expect("group");
    assert_eq!(head, row!["a"]);
    let leaves: Vec<_> = child.leaves().collect();
    assert_eq!(leaves, vec![row!["b"]]);

    assert!(root.group(1).expect("width").is_none());
}

#[test]
fn leaves_is_fused() {
    let mut leaves = GroupIterator::over_rows(vec![row!["a"]]).leaves();
    assert_eq!(leaves.next(), Some(row!["a"]));
    assert_eq!(leaves.next(), None);
    assert_eq!(leaves.next(), None);
}

#[test]
fn debug_output_names_the_offset() {
    let root = GroupIterator::over_rows(Vec::new());
    let text = format!("{root:?}");
    assert!(text.contains("offset"), "{text}");
}
