// File: crates/chart-core/tests/series.rs
// Purpose: Data series editing: positions, selection tracking, duplicate policy and notifications.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use simplegraph_core::series::{decimals, parse_value};
use simplegraph_core::{DataSeries, DuplicatePolicy, Entry, GraphError, SeriesEvent};

fn series_of(items: &[(&str, &str)]) -> DataSeries {
    let mut s = DataSeries::new();
    for (label, value) in items {
        s.insert(*label, value, None).unwrap();
    }
    s
}

#[test]
fn default_inserts_append_in_order() {
    let s = series_of(&[("a", "1"), ("b", "2"), ("c", "3")]);
    assert_eq!(s.pairs(), vec![("a".into(), 1.0), ("b".into(), 2.0), ("c".into(), 3.0)]);
    assert_eq!(s.selection(), Some(2));
}

#[test]
fn insert_goes_after_selection() {
    let mut s = series_of(&[("a", "1"), ("b", "2"), ("c", "3")]);
    s.select(Some(0)).unwrap();
    assert_eq!(s.insert("x", "9", None).unwrap(), 1);
    assert_eq!(s.get(1).unwrap().label, "x");
    assert_eq!(s.selection(), Some(1));

    s.select(None).unwrap();
    assert_eq!(s.insert("first", "0", None).unwrap(), 0);
}

#[test]
fn insert_past_end_is_out_of_range() {
    let mut s = series_of(&[("a", "1")]);
    let err = s.insert("b", "2", Some(5)).unwrap_err();
    assert!(matches!(err, GraphError::IndexOutOfRange { position: 5, len: 1 }));
    assert_eq!(s.len(), 1);
}

#[test]
fn values_accept_comma_and_reject_garbage() {
    assert_eq!(parse_value("3,5").unwrap(), (3.5, Some(1)));
    assert_eq!(parse_value(" -2 ").unwrap(), (-2.0, None));
    assert!(matches!(parse_value("abc"), Err(GraphError::InvalidValue(_))));
    assert!(matches!(parse_value("NaN"), Err(GraphError::InvalidValue(_))));
    assert!(matches!(parse_value("inf"), Err(GraphError::InvalidValue(_))));
    assert_eq!(decimals("1.250"), Some(3));
    assert_eq!(decimals("12"), None);
}

#[test]
fn set_value_keeps_series_on_invalid_input() {
    let mut s = series_of(&[("a", "1.50")]);
    assert_eq!(s.get(0).unwrap().display_value(), "1.50");
    assert!(s.set_value(0, "oops").is_err());
    assert_eq!(s.get(0).unwrap().value, 1.5);
    s.set_value(0, "2").unwrap();
    assert_eq!(s.get(0).unwrap().display_value(), "2");
    assert!(matches!(s.set_value(3, "1"), Err(GraphError::IndexOutOfRange { .. })));
}

#[test]
fn remove_adjusts_selection() {
    let mut s = series_of(&[("a", "1"), ("b", "2"), ("c", "3")]);
    s.select(Some(2)).unwrap();
    assert_eq!(s.remove(0).unwrap(), Entry::new("a", 1.0));
    assert_eq!(s.selection(), Some(1));
    s.remove(1).unwrap();
    assert_eq!(s.selection(), None);
    assert!(s.remove(7).is_err());
}

#[test]
fn moves_swap_neighbours_and_follow_selection() {
    let mut s = series_of(&[("a", "1"), ("b", "2"), ("c", "3")]);
    s.select(Some(1)).unwrap();
    assert_eq!(s.move_up(1), Some((1, 0)));
    assert_eq!(s.selection(), Some(0));
    assert_eq!(s.move_up(0), None);
    assert_eq!(s.move_down(2), None);
    assert_eq!(s.move_down(0), Some((0, 1)));
    let labels: Vec<_> = s.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["a", "b", "c"]);
}

#[test]
fn moves_far_out_of_range_are_no_ops() {
    let mut s = series_of(&[("a", "1"), ("b", "2")]);
    assert_eq!(s.move_down(usize::MAX), None);
    assert_eq!(s.move_up(usize::MAX), None);
    assert_eq!(s.pairs(), vec![("a".into(), 1.0), ("b".into(), 2.0)]);
}

#[test]
fn add_rejects_exact_duplicates_by_default() {
    let mut s = series_of(&[("a", "1")]);
    assert_eq!(s.add("a", "1.0").unwrap(), None);
    assert_eq!(s.add("a", "2").unwrap(), Some(1));
    assert_eq!(s.len(), 2);

    let mut allow = DataSeries::with_policy(DuplicatePolicy::Allow);
    allow.add("a", "1").unwrap();
    assert_eq!(allow.add("a", "1").unwrap(), Some(1));
}

#[test]
fn observers_see_each_mutation() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut s = DataSeries::new();
    let sink = Rc::clone(&seen);
    let id = s.subscribe(move |e| sink.borrow_mut().push(e.clone()));

    s.insert("a", "1", None).unwrap();
    s.insert("b", "2", None).unwrap();
    s.move_down(0);
    s.set_label(0, "B").unwrap();
    s.remove(1).unwrap();
    s.clear();
    assert!(s.unsubscribe(id));
    s.insert("c", "3", None).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            SeriesEvent::EntryAdded { position: 0 },
            SeriesEvent::EntryAdded { position: 1 },
            SeriesEvent::EntryMoved { from: 0, to: 1 },
            SeriesEvent::EntryChanged { position: 0 },
            SeriesEvent::EntryRemoved { position: 1, entry: Entry::new("a", 1.0) },
            SeriesEvent::Cleared,
        ]
    );
}

#[derive(Clone, Debug)]
enum Op {
    Insert(u8, i32),
    Remove(usize),
    Select(Option<usize>),
    Up(usize),
    Down(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u8>(), -1000i32..1000).prop_map(|(l, v)| Op::Insert(l, v)),
        (0usize..8).prop_map(Op::Remove),
        proptest::option::of(0usize..8).prop_map(Op::Select),
        (0usize..8).prop_map(Op::Up),
        (0usize..8).prop_map(Op::Down),
    ]
}

proptest! {
    // A plain Vec plus selection index is the reference model.
    #[test]
    fn matches_vec_model(ops in proptest::collection::vec(op(), 0..40)) {
        let mut s = DataSeries::new();
        let mut model: Vec<(String, f64)> = Vec::new();
        let mut sel: Option<usize> = None;

        for op in ops {
            match op {
                Op::Insert(l, v) => {
                    let at = sel.map(|p| p + 1).unwrap_or(0);
                    let label = format!("e{l}");
                    let got = s.insert(label.clone(), &v.to_string(), None).unwrap();
                    prop_assert_eq!(got, at);
                    model.insert(at, (label, v as f64));
                    sel = Some(at);
                }
                Op::Remove(p) => {
                    let ok = s.remove(p).is_ok();
                    prop_assert_eq!(ok, p < model.len());
                    if ok {
                        model.remove(p);
                        sel = match sel {
                            Some(x) if x == p => None,
                            Some(x) if x > p => Some(x - 1),
                            other => other,
                        };
                    }
                }
                Op::Select(p) => {
                    let ok = s.select(p).is_ok();
                    prop_assert_eq!(ok, p.map_or(true, |p| p < model.len()));
                    if ok { sel = p; }
                }
                Op::Up(p) => {
                    let moved = s.move_up(p);
                    if p > 0 && p < model.len() {
                        prop_assert_eq!(moved, Some((p, p - 1)));
                        model.swap(p, p - 1);
                        sel = sel.map(|x| if x == p { p - 1 } else if x == p - 1 { p } else { x });
                    } else {
                        prop_assert_eq!(moved, None);
                    }
                }
                Op::Down(p) => {
                    let moved = s.move_down(p);
                    if p + 1 < model.len() {
                        prop_assert_eq!(moved, Some((p, p + 1)));
                        model.swap(p, p + 1);
                        sel = sel.map(|x| if x == p { p + 1 } else if x == p + 1 { p } else { x });
                    } else {
                        prop_assert_eq!(moved, None);
                    }
                }
            }
            prop_assert_eq!(s.pairs(), model.clone());
            prop_assert_eq!(s.selection(), sel);
        }
    }
}
