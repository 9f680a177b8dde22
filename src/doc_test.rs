use proptest::prelude::*;

use super::*;

fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Element {
    Element::new(Uuid::new_v4(), ShapeKind::Rectangle, Bounds::new(x1, y1, x2, y2))
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn bounds_min_max_ignore_corner_order() {
    let b = Bounds::new(50.0, 40.0, 10.0, 20.0);
    assert_eq!(b.min_x(), 10.0);
    assert_eq!(b.max_x(), 50.0);
    assert_eq!(b.min_y(), 20.0);
    assert_eq!(b.max_y(), 40.0);
    assert_eq!(b.width(), 40.0);
    assert_eq!(b.height(), 20.0);
}

#[test]
fn bounds_normalized_orders_corners() {
    let b = Bounds::new(50.0, 10.0, 20.0, 40.0).normalized();
    assert_eq!(b, Bounds::new(20.0, 10.0, 50.0, 40.0));
    assert_eq!(b.normalized(), b);
}

#[test]
fn bounds_at_is_zero_size() {
    let b = Bounds::at(Point::new(3.0, 4.0));
    assert_eq!(b, Bounds::new(3.0, 4.0, 3.0, 4.0));
    assert_eq!(b.width(), 0.0);
    assert_eq!(b.height(), 0.0);
}

#[test]
fn bounds_contains_includes_edges() {
    let b = Bounds::new(10.0, 10.0, 50.0, 50.0);
    assert!(b.contains(10.0, 10.0));
    assert!(b.contains(50.0, 30.0));
    assert!(b.contains(30.0, 30.0));
    assert!(!b.contains(9.9, 30.0));
    assert!(!b.contains(30.0, 50.1));
}

#[test]
fn bounds_origin_is_first_corner() {
    let b = Bounds::new(40.0, 30.0, 10.0, 5.0);
    assert_eq!(b.origin(), Point::new(40.0, 30.0));
}

// =============================================================
// Element / SelectedElement
// =============================================================

#[test]
fn element_with_bounds_keeps_identity() {
    let e = rect(0.0, 0.0, 10.0, 10.0);
    let moved = e.with_bounds(Bounds::new(5.0, 5.0, 15.0, 15.0));
    assert_eq!(moved.id, e.id);
    assert_eq!(moved.kind, e.kind);
    assert_eq!(moved.bounds, Bounds::new(5.0, 5.0, 15.0, 15.0));
}

#[test]
fn picked_records_offset_from_origin() {
    let e = rect(10.0, 20.0, 50.0, 60.0);
    let sel = SelectedElement::picked(e.clone(), Point::new(15.0, 27.0), Some(HandleTag::Inside));
    assert_eq!(sel.offset_x, 5.0);
    assert_eq!(sel.offset_y, 7.0);
    assert_eq!(sel.position, Some(HandleTag::Inside));
    assert_eq!(sel.id(), e.id);
}

#[test]
fn settled_has_zero_offsets_and_no_position() {
    let sel = SelectedElement::settled(rect(0.0, 0.0, 1.0, 1.0));
    assert_eq!(sel.offset_x, 0.0);
    assert_eq!(sel.offset_y, 0.0);
    assert_eq!(sel.position, None);
}

// =============================================================
// Selection
// =============================================================

#[test]
fn selection_toggle_adds_then_removes() {
    let e = rect(0.0, 0.0, 10.0, 10.0);
    let mut sel = Selection::default();
    assert!(sel.toggle(SelectedElement::settled(e.clone())));
    assert!(sel.contains(e.id));
    assert!(!sel.toggle(SelectedElement::settled(e.clone())));
    assert!(!sel.contains(e.id));
    assert!(sel.is_empty());
}

#[test]
fn selection_membership_is_by_id_not_value() {
    let e = rect(0.0, 0.0, 10.0, 10.0);
    let mut sel = Selection::default();
    sel.upsert(SelectedElement::settled(e.clone()));
    // Same id, different box and offsets: still the same member.
    let moved = e.with_bounds(Bounds::new(100.0, 100.0, 110.0, 110.0));
    assert!(!sel.toggle(SelectedElement::picked(moved, Point::new(105.0, 105.0), None)));
    assert!(sel.is_empty());
}

#[test]
fn selection_upsert_overwrites_in_place() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(20.0, 20.0, 30.0, 30.0);
    let mut sel = Selection::default();
    sel.upsert(SelectedElement::settled(a.clone()));
    sel.upsert(SelectedElement::settled(b.clone()));
    let a2 = a.with_bounds(Bounds::new(1.0, 1.0, 11.0, 11.0));
    sel.upsert(SelectedElement::settled(a2.clone()));
    assert_eq!(sel.len(), 2);
    assert_eq!(sel.ids(), vec![a.id, b.id]);
    assert_eq!(sel.get(a.id).map(|s| s.element.bounds), Some(a2.bounds));
}

#[test]
fn selection_replace_with_leaves_single_member() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(20.0, 20.0, 30.0, 30.0);
    let mut sel = Selection::default();
    sel.upsert(SelectedElement::settled(a));
    sel.replace_with(SelectedElement::settled(b.clone()));
    assert_eq!(sel.ids(), vec![b.id]);
    assert_eq!(sel.first().map(SelectedElement::id), Some(b.id));
}

#[test]
fn selection_remove_returns_entry() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let mut sel = Selection::default();
    sel.upsert(SelectedElement::settled(a.clone()));
    assert_eq!(sel.remove(a.id).map(|s| s.id()), Some(a.id));
    assert!(sel.remove(a.id).is_none());
}

#[test]
fn selection_remove_from_middle_keeps_later_lookups() {
    let (a, b, c) = (rect(0.0, 0.0, 1.0, 1.0), rect(2.0, 2.0, 3.0, 3.0), rect(4.0, 4.0, 5.0, 5.0));
    let mut sel = Selection::default();
    for e in [&a, &b, &c] {
        sel.upsert(SelectedElement::settled(e.clone()));
    }
    sel.remove(b.id);
    assert_eq!(sel.get(c.id).map(SelectedElement::id), Some(c.id));

    let c2 = c.with_bounds(Bounds::new(9.0, 9.0, 10.0, 10.0));
    sel.upsert(SelectedElement::settled(c2.clone()));
    assert_eq!(sel.ids(), vec![a.id, c.id]);
    assert_eq!(sel.get(c.id).map(|s| s.element.bounds), Some(c2.bounds));
}

#[test]
fn selection_toggle_back_in_appends_at_end() {
    let (a, b) = (rect(0.0, 0.0, 1.0, 1.0), rect(2.0, 2.0, 3.0, 3.0));
    let mut sel = Selection::default();
    sel.toggle(SelectedElement::settled(a.clone()));
    sel.toggle(SelectedElement::settled(b.clone()));
    sel.toggle(SelectedElement::settled(a.clone()));
    assert!(sel.toggle(SelectedElement::settled(a.clone())));
    assert_eq!(sel.ids(), vec![b.id, a.id]);
    assert_eq!(sel.first().map(SelectedElement::id), Some(b.id));
    assert!(sel.contains(a.id));
}

#[test]
fn selection_clear_empties() {
    let mut sel = Selection::default();
    sel.upsert(SelectedElement::settled(rect(0.0, 0.0, 1.0, 1.0)));
    sel.clear();
    assert!(sel.is_empty());
    assert_eq!(sel.len(), 0);
}

// =============================================================
// ElementStore
// =============================================================

#[test]
fn store_push_rejects_duplicate_id() {
    let e = rect(0.0, 0.0, 10.0, 10.0);
    let mut store = ElementStore::new();
    assert!(store.push(e.clone()));
    assert!(!store.push(e.with_bounds(Bounds::new(1.0, 1.0, 2.0, 2.0))));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(e.id).map(|x| x.bounds), Some(e.bounds));
}

#[test]
fn store_from_elements_keeps_first_of_each_id() {
    let e = rect(0.0, 0.0, 10.0, 10.0);
    let dup = e.with_bounds(Bounds::new(5.0, 5.0, 6.0, 6.0));
    let other = rect(20.0, 20.0, 30.0, 30.0);
    let store = ElementStore::from_elements(vec![e.clone(), dup, other.clone()]);
    assert_eq!(store.len(), 2);
    assert_eq!(store.as_slice()[0], e);
    assert_eq!(store.as_slice()[1], other);
}

#[test]
fn store_replace_keeps_order() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(20.0, 20.0, 30.0, 30.0);
    let mut store = ElementStore::from_elements(vec![a.clone(), b.clone()]);
    let a2 = a.with_bounds(Bounds::new(40.0, 40.0, 50.0, 50.0));
    assert!(store.replace(a2.clone()));
    assert_eq!(store.as_slice(), &[a2, b]);
}

#[test]
fn store_replace_missing_returns_false() {
    let mut store = ElementStore::new();
    assert!(!store.replace(rect(0.0, 0.0, 1.0, 1.0)));
    assert!(store.is_empty());
}

#[test]
fn store_remove_ids_reports_only_removed() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(20.0, 20.0, 30.0, 30.0);
    let c = rect(40.0, 40.0, 50.0, 50.0);
    let mut store = ElementStore::from_elements(vec![a.clone(), b.clone(), c.clone()]);
    let stranger = Uuid::new_v4();
    let removed = store.remove_ids(&[c.id, stranger, a.id]);
    assert_eq!(removed, vec![a.id, c.id]);
    assert_eq!(store.iter().map(|e| e.id).collect::<Vec<_>>(), vec![b.id]);
    assert!(!store.contains(a.id));
}

#[test]
fn store_lookups_follow_elements_after_remove_ids() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(20.0, 20.0, 30.0, 30.0);
    let c = rect(40.0, 40.0, 50.0, 50.0);
    let mut store = ElementStore::from_elements(vec![a.clone(), b.clone(), c.clone()]);
    store.remove_ids(&[a.id]);
    assert_eq!(store.get(c.id), Some(&c));

    let c2 = c.with_bounds(Bounds::new(0.0, 0.0, 5.0, 5.0));
    assert!(store.replace(c2.clone()));
    assert!(store.push(a.clone()));
    assert_eq!(store.as_slice(), &[b.clone(), c2, a.clone()]);
    assert_eq!(store.get(a.id), Some(&a));
    assert_eq!(store.get(b.id), Some(&b));
}

#[test]
fn store_remove_ids_with_no_matches_is_a_no_op() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let mut store = ElementStore::from_elements(vec![a.clone()]);
    assert!(store.remove_ids(&[Uuid::new_v4()]).is_empty());
    assert!(store.remove_ids(&[]).is_empty());
    assert_eq!(store.get(a.id), Some(&a));
}

// =============================================================
// Properties
// =============================================================

proptest! {
    #[test]
    fn selection_matches_ordered_model(ops in prop::collection::vec((0u8..4, 0usize..6), 0..60)) {
        let pool: Vec<Element> = (0..6i32).map(|i| rect(f64::from(i), 0.0, f64::from(i) + 1.0, 1.0)).collect();
        let mut sel = Selection::default();
        let mut model: Vec<ElementId> = Vec::new();
        for (op, which) in ops {
            let e = &pool[which];
            match op {
                0 => {
                    sel.upsert(SelectedElement::settled(e.clone()));
                    if !model.contains(&e.id) {
                        model.push(e.id);
                    }
                }
                1 => {
                    sel.remove(e.id);
                    model.retain(|id| *id != e.id);
                }
                2 => {
                    if sel.toggle(SelectedElement::settled(e.clone())) {
                        model.push(e.id);
                    } else {
                        model.retain(|id| *id != e.id);
                    }
                }
                _ => {
                    sel.replace_with(SelectedElement::settled(e.clone()));
                    model = vec![e.id];
                }
            }
            prop_assert_eq!(sel.ids(), model.clone());
            for candidate in &pool {
                prop_assert_eq!(sel.get(candidate.id).map(SelectedElement::id), model.contains(&candidate.id).then_some(candidate.id));
            }
        }
    }
}

#[test]
fn shape_kind_names() {
    assert_eq!(ShapeKind::Rectangle.as_str(), "rectangle");
    assert_eq!(ShapeKind::Circle.as_str(), "circle");
}
