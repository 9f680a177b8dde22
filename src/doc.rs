//! Document model: points, bounding boxes, shape elements and the selection set.
//!
//! This module defines what lives on the canvas (`Element`, `ShapeKind`,
//! `Bounds`), the ephemeral selection wrapper (`SelectedElement`) and the two
//! collections the state machine owns: the ordered `ElementStore` of committed
//! elements and the id-keyed `Selection`.
//!
//! Both collections keep a `Vec` for order plus a `HashMap` from id to slot, so
//! lookups by id stay constant-time while a drag touches every selected element.
//!
//! Order matters in both collections. The store's insertion order is the draw
//! order and the hit-test order; the selection's insertion order decides which
//! selected element drives a resize.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::geometry::HandleTag;

/// Unique identifier for an element.
pub type ElementId = Uuid;

/// A point in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The kind of shape an element draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Axis-aligned rectangle filling the bounding box.
    Rectangle,
    /// Circle inscribed in the bounding box.
    Circle,
}

impl ShapeKind {
    /// Lowercase name, as used in logs and scripts.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
        }
    }
}

/// Two opposite corners of a bounding box.
///
/// `(x1, y1)` and `(x2, y2)` are not ordered unless the box has been through
/// [`Bounds::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// A zero-size box at `p`.
    #[must_use]
    pub fn at(p: Point) -> Self {
        Self { x1: p.x, y1: p.y, x2: p.x, y2: p.y }
    }

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.x1.min(self.x2)
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.x1.max(self.x2)
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.y1.min(self.y2)
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y1.max(self.y2)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x() - self.min_x()
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y() - self.min_y()
    }

    /// The first corner, `(x1, y1)`. Selection offsets are measured from here.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Reorder the corners so the first is the minimum on each axis.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            x1: self.min_x(),
            y1: self.min_y(),
            x2: self.max_x(),
            y2: self.max_y(),
        }
    }

    /// Whether `(x, y)` lies within the min/max box, edges included.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x() && x <= self.max_x() && y >= self.min_y() && y <= self.max_y()
    }
}

/// A shape on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Unique among committed elements.
    pub id: ElementId,
    pub kind: ShapeKind,
    pub bounds: Bounds,
}

impl Element {
    #[must_use]
    pub fn new(id: ElementId, kind: ShapeKind, bounds: Bounds) -> Self {
        Self { id, kind, bounds }
    }

    /// Same element with a different box.
    #[must_use]
    pub fn with_bounds(&self, bounds: Bounds) -> Self {
        Self { id: self.id, kind: self.kind, bounds }
    }
}

/// An element plus the gesture context captured when it was selected.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedElement {
    pub element: Element,
    /// Pointer x minus the box's `x1` at selection time.
    pub offset_x: f64,
    /// Pointer y minus the box's `y1` at selection time.
    pub offset_y: f64,
    /// Which part of the element the pointer landed on, if any.
    pub position: Option<HandleTag>,
}

impl SelectedElement {
    /// Selection captured by a pointer press at `at`.
    #[must_use]
    pub fn picked(element: Element, at: Point, position: Option<HandleTag>) -> Self {
        let origin = element.bounds.origin();
        Self {
            element,
            offset_x: at.x - origin.x,
            offset_y: at.y - origin.y,
            position,
        }
    }

    /// Selection left behind once a gesture finishes: zero offsets, no handle.
    #[must_use]
    pub fn settled(element: Element) -> Self {
        Self { element, offset_x: 0.0, offset_y: 0.0, position: None }
    }

    #[must_use]
    pub fn id(&self) -> ElementId {
        self.element.id
    }
}

/// Selected elements keyed by id, kept in selection order.
///
/// Membership is always decided by id, never by comparing element values.
/// `index` maps each id to its slot in `items`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    items: Vec<SelectedElement>,
    index: HashMap<ElementId, usize>,
}

impl Selection {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&SelectedElement> {
        self.index.get(&id).map(|&idx| &self.items[idx])
    }

    /// The earliest-selected element still in the set.
    #[must_use]
    pub fn first(&self) -> Option<&SelectedElement> {
        self.items.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectedElement> {
        self.items.iter()
    }

    /// Ids in selection order.
    #[must_use]
    pub fn ids(&self) -> Vec<ElementId> {
        self.items.iter().map(SelectedElement::id).collect()
    }

    /// Insert, or overwrite the entry with the same id in place.
    pub fn upsert(&mut self, selected: SelectedElement) {
        match self.index.get(&selected.id()) {
            Some(&idx) => self.items[idx] = selected,
            None => self.append(selected),
        }
    }

    /// Remove by id, returning the removed entry.
    pub fn remove(&mut self, id: ElementId) -> Option<SelectedElement> {
        let idx = self.index.remove(&id)?;
        let removed = self.items.remove(idx);
        for (slot, item) in self.items.iter().enumerate().skip(idx) {
            self.index.insert(item.id(), slot);
        }
        Some(removed)
    }

    /// Add `selected` if its id is absent, remove it if present.
    ///
    /// Returns `true` when the element ends up selected.
    pub fn toggle(&mut self, selected: SelectedElement) -> bool {
        if self.remove(selected.id()).is_some() {
            return false;
        }
        self.append(selected);
        true
    }

    /// Make `selected` the only member.
    pub fn replace_with(&mut self, selected: SelectedElement) {
        self.clear();
        self.append(selected);
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    fn append(&mut self, selected: SelectedElement) {
        self.index.insert(selected.id(), self.items.len());
        self.items.push(selected);
    }
}

/// Committed elements in insertion order, indexed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementStore {
    items: Vec<Element>,
    index: HashMap<ElementId, usize>,
}

impl ElementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `elements`, keeping the first occurrence of each id.
    #[must_use]
    pub fn from_elements(elements: Vec<Element>) -> Self {
        let mut store = Self::new();
        for element in elements {
            store.push(element);
        }
        store
    }

    /// Append a new element. Returns `false` (and stores nothing) if the id is taken.
    pub fn push(&mut self, element: Element) -> bool {
        if self.contains(element.id) {
            return false;
        }
        self.index.insert(element.id, self.items.len());
        self.items.push(element);
        true
    }

    /// Overwrite the element with the same id, keeping its place in the order.
    /// Returns `false` if no such element exists.
    pub fn replace(&mut self, element: Element) -> bool {
        let Some(&idx) = self.index.get(&element.id) else {
            return false;
        };
        self.items[idx] = element;
        true
    }

    /// Remove every element whose id is in `ids`, returning the ids actually removed
    /// in store order.
    pub fn remove_ids(&mut self, ids: &[ElementId]) -> Vec<ElementId> {
        let doomed: HashSet<ElementId> = ids.iter().copied().filter(|id| self.index.contains_key(id)).collect();
        if doomed.is_empty() {
            return Vec::new();
        }
        let mut removed = Vec::with_capacity(doomed.len());
        self.items.retain(|e| {
            if doomed.contains(&e.id) {
                removed.push(e.id);
                false
            } else {
                true
            }
        });
        self.index = self.items.iter().enumerate().map(|(idx, e)| (e.id, idx)).collect();
        removed
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.index.get(&id).map(|&idx| &self.items[idx])
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Element] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.items.iter()
    }

    /// Number of committed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
