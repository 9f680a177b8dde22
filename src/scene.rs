//! Scene: the display list handed to the rendering collaborator.
//!
//! The renderer owns pixels and styling; this module only decides what is
//! drawn, in which order, and with which emphasis. Layers go bottom-up:
//!
//! 1. committed elements that are neither in progress nor selected,
//! 2. in-progress elements (being drawn, resized or moved),
//! 3. selected elements, only while in `Select` mode.
//!
//! Focused items carry corner handle boxes when they are the only item in
//! their layer; a multi-element selection or move shows no handles.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashSet;

use crate::doc::{Bounds, Element, ElementId};
use crate::geometry::handle_rects;
use crate::machine::{Mode, Session};

/// Which layer an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Committed,
    InProgress,
    Selection,
}

/// How the renderer should style an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Normal,
    /// Selection styling (outline, handles).
    Focused,
}

/// One element to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem<'a> {
    pub element: &'a Element,
    pub layer: Layer,
    pub emphasis: Emphasis,
    /// Corner handle boxes (tl, tr, bl, br), if handles are shown.
    pub handles: Option<[Bounds; 4]>,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene<'a> {
    pub mode: Mode,
    /// Items in draw order, bottom first.
    pub items: Vec<SceneItem<'a>>,
}

impl<'a> Scene<'a> {
    /// Items in `layer`, in draw order.
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &SceneItem<'a>> {
        self.items.iter().filter(move |item| item.layer == layer)
    }
}

/// Build the display list for `session`.
#[must_use]
pub fn build(session: &Session, handle_size: f64) -> Scene<'_> {
    let in_progress = session.in_progress();
    let in_progress_ids: HashSet<ElementId> = in_progress.iter().map(|e| e.id).collect();
    let selected = session.selected();

    let mut items: Vec<SceneItem<'_>> = session
        .elements()
        .iter()
        .filter(|e| !in_progress_ids.contains(&e.id) && !selected.contains(e.id))
        .map(|element| SceneItem { element, layer: Layer::Committed, emphasis: Emphasis::Normal, handles: None })
        .collect();

    push_focused(&mut items, in_progress.iter(), Layer::InProgress, handle_size);

    if session.mode() == Mode::Select {
        push_focused(&mut items, selected.iter().map(|s| &s.element), Layer::Selection, handle_size);
    }

    Scene { mode: session.mode(), items }
}

fn push_focused<'a, I>(items: &mut Vec<SceneItem<'a>>, elements: I, layer: Layer, handle_size: f64)
where
    I: ExactSizeIterator<Item = &'a Element>,
{
    let show_handles = elements.len() == 1;
    items.extend(elements.map(|element| SceneItem {
        element,
        layer,
        emphasis: Emphasis::Focused,
        handles: show_handles.then(|| handle_rects(element.bounds, handle_size)),
    }));
}
