//! The interaction state machine.
//!
//! [`step`] is the whole machine: it takes the current [`Session`] by value
//! and one [`Event`], and returns the next session together with an
//! [`Outcome`] and any follow-up [`Effect`]s. It has no framework
//! dependency, no logging and no captured state, so it can be driven and
//! tested on its own. [`crate::engine::Engine`] wraps it for hosts.
//!
//! ## Transitions
//!
//! ```text
//! Idle|Draw|Select  --ArmShape-->        Draw
//! Idle|Draw         --EnterSelectMode--> Select
//! Draw              --Press-->           Drawing
//! Drawing           --Drag-->            Drawing
//! Drawing           --Release-->         Select         (commit new element)
//! Select            --Pick-->            Select         (+ BeginResize / BeginReposition)
//! Select            --BeginResize-->     Resizing       (exactly one selected)
//! Select            --BeginReposition--> Repositioning  (selection non-empty)
//! Select            --DeleteSelected-->  Select
//! Select            --ClearSelection-->  Select
//! Resizing          --Drag-->            Resizing
//! Resizing          --Release-->         Select         (commit resized box)
//! Repositioning     --Drag-->            Repositioning
//! Repositioning     --Release-->         Select         (commit moved boxes)
//! Resizing|Repositioning --Cancel-->     Select         (discard in-progress)
//! any               --Reset-->           Idle
//! ```
//!
//! Any other (mode, event) pair is ignored and leaves the session untouched.

#[cfg(test)]
#[path = "machine_test.rs"]
mod machine_test;

use crate::doc::{Bounds, Element, ElementId, ElementStore, Point, SelectedElement, Selection, ShapeKind};
use crate::geometry::{HandleTag, adjust_element_coordinates, resized_coordinates, translate_bounds};

/// Interaction mode. Decides how every event is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// No tool armed.
    #[default]
    Idle,
    /// A shape kind is armed; waiting for a press.
    Draw,
    /// Pointer is down and a new shape is being stretched.
    Drawing,
    /// Pointing mode; the selection is live.
    Select,
    /// Dragging a corner handle of the selected element.
    Resizing,
    /// Dragging the body of the selected elements.
    Repositioning,
}

impl Mode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Draw => "draw",
            Self::Drawing => "drawing",
            Self::Select => "select",
            Self::Resizing => "resizing",
            Self::Repositioning => "repositioning",
        }
    }
}

/// Machine event vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Arm `kind` for the next draw.
    ArmShape(ShapeKind),
    EnterSelectMode,
    /// Start a new element of `kind` at `at`. `id` must not be in use.
    Press { at: Point, kind: ShapeKind, id: ElementId },
    Drag(Point),
    Release,
    /// Select `element`, which the pointer hit at `at` on `position`.
    Pick { at: Point, element: Element, position: Option<HandleTag>, multi: bool },
    BeginResize(Element),
    BeginReposition,
    DeleteSelected,
    ClearSelection,
    Cancel,
    Reset,
}

impl Event {
    /// Short snake-case name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ArmShape(_) => "arm_shape",
            Self::EnterSelectMode => "enter_select_mode",
            Self::Press { .. } => "press",
            Self::Drag(_) => "drag",
            Self::Release => "release",
            Self::Pick { .. } => "pick",
            Self::BeginResize(_) => "begin_resize",
            Self::BeginReposition => "begin_reposition",
            Self::DeleteSelected => "delete_selected",
            Self::ClearSelection => "clear_selection",
            Self::Cancel => "cancel",
            Self::Reset => "reset",
        }
    }
}

/// What happened to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The transition ran.
    Applied,
    /// The event is not declared for the current mode, or had nothing to act on.
    Ignored,
    /// A guard refused the transition.
    Rejected,
}

/// Output of a step, for the caller to act on after the step completes.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Dispatch this event next.
    Raise(Event),
    /// A new element was committed.
    Created(ElementId),
    /// Committed elements were rewritten.
    Updated(Vec<ElementId>),
    /// Committed elements were removed.
    Deleted(Vec<ElementId>),
}

/// All mutable interaction state. Only [`step`] changes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    mode: Mode,
    selected: Selection,
    selected_shape: Option<ShapeKind>,
    elements: ElementStore,
    in_progress: Vec<Element>,
    anchor: Option<Point>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An idle session over already-committed `elements`. Duplicate ids keep the
    /// first occurrence; boxes are normalized.
    #[must_use]
    pub fn with_elements(elements: Vec<Element>) -> Self {
        let normalized = elements
            .into_iter()
            .map(|e| {
                let bounds = adjust_element_coordinates(&e);
                e.with_bounds(bounds)
            })
            .collect();
        Self { elements: ElementStore::from_elements(normalized), ..Self::default() }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn selected(&self) -> &Selection {
        &self.selected
    }

    #[must_use]
    pub fn selected_shape(&self) -> Option<ShapeKind> {
        self.selected_shape
    }

    #[must_use]
    pub fn elements(&self) -> &ElementStore {
        &self.elements
    }

    #[must_use]
    pub fn in_progress(&self) -> &[Element] {
        &self.in_progress
    }

    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    /// Switch to `mode`, running its entry effect if the mode changes.
    fn enter(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.run_entry();
        }
    }

    fn run_entry(&mut self) {
        match self.mode {
            Mode::Idle => {
                self.selected.clear();
                self.in_progress.clear();
                self.selected_shape = None;
                self.anchor = None;
            }
            Mode::Draw | Mode::Drawing => self.selected.clear(),
            Mode::Select => self.selected_shape = None,
            Mode::Resizing | Mode::Repositioning => {}
        }
    }
}

/// Result of one call to [`step`].
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub session: Session,
    /// Mode before the event.
    pub from: Mode,
    pub outcome: Outcome,
    pub effects: Vec<Effect>,
}

impl Step {
    /// Mode after the event.
    #[must_use]
    pub fn to(&self) -> Mode {
        self.session.mode
    }
}

/// Apply `event` to `session`.
///
/// `Ignored` and `Rejected` outcomes return the session unchanged.
#[must_use]
pub fn step(mut session: Session, event: Event) -> Step {
    let from = session.mode;
    let mut effects = Vec::new();
    let outcome = apply(&mut session, event, &mut effects);
    Step { session, from, outcome, effects }
}

fn apply(s: &mut Session, event: Event, effects: &mut Vec<Effect>) -> Outcome {
    match (s.mode, event) {
        (_, Event::Reset) => {
            s.mode = Mode::Idle;
            s.run_entry();
            Outcome::Applied
        }
        (Mode::Idle | Mode::Draw | Mode::Select, Event::ArmShape(kind)) => {
            s.selected_shape = Some(kind);
            s.enter(Mode::Draw);
            Outcome::Applied
        }
        (Mode::Idle | Mode::Draw, Event::EnterSelectMode) => {
            s.selected.clear();
            s.enter(Mode::Select);
            Outcome::Applied
        }
        (Mode::Draw, Event::Press { at, kind, id }) => {
            if s.elements.contains(id) {
                return Outcome::Rejected;
            }
            s.in_progress = vec![Element::new(id, kind, Bounds::at(at))];
            s.enter(Mode::Drawing);
            Outcome::Applied
        }
        (Mode::Drawing, Event::Drag(at)) => {
            let Some(element) = s.in_progress.first_mut() else {
                return Outcome::Ignored;
            };
            element.bounds.x2 = at.x;
            element.bounds.y2 = at.y;
            Outcome::Applied
        }
        (Mode::Drawing, Event::Release) => {
            if let Some(drawn) = s.in_progress.first() {
                let committed = drawn.with_bounds(adjust_element_coordinates(drawn));
                if s.elements.push(committed.clone()) {
                    effects.push(Effect::Created(committed.id));
                    s.selected.replace_with(SelectedElement::settled(committed));
                }
            }
            s.in_progress.clear();
            s.enter(Mode::Select);
            Outcome::Applied
        }
        (Mode::Select, Event::Pick { at, element, position, multi }) => pick(s, at, element, position, multi, effects),
        (Mode::Select, Event::BeginResize(element)) => {
            if s.selected.len() != 1 || !s.selected.contains(element.id) {
                return Outcome::Rejected;
            }
            s.in_progress = vec![element];
            s.mode = Mode::Resizing;
            Outcome::Applied
        }
        (Mode::Select, Event::BeginReposition) => {
            if s.selected.is_empty() {
                return Outcome::Rejected;
            }
            s.in_progress = s.selected.iter().map(|sel| sel.element.clone()).collect();
            s.mode = Mode::Repositioning;
            Outcome::Applied
        }
        (Mode::Select, Event::DeleteSelected) => {
            let removed = s.elements.remove_ids(&s.selected.ids());
            s.selected.clear();
            s.anchor = None;
            if !removed.is_empty() {
                effects.push(Effect::Deleted(removed));
            }
            Outcome::Applied
        }
        (Mode::Select, Event::ClearSelection) => {
            s.selected.clear();
            s.anchor = None;
            Outcome::Applied
        }
        (Mode::Resizing, Event::Drag(at)) => {
            let Some(tag) = s.selected.first().and_then(|sel| sel.position) else {
                return Outcome::Ignored;
            };
            let Some(element) = s.in_progress.first_mut() else {
                return Outcome::Ignored;
            };
            match resized_coordinates(at.x, at.y, tag, element.bounds) {
                Some(bounds) => {
                    element.bounds = bounds;
                    Outcome::Applied
                }
                None => Outcome::Ignored,
            }
        }
        (Mode::Resizing, Event::Release) => {
            if let Some(resized) = s.in_progress.first() {
                let committed = resized.with_bounds(adjust_element_coordinates(resized));
                if s.elements.replace(committed.clone()) {
                    effects.push(Effect::Updated(vec![committed.id]));
                }
                s.selected.replace_with(SelectedElement::settled(committed));
            }
            s.in_progress.clear();
            s.enter(Mode::Select);
            Outcome::Applied
        }
        (Mode::Repositioning, Event::Drag(at)) => {
            let Some(anchor) = s.anchor else {
                return Outcome::Ignored;
            };
            let (dx, dy) = (at.x - anchor.x, at.y - anchor.y);
            for element in &mut s.in_progress {
                if let Some(original) = s.selected.get(element.id) {
                    element.bounds = translate_bounds(original.element.bounds, dx, dy);
                }
            }
            Outcome::Applied
        }
        (Mode::Repositioning, Event::Release) => {
            let mut updated = Vec::with_capacity(s.in_progress.len());
            for moved in std::mem::take(&mut s.in_progress) {
                if s.elements.replace(moved.clone()) {
                    updated.push(moved.id);
                }
                s.selected.upsert(SelectedElement::settled(moved));
            }
            if !updated.is_empty() {
                effects.push(Effect::Updated(updated));
            }
            s.enter(Mode::Select);
            Outcome::Applied
        }
        (Mode::Resizing | Mode::Repositioning, Event::Cancel) => {
            s.in_progress.clear();
            s.enter(Mode::Select);
            Outcome::Applied
        }
        _ => Outcome::Ignored,
    }
}

fn pick(
    s: &mut Session,
    at: Point,
    element: Element,
    position: Option<HandleTag>,
    multi: bool,
    effects: &mut Vec<Effect>,
) -> Outcome {
    if !s.elements.contains(element.id) {
        return Outcome::Rejected;
    }
    let picked = SelectedElement::picked(element.clone(), at, position);
    let selected = if multi {
        s.selected.toggle(picked)
    } else {
        s.selected.replace_with(picked);
        true
    };
    s.anchor = Some(at);
    if selected {
        match position {
            Some(tag) if tag.is_corner() => effects.push(Effect::Raise(Event::BeginResize(element))),
            Some(_) => effects.push(Effect::Raise(Event::BeginReposition)),
            None => {}
        }
    }
    Outcome::Applied
}
