//! Engine: owns the session and connects host input to the state machine.
//!
//! The engine is the only caller of [`machine::step`]. It moves the session
//! through each step, drains follow-up events in FIFO order once the step that
//! raised them has finished, logs every transition with `tracing`, and
//! notifies any registered [`TransitionObserver`]s. Nothing here decides
//! transitions; that stays in the machine.
//!
//! The `on_*` handlers are the pointer/keyboard layer: they read the current
//! mode, consult the geometry module, and translate raw input into machine
//! events. They return [`Action`]s telling the host what changed.

use std::collections::VecDeque;

use uuid::Uuid;

use crate::config::EngineConfig;
use crate::doc::{Element, ElementId, ElementStore, Point, Selection, ShapeKind};
use crate::geometry::{CursorHint, ElementHit, cursor_for_position, element_at_position_with};
use crate::input::{Button, Key, Modifiers, Tool};
use crate::machine::{self, Effect, Event, Mode, Outcome, Session, Step};
use crate::scene::{self, Scene};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A drawn element was committed.
    ElementCreated(Element),
    /// A committed element was resized or moved.
    ElementUpdated(Element),
    /// Committed elements were deleted.
    ElementsDeleted(Vec<ElementId>),
    /// The pointer cursor should change.
    SetCursor(CursorHint),
    /// Session state changed; redraw.
    RenderNeeded,
}

/// One processed event, as seen by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRecord {
    pub event: &'static str,
    pub from: Mode,
    pub to: Mode,
    pub outcome: Outcome,
}

/// Subscriber notified after every processed event.
pub trait TransitionObserver {
    fn on_transition(&mut self, record: &TransitionRecord);
}

/// Interaction engine for one canvas.
pub struct Engine {
    session: Session,
    config: EngineConfig,
    observers: Vec<Box<dyn TransitionObserver>>,
    cursor: CursorHint,
    /// Whether the current pointer press landed on an element.
    press_hit: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            session: Session::new(),
            config,
            observers: Vec::new(),
            cursor: CursorHint::Default,
            press_hit: false,
        }
    }

    /// Replace the session with an idle one over `elements`.
    pub fn load_elements(&mut self, elements: Vec<Element>) {
        self.session = Session::with_elements(elements);
        self.press_hit = false;
    }

    pub fn subscribe(&mut self, observer: Box<dyn TransitionObserver>) {
        self.observers.push(observer);
    }

    // --- Dispatch ---

    /// Feed one event to the machine, then any follow-ups it raises.
    ///
    /// Returns the outcome of `event` itself.
    pub fn dispatch(&mut self, event: Event) -> Outcome {
        let mut actions = Vec::new();
        self.process(event, &mut actions)
    }

    fn process(&mut self, event: Event, actions: &mut Vec<Action>) -> Outcome {
        let mut queue = VecDeque::from([event]);
        let mut first = None;
        let mut changed = false;

        while let Some(event) = queue.pop_front() {
            let name = event.name();
            let Step { session, from, outcome, effects } = machine::step(std::mem::take(&mut self.session), event);
            self.session = session;
            self.record(TransitionRecord { event: name, from, to: self.session.mode(), outcome });

            changed |= outcome == Outcome::Applied;
            first.get_or_insert(outcome);

            for effect in effects {
                match effect {
                    Effect::Raise(next) => queue.push_back(next),
                    Effect::Created(id) => {
                        if let Some(element) = self.session.elements().get(id) {
                            tracing::info!(%id, kind = element.kind.as_str(), "element created");
                            actions.push(Action::ElementCreated(element.clone()));
                        }
                    }
                    Effect::Updated(ids) => {
                        for id in ids {
                            if let Some(element) = self.session.elements().get(id) {
                                tracing::info!(%id, "element updated");
                                actions.push(Action::ElementUpdated(element.clone()));
                            }
                        }
                    }
                    Effect::Deleted(ids) => {
                        tracing::info!(count = ids.len(), "elements deleted");
                        actions.push(Action::ElementsDeleted(ids));
                    }
                }
            }
        }

        if changed {
            actions.push(Action::RenderNeeded);
        }
        first.unwrap_or(Outcome::Ignored)
    }

    fn record(&mut self, record: TransitionRecord) {
        let TransitionRecord { event, from, to, outcome } = record;
        match outcome {
            Outcome::Applied => tracing::debug!(event, from = from.as_str(), to = to.as_str(), "transition"),
            Outcome::Ignored => tracing::trace!(event, mode = from.as_str(), "event ignored"),
            Outcome::Rejected => tracing::warn!(event, mode = from.as_str(), "guard rejected event"),
        }
        for observer in &mut self.observers {
            observer.on_transition(&record);
        }
    }

    fn run(&mut self, event: Event) -> Vec<Action> {
        let mut actions = Vec::new();
        self.process(event, &mut actions);
        actions
    }

    // --- Toolbar ---

    /// Arm a drawing tool or switch to selection.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        match tool.shape() {
            Some(kind) => self.run(Event::ArmShape(kind)),
            None => self.run(Event::EnterSelectMode),
        }
    }

    /// Force the machine back to idle.
    pub fn reset(&mut self) -> Vec<Action> {
        self.press_hit = false;
        self.run(Event::Reset)
    }

    /// Start drawing the armed shape at `at` with a fresh id.
    pub fn press(&mut self, at: Point) -> Outcome {
        match self.session.selected_shape() {
            Some(kind) => self.press_shape(at, kind),
            None => Outcome::Ignored,
        }
    }

    /// Start drawing a `kind` shape at `at` with a fresh id.
    pub fn press_shape(&mut self, at: Point, kind: ShapeKind) -> Outcome {
        let mut actions = Vec::new();
        self.press_with(at, kind, &mut actions)
    }

    fn press_with(&mut self, at: Point, kind: ShapeKind, actions: &mut Vec<Action>) -> Outcome {
        self.process(Event::Press { at, kind, id: Uuid::new_v4() }, actions)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, at: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.press_hit = false;
        if button != Button::Primary {
            return Vec::new();
        }
        match self.session.mode() {
            Mode::Draw => {
                let mut actions = Vec::new();
                if let Some(kind) = self.session.selected_shape() {
                    self.press_with(at, kind, &mut actions);
                }
                actions
            }
            Mode::Select => {
                let Some(event) = self.pick_event(at, modifiers) else {
                    return Vec::new();
                };
                self.press_hit = true;
                self.run(event)
            }
            _ => Vec::new(),
        }
    }

    fn pick_event(&self, at: Point, modifiers: Modifiers) -> Option<Event> {
        let ElementHit { element, position } = self.hit_test(at)?;
        tracing::trace!(id = %element.id, position = position.as_str(), "pointer hit");
        Some(Event::Pick {
            at,
            element: element.clone(),
            position: Some(position),
            multi: modifiers.multi_select(),
        })
    }

    pub fn on_pointer_move(&mut self, at: Point, _modifiers: Modifiers) -> Vec<Action> {
        match self.session.mode() {
            Mode::Drawing | Mode::Resizing | Mode::Repositioning => self.run(Event::Drag(at)),
            Mode::Select => {
                let cursor = self.cursor_at(at);
                if cursor == self.cursor {
                    return Vec::new();
                }
                tracing::trace!(cursor = cursor.as_css(), "cursor changed");
                self.cursor = cursor;
                vec![Action::SetCursor(cursor)]
            }
            Mode::Idle | Mode::Draw => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, _at: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let press_hit = std::mem::take(&mut self.press_hit);
        match self.session.mode() {
            Mode::Select if !press_hit => self.run(Event::ClearSelection),
            Mode::Drawing | Mode::Resizing | Mode::Repositioning => self.run(Event::Release),
            _ => Vec::new(),
        }
    }

    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        let mode = self.session.mode();
        if key.is_escape() && matches!(mode, Mode::Resizing | Mode::Repositioning) {
            return self.run(Event::Cancel);
        }
        if key.is_delete() && mode == Mode::Select && !self.session.selected().is_empty() {
            return self.run(Event::DeleteSelected);
        }
        Vec::new()
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    #[must_use]
    pub fn elements(&self) -> &ElementStore {
        self.session.elements()
    }

    #[must_use]
    pub fn elements_in_progress(&self) -> &[Element] {
        self.session.in_progress()
    }

    #[must_use]
    pub fn selected_elements(&self) -> &Selection {
        self.session.selected()
    }

    #[must_use]
    pub fn selected_shape(&self) -> Option<ShapeKind> {
        self.session.selected_shape()
    }

    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        self.session.anchor()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Cursor last reported through [`Action::SetCursor`].
    #[must_use]
    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    /// The committed element under `at`, honouring the configured hit priority.
    #[must_use]
    pub fn hit_test(&self, at: Point) -> Option<ElementHit<'_>> {
        element_at_position_with(at.x, at.y, self.session.elements().as_slice(), self.config.hit_options())
    }

    /// Cursor for a pointer hovering at `at`.
    #[must_use]
    pub fn cursor_at(&self, at: Point) -> CursorHint {
        match self.hit_test(at) {
            Some(hit) => cursor_for_position(Some(hit.position)),
            None => CursorHint::Default,
        }
    }

    /// Display list for the current state.
    #[must_use]
    pub fn scene(&self) -> Scene<'_> {
        scene::build(&self.session, self.config.handle_size)
    }
}
