//! Gesture scripts: JSON Lines of host input, replayed against an [`Engine`].
//!
//! One gesture per line:
//!
//! ```text
//! {"op":"tool","tool":"rectangle"}
//! {"op":"down","x":10,"y":10}
//! {"op":"move","x":60,"y":40}
//! {"op":"up","x":60,"y":40}
//! {"op":"down","x":30,"y":20,"ctrl":true}
//! {"op":"key","key":"Delete"}
//! {"op":"reset"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::path::Path;

use serde::Deserialize;

use crate::doc::Point;
use crate::engine::{Action, Engine};
use crate::error::ScriptError;
use crate::input::{Button, Key, Modifiers, Tool};

/// One line of a script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Gesture {
    /// Toolbar click.
    Tool { tool: Tool },
    /// Primary button pressed.
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
    },
    /// Pointer moved.
    Move { x: f64, y: f64 },
    /// Primary button released.
    Up { x: f64, y: f64 },
    /// Key pressed, by browser key name.
    Key { key: String },
    /// Reset to idle.
    Reset,
}

/// Parse script text.
///
/// # Errors
///
/// Returns [`ScriptError::Parse`] with the 1-based line number of the first bad line.
pub fn parse_script(text: &str) -> Result<Vec<Gesture>, ScriptError> {
    let mut gestures = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let gesture = serde_json::from_str(line).map_err(|source| ScriptError::Parse { line: idx + 1, source })?;
        gestures.push(gesture);
    }
    Ok(gestures)
}

/// Read and parse the script at `path`.
///
/// # Errors
///
/// Returns [`ScriptError::Io`] if the file cannot be read, or any error from
/// [`parse_script`].
pub fn load_script(path: &Path) -> Result<Vec<Gesture>, ScriptError> {
    let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Io { path: path.to_path_buf(), source })?;
    parse_script(&text)
}

/// Feed `gestures` to `engine` in order, collecting every action it returns.
pub fn play(engine: &mut Engine, gestures: &[Gesture]) -> Vec<Action> {
    let mut actions = Vec::new();
    for gesture in gestures {
        let produced = match gesture {
            Gesture::Tool { tool } => engine.set_tool(*tool),
            Gesture::Down { x, y, ctrl, meta } => {
                let modifiers = Modifiers { ctrl: *ctrl, meta: *meta, ..Modifiers::default() };
                engine.on_pointer_down(Point::new(*x, *y), Button::Primary, modifiers)
            }
            Gesture::Move { x, y } => engine.on_pointer_move(Point::new(*x, *y), Modifiers::default()),
            Gesture::Up { x, y } => engine.on_pointer_up(Point::new(*x, *y), Button::Primary, Modifiers::default()),
            Gesture::Key { key } => engine.on_key_down(&Key::new(key.as_str()), Modifiers::default()),
            Gesture::Reset => engine.reset(),
        };
        tracing::debug!(?gesture, actions = produced.len(), "gesture replayed");
        actions.extend(produced);
    }
    actions
}

/// Plain-text summary of the engine's state: mode, committed elements, selection.
#[must_use]
pub fn summarize(engine: &Engine) -> String {
    let selected = engine.selected_elements();
    let mut lines = vec![
        format!("mode: {}", engine.mode().as_str()),
        format!("elements: {}", engine.elements().len()),
    ];
    lines.extend(engine.elements().iter().map(|element| {
        let b = element.bounds;
        let marker = if selected.contains(element.id) { '*' } else { ' ' };
        format!("{marker} {} {} ({}, {}) - ({}, {})", element.id, element.kind.as_str(), b.x1, b.y1, b.x2, b.y2)
    }));
    lines.push(format!("selected: {}", selected.len()));
    lines.join("\n")
}
