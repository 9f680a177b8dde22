use super::*;
use crate::error::ErrorCode;
use crate::machine::Mode;

const DRAW_AND_MOVE: &str = r#"
# draw a rectangle, then drag it
{"op":"tool","tool":"rectangle"}
{"op":"down","x":10,"y":10}
{"op":"move","x":50,"y":50}
{"op":"up","x":50,"y":50}

{"op":"down","x":30,"y":30}
{"op":"move","x":40,"y":35}
{"op":"up","x":40,"y":35}
"#;

#[test]
fn parse_skips_comments_and_blank_lines() {
    let gestures = parse_script(DRAW_AND_MOVE).unwrap();
    assert_eq!(gestures.len(), 7);
    assert_eq!(gestures[0], Gesture::Tool { tool: Tool::Rectangle });
    assert_eq!(gestures[1], Gesture::Down { x: 10.0, y: 10.0, ctrl: false, meta: false });
    assert_eq!(gestures[2], Gesture::Move { x: 50.0, y: 50.0 });
}

#[test]
fn parse_reads_modifiers_keys_and_reset() {
    let gestures = parse_script(
        "{\"op\":\"down\",\"x\":1,\"y\":2,\"ctrl\":true}\n{\"op\":\"key\",\"key\":\"Delete\"}\n{\"op\":\"reset\"}",
    )
    .unwrap();
    assert_eq!(gestures, vec![
        Gesture::Down { x: 1.0, y: 2.0, ctrl: true, meta: false },
        Gesture::Key { key: "Delete".to_owned() },
        Gesture::Reset,
    ]);
}

#[test]
fn parse_error_reports_line_number() {
    let err = parse_script("{\"op\":\"reset\"}\n\n{\"op\":\"jump\"}\n").unwrap_err();
    assert!(matches!(err, ScriptError::Parse { line: 3, .. }));
    assert_eq!(err.error_code(), "E_SCRIPT_PARSE");
    assert!(err.to_string().starts_with("line 3:"));
}

#[test]
fn unknown_tool_is_a_parse_error() {
    let err = parse_script("{\"op\":\"tool\",\"tool\":\"triangle\"}").unwrap_err();
    assert!(matches!(err, ScriptError::Parse { line: 1, .. }));
}

#[test]
fn load_missing_file_is_io_error() {
    let path = std::env::temp_dir().join(format!("sketchpad-missing-{}.jsonl", uuid::Uuid::new_v4()));
    let err = load_script(&path).unwrap_err();
    assert!(matches!(err, ScriptError::Io { .. }));
    assert_eq!(err.error_code(), "E_SCRIPT_IO");
    assert!(!err.retryable());
}

#[test]
fn load_reads_file_from_disk() {
    let path = std::env::temp_dir().join(format!("sketchpad-{}.jsonl", uuid::Uuid::new_v4()));
    std::fs::write(&path, DRAW_AND_MOVE).unwrap();
    let gestures = load_script(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(gestures.unwrap().len(), 7);
}

#[test]
fn play_draws_and_moves() {
    let mut engine = Engine::new();
    let actions = play(&mut engine, &parse_script(DRAW_AND_MOVE).unwrap());
    assert_eq!(engine.mode(), Mode::Select);
    assert_eq!(engine.elements().len(), 1);
    let moved = &engine.elements().as_slice()[0];
    assert_eq!(moved.bounds, crate::doc::Bounds::new(20.0, 15.0, 60.0, 55.0));
    assert!(actions.iter().any(|a| matches!(a, Action::ElementCreated(_))));
    assert!(actions.iter().any(|a| matches!(a, Action::ElementUpdated(_))));
}

#[test]
fn play_delete_key_removes_selection() {
    let script = format!("{DRAW_AND_MOVE}\n{{\"op\":\"key\",\"key\":\"Delete\"}}\n");
    let mut engine = Engine::new();
    let actions = play(&mut engine, &parse_script(&script).unwrap());
    assert!(engine.elements().is_empty());
    assert!(matches!(actions.iter().rev().nth(1), Some(Action::ElementsDeleted(ids)) if ids.len() == 1));
}

#[test]
fn summarize_lists_mode_elements_and_selection() {
    let mut engine = Engine::new();
    play(&mut engine, &parse_script(DRAW_AND_MOVE).unwrap());
    let summary = summarize(&engine);
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines[0], "mode: select");
    assert_eq!(lines[1], "elements: 1");
    assert!(lines[2].starts_with('*'));
    assert!(lines[2].ends_with("rectangle (20, 15) - (60, 55)"));
    assert_eq!(lines[3], "selected: 1");
}

#[test]
fn summarize_empty_engine() {
    let engine = Engine::new();
    assert_eq!(summarize(&engine), "mode: idle\nelements: 0\nselected: 0");
}
