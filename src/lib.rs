//! Interaction engine for drawing, selecting, moving and resizing shapes on a 2D canvas.
//!
//! The crate owns what pointer gestures mean: a finite-state machine decides
//! between drawing, selecting, resizing and repositioning, and a geometry
//! module answers the hit-testing questions its transitions ask. Rendering,
//! toolbar wiring and persistence belong to the host; the host feeds raw
//! pointer and key events to [`engine::Engine`] and draws whatever
//! [`engine::Engine::scene`] returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Session owner, event dispatch, pointer/keyboard handlers |
//! | [`machine`] | Modes, events and the pure `step` reducer |
//! | [`geometry`] | Hit-testing, handles, cursor hints, normalization |
//! | [`doc`] | Points, boxes, elements, selection and element store |
//! | [`input`] | Tools, modifiers, buttons and keys |
//! | [`scene`] | Display list for the renderer |
//! | [`config`] | Engine configuration from the environment |
//! | [`script`] | Gesture scripts for the replay binary |
//! | [`error`] | Error types and the `ErrorCode` trait |
//! | [`consts`] | Shared numeric constants and variable names |

pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod machine;
pub mod scene;
pub mod script;
