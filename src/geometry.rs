//! Geometry: hit-testing, resize-handle detection, cursor hints and box normalization.
//!
//! Every function here is a pure mapping from its arguments to a result. The
//! state machine calls these from its guards and actions; nothing in this
//! module reads or writes session state.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::consts::HANDLE_TOLERANCE;
use crate::doc::{Bounds, Element, Point, ShapeKind};

/// Which part of an element's bounding box a point falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleTag {
    /// Top-left corner handle.
    Tl,
    /// Top-right corner handle.
    Tr,
    /// Bottom-left corner handle.
    Bl,
    /// Bottom-right corner handle.
    Br,
    /// Anywhere else inside the shape.
    Inside,
}

impl HandleTag {
    /// Whether this is one of the four resize handles.
    #[must_use]
    pub fn is_corner(self) -> bool {
        !matches!(self, Self::Inside)
    }

    /// Lowercase tag name, as used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tl => "tl",
            Self::Tr => "tr",
            Self::Bl => "bl",
            Self::Br => "br",
            Self::Inside => "inside",
        }
    }
}

/// Pointer cursor the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    /// Nothing under the pointer.
    #[default]
    Default,
    /// Over the body of a shape.
    Move,
    /// Over a top-left or bottom-right handle.
    NwseResize,
    /// Over a top-right or bottom-left handle.
    NeswResize,
}

impl CursorHint {
    /// CSS `cursor` value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Move => "move",
            Self::NwseResize => "nwse-resize",
            Self::NeswResize => "nesw-resize",
        }
    }
}

/// Which element wins when several contain the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitPriority {
    /// The element committed earliest.
    #[default]
    FirstCommitted,
    /// The element committed most recently (drawn on top).
    Topmost,
}

/// Tunables for [`position_within_element_with`] and [`element_at_position_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitOptions {
    /// Half-width of the square around each rectangle corner that counts as a handle.
    pub handle_tolerance: f64,
    pub priority: HitPriority,
}

impl Default for HitOptions {
    fn default() -> Self {
        Self { handle_tolerance: HANDLE_TOLERANCE, priority: HitPriority::FirstCommitted }
    }
}

/// Result of a hit test against a list of elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementHit<'a> {
    pub element: &'a Element,
    pub position: HandleTag,
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

fn near_point(x: f64, y: f64, corner_x: f64, corner_y: f64, tolerance: f64) -> bool {
    (x - corner_x).abs() < tolerance && (y - corner_y).abs() < tolerance
}

/// Classify `(x, y)` against `element` with the default handle tolerance.
#[must_use]
pub fn position_within_element(x: f64, y: f64, element: &Element) -> Option<HandleTag> {
    position_within_element_with(x, y, element, HANDLE_TOLERANCE)
}

/// Classify `(x, y)` against `element`.
///
/// Rectangles report a corner tag when the point is inside the box and within
/// `tolerance` of that corner on both axes, `Inside` elsewhere in the box, and
/// `None` outside. Corners are checked before the interior, in the order
/// top-left, top-right, bottom-left, bottom-right.
///
/// Circles use the circle inscribed in the normalized box (radius is half the
/// smaller side, anchored at the box's min corner) and only ever report
/// `Inside`; the boundary counts as inside.
#[must_use]
pub fn position_within_element_with(x: f64, y: f64, element: &Element, tolerance: f64) -> Option<HandleTag> {
    let b = element.bounds.normalized();
    match element.kind {
        ShapeKind::Rectangle => {
            if !b.contains(x, y) {
                return None;
            }
            let corners = [
                (b.x1, b.y1, HandleTag::Tl),
                (b.x2, b.y1, HandleTag::Tr),
                (b.x1, b.y2, HandleTag::Bl),
                (b.x2, b.y2, HandleTag::Br),
            ];
            let corner = corners
                .into_iter()
                .find(|&(cx, cy, _)| near_point(x, y, cx, cy, tolerance))
                .map(|(_, _, tag)| tag);
            Some(corner.unwrap_or(HandleTag::Inside))
        }
        ShapeKind::Circle => {
            let radius = b.width().min(b.height()) / 2.0;
            let center = Point::new(b.x1 + radius, b.y1 + radius);
            (distance(Point::new(x, y), center) <= radius).then_some(HandleTag::Inside)
        }
    }
}

/// First element in `elements` that `(x, y)` falls on, with its classification.
#[must_use]
pub fn element_at_position(x: f64, y: f64, elements: &[Element]) -> Option<ElementHit<'_>> {
    element_at_position_with(x, y, elements, HitOptions::default())
}

/// Hit-test `elements` in the order given by `options.priority`.
#[must_use]
pub fn element_at_position_with(x: f64, y: f64, elements: &[Element], options: HitOptions) -> Option<ElementHit<'_>> {
    let tolerance = options.handle_tolerance;
    match options.priority {
        HitPriority::FirstCommitted => elements.iter().find_map(|e| hit(x, y, e, tolerance)),
        HitPriority::Topmost => elements.iter().rev().find_map(|e| hit(x, y, e, tolerance)),
    }
}

fn hit(x: f64, y: f64, element: &Element, tolerance: f64) -> Option<ElementHit<'_>> {
    position_within_element_with(x, y, element, tolerance).map(|position| ElementHit { element, position })
}

/// The element's box with its corners reordered to min/max.
#[must_use]
pub fn adjust_element_coordinates(element: &Element) -> Bounds {
    match element.kind {
        ShapeKind::Rectangle | ShapeKind::Circle => element.bounds.normalized(),
    }
}

/// Cursor for a pointer over `position`.
#[must_use]
pub fn cursor_for_position(position: Option<HandleTag>) -> CursorHint {
    match position {
        Some(HandleTag::Tl | HandleTag::Br) => CursorHint::NwseResize,
        Some(HandleTag::Tr | HandleTag::Bl) => CursorHint::NeswResize,
        Some(HandleTag::Inside) | None => CursorHint::Move,
    }
}

/// Move the corner named by `tag` to `(offset_x, offset_y)`, holding the opposite
/// corner fixed. Returns `None` for `Inside`, which names no corner.
#[must_use]
pub fn resized_coordinates(offset_x: f64, offset_y: f64, tag: HandleTag, bounds: Bounds) -> Option<Bounds> {
    let Bounds { x1, y1, x2, y2 } = bounds;
    match tag {
        HandleTag::Tl => Some(Bounds::new(offset_x, offset_y, x2, y2)),
        HandleTag::Tr => Some(Bounds::new(x1, offset_y, offset_x, y2)),
        HandleTag::Bl => Some(Bounds::new(offset_x, y1, x2, offset_y)),
        HandleTag::Br => Some(Bounds::new(x1, y1, offset_x, offset_y)),
        HandleTag::Inside => None,
    }
}

/// `bounds` shifted by `(dx, dy)`.
#[must_use]
pub fn translate_bounds(bounds: Bounds, dx: f64, dy: f64) -> Bounds {
    Bounds::new(bounds.x1 + dx, bounds.y1 + dy, bounds.x2 + dx, bounds.y2 + dy)
}

/// Square handle boxes of side `size` centred on the corners of `bounds`,
/// in the order top-left, top-right, bottom-left, bottom-right.
#[must_use]
pub fn handle_rects(bounds: Bounds, size: f64) -> [Bounds; 4] {
    let half = size / 2.0;
    let square = |cx: f64, cy: f64| Bounds::new(cx - half, cy - half, cx + half, cy + half);
    [
        square(bounds.x1, bounds.y1),
        square(bounds.x2, bounds.y1),
        square(bounds.x1, bounds.y2),
        square(bounds.x2, bounds.y2),
    ]
}
