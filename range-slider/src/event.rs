//! Input events delivered by the host page.

use crate::dom::ElementId;

/// Keys the slider reacts to. Everything else is carried as [`Key::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Any other key, by name.
    Other(String),
}

/// A raw input event.
///
/// `PointerMove` and `PointerUp` are window-level: they reach window
/// listeners wherever the pointer is. The other events target an element
/// and bubble through its ancestors to the window.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Primary button pressed over `target` at absolute horizontal
    /// position `x`.
    PointerDown {
        /// Element under the pointer.
        target: ElementId,
        /// Absolute horizontal position in pixels.
        x: f64,
    },
    /// Pointer moved to absolute horizontal position `x`.
    PointerMove {
        /// Absolute horizontal position in pixels.
        x: f64,
    },
    /// Primary button released.
    PointerUp,
    /// Key pressed while `target` has focus.
    KeyDown {
        /// Focused element.
        target: ElementId,
        /// The key.
        key: Key,
    },
    /// The text of the input `target` was edited.
    Input {
        /// Edited text field.
        target: ElementId,
    },
    /// `target` was clicked.
    Click {
        /// Clicked element.
        target: ElementId,
    },
}

/// Discriminant of [`Event`] used to register listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`Event::PointerDown`]
    PointerDown,
    /// [`Event::PointerMove`]
    PointerMove,
    /// [`Event::PointerUp`]
    PointerUp,
    /// [`Event::KeyDown`]
    KeyDown,
    /// [`Event::Input`]
    Input,
    /// [`Event::Click`]
    Click,
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The whole window; sees every event of its kind.
    Window,
    /// A single element; sees events targeting it or its descendants.
    Element(ElementId),
}

impl Event {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::PointerDown { .. } => EventKind::PointerDown,
            Event::PointerMove { .. } => EventKind::PointerMove,
            Event::PointerUp => EventKind::PointerUp,
            Event::KeyDown { .. } => EventKind::KeyDown,
            Event::Input { .. } => EventKind::Input,
            Event::Click { .. } => EventKind::Click,
        }
    }

    /// The element this event targets, if it is not window-level.
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Event::PointerDown { target, .. }
            | Event::KeyDown { target, .. }
            | Event::Input { target }
            | Event::Click { target } => Some(*target),
            Event::PointerMove { .. } | Event::PointerUp => None,
        }
    }
}
