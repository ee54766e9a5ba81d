//! # Drag Gesture
//!
//! Turns press, move and release events on one element into a stream of
//! horizontal offsets, delivered at most once per frame.
//!
//! The press must land on the bound element. Moves and the release are
//! observed on the window, so a drag keeps going after the pointer leaves
//! the element.
//!
//! The reported offset is the pointer's absolute `x` minus the element's
//! rendered width. Consumers divide it by the width of whatever the element
//! slides along to get a position on that surface.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use range_slider::{dom::ElementKind, drag::DragGesture, page::Page};
//!
//! let mut page = Page::new();
//! let knob = page.document_mut().create_element(ElementKind::Button);
//! page.document_mut().set_width(knob, 10.0);
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! DragGesture::attach(&mut page, knob, move |x, _| sink.lock().push(x));
//!
//! page.press(knob, 0.0);
//! page.move_pointer(40.0);
//! page.move_pointer(60.0);
//! page.run_frame();
//! assert_eq!(*seen.lock(), vec![50.0]);
//! ```

use std::sync::Arc;

use closure::closure;
use parking_lot::Mutex;

use crate::{
    dom::{Document, ElementId},
    event::{Event, EventKind, EventTarget},
    page::{EventScope, Page},
};

type MoveHandler = Arc<Mutex<dyn FnMut(f64, &mut Document) + Send>>;

/// Transient state of one gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureState {
    /// Whether the pointer is pressed on the element.
    pub is_dragging: bool,
    /// The most recent offset.
    pub current_x: f64,
    frame_pending: bool,
}

/// A press-move-release observer bound to one element.
#[derive(Clone)]
pub struct DragGesture {
    element: ElementId,
    state: Arc<Mutex<GestureState>>,
}

impl DragGesture {
    /// Starts observing `element` on `page`.
    ///
    /// `on_move` receives the latest offset once per frame while the element
    /// is dragged, together with the page's document.
    pub fn attach<F>(page: &mut Page, element: ElementId, on_move: F) -> Self
    where
        F: FnMut(f64, &mut Document) + Send + 'static,
    {
        let state = Arc::new(Mutex::new(GestureState::default()));
        let on_move: MoveHandler = Arc::new(Mutex::new(on_move));

        page.add_listener(
            EventTarget::Element(element),
            EventKind::PointerDown,
            closure!(clone state, |_event: &Event, scope: &mut EventScope<'_>| {
                scope.prevent_default();
                state.lock().is_dragging = true;
                tracing::trace!(?element, "drag started");
            }),
        );

        page.add_listener(
            EventTarget::Window,
            EventKind::PointerMove,
            closure!(clone state, clone on_move, |event: &Event, scope: &mut EventScope<'_>| {
                let Event::PointerMove { x } = *event else {
                    return;
                };
                let width = scope.document().width(element);
                let mut gesture = state.lock();
                if !gesture.is_dragging {
                    return;
                }
                gesture.current_x = relative_offset(x, width);
                if gesture.frame_pending {
                    return;
                }
                gesture.frame_pending = true;
                drop(gesture);

                let state = state.clone();
                let on_move = on_move.clone();
                scope.request_frame(move |document| {
                    let x = {
                        let mut gesture = state.lock();
                        gesture.frame_pending = false;
                        gesture.current_x
                    };
                    let mut handler = on_move.lock();
                    (*handler)(x, document);
                });
            }),
        );

        page.add_listener(
            EventTarget::Window,
            EventKind::PointerUp,
            closure!(clone state, |_event: &Event, _scope: &mut EventScope<'_>| {
                let mut gesture = state.lock();
                if gesture.is_dragging {
                    gesture.is_dragging = false;
                    tracing::trace!(?element, x = gesture.current_x, "drag ended");
                }
            }),
        );

        Self { element, state }
    }

    /// The observed element.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Whether the element is currently pressed.
    pub fn is_dragging(&self) -> bool {
        self.state.lock().is_dragging
    }

    /// The most recent offset.
    pub fn current_x(&self) -> f64 {
        self.state.lock().current_x
    }

    /// A copy of the gesture state.
    pub fn state(&self) -> GestureState {
        *self.state.lock()
    }
}

/// Offset of the pointer relative to an element of the given width.
///
/// Degenerate geometry (a width that is zero, negative or not finite) or a
/// non-finite pointer position yields `0`.
pub fn relative_offset(pointer_x: f64, element_width: f64) -> f64 {
    if !element_width.is_finite() || element_width <= 0.0 || !pointer_x.is_finite() {
        return 0.0;
    }
    pointer_x - element_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementKind;

    fn knob_page(width: f64) -> (Page, ElementId, DragGesture, Arc<Mutex<Vec<f64>>>) {
        let mut page = Page::new();
        let knob = page.document_mut().create_element(ElementKind::Button);
        let root = page.document().root();
        page.document_mut().append_child(root, knob);
        page.document_mut().set_width(knob, width);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let gesture = DragGesture::attach(&mut page, knob, move |x, _| sink.lock().push(x));
        (page, knob, gesture, seen)
    }

    #[test]
    fn test_offset_subtracts_element_width() {
        assert_eq!(relative_offset(120.0, 20.0), 100.0);
        assert_eq!(relative_offset(5.0, 20.0), -15.0);
    }

    #[test]
    fn test_degenerate_geometry_yields_zero() {
        assert_eq!(relative_offset(120.0, 0.0), 0.0);
        assert_eq!(relative_offset(120.0, -4.0), 0.0);
        assert_eq!(relative_offset(120.0, f64::NAN), 0.0);
        assert_eq!(relative_offset(f64::INFINITY, 10.0), 0.0);
    }

    #[test]
    fn test_press_starts_drag_and_prevents_default() {
        let (mut page, knob, gesture, _) = knob_page(10.0);
        assert!(!gesture.is_dragging());
        assert!(page.press(knob, 0.0).default_prevented);
        assert!(gesture.is_dragging());
        page.release();
        assert!(!gesture.is_dragging());
    }

    #[test]
    fn test_moves_before_press_are_ignored() {
        let (mut page, _, gesture, seen) = knob_page(10.0);
        page.move_pointer(50.0);
        assert_eq!(page.pending_frames(), 0);
        page.run_frame();
        assert!(seen.lock().is_empty());
        assert_eq!(gesture.current_x(), 0.0);
    }

    #[test]
    fn test_moves_coalesce_into_one_frame() {
        let (mut page, knob, gesture, seen) = knob_page(10.0);
        page.press(knob, 0.0);
        page.move_pointer(20.0);
        page.move_pointer(30.0);
        page.move_pointer(45.0);
        assert_eq!(page.pending_frames(), 1);
        assert!(seen.lock().is_empty());

        page.run_frame();
        assert_eq!(*seen.lock(), vec![35.0]);
        assert_eq!(gesture.current_x(), 35.0);

        page.move_pointer(70.0);
        page.run_frame();
        assert_eq!(*seen.lock(), vec![35.0, 60.0]);
    }

    #[test]
    fn test_final_offset_survives_release_before_frame() {
        let (mut page, knob, _, seen) = knob_page(10.0);
        page.press(knob, 0.0);
        page.move_pointer(90.0);
        page.release();
        page.move_pointer(200.0);
        page.run_frame();
        assert_eq!(*seen.lock(), vec![80.0]);

        page.move_pointer(300.0);
        assert_eq!(page.pending_frames(), 0);
    }

    #[test]
    fn test_drag_continues_outside_element() {
        let (mut page, knob, _, seen) = knob_page(10.0);
        page.press(knob, 5.0);
        page.move_pointer(-40.0);
        page.run_frame();
        page.move_pointer(5000.0);
        page.run_frame();
        assert_eq!(*seen.lock(), vec![-50.0, 4990.0]);
    }

    #[test]
    fn test_press_elsewhere_does_not_start_drag() {
        let (mut page, _, gesture, seen) = knob_page(10.0);
        let other = page.document_mut().create_element(ElementKind::Button);
        let root = page.document().root();
        page.document_mut().append_child(root, other);
        page.press(other, 0.0);
        page.move_pointer(50.0);
        page.run_frame();
        assert!(!gesture.is_dragging());
        assert!(seen.lock().is_empty());
    }
}
