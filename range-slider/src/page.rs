//! # Page
//!
//! The host page: a [`Document`], the listeners registered on it, and the
//! queue of callbacks waiting for the next rendering frame.
//!
//! Dispatch is sequential. Every listener for an event runs to completion
//! before [`Page::dispatch`] returns, so a host that feeds events one at a
//! time never observes a half-applied mutation.
//!
//! ## Usage
//!
//! ```
//! use range_slider::{
//!     dom::ElementKind,
//!     event::{Event, EventKind, EventTarget},
//!     page::Page,
//! };
//!
//! let mut page = Page::new();
//! let button = page.document_mut().create_element(ElementKind::Button);
//! let root = page.document().root();
//! page.document_mut().append_child(root, button);
//!
//! page.add_listener(EventTarget::Element(button), EventKind::Click, move |_, scope| {
//!     scope.document().set_text(button, "clicked");
//! });
//! page.click(button);
//! assert_eq!(page.document().text(button), "clicked");
//! ```

use crate::{
    dom::{Document, ElementId},
    event::{Event, EventKind, EventTarget, Key},
};

/// Callback run once on the next frame.
pub type FrameCallback = Box<dyn FnOnce(&mut Document)>;

type Handler = Box<dyn FnMut(&Event, &mut EventScope<'_>)>;

struct Listener {
    target: EventTarget,
    kind: EventKind,
    handler: Handler,
}

/// What a listener can reach while it handles an event.
pub struct EventScope<'a> {
    document: &'a mut Document,
    frames: &'a mut Vec<FrameCallback>,
    default_prevented: bool,
}

impl EventScope<'_> {
    /// The page's document.
    pub fn document(&mut self) -> &mut Document {
        self.document
    }

    /// Suppresses the host's default action for this event (text
    /// selection, native drag and drop).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Schedules `callback` for the next frame.
    pub fn request_frame(&mut self, callback: impl FnOnce(&mut Document) + 'static) {
        self.frames.push(Box::new(callback));
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Number of listeners that ran.
    pub handled: usize,
    /// Whether any listener suppressed the default action.
    pub default_prevented: bool,
}

/// A document together with its listeners and pending frame callbacks.
#[derive(Default)]
pub struct Page {
    document: Document,
    listeners: Vec<Listener>,
    frames: Vec<FrameCallback>,
}

impl Page {
    /// Creates an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing document.
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// The page's document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the page's document.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Registers `handler` for events of `kind` reaching `target`.
    pub fn add_listener(
        &mut self,
        target: EventTarget,
        kind: EventKind,
        handler: impl FnMut(&Event, &mut EventScope<'_>) + 'static,
    ) {
        self.listeners.push(Listener {
            target,
            kind,
            handler: Box::new(handler),
        });
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Delivers `event` to its listeners.
    ///
    /// Element-targeted events visit listeners on the target, then on each
    /// ancestor, then on the window. Window-level events visit window
    /// listeners only. Within one target, listeners run in registration
    /// order.
    pub fn dispatch(&mut self, event: Event) -> DispatchOutcome {
        let kind = event.kind();
        let mut path: Vec<EventTarget> = event
            .target()
            .map(|target| {
                self.document
                    .ancestors(target)
                    .map(EventTarget::Element)
                    .collect()
            })
            .unwrap_or_default();
        path.push(EventTarget::Window);

        let mut scope = EventScope {
            document: &mut self.document,
            frames: &mut self.frames,
            default_prevented: false,
        };
        let mut handled = 0;
        for target in path {
            for listener in self
                .listeners
                .iter_mut()
                .filter(|l| l.kind == kind && l.target == target)
            {
                (listener.handler)(&event, &mut scope);
                handled += 1;
            }
        }

        tracing::trace!(?kind, handled, "event dispatched");
        DispatchOutcome {
            handled,
            default_prevented: scope.default_prevented,
        }
    }

    /// Schedules `callback` for the next frame.
    pub fn request_frame(&mut self, callback: impl FnOnce(&mut Document) + 'static) {
        self.frames.push(Box::new(callback));
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Runs every callback queued before this call and returns how many ran.
    pub fn run_frame(&mut self) -> usize {
        let callbacks = std::mem::take(&mut self.frames);
        let count = callbacks.len();
        for callback in callbacks {
            callback(&mut self.document);
        }
        count
    }

    /// Presses the primary button over `target` at absolute `x`.
    pub fn press(&mut self, target: ElementId, x: f64) -> DispatchOutcome {
        self.dispatch(Event::PointerDown { target, x })
    }

    /// Moves the pointer to absolute `x`.
    pub fn move_pointer(&mut self, x: f64) -> DispatchOutcome {
        self.dispatch(Event::PointerMove { x })
    }

    /// Releases the primary button.
    pub fn release(&mut self) -> DispatchOutcome {
        self.dispatch(Event::PointerUp)
    }

    /// Presses `key` while `target` is focused.
    pub fn press_key(&mut self, target: ElementId, key: Key) -> DispatchOutcome {
        self.dispatch(Event::KeyDown { target, key })
    }

    /// Replaces the text of the input `target` and reports the edit.
    pub fn type_text(&mut self, target: ElementId, text: &str) -> DispatchOutcome {
        self.document.set_text(target, text);
        self.dispatch(Event::Input { target })
    }

    /// Clicks `target`.
    pub fn click(&mut self, target: ElementId) -> DispatchOutcome {
        self.dispatch(Event::Click { target })
    }
}
