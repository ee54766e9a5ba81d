//! A slider with one or two handles selecting a value or an interval.
//!
//! ## Usage
//!
//! Mount onto an element of a [`Page`], give the track and handles their
//! rendered widths, then feed events.
//!
//! ```
//! use range_slider::{
//!     RangeSlider, RangeSliderArgs,
//!     dom::ElementKind,
//!     page::Page,
//! };
//!
//! let mut page = Page::new();
//! let mount = page.document_mut().create_element(ElementKind::Container);
//! page.document_mut().set_dom_id(mount, "budget");
//! let root = page.document().root();
//! page.document_mut().append_child(root, mount);
//!
//! let slider = RangeSlider::mount(
//!     &mut page,
//!     "#budget",
//!     RangeSliderArgs::default()
//!         .min(0.0)
//!         .max(250.0)
//!         .default_value([50.0, 80.0]),
//! )
//! .expect("valid configuration");
//!
//! let lower_input = slider.inputs()[0];
//! page.type_text(lower_input, "90");
//! assert_eq!(slider.values(), vec![80.0, 90.0]);
//! assert_eq!(page.document().text(lower_input), "80");
//! ```
//!
//! ## Style hooks
//!
//! After every change the slider writes `--handle-position` on each handle
//! and `--fill-start` / `--fill-end` on the track, all as percentages such
//! as `"32%"`. Text inputs show the stored values.

use std::sync::Arc;

use closure::closure;
use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::{
    SliderError,
    dom::{Document, ElementId, ElementKind},
    drag::DragGesture,
    event::{Event, EventKind, EventTarget, Key},
    page::{EventScope, Page},
    prop::CallbackWith,
};

pub use args::{HandleSlot, RangeSliderArgs, SliderMode};
pub use engine::{StepDirection, ValueEngine, align_to_step, parse_digits};
pub use segments::{route_segment, segment_boundaries};

mod args;
mod engine;
mod segments;

/// Style property carrying a handle's position.
pub const HANDLE_POSITION: &str = "--handle-position";
/// Style property carrying where the track fill starts.
pub const FILL_START: &str = "--fill-start";
/// Style property carrying where the track fill ends.
pub const FILL_END: &str = "--fill-end";

const CLASS: &str = "range-slider";

/// Elements built by [`RangeSlider::mount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderElements {
    /// The element the slider was mounted into.
    pub container: ElementId,
    /// Outermost element of the slider.
    pub root: ElementId,
    /// The track the handles slide along.
    pub track: ElementId,
    /// One handle per value, lower first.
    pub handles: SmallVec<[ElementId; 2]>,
    /// One text input per value, lower first.
    pub inputs: SmallVec<[ElementId; 2]>,
    /// Clickable segment boundaries, in increasing order.
    pub segments: Vec<ElementId>,
}

struct SliderInner {
    engine: ValueEngine,
    elements: SliderElements,
}

impl SliderInner {
    /// Writes the stored values to every presentation surface.
    fn propagate(&self, document: &mut Document) {
        let percentages = self.engine.percentages();
        for (handle, percentage) in self.elements.handles.iter().zip(&percentages) {
            document.set_style_property(*handle, HANDLE_POSITION, format_percent(*percentage));
        }

        let (start, end) = self.engine.fill();
        document.set_style_property(self.elements.track, FILL_START, format_percent(start));
        document.set_style_property(self.elements.track, FILL_END, format_percent(end));

        for (input, value) in self.elements.inputs.iter().zip(self.engine.values()) {
            document.set_text(*input, value.to_string());
        }
    }
}

/// Handle to a mounted slider.
///
/// Cloning is cheap and every clone refers to the same slider. Value state
/// can only change through the slider's own listeners and
/// [`RangeSlider::set_values`].
#[derive(Clone)]
pub struct RangeSlider {
    inner: Arc<Mutex<SliderInner>>,
    args: RangeSliderArgs,
    gestures: SmallVec<[DragGesture; 2]>,
}

impl RangeSlider {
    /// Validates `args`, builds the slider inside the first element matching
    /// `selector` and wires its listeners.
    ///
    /// Nothing is added to the page when this fails.
    pub fn mount(
        page: &mut Page,
        selector: &str,
        args: RangeSliderArgs,
    ) -> Result<Self, SliderError> {
        let container = page
            .document()
            .query_selector(selector)
            .ok_or_else(|| SliderError::MissingContainer(selector.to_owned()))?;
        let engine = ValueEngine::new(&args)?;

        let elements = build_elements(page.document_mut(), container, &engine, &args);
        let inner = SliderInner { engine, elements };
        inner.propagate(page.document_mut());
        tracing::debug!(
            selector,
            mode = ?inner.engine.mode(),
            values = ?inner.engine.values(),
            "slider mounted"
        );

        let elements = inner.elements.clone();
        let mode = inner.engine.mode();
        let inner = Arc::new(Mutex::new(inner));

        let mut gestures = SmallVec::new();
        for (slot, handle) in mode.slots().iter().copied().zip(elements.handles.iter().copied()) {
            gestures.push(attach_drag(page, &inner, slot, handle, args.on_drag.clone()));
            attach_keyboard(page, &inner, slot, handle);
        }
        for (slot, input) in mode.slots().iter().copied().zip(elements.inputs.iter().copied()) {
            attach_text_input(page, &inner, slot, input);
        }
        for segment in elements.segments.iter().copied() {
            attach_segment(page, &inner, segment);
        }

        Ok(Self {
            inner,
            args,
            gestures,
        })
    }

    /// Stored values, lower first.
    pub fn values(&self) -> Vec<f64> {
        self.inner.lock().engine.values().to_vec()
    }

    /// Track position of each handle, in percent.
    pub fn percentages(&self) -> Vec<f64> {
        self.inner.lock().engine.percentages().to_vec()
    }

    /// Single or range.
    pub fn mode(&self) -> SliderMode {
        self.inner.lock().engine.mode()
    }

    /// The arguments the slider was mounted with.
    pub fn args(&self) -> &RangeSliderArgs {
        &self.args
    }

    /// The elements the slider built.
    pub fn elements(&self) -> SliderElements {
        self.inner.lock().elements.clone()
    }

    /// The element the slider was mounted into.
    pub fn container(&self) -> ElementId {
        self.inner.lock().elements.container
    }

    /// The track element. Its rendered width maps drag offsets to
    /// percentages.
    pub fn track(&self) -> ElementId {
        self.inner.lock().elements.track
    }

    /// Handle elements, lower first.
    pub fn handles(&self) -> SmallVec<[ElementId; 2]> {
        self.inner.lock().elements.handles.clone()
    }

    /// Text inputs, lower first.
    pub fn inputs(&self) -> SmallVec<[ElementId; 2]> {
        self.inner.lock().elements.inputs.clone()
    }

    /// Segment boundary elements, in increasing order.
    pub fn segments(&self) -> Vec<ElementId> {
        self.inner.lock().elements.segments.clone()
    }

    /// Whether the handle in `slot` is being dragged.
    pub fn is_dragging(&self, slot: HandleSlot) -> bool {
        self.gestures
            .get(slot.index())
            .is_some_and(DragGesture::is_dragging)
    }

    /// Replaces the stored values and updates every surface.
    ///
    /// `values` must hold as many numbers as the slider has handles; they
    /// are normalized like any other input.
    pub fn set_values(&self, document: &mut Document, values: &[f64]) -> Result<(), SliderError> {
        let mut inner = self.inner.lock();
        inner.engine.replace(values)?;
        inner.propagate(document);
        Ok(())
    }
}

fn format_percent(percentage: f64) -> String {
    format!("{percentage}%")
}

/// Drag offset as a percentage of the track width. A track without a usable
/// width maps every offset to 0%.
fn track_percentage(offset: f64, track_width: f64) -> f64 {
    if !track_width.is_finite() || track_width <= 0.0 {
        return 0.0;
    }
    offset / track_width * 100.0
}

fn key_direction(key: &Key) -> Option<StepDirection> {
    match key {
        Key::ArrowDown | Key::ArrowLeft => Some(StepDirection::Decrement),
        Key::ArrowUp | Key::ArrowRight => Some(StepDirection::Increment),
        Key::Other(_) => None,
    }
}

fn build_elements(
    document: &mut Document,
    container: ElementId,
    engine: &ValueEngine,
    args: &RangeSliderArgs,
) -> SliderElements {
    let mode = engine.mode();
    let root = child(document, container, ElementKind::Container, CLASS);
    let mode_class = match mode {
        SliderMode::Single => "range-slider--single",
        SliderMode::Range => "range-slider--range",
    };
    document.add_class(root, mode_class);

    let track = child(document, root, ElementKind::Container, "range-slider__track");
    let handles = mode
        .slots()
        .iter()
        .map(|slot| {
            let handle = child(document, track, ElementKind::Button, "range-slider__handle");
            document.add_class(handle, format!("range-slider__handle--{}", slot.name()));
            handle
        })
        .collect();

    let mut segments = Vec::new();
    if let Some(count) = args.segments_count {
        let list = child(document, root, ElementKind::Container, "range-slider__segments");
        for boundary in segment_boundaries(engine.min(), engine.max(), count) {
            let segment = child(document, list, ElementKind::Button, "range-slider__segment");
            document.set_data(segment, "value", boundary.to_string());
            document.set_text(segment, engine.normalize(boundary).to_string());
            segments.push(segment);
        }
    }

    let fields = child(document, root, ElementKind::Container, "range-slider__inputs");
    let inputs = mode
        .slots()
        .iter()
        .map(|slot| {
            let input = child(document, fields, ElementKind::Input, "range-slider__input");
            document.add_class(input, format!("range-slider__input--{}", slot.name()));
            input
        })
        .collect();

    SliderElements {
        container,
        root,
        track,
        handles,
        inputs,
        segments,
    }
}

fn child(document: &mut Document, parent: ElementId, kind: ElementKind, class: &str) -> ElementId {
    let element = document.create_element(kind);
    document.add_class(element, class);
    document.append_child(parent, element);
    element
}

fn attach_drag(
    page: &mut Page,
    inner: &Arc<Mutex<SliderInner>>,
    slot: HandleSlot,
    handle: ElementId,
    on_drag: Option<CallbackWith<f64>>,
) -> DragGesture {
    DragGesture::attach(
        page,
        handle,
        closure!(clone inner, |offset: f64, document: &mut Document| {
            let percentage = {
                let mut slider = inner.lock();
                let width = document.width(slider.elements.track);
                let percentage = track_percentage(offset, width);
                slider.engine.submit_percentage(slot, percentage);
                slider.propagate(document);
                percentage
            };
            if let Some(on_drag) = &on_drag {
                on_drag.call(percentage);
            }
        }),
    )
}

fn attach_keyboard(
    page: &mut Page,
    inner: &Arc<Mutex<SliderInner>>,
    slot: HandleSlot,
    handle: ElementId,
) {
    page.add_listener(
        EventTarget::Element(handle),
        EventKind::KeyDown,
        closure!(clone inner, |event: &Event, scope: &mut EventScope<'_>| {
            let Event::KeyDown { key, .. } = event else {
                return;
            };
            let Some(direction) = key_direction(key) else {
                return;
            };
            let mut slider = inner.lock();
            slider.engine.step_by(slot, direction);
            slider.propagate(scope.document());
        }),
    );
}

fn attach_text_input(
    page: &mut Page,
    inner: &Arc<Mutex<SliderInner>>,
    slot: HandleSlot,
    input: ElementId,
) {
    page.add_listener(
        EventTarget::Element(input),
        EventKind::Input,
        closure!(clone inner, |_event: &Event, scope: &mut EventScope<'_>| {
            let text = scope.document().text(input).to_owned();
            let mut slider = inner.lock();
            slider.engine.submit_text(slot, &text);
            slider.propagate(scope.document());
        }),
    );
}

fn attach_segment(page: &mut Page, inner: &Arc<Mutex<SliderInner>>, segment: ElementId) {
    page.add_listener(
        EventTarget::Element(segment),
        EventKind::Click,
        closure!(clone inner, |_event: &Event, scope: &mut EventScope<'_>| {
            let Some(boundary) = scope
                .document()
                .data(segment, "value")
                .and_then(|value| value.parse::<f64>().ok())
            else {
                tracing::warn!(?segment, "segment without a boundary value");
                return;
            };
            let mut slider = inner.lock();
            slider.engine.submit_segment(boundary);
            slider.propagate(scope.document());
        }),
    );
}
