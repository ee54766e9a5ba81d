//! range-slider is a headless slider engine: one or two handles on a track,
//! selecting a value or an interval inside `[min, max]`.
//!
//! # Overview
//!
//! A [`RangeSlider`] is mounted into an element of a [`page::Page`]. It
//! builds a track, one handle per value, a text input per value and,
//! optionally, a row of clickable segment boundaries. Four input channels
//! change its values:
//!
//! - dragging a handle ([`drag::DragGesture`], coalesced to one update per
//!   frame),
//! - arrow keys on a focused handle,
//! - typing into a text input,
//! - clicking a segment boundary.
//!
//! Every channel goes through the same normalization in
//! [`slider::ValueEngine`]: clamp to `[min, max]`, align to the step grid,
//! and in range mode swap the pair if the handles crossed. The slider then
//! writes handle positions and the track fill as style properties and
//! rewrites the text inputs.
//!
//! # Example
//!
//! ```
//! use range_slider::{
//!     RangeSlider, RangeSliderArgs,
//!     dom::ElementKind,
//!     event::Key,
//!     page::Page,
//!     slider::HANDLE_POSITION,
//! };
//!
//! let mut page = Page::new();
//! let mount = page.document_mut().create_element(ElementKind::Container);
//! page.document_mut().set_dom_id(mount, "volume");
//! let root = page.document().root();
//! page.document_mut().append_child(root, mount);
//!
//! let slider = RangeSlider::mount(
//!     &mut page,
//!     "#volume",
//!     RangeSliderArgs::default().step(5.0).default_value([50.0]),
//! )?;
//!
//! let handle = slider.handles()[0];
//! page.press_key(handle, Key::ArrowRight);
//! assert_eq!(slider.values(), vec![55.0]);
//! assert_eq!(
//!     page.document().style_property(handle, HANDLE_POSITION),
//!     Some("55%")
//! );
//! # Ok::<(), range_slider::SliderError>(())
//! ```
//!
//! # Logging
//!
//! The crate logs through [`tracing`]: mounts and value changes at `debug`,
//! gesture transitions and dispatch at `trace`. Install a subscriber in the
//! host to see them.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod dom;
pub mod drag;
mod error;
pub mod event;
pub mod page;
pub mod prop;
pub mod slider;

pub use crate::{
    error::SliderError,
    prop::CallbackWith,
    slider::{HandleSlot, RangeSlider, RangeSliderArgs, SliderElements, SliderMode},
};
