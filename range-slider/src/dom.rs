//! # Headless Document
//!
//! An in-memory element tree that stands in for the host page. It provides
//! the capabilities the slider consumes: element construction, selector
//! lookup, named style properties, text content and rendered widths.
//!
//! ## Usage
//!
//! ```
//! use range_slider::dom::{Document, ElementKind};
//!
//! let mut document = Document::new();
//! let mount = document.create_element(ElementKind::Container);
//! document.set_dom_id(mount, "price");
//! document.append_child(document.root(), mount);
//!
//! assert_eq!(document.query_selector("#price"), Some(mount));
//! ```

use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    /// Stable handle to an element in a [`Document`].
    pub struct ElementId;
}

/// The kind of an element, matched by tag selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// The document root.
    Root,
    /// A generic block container (`div`).
    Container,
    /// A focusable, clickable control (`button`).
    Button,
    /// A single-line text field (`input`).
    Input,
}

impl ElementKind {
    /// Tag name used by selectors.
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Root => "body",
            ElementKind::Container => "div",
            ElementKind::Button => "button",
            ElementKind::Input => "input",
        }
    }
}

/// A single node of the document.
#[derive(Debug, Clone)]
pub struct Element {
    kind: ElementKind,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    dom_id: Option<String>,
    classes: SmallVec<[String; 2]>,
    style: FxHashMap<String, String>,
    data: FxHashMap<String, String>,
    text: String,
    width: f64,
}

impl Element {
    fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            dom_id: None,
            classes: SmallVec::new(),
            style: FxHashMap::default(),
            data: FxHashMap::default(),
            text: String::new(),
            width: 0.0,
        }
    }

    fn matches(&self, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            self.dom_id.as_deref() == Some(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            self.classes.iter().any(|c| c == class)
        } else {
            self.kind.tag() == selector
        }
    }
}

/// In-memory element tree.
#[derive(Debug, Clone)]
pub struct Document {
    elements: SlotMap<ElementId, Element>,
    root: ElementId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document containing only its root element.
    pub fn new() -> Self {
        let mut elements = SlotMap::with_key();
        let root = elements.insert(Element::new(ElementKind::Root));
        Self { elements, root }
    }

    /// The root element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, kind: ElementKind) -> ElementId {
        self.elements.insert(Element::new(kind))
    }

    /// Appends `child` to `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            tracing::warn!(?parent, ?child, "append_child on unknown element");
            return;
        }
        if let Some(old_parent) = self.elements[child].parent.take() {
            self.elements[old_parent].children.retain(|c| *c != child);
        }
        self.elements[child].parent = Some(parent);
        self.elements[parent].children.push(child);
    }

    /// Returns `true` if `id` refers to a live element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Read access to an element.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let element = self.elements.get_mut(id);
        if element.is_none() {
            tracing::warn!(?id, "write to unknown element ignored");
        }
        element
    }

    /// The kind of an element.
    pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.element(id).map(|e| e.kind)
    }

    /// The parent of an element, if attached.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).and_then(|e| e.parent)
    }

    /// Children of an element in insertion order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.element(id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    /// Walks from `id` up to the root, yielding `id` first.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.contains(id).then_some(id), |current| {
            self.parent(*current)
        })
    }

    /// Sets the `id` attribute.
    pub fn set_dom_id(&mut self, id: ElementId, dom_id: impl Into<String>) {
        if let Some(element) = self.element_mut(id) {
            element.dom_id = Some(dom_id.into());
        }
    }

    /// Adds a class name.
    pub fn add_class(&mut self, id: ElementId, class: impl Into<String>) {
        let class = class.into();
        if let Some(element) = self.element_mut(id)
            && !element.classes.contains(&class)
        {
            element.classes.push(class);
        }
    }

    /// Returns `true` if the element carries `class`.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    /// First element attached under the root that matches `selector`, in
    /// document order.
    ///
    /// Supported selectors are `#id`, `.class` and a tag name (`div`,
    /// `button`, `input`).
    pub fn query_selector(&self, selector: &str) -> Option<ElementId> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Every element attached under the root that matches `selector`, in
    /// document order.
    pub fn query_selector_all(&self, selector: &str) -> Vec<ElementId> {
        let selector = selector.trim();
        let mut found = Vec::new();
        if selector.is_empty() {
            return found;
        }
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let element = &self.elements[id];
            if id != self.root && element.matches(selector) {
                found.push(id);
            }
            stack.extend(element.children.iter().rev().copied());
        }
        found
    }

    /// Reads a named style property.
    pub fn style_property(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id)
            .and_then(|e| e.style.get(name))
            .map(String::as_str)
    }

    /// Writes a named style property.
    pub fn set_style_property(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.element_mut(id) {
            element.style.insert(name.to_owned(), value.into());
        }
    }

    /// Reads a data attribute.
    pub fn data(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id)
            .and_then(|e| e.data.get(name))
            .map(String::as_str)
    }

    /// Writes a data attribute.
    pub fn set_data(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.element_mut(id) {
            element.data.insert(name.to_owned(), value.into());
        }
    }

    /// Text content, or the current value for inputs.
    pub fn text(&self, id: ElementId) -> &str {
        self.element(id).map_or("", |e| e.text.as_str())
    }

    /// Replaces the text content.
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(element) = self.element_mut(id) {
            element.text = text.into();
        }
    }

    /// Rendered width in pixels. Unknown elements report `0`.
    pub fn width(&self, id: ElementId) -> f64 {
        self.element(id).map_or(0.0, |e| e.width)
    }

    /// Sets the rendered width, as a layout pass would.
    pub fn set_width(&mut self, id: ElementId, width: f64) {
        if let Some(element) = self.element_mut(id) {
            element.width = width;
        }
    }
}
