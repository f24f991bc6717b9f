//! Rendering surface capability.
//!
//! Generators produce plain descriptors. Turning those into something
//! visible goes through `RenderSurface`, which only knows how to style a
//! container and append elements to it. `RecordingSurface` keeps everything
//! in memory for tests and for inspecting a composed scene.

use std::collections::HashMap;
use std::fmt;

/// A named target that elements are appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// Root viewport; carries the sky background.
    Canvas,
    /// Particle layer.
    Particles,
    /// Ridge layer.
    Ridges,
}

impl Container {
    /// Stable identifier for the container.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Canvas => "canvas",
            Self::Particles => "snowfall",
            Self::Ridges => "dunes",
        }
    }
}

/// Insertion-ordered property map.
///
/// Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: Vec<(String, String)>,
}

impl StyleMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets a property.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`StyleMap::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Reads a property.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Renders as an inline CSS declaration list: `key: value; key: value; `.
impl fmt::Display for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            write!(f, "{key}: {value}; ")?;
        }
        Ok(())
    }
}

/// Shape of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Styled box (a snow particle).
    Block,
    /// Vector path (a drift).
    Path,
}

/// A shape ready to be appended to a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Shape of the element.
    pub kind: ElementKind,
    /// Optional style class.
    pub class: Option<String>,
    /// Plain attributes (`d`, `fill`, ...).
    pub attributes: StyleMap,
    /// Inline style properties.
    pub style: StyleMap,
}

impl Element {
    /// Creates a bare element.
    #[must_use]
    pub const fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            class: None,
            attributes: StyleMap::new(),
            style: StyleMap::new(),
        }
    }

    /// Sets the style class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Sets an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set(key, value);
        self
    }

    /// Replaces the inline style.
    #[must_use]
    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = style;
        self
    }
}

/// Something scene descriptors can be realized onto.
pub trait RenderSurface {
    /// Replaces a container's inline style.
    fn set_container_style(&mut self, container: Container, style: StyleMap);

    /// Sets a single attribute on a container.
    fn set_container_attribute(&mut self, container: Container, key: &str, value: &str);

    /// Appends an element to a container.
    fn append(&mut self, container: Container, element: Element);
}

/// In-memory surface that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    styles: HashMap<Container, StyleMap>,
    attributes: HashMap<Container, StyleMap>,
    children: HashMap<Container, Vec<Element>>,
    style_writes: usize,
}

impl RecordingSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current inline style of a container.
    #[must_use]
    pub fn style(&self, container: Container) -> Option<&StyleMap> {
        self.styles.get(&container)
    }

    /// Current attributes of a container.
    #[must_use]
    pub fn attributes(&self, container: Container) -> Option<&StyleMap> {
        self.attributes.get(&container)
    }

    /// Elements appended to a container, in order.
    #[must_use]
    pub fn children(&self, container: Container) -> &[Element] {
        self.children
            .get(&container)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of container style writes so far.
    #[must_use]
    pub const fn style_writes(&self) -> usize {
        self.style_writes
    }
}

impl RenderSurface for RecordingSurface {
    fn set_container_style(&mut self, container: Container, style: StyleMap) {
        self.style_writes += 1;
        self.styles.insert(container, style);
    }

    fn set_container_attribute(&mut self, container: Container, key: &str, value: &str) {
        self.attributes
            .entry(container)
            .or_default()
            .set(key, value);
    }

    fn append(&mut self, container: Container, element: Element) {
        self.children.entry(container).or_default().push(element);
    }
}
