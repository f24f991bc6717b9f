//! HTML document surface.
//!
//! Realizes a scene as a single self-contained HTML page: the canvas `div`
//! carries the sky gradient, snow particles are absolutely positioned
//! `div`s animated by two CSS keyframe sets, and the drift ridge is an
//! inline SVG pinned to the bottom of the viewport.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use frostline_scene::{Container, Element, ElementKind, RenderSurface, StyleMap};
use tracing::info;

const STYLESHEET: &str = "\
html, body { margin: 0; height: 100%; overflow: hidden; }
#canvas { position: fixed; inset: 0; overflow: hidden; }
#snowfall { position: absolute; inset: 0; }
.snow { position: absolute; left: var(--x); top: var(--y); border-radius: 50%; }
#dunes { position: absolute; left: 0; bottom: 0; width: 100%; height: 25vh; }
@keyframes snowfall-x { from { margin-left: 0; } to { margin-left: var(--x-travel); } }
@keyframes snowfall-y { from { top: var(--y); } to { top: 100vh; } }
";

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Surface that renders to an HTML document.
#[derive(Debug, Clone, Default)]
pub struct HtmlSurface {
    styles: HashMap<Container, StyleMap>,
    attributes: HashMap<Container, StyleMap>,
    children: HashMap<Container, Vec<Element>>,
}

impl HtmlSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the full document.
    #[must_use]
    pub fn render(&self, title: &str) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", escape(title));
        let _ = writeln!(html, "<style>\n{STYLESHEET}</style>");
        html.push_str("</head>\n<body>\n");

        self.open_container(&mut html, "div", Container::Canvas, &[]);
        self.open_container(&mut html, "div", Container::Particles, &[]);
        self.write_children(&mut html, Container::Particles);
        html.push_str("</div>\n");
        self.open_container(
            &mut html,
            "svg",
            Container::Ridges,
            &[("xmlns", SVG_NS), ("preserveAspectRatio", "none")],
        );
        self.write_children(&mut html, Container::Ridges);
        html.push_str("</svg>\n</div>\n</body>\n</html>\n");
        html
    }

    /// Renders and writes the document to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>, title: &str) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render(title))?;
        info!("Wrote scene to {}", path.display());
        Ok(())
    }

    fn open_container(
        &self,
        out: &mut String,
        tag: &str,
        container: Container,
        fixed: &[(&str, &str)],
    ) {
        let _ = write!(out, "<{tag} id=\"{}\"", container.id());
        for (key, value) in fixed {
            write_attr(out, key, value);
        }
        if let Some(attributes) = self.attributes.get(&container) {
            for (key, value) in attributes.iter() {
                write_attr(out, key, value);
            }
        }
        if let Some(style) = self.styles.get(&container).filter(|s| !s.is_empty()) {
            write_attr(out, "style", &style.to_string());
        }
        out.push_str(">\n");
    }

    fn write_children(&self, out: &mut String, container: Container) {
        for element in self.children.get(&container).into_iter().flatten() {
            let tag = match element.kind {
                ElementKind::Block => "div",
                ElementKind::Path => "path",
            };
            let _ = write!(out, "<{tag}");
            if let Some(class) = &element.class {
                write_attr(out, "class", class);
            }
            for (key, value) in element.attributes.iter() {
                write_attr(out, key, value);
            }
            if !element.style.is_empty() {
                write_attr(out, "style", &element.style.to_string());
            }
            let _ = writeln!(out, "></{tag}>");
        }
    }
}

impl RenderSurface for HtmlSurface {
    fn set_container_style(&mut self, container: Container, style: StyleMap) {
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

fn write_attr(out: &mut String, key: &str, value: &str) {
    let _ = write!(out, " {key}=\"{}\"", escape(value));
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
