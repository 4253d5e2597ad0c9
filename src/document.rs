//! In-memory SVG document tree and serialization.
//!
//! A draw operation builds a [`Document`] incrementally; finalizing
//! serializes it to SVG text, optionally persists it, and optionally hands
//! it to a [`DisplaySink`]. The tree stays inspectable until serialized,
//! which is what the round-trip tests lean on.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MinardError, Result};

/// One SVG element: tag, ordered attributes, optional text, children.
#[derive(Debug, Clone)]
pub struct Element {
    /// Tag name (rect, polygon, path, text, g)
    pub tag: String,
    /// Attributes in insertion order
    pub attributes: Vec<(String, String)>,
    /// Text content, for text elements
    pub text: Option<String>,
    /// Nested elements, for groups
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element with the given tag.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Add an attribute (builder style).
    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Set the text content (builder style).
    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Append a child element.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// This element plus all descendants.
    pub fn element_count(&self) -> usize {
        1 + self.children.iter().map(Element::element_count).sum::<usize>()
    }

    fn write_svg(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_xml(value));
            out.push('"');
        }
        if self.text.is_none() && self.children.is_empty() {
            out.push_str(" />\n");
            return;
        }
        out.push_str(">\n");
        if let Some(text) = &self.text {
            out.push_str(&escape_xml(text));
        }
        for child in &self.children {
            child.write_svg(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push_str(">\n");
    }
}

/// A vector-graphics document under construction.
///
/// Owned exclusively by one render call until finalized; freeform fragments
/// injected via the renderer are appended verbatim at serialization time.
#[derive(Debug, Clone)]
pub struct Document {
    width: f64,
    height: f64,
    children: Vec<Element>,
    fragments: Vec<String>,
}

impl Document {
    /// Open a document with an explicit pixel canvas size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            children: Vec::new(),
            fragments: Vec::new(),
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Append a top-level element.
    pub fn push(&mut self, element: Element) {
        self.children.push(element);
    }

    /// Append a raw SVG fragment, emitted after all elements.
    pub fn push_fragment(&mut self, fragment: String) {
        self.fragments.push(fragment);
    }

    /// Total element count across the tree (excluding the root canvas).
    pub fn element_count(&self) -> usize {
        self.children.iter().map(Element::element_count).sum()
    }

    /// Serialize the document body: all elements, then all fragments.
    pub fn body_svg(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_svg(&mut out);
        }
        for fragment in &self.fragments {
            out.push_str(fragment);
            out.push('\n');
        }
        out
    }

    /// Serialize the full document, root canvas element included.
    pub fn to_svg(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" height=\"{}\" width=\"{}\">\n{}</svg>\n",
            self.height,
            self.width,
            self.body_svg()
        )
    }

    /// Serialize this document with a second document's content stacked
    /// after it, inside this document's canvas.
    ///
    /// The second document must have content to contribute; compositing an
    /// empty overlay is a usage error, not a silent no-op.
    pub fn to_svg_with_overlay(&self, overlay: &Document) -> Result<String> {
        if overlay.children.is_empty() && overlay.fragments.is_empty() {
            return Err(MinardError::Overlay {
                message: "overlay document has no content".to_string(),
            });
        }
        Ok(format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" height=\"{}\" width=\"{}\">\n{}{}</svg>\n",
            self.height,
            self.width,
            self.body_svg(),
            overlay.body_svg()
        ))
    }

    /// Write the serialized document to a file, appending the `.svg`
    /// extension when absent. Returns the path actually written.
    pub fn save(&self, path: &Path) -> Result<PathBuf> {
        let path = normalize_svg_path(path);
        fs::write(&path, self.to_svg())?;
        Ok(path)
    }
}

/// A notebook-style renderer accepting serialized SVG for inline display.
///
/// Treated as an opaque collaborator; the library never assumes anything
/// about what the sink does with the text.
pub trait DisplaySink {
    /// Display the serialized document.
    fn show(&mut self, svg: &str) -> Result<()>;
}

/// Append `.svg` to a path that lacks it.
pub(crate) fn normalize_svg_path(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == "svg" => path.to_path_buf(),
        _ => {
            let mut os = path.as_os_str().to_os_string();
            os.push(".svg");
            PathBuf::from(os)
        }
    }
}

/// Escape text for use in XML content or attribute values.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
