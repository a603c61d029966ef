//! Minimal in-memory element tree the renderers paint into.
//!
//! Elements are shared handles: cloning an [`Element`] yields another handle
//! to the same node, so a renderer can hold on to a subtree while the
//! scheduler keeps the parent. Use [`Element::deep_clone`] for an independent
//! copy (this is how templates are stamped out).

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;

use parking_lot::Mutex;

type ClickHandler = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct Element(Arc<Mutex<Node>>);

struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    text: String,
    attributes: BTreeMap<String, String>,
    children: Vec<Element>,
    on_click: Option<ClickHandler>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self(Arc::new(Mutex::new(Node {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            text: String::new(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            on_click: None,
        })))
    }

    // ===== Builders =====

    pub fn with_id(self, id: &str) -> Self {
        self.0.lock().id = Some(id.to_string());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_child(self, child: Element) -> Self {
        self.append_child(child);
        self
    }

    // ===== Accessors =====

    pub fn tag(&self) -> String {
        self.0.lock().tag.clone()
    }

    pub fn id(&self) -> Option<String> {
        self.0.lock().id.clone()
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.lock().classes.clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.lock().classes.iter().any(|c| c == class)
    }

    /// Adds a class unless blank or already present.
    pub fn add_class(&self, class: &str) {
        let class = class.trim();
        if class.is_empty() {
            return;
        }
        let mut node = self.0.lock();
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
    }

    /// This element's own text, not including descendants.
    pub fn text(&self) -> String {
        self.0.lock().text.clone()
    }

    pub fn set_text(&self, text: &str) {
        self.0.lock().text = text.to_string();
    }

    /// Own text followed by every descendant's, depth first.
    pub fn text_content(&self) -> String {
        let (mut text, children) = {
            let node = self.0.lock();
            (node.text.clone(), node.children.clone())
        };
        for child in children {
            text.push_str(&child.text_content());
        }
        text
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.lock().attributes.get(name).cloned()
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .lock()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn children(&self) -> Vec<Element> {
        self.0.lock().children.clone()
    }

    pub fn first_child(&self) -> Option<Element> {
        self.0.lock().children.first().cloned()
    }

    // ===== Mutation =====

    pub fn append_child(&self, child: Element) {
        self.0.lock().children.push(child);
    }

    pub fn replace_children(&self, children: Vec<Element>) {
        self.0.lock().children = children;
    }

    pub fn clear(&self) {
        self.replace_children(Vec::new());
    }

    pub fn set_on_click(&self, handler: impl Fn() + Send + Sync + 'static) {
        self.0.lock().on_click = Some(Arc::new(handler));
    }

    /// Runs the click handler. Returns false when there is none.
    pub fn click(&self) -> bool {
        let handler = self.0.lock().on_click.clone();
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    pub fn same_node(&self, other: &Element) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Independent copy of this subtree. Click handlers are shared.
    pub fn deep_clone(&self) -> Element {
        let node = self.0.lock();
        Element(Arc::new(Mutex::new(Node {
            tag: node.tag.clone(),
            id: node.id.clone(),
            classes: node.classes.clone(),
            text: node.text.clone(),
            attributes: node.attributes.clone(),
            children: node.children.iter().map(Element::deep_clone).collect(),
            on_click: node.on_click.clone(),
        })))
    }

    // ===== Queries =====

    /// First descendant matching `selector`, depth first. The element
    /// itself is not considered.
    pub fn query(&self, selector: &str) -> Option<Element> {
        let selector = Selector::parse(selector)?;
        self.find(&selector)
    }

    /// Every descendant matching `selector`, in document order.
    pub fn query_all(&self, selector: &str) -> Vec<Element> {
        let mut found = Vec::new();
        if let Some(selector) = Selector::parse(selector) {
            self.collect(&selector, &mut found);
        }
        found
    }

    fn find(&self, selector: &Selector) -> Option<Element> {
        for child in self.children() {
            if selector.matches(&child) {
                return Some(child);
            }
            if let Some(found) = child.find(selector) {
                return Some(found);
            }
        }
        None
    }

    fn collect(&self, selector: &Selector, found: &mut Vec<Element>) {
        for child in self.children() {
            if selector.matches(&child) {
                found.push(child.clone());
            }
            child.collect(selector, found);
        }
    }

    /// Indented text dump of the subtree.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        let (label, children) = {
            let node = self.0.lock();
            let mut label = node.tag.clone();
            if let Some(id) = &node.id {
                label.push('#');
                label.push_str(id);
            }
            for class in &node.classes {
                label.push('.');
                label.push_str(class);
            }
            for (name, value) in &node.attributes {
                let _ = write!(label, " {}=\"{}\"", name, value);
            }
            if !node.text.is_empty() {
                let _ = write!(label, " {:?}", node.text);
            }
            (label, node.children.clone())
        };

        let _ = writeln!(out, "{}{}", "  ".repeat(depth), label);
        for child in children {
            child.write_outline(out, depth + 1);
        }
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let node = self.0.lock();
        f.debug_struct("Element")
            .field("tag", &node.tag)
            .field("id", &node.id)
            .field("classes", &node.classes)
            .field("children", &node.children.len())
            .finish()
    }
}

/// Compound selector: optional tag, then any number of `.class` / `#id`.
struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let mut selector = Selector {
            tag: None,
            id: None,
            classes: Vec::new(),
        };

        let tag_end = input.find(['.', '#']).unwrap_or(input.len());
        if tag_end > 0 {
            selector.tag = Some(input[..tag_end].to_ascii_lowercase());
        }

        let mut rest = &input[tag_end..];
        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return None;
            }
            match marker {
                '.' => selector.classes.push(name.to_string()),
                _ => selector.id = Some(name.to_string()),
            }
            rest = &body[end..];
        }

        Some(selector)
    }

    fn matches(&self, element: &Element) -> bool {
        let node = element.0.lock();
        self.tag.as_ref().map_or(true, |tag| &node.tag == tag)
            && self.id.as_ref().map_or(true, |id| node.id.as_ref() == Some(id))
            && self
                .classes
                .iter()
                .all(|class| node.classes.iter().any(|c| c == class))
    }
}
