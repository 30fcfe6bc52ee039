//! Minimal in-memory document tree.
//!
//! Elements are shared through [`ElementRef`] handles so that a component can
//! keep references to the nodes it owns while the same nodes stay attached to
//! the page tree. Everything runs on one UI thread, hence `Rc<RefCell<_>>`.
//!
//! Text and attribute values are stored raw and escaped on serialization, so
//! data coming from the catalog or from form input can never inject markup.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub type ElementRef = Rc<RefCell<Element>>;

/// Tags serialized without a closing tag.
const VOID_TAGS: [&str; 5] = ["br", "img", "input", "meta", "hr"];

#[derive(Debug, Clone)]
pub enum Node {
    Element(ElementRef),
    Text(String),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el.into_ref())
    }
}

impl From<ElementRef> for Node {
    fn from(el: ElementRef) -> Self {
        Node::Element(el)
    }
}

#[derive(Debug, Default)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn into_ref(self) -> ElementRef {
        Rc::new(RefCell::new(self))
    }

    // ── Builder ──

    pub fn with_id(mut self, id: &str) -> Self {
        self.set_attr("id", id);
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        for c in class.split_whitespace() {
            self.add_class(c);
        }
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.set_data(key, value);
        self
    }

    pub fn with_style(mut self, prop: &str, value: &str) -> Self {
        self.set_style(prop, value);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(Node::text(text));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    // ── Attributes ──

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.remove(name);
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.attr(&format!("data-{key}"))
    }

    pub fn set_data(&mut self, key: &str, value: &str) {
        self.set_attr(&format!("data-{key}"), value);
    }

    /// All `data-*` attributes with the prefix stripped.
    pub fn dataset(&self) -> BTreeMap<String, String> {
        self.attrs
            .iter()
            .filter_map(|(k, v)| k.strip_prefix("data-").map(|k| (k.to_string(), v.clone())))
            .collect()
    }

    // ── Classes ──

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    // ── Inline style ──

    pub fn style(&self, prop: &str) -> Option<&str> {
        self.style.get(prop).map(String::as_str)
    }

    pub fn set_style(&mut self, prop: &str, value: &str) {
        self.style.insert(prop.to_string(), value.to_string());
    }

    pub fn remove_style(&mut self, prop: &str) {
        self.style.remove(prop);
    }

    /// False when an inline `display: none` is set.
    pub fn is_displayed(&self) -> bool {
        self.style("display") != Some("none")
    }

    /// `display: none` when `shown` is false, otherwise falls back to the stylesheet.
    pub fn set_displayed(&mut self, shown: bool) {
        if shown {
            self.remove_style("display");
        } else {
            self.set_style("display", "none");
        }
    }

    // ── Boolean attributes and form state ──

    pub fn is_hidden(&self) -> bool {
        self.has_attr("hidden")
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        if hidden {
            self.set_attr("hidden", "");
        } else {
            self.remove_attr("hidden");
        }
    }

    pub fn value(&self) -> &str {
        self.attr("value").unwrap_or("")
    }

    pub fn set_value(&mut self, value: &str) {
        self.set_attr("value", value);
    }

    pub fn is_checked(&self) -> bool {
        self.has_attr("checked")
    }

    pub fn set_checked(&mut self, checked: bool) {
        if checked {
            self.set_attr("checked", "");
        } else {
            self.remove_attr("checked");
        }
    }

    // ── Children ──

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> Vec<ElementRef> {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Element(e) => Some(Rc::clone(e)),
                Node::Text(_) => None,
            })
            .collect()
    }

    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn insert(&mut self, index: usize, child: impl Into<Node>) {
        let index = index.min(self.children.len());
        self.children.insert(index, child.into());
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        self.children.push(Node::text(text));
    }

    pub fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    /// Concatenated text of the subtree; `br` becomes a newline.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if self.tag == "br" {
            out.push('\n');
            return;
        }
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.borrow().collect_text(out),
            }
        }
    }

    // ── Serialization ──

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);

        let is_textarea = self.tag == "textarea";
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape_html(&self.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &self.attrs {
            if is_textarea && name == "value" {
                continue;
            }
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() || !is_boolean_attr(name) {
                out.push_str("=\"");
                out.push_str(&escape_html(value));
                out.push('"');
            }
        }
        if !self.style.is_empty() {
            let css: Vec<String> = self
                .style
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect();
            out.push_str(" style=\"");
            out.push_str(&escape_html(&css.join("; ")));
            out.push('"');
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        if is_textarea {
            out.push_str(&escape_html(self.value()));
        }
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&escape_html(t)),
                Node::Element(e) => e.borrow().write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn is_boolean_attr(name: &str) -> bool {
    matches!(name, "hidden" | "checked" | "disabled" | "selected")
}

/// Escape text for use in HTML content and double-quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// ── Tree queries ──

/// Depth-first search, including `root` itself.
pub fn find_first(root: &ElementRef, pred: &dyn Fn(&Element) -> bool) -> Option<ElementRef> {
    if pred(&root.borrow()) {
        return Some(Rc::clone(root));
    }
    let children = root.borrow().child_elements();
    children.iter().find_map(|c| find_first(c, pred))
}

/// All matching elements in document order, including `root` itself.
pub fn find_all(root: &ElementRef, pred: &dyn Fn(&Element) -> bool) -> Vec<ElementRef> {
    let mut out = Vec::new();
    collect_matching(root, pred, &mut out);
    out
}

fn collect_matching(root: &ElementRef, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<ElementRef>) {
    if pred(&root.borrow()) {
        out.push(Rc::clone(root));
    }
    let children = root.borrow().child_elements();
    for c in &children {
        collect_matching(c, pred, out);
    }
}

pub fn find_by_id(root: &ElementRef, id: &str) -> Option<ElementRef> {
    find_first(root, &|e| e.id() == Some(id))
}

pub fn find_by_class(root: &ElementRef, class: &str) -> Vec<ElementRef> {
    find_all(root, &|e| e.has_class(class))
}

/// Chain of elements from `root` down to `target`, both inclusive.
pub fn path_to(root: &ElementRef, target: &ElementRef) -> Option<Vec<ElementRef>> {
    if Rc::ptr_eq(root, target) {
        return Some(vec![Rc::clone(root)]);
    }
    let children = root.borrow().child_elements();
    for child in &children {
        if let Some(mut path) = path_to(child, target) {
            path.insert(0, Rc::clone(root));
            return Some(path);
        }
    }
    None
}

/// Nearest ancestor-or-self of `target`, inside `root`, that has `attr`.
pub fn closest_with_attr(root: &ElementRef, target: &ElementRef, attr: &str) -> Option<ElementRef> {
    let path = path_to(root, target)?;
    path.into_iter().rev().find(|e| e.borrow().has_attr(attr))
}

pub fn contains(root: &ElementRef, target: &ElementRef) -> bool {
    path_to(root, target).is_some()
}

/// Insert `node` right after `reference` in its parent. Returns false when
/// `reference` is not below `root`.
pub fn insert_after(root: &ElementRef, reference: &ElementRef, node: impl Into<Node>) -> bool {
    let Some(path) = path_to(root, reference) else {
        return false;
    };
    if path.len() < 2 {
        return false;
    }
    let parent = &path[path.len() - 2];
    let index = parent
        .borrow()
        .children()
        .iter()
        .position(|n| matches!(n, Node::Element(e) if Rc::ptr_eq(e, reference)));
    match index {
        Some(i) => {
            parent.borrow_mut().insert(i + 1, node);
            true
        }
        None => false,
    }
}

/// A page: the `body` tree plus the currently focused element.
#[derive(Debug)]
pub struct Document {
    title: String,
    body: ElementRef,
    focused: RefCell<Option<ElementRef>>,
}

impl Document {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            body: Element::new("body").into_ref(),
            focused: RefCell::new(None),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> ElementRef {
        Rc::clone(&self.body)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementRef> {
        find_by_id(&self.body, id)
    }

    pub fn get_elements_by_class(&self, class: &str) -> Vec<ElementRef> {
        find_by_class(&self.body, class)
    }

    pub fn focus(&self, el: &ElementRef) {
        *self.focused.borrow_mut() = Some(Rc::clone(el));
    }

    pub fn blur(&self) {
        *self.focused.borrow_mut() = None;
    }

    pub fn focused(&self) -> Option<ElementRef> {
        self.focused.borrow().clone()
    }

    pub fn is_focused(&self, el: &ElementRef) -> bool {
        self.focused
            .borrow()
            .as_ref()
            .is_some_and(|f| Rc::ptr_eq(f, el))
    }

    pub fn to_html(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head>{}</html>\n",
            escape_html(&self.title),
            self.body.borrow().to_html()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let el = Element::new("td")
            .with_attr("title", "\"><img src=x>")
            .with_text("<b>bold</b>");
        let html = el.to_html();
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("title=\"&quot;&gt;&lt;img src=x&gt;\""));
    }

    #[test]
    fn test_void_and_boolean_attributes() {
        let el = Element::new("input")
            .with_attr("type", "radio")
            .with_attr("checked", "");
        assert_eq!(el.to_html(), "<input checked type=\"radio\">");
    }

    #[test]
    fn test_text_content_maps_br_to_newline() {
        let el = Element::new("p")
            .with_text("one")
            .with_child(Element::new("br"))
            .with_text("two");
        assert_eq!(el.text_content(), "one\ntwo");
        assert_eq!(el.to_html(), "<p>one<br>two</p>");
    }

    #[test]
    fn test_closest_with_attr() {
        let icon = Element::new("span").into_ref();
        let button = Element::new("button")
            .with_data("action", "open-details")
            .with_child(Rc::clone(&icon))
            .into_ref();
        let grid = Element::new("div").with_child(Rc::clone(&button)).into_ref();

        let found = closest_with_attr(&grid, &icon, "data-action").unwrap();
        assert!(Rc::ptr_eq(&found, &button));
        assert!(closest_with_attr(&grid, &grid, "data-action").is_none());

        let stranger = Element::new("span").into_ref();
        assert!(closest_with_attr(&grid, &stranger, "data-action").is_none());
    }

    #[test]
    fn test_insert_after() {
        let form = Element::new("form").into_ref();
        let root = Element::new("main")
            .with_child(Rc::clone(&form))
            .with_child(Element::new("footer"))
            .into_ref();
        assert!(insert_after(&root, &form, Element::new("div").with_class("card")));
        let tags: Vec<String> = root
            .borrow()
            .child_elements()
            .iter()
            .map(|e| e.borrow().tag().to_string())
            .collect();
        assert_eq!(tags, ["form", "div", "footer"]);
    }

    #[test]
    fn test_display_and_hidden_toggles() {
        let mut el = Element::new("tr");
        assert!(el.is_displayed());
        el.set_displayed(false);
        assert!(!el.is_displayed());
        el.set_displayed(true);
        assert!(el.is_displayed());

        el.set_hidden(true);
        assert!(el.is_hidden());
        el.set_hidden(false);
        assert!(!el.is_hidden());
    }

    #[test]
    fn test_document_lookup_and_focus() {
        let doc = Document::new("Games");
        let close = Element::new("button").with_class("close").into_ref();
        doc.body()
            .borrow_mut()
            .append(Element::new("div").with_id("gameModal").with_child(Rc::clone(&close)));

        assert!(doc.get_element_by_id("gameModal").is_some());
        assert!(doc.get_element_by_id("missing").is_none());
        assert_eq!(doc.get_elements_by_class("close").len(), 1);

        assert!(!doc.is_focused(&close));
        doc.focus(&close);
        assert!(doc.is_focused(&close));
        doc.blur();
        assert!(doc.focused().is_none());
    }
}
