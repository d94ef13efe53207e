//! Minimal element tree used to build section markup.
//!
//! `el` mirrors the usual `h(tag, attrs, children)` helper: attributes carry an
//! optional class, literal text, raw markup and pass-through pairs. Raw markup is
//! emitted verbatim and must come from trusted content.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    class: Option<String>,
    text: Option<String>,
    html: Option<String>,
    other: Vec<(String, String)>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.other.push((name.into(), value.into()));
        self
    }
}

pub fn class(class: impl Into<String>) -> Attrs {
    Attrs::new().class(class)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Text(String),
    Node(Node),
    Empty,
}

impl From<&str> for Child {
    fn from(value: &str) -> Self {
        Child::Text(value.to_string())
    }
}

impl From<String> for Child {
    fn from(value: String) -> Self {
        Child::Text(value)
    }
}

impl From<Node> for Child {
    fn from(value: Node) -> Self {
        Child::Node(value)
    }
}

impl From<Option<Node>> for Child {
    fn from(value: Option<Node>) -> Self {
        value.map_or(Child::Empty, Child::Node)
    }
}

impl From<Option<String>> for Child {
    fn from(value: Option<String>) -> Self {
        value.map_or(Child::Empty, Child::Text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    tag: String,
    attrs: Attrs,
    children: Vec<Child>,
}

pub fn el(tag: &str, attrs: Attrs, children: Vec<Child>) -> Node {
    let children = children
        .into_iter()
        .filter(|child| match child {
            Child::Empty => false,
            Child::Text(text) => !text.is_empty(),
            Child::Node(_) => true,
        })
        .collect();

    Node {
        tag: tag.to_string(),
        attrs,
        children,
    }
}

impl Node {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn class_name(&self) -> Option<&str> {
        self.attrs.class.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_name()
            .is_some_and(|names| names.split_whitespace().any(|name| name == class))
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .other
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(|child| match child {
            Child::Node(node) => Some(node),
            _ => None,
        })
    }

    /// Concatenated literal text of this node and its descendants. Raw markup is skipped.
    pub fn text_content(&self) -> String {
        let mut out = self.attrs.text.clone().unwrap_or_default();
        for child in &self.children {
            match child {
                Child::Text(text) => out.push_str(text),
                Child::Node(node) => out.push_str(&node.text_content()),
                Child::Empty => {}
            }
        }
        out
    }

    /// Depth-first search including `self`.
    pub fn find_all<'a, F>(&'a self, pred: &F, out: &mut Vec<&'a Node>)
    where
        F: Fn(&Node) -> bool,
    {
        if pred(self) {
            out.push(self);
        }
        for child in self.child_nodes() {
            child.find_all(pred, out);
        }
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if let Some(class) = &self.attrs.class {
            out.push_str(" class=\"");
            out.push_str(&escape_html(class));
            out.push('"');
        }
        for (name, value) in &self.attrs.other {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
        out.push('>');

        if let Some(text) = &self.attrs.text {
            out.push_str(&escape_html(text));
        }
        if let Some(html) = &self.attrs.html {
            out.push_str(html);
        }
        for child in &self.children {
            match child {
                Child::Text(text) => out.push_str(&escape_html(text)),
                Child::Node(node) => node.write_html(out),
                Child::Empty => {}
            }
        }

        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
