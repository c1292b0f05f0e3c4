//! A small HTML element tree for highlighted code blocks.

use quick_xml::escape::escape;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag_name: String,
    pub properties: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Builds an element the way `hastscript` does: tag, properties, children.
pub fn h(tag_name: &str, properties: &[(&str, &str)], children: Vec<Node>) -> Element {
    Element {
        tag_name: tag_name.to_string(),
        properties: properties.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        children,
    }
}

pub fn text(value: impl Into<String>) -> Node {
    Node::Text(value.into())
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

impl Element {
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.property("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn first_element(&self) -> Option<&Element> {
        self.children.iter().find_map(|c| match c {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of every descendant.
    pub fn text_content(&self) -> String {
        let mut buf = String::new();
        collect_text(&self.children, &mut buf);
        buf
    }

    pub fn to_html(&self) -> String {
        let mut buf = String::new();
        write_element(self, &mut buf);
        buf
    }
}

fn collect_text(nodes: &[Node], buf: &mut String) {
    for node in nodes {
        match node {
            Node::Element(e) => collect_text(&e.children, buf),
            Node::Text(t) => buf.push_str(t),
        }
    }
}

fn write_element(element: &Element, buf: &mut String) {
    buf.push('<');
    buf.push_str(&element.tag_name);
    for (name, value) in element.properties.iter() {
        buf.push(' ');
        buf.push_str(name);
        buf.push_str("=\"");
        buf.push_str(&escape(value.as_str()));
        buf.push('"');
    }
    buf.push('>');
    for child in element.children.iter() {
        match child {
            Node::Element(e) => write_element(e, buf),
            Node::Text(t) => buf.push_str(&escape(t.as_str())),
        }
    }
    buf.push_str("</");
    buf.push_str(&element.tag_name);
    buf.push('>');
}
