//! Minimal SVG element tree with escaping.

use crate::geometry::frame::coord;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Root `<svg>` element of `width × height` pixels.
    pub fn svg(id: &str, width: u32, height: u32) -> Self {
        Self::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("id", id)
            .attr("width", width)
            .attr("height", height)
            .attr("viewBox", format!("0 0 {width} {height}"))
    }

    pub fn attr(mut self, name: &'static str, value: impl ToString) -> Self {
        self.attrs.push((name, value.to_string()));
        self
    }

    /// Numeric attribute, rounded for compact output.
    pub fn num(self, name: &'static str, value: f64) -> Self {
        self.attr(name, coord(value))
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Depth-first search for the element with `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.get_attr("id") == Some(id) {
            return Some(self);
        }
        self.children().find_map(|c| c.find_by_id(id))
    }

    /// Number of descendants named `name`, including `self`.
    pub fn count(&self, name: &str) -> usize {
        let own = usize::from(self.name == name);
        own + self.children().map(|c| c.count(name)).sum::<usize>()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (name, value) in &self.attrs {
            // writing into a String cannot fail
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_to(out),
                Node::Text(t) => out.push_str(&escape(t)),
            }
        }
        let _ = write!(out, "</{}>", self.name);
    }
}

pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested() {
        let svg = Element::svg("chart", 10, 20)
            .child(Element::new("g").attr("id", "inner").child(
                Element::new("text").num("x", 1.5).text("a < b"),
            ))
            .child(Element::new("rect").num("width", 3.0));
        assert_eq!(
            svg.render(),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"chart\" width=\"10\" height=\"20\" \
             viewBox=\"0 0 10 20\"><g id=\"inner\"><text x=\"1.5\">a &lt; b</text></g>\
             <rect width=\"3\"/></svg>"
        );
        assert_eq!(svg.count("text"), 1);
        assert_eq!(svg.find_by_id("inner").map(|e| e.name()), Some("g"));
    }

    #[test]
    fn test_attribute_escaping() {
        let el = Element::new("a").attr("title", "\"quoted\" & 'single'");
        assert_eq!(
            el.render(),
            "<a title=\"&quot;quoted&quot; &amp; &#39;single&#39;\"/>"
        );
    }
}
