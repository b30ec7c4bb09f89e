//! Minimal element tree built on `quick-xml` events.

use quick_xml::events::Event;
use quick_xml::Reader;

use super::decode::DecodeError;

#[derive(Debug)]
pub(super) struct Element {
    pub name: String,
    pub children: Vec<Node>,
}

#[derive(Debug)]
pub(super) enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Vec::new(),
        }
    }

    pub fn has_child_elements(&self) -> bool {
        self.children
            .iter()
            .any(|node| matches!(node, Node::Element(_)))
    }

    /// Concatenated text content, whitespace preserved.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Text of an element that must not contain child elements.
    pub fn leaf_text(&self) -> Result<String, DecodeError> {
        if self.has_child_elements() {
            return Err(DecodeError::Structure(format!(
                "<{}> must not contain elements",
                self.name
            )));
        }
        Ok(self.text())
    }

    /// Child elements of a container; stray non-whitespace text is an error.
    pub fn child_elements(&self) -> Result<Vec<&Element>, DecodeError> {
        let mut elements = Vec::new();
        for node in &self.children {
            match node {
                Node::Element(element) => elements.push(element),
                Node::Text(text) if text.trim().is_empty() => {}
                Node::Text(_) => {
                    return Err(DecodeError::Structure(format!(
                        "unexpected text inside <{}>",
                        self.name
                    )))
                }
            }
        }
        Ok(elements)
    }

    /// The single child element named `name`.
    pub fn only_child(&self, name: &str) -> Result<&Element, DecodeError> {
        match self.child_elements()?.as_slice() {
            [child] if child.name == name => Ok(*child),
            _ => Err(DecodeError::Structure(format!(
                "<{}> must contain exactly one <{name}>",
                self.name
            ))),
        }
    }
}

/// Parse a whole document into its root element.
///
/// Rejects unbalanced tags, more than one root, text outside the root, and
/// element nesting deeper than `max_depth`.
pub(super) fn parse_document(input: &str, max_depth: usize) -> Result<Element, DecodeError> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| DecodeError::Xml(format!("{e} at byte {}", reader.buffer_position())))?;

        match event {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(DecodeError::Xml("content after root element".into()));
                }
                if stack.len() >= max_depth {
                    return Err(DecodeError::TooDeep(max_depth));
                }
                stack.push(Element::new(element_name(start.name().as_ref())?));
            }
            Event::Empty(start) => {
                let element = Element::new(element_name(start.name().as_ref())?);
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| DecodeError::Xml("unexpected closing tag".into()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| DecodeError::Xml(e.to_string()))?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(cdata) => {
                let text = String::from_utf8(cdata.into_inner().into_owned())
                    .map_err(|_| DecodeError::NotUtf8)?;
                push_text(&mut stack, &text)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype.
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(DecodeError::Xml("unclosed element at end of input".into()));
    }
    root.ok_or_else(|| DecodeError::Xml("document has no root element".into()))
}

fn element_name(raw: &[u8]) -> Result<String, DecodeError> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|_| DecodeError::NotUtf8)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), DecodeError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => return Err(DecodeError::Xml("content after root element".into())),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), DecodeError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Text(text.to_string())),
        None if text.trim().is_empty() => {}
        None => return Err(DecodeError::Xml("text outside root element".into())),
    }
    Ok(())
}
