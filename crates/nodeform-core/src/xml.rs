//! XML codec.
//!
//! Export wraps the tree in a fixed root element; array-shaped nodes emit
//! repeated siblings named by the array element name, and scalar leaves
//! become element text. Import buffers the document into a lightweight
//! element tree, then walks it with text-content type inference.

use std::io::{BufRead, Write};

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{ModelError, Result};
use crate::format::{CancelToken, Format, FormatOptions};
use crate::node::Node;
use crate::value::NodeValue;

/// Options for [`XmlFormat`].
#[derive(Debug, Clone)]
pub struct XmlFormatOptions {
    pub format: FormatOptions,
    /// Name of the document root element.
    pub root_element_name: String,
    /// Element name used for the items of an array-shaped node.
    pub array_element_name: String,
}

impl Default for XmlFormatOptions {
    fn default() -> Self {
        Self {
            format: FormatOptions::default(),
            root_element_name: "Root".to_string(),
            array_element_name: "Value".to_string(),
        }
    }
}

/// Imports and exports XML documents.
#[derive(Debug, Clone)]
pub struct XmlFormat {
    options: XmlFormatOptions,
    // Root and array element names are name-converted once per codec
    // instance, not per element.
    root_element_name: String,
    array_element_name: String,
}

impl XmlFormat {
    pub fn new() -> Self {
        Self::with_options(XmlFormatOptions::default())
    }

    pub fn with_options(options: XmlFormatOptions) -> Self {
        let root_element_name = options.format.convert_name(&options.root_element_name);
        let array_element_name = options.format.convert_name(&options.array_element_name);
        Self {
            options,
            root_element_name,
            array_element_name,
        }
    }

    pub fn options(&self) -> &XmlFormatOptions {
        &self.options
    }

    fn export_node<W: Write>(
        &self,
        xml: &mut Writer<W>,
        node: &Node,
        cancel: &CancelToken,
    ) -> Result<()> {
        if let Some(array) = node.try_as_array() {
            for value in array {
                cancel.check()?;
                match value {
                    NodeValue::Node(child) => {
                        xml.write_event(Event::Start(BytesStart::new(
                            self.array_element_name.as_str(),
                        )))?;
                        self.export_node(xml, child, cancel)?;
                        xml.write_event(Event::End(BytesEnd::new(
                            self.array_element_name.as_str(),
                        )))?;
                    }
                    scalar => self.export_text_element(xml, &self.array_element_name, scalar)?,
                }
            }
            return Ok(());
        }

        for (key, value) in node.iter() {
            cancel.check()?;
            let name = self.element_name(key);
            match value {
                NodeValue::Node(child) => {
                    xml.write_event(Event::Start(BytesStart::new(name.as_str())))?;
                    self.export_node(xml, child, cancel)?;
                    xml.write_event(Event::End(BytesEnd::new(name.as_str())))?;
                }
                scalar => self.export_text_element(xml, &name, scalar)?,
            }
        }
        Ok(())
    }

    fn export_text_element<W: Write>(
        &self,
        xml: &mut Writer<W>,
        name: &str,
        value: &NodeValue,
    ) -> Result<()> {
        let text = value.scalar_text().unwrap_or_default();
        xml.write_event(Event::Start(BytesStart::new(name)))?;
        xml.write_event(Event::Text(BytesText::new(&text)))?;
        xml.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// A key whose first character is not a letter gets an underscore
    /// prefix before name conversion, keeping it a legal element name.
    fn element_name(&self, key: &str) -> String {
        let starts_with_letter = key.chars().next().is_some_and(char::is_alphabetic);
        if starts_with_letter {
            self.options.format.convert_name(key)
        } else {
            self.options.format.convert_name(&format!("_{key}"))
        }
    }
}

impl Default for XmlFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl Format for XmlFormat {
    fn name(&self) -> &'static str {
        "XML"
    }

    fn import(&self, reader: &mut dyn BufRead, node: &mut Node, cancel: &CancelToken) -> Result<()> {
        cancel.check()?;
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        tracing::debug!(bytes = text.len(), "importing XML document");
        let Some(root) = parse_document(&text, cancel)? else {
            return Err(ModelError::Malformed(
                "the input ended before an XML root element".to_string(),
            ));
        };
        import_children(&root, node, cancel)
    }

    fn export(&self, writer: &mut dyn Write, node: &Node, cancel: &CancelToken) -> Result<()> {
        cancel.check()?;
        tracing::debug!(root = %self.root_element_name, "exporting XML document");
        let mut xml = Writer::new_with_indent(writer, b' ', 2);
        xml.write_event(Event::Start(BytesStart::new(self.root_element_name.as_str())))?;
        self.export_node(&mut xml, node, cancel)?;
        xml.write_event(Event::End(BytesEnd::new(self.root_element_name.as_str())))?;
        Ok(())
    }
}

/// A parsed element: its name, the text that appeared before any child
/// element (if any), and its child elements. Attributes, comments and
/// trailing mixed content are ignored.
struct XmlElement {
    name: String,
    leading_text: Option<String>,
    children: Vec<XmlElement>,
}

/// Parses the document and returns its root element, or `None` for input
/// with no element at all.
fn parse_document(text: &str, cancel: &CancelToken) -> Result<Option<XmlElement>> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);
    loop {
        cancel.check()?;
        match reader.read_event()? {
            Event::Start(start) => {
                let name = element_local_name(&start);
                return Ok(Some(parse_element(&mut reader, name, cancel)?));
            }
            Event::Empty(start) => {
                return Ok(Some(XmlElement {
                    name: element_local_name(&start),
                    leading_text: None,
                    children: Vec::new(),
                }))
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Parses the content of an element whose start tag has been consumed,
/// up to and including its end tag.
fn parse_element(
    reader: &mut Reader<&[u8]>,
    name: String,
    cancel: &CancelToken,
) -> Result<XmlElement> {
    let mut element = XmlElement {
        name,
        leading_text: None,
        children: Vec::new(),
    };
    loop {
        cancel.check()?;
        match reader.read_event()? {
            Event::Start(start) => {
                let child_name = element_local_name(&start);
                element
                    .children
                    .push(parse_element(reader, child_name, cancel)?);
            }
            Event::Empty(start) => element.children.push(XmlElement {
                name: element_local_name(&start),
                leading_text: None,
                children: Vec::new(),
            }),
            Event::Text(text) => {
                if element.leading_text.is_none() && element.children.is_empty() {
                    element.leading_text = Some(text.unescape()?.into_owned());
                }
            }
            Event::CData(data) => {
                if element.leading_text.is_none() && element.children.is_empty() {
                    let bytes = data.into_inner();
                    element.leading_text = Some(String::from_utf8_lossy(&bytes).into_owned());
                }
            }
            Event::End(_) => return Ok(element),
            Event::Eof => {
                return Err(ModelError::Malformed(
                    "unexpected end of XML input".to_string(),
                ))
            }
            _ => {}
        }
    }
}

fn element_local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

/// Walk the parsed children of `element` into `node`. An element whose
/// first content is text becomes a typed scalar, first occurrence winning;
/// anything else becomes a child node and recurses. A repeated key that
/// opens a nested node is an error.
fn import_children(element: &XmlElement, node: &mut Node, cancel: &CancelToken) -> Result<()> {
    for child in &element.children {
        cancel.check()?;
        match &child.leading_text {
            Some(text) => {
                if !node.contains_key(&child.name) {
                    node.insert(child.name.clone(), detect_value(text.trim()));
                }
            }
            None => {
                let child_node = node.add_node(child.name.clone())?;
                import_children(child, child_node, cancel)?;
            }
        }
    }
    Ok(())
}

/// Infer a scalar kind from element text: double parse, then integer
/// parse, then boolean parse, defaulting to string.
fn detect_value(text: &str) -> NodeValue {
    if let Ok(value) = text.parse::<f64>() {
        return NodeValue::F64(value);
    }
    if let Ok(value) = text.parse::<i64>() {
        return NodeValue::I64(value);
    }
    if let Ok(value) = text.parse::<bool>() {
        return NodeValue::Bool(value);
    }
    NodeValue::String(text.to_string())
}
