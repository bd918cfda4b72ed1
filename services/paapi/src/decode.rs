//! Response decoding.
//!
//! The service answers in XML. This module converts a response body into a
//! [`serde_json::Value`] tree so callers can address fields without caring
//! about XML plumbing: child elements become object members, repeated
//! siblings become arrays, text-only elements become strings, and element
//! attributes are collected under an `@attributes` member. The root element
//! name is dropped; the returned value is the root's content.
//!
//! No schema validation or numeric coercion happens here.

use ecsign_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

#[derive(Default)]
struct Element {
    attrs: Map<String, Value>,
    children: Vec<(String, Value)>,
    text: String,
}

/// Decode an XML document into a JSON value.
pub fn xml_to_json(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<(String, Element)> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        match reader.read_event() {
            Err(e) => {
                return Err(Error::unexpected(format!(
                    "malformed xml at position {}",
                    reader.buffer_position()
                ))
                .with_source(e))
            }
            Ok(Event::Start(e)) => {
                stack.push(open_element(&e)?);
            }
            Ok(Event::Empty(e)) => {
                let (name, el) = open_element(&e)?;
                close_element(&mut stack, &mut root, name, el);
            }
            Ok(Event::Text(e)) => {
                if let Some((_, el)) = stack.last_mut() {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::unexpected("invalid xml text").with_source(e))?;
                    el.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some((_, el)) = stack.last_mut() {
                    el.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                // The reader checks tag balance; the stack cannot be empty here.
                let (name, el) = stack.pop().expect("end event without matching start");
                close_element(&mut stack, &mut root, name, el);
            }
            Ok(Event::Eof) => break,
            // Declarations, comments and processing instructions carry no data.
            Ok(_) => continue,
        }
    }

    root.ok_or_else(|| Error::unexpected("empty xml document"))
}

fn open_element(e: &BytesStart) -> Result<(String, Element)> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

    let mut el = Element::default();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::unexpected("invalid xml attribute").with_source(e))?;
        let value = attr
            .unescape_value()
            .map_err(|e| Error::unexpected("invalid xml attribute value").with_source(e))?;
        el.attrs.insert(
            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            Value::String(value.into_owned()),
        );
    }

    Ok((name, el))
}

fn close_element(
    stack: &mut Vec<(String, Element)>,
    root: &mut Option<Value>,
    name: String,
    el: Element,
) {
    let value = finish_element(el);
    match stack.last_mut() {
        Some((_, parent)) => parent.children.push((name, value)),
        // The root element's name is dropped, like the original tree view.
        None => *root = Some(value),
    }
}

fn finish_element(el: Element) -> Value {
    if el.attrs.is_empty() && el.children.is_empty() {
        return Value::String(el.text);
    }

    let mut map = Map::new();
    if !el.attrs.is_empty() {
        map.insert("@attributes".to_string(), Value::Object(el.attrs));
    }
    for (name, value) in el.children {
        match map.get_mut(&name) {
            None => {
                map.insert(name, value);
            }
            // A second sibling with the same name turns the member into an
            // array; further siblings append.
            Some(Value::Array(siblings)) => siblings.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }
    if !el.text.is_empty() {
        map.insert("$value".to_string(), Value::String(el.text));
    }

    Value::Object(map)
}
