//! `.resx` localization dictionaries.
//!
//! Only plain string entries are translatable. Designer metadata (`$this.*`,
//! `>>*`), linked files (`ResXFileRef`) and typed or binary values are skipped.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use std::fs;
use std::path::Path;

use super::FormatError;
use crate::fs::atomic_write;
use crate::resource::Resource;

const RESERVED_PREFIXES: &[&str] = &["$this.", ">>"];
const FILE_REF_TYPE: &str = "System.Resources.ResXFileRef";
const STRING_TYPE: &str = "System.String";

const RESHEADERS: &[(&str, &str)] = &[
    ("resmimetype", "text/microsoft-resx"),
    ("version", "2.0"),
    (
        "reader",
        "System.Resources.ResXResourceReader, System.Windows.Forms, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
    ),
    (
        "writer",
        "System.Resources.ResXResourceWriter, System.Windows.Forms, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
    ),
];

/// A `<data>` element as read from the file.
#[derive(Debug, Default)]
struct DataNode {
    name: String,
    type_name: Option<String>,
    mime_type: Option<String>,
    value: String,
}

impl DataNode {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let mut node = Self::default();
        for attribute in start.attributes() {
            let attribute = attribute?;
            let value = attribute.unescape_value()?.into_owned();
            match attribute.key.as_ref() {
                b"name" => node.name = value,
                b"type" => node.type_name = Some(value),
                b"mimetype" => node.mime_type = Some(value),
                _ => {}
            }
        }
        Ok(node)
    }

    fn is_file_ref(&self) -> bool {
        self.type_name
            .as_deref()
            .is_some_and(|t| t.starts_with(FILE_REF_TYPE))
    }

    fn is_reserved(&self) -> bool {
        RESERVED_PREFIXES.iter().any(|p| self.name.starts_with(p))
    }

    fn is_string(&self) -> bool {
        self.mime_type.is_none()
            && self
                .type_name
                .as_deref()
                .is_none_or(|t| t.starts_with(STRING_TYPE))
    }

    fn is_translatable(&self) -> bool {
        !self.is_file_ref() && !self.is_reserved() && self.is_string()
    }
}

/// Reads the string entries of a `.resx` file, keyed by name.
pub fn read(path: &Path) -> Result<Vec<Resource>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let file_name = path.to_string_lossy();
    parse(&file_name, &content).map_err(|e| {
        FormatError::Malformed {
            path: file_name.to_string(),
            reason: format!("{e:#}"),
        }
        .into()
    })
}

/// Parses resx XML into resources. Later duplicates replace earlier ones.
pub fn parse(file_name: &str, content: &str) -> Result<Vec<Resource>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);

    let mut entries: IndexMap<String, Resource> = IndexMap::new();
    let mut current: Option<DataNode> = None;
    let mut in_value = false;

    loop {
        match reader.read_event()? {
            Event::Start(start) if start.name().as_ref() == b"data" => {
                current = Some(DataNode::from_start(&start)?);
            }
            Event::Empty(start) if start.name().as_ref() == b"data" => {
                let node = DataNode::from_start(&start)?;
                insert(&mut entries, file_name, node);
            }
            Event::Start(start) if start.name().as_ref() == b"value" && current.is_some() => {
                in_value = true;
            }
            Event::Text(text) if in_value => {
                if let Some(node) = current.as_mut() {
                    node.value.push_str(&text.unescape()?);
                }
            }
            Event::CData(cdata) if in_value => {
                if let Some(node) = current.as_mut() {
                    node.value
                        .push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Event::End(end) if end.name().as_ref() == b"value" => in_value = false,
            Event::End(end) if end.name().as_ref() == b"data" => {
                if let Some(node) = current.take() {
                    insert(&mut entries, file_name, node);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(entries.into_values().collect())
}

fn insert(entries: &mut IndexMap<String, Resource>, file_name: &str, node: DataNode) {
    if !node.is_translatable() {
        return;
    }
    let resource = Resource::new(file_name, node.name.clone(), node.value);
    entries.insert(node.name, resource);
}

/// Writes every resource with a non-empty translation as a string entry.
pub fn write(path: &Path, resources: &[Resource]) -> Result<()> {
    let content = render(resources)?;
    atomic_write(path, &content)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Renders a complete resx document.
pub fn render(resources: &[Resource]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("root")))?;

    for (name, value) in RESHEADERS {
        writer.write_event(Event::Start(
            BytesStart::new("resheader").with_attributes([("name", *name)]),
        ))?;
        write_value(&mut writer, value)?;
        writer.write_event(Event::End(BytesEnd::new("resheader")))?;
    }

    for resource in resources
        .iter()
        .filter(|r| !r.destination_text.trim().is_empty())
    {
        writer.write_event(Event::Start(BytesStart::new("data").with_attributes([
            ("name", resource.resource_name.as_str()),
            ("xml:space", "preserve"),
        ])))?;
        write_value(&mut writer, &resource.destination_text)?;
        writer.write_event(Event::End(BytesEnd::new("data")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("root")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_value(writer: &mut Writer<Vec<u8>>, value: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("value")))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new("value")))?;
    Ok(())
}
