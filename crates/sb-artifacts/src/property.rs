//! Property store accessor for Maven-style XML documents
//!
//! A property is the first element named after the key whose direct parent
//! is a `<properties>` element. Reads unescape the element text; writes
//! replace only the bytes of that text (or of a self-closing `<key/>` tag),
//! so the declaration, comments, attributes and whitespace of the rest of
//! the document are kept exactly.

use crate::error::{ArtifactError, ArtifactResult};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

const PROPERTIES_ELEMENT: &[u8] = b"properties";

/// Where a property's value sits in the document text
#[derive(Debug, Clone, PartialEq, Eq)]
enum ValueSpan {
    /// Text content between `<key>` and `</key>`
    Text(Range<usize>),
    /// A whole `<key/>` tag
    SelfClosing(Range<usize>),
}

/// An XML document opened for property reads and writes
#[derive(Debug, Clone)]
pub struct PropertyDocument {
    path: PathBuf,
    content: String,
}

impl PropertyDocument {
    /// Read a document from disk. A missing file is `DocumentNotFound`.
    pub fn open(path: &Path) -> ArtifactResult<Self> {
        if !path.exists() {
            return Err(ArtifactError::DocumentNotFound {
                path: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(path).map_err(|e| ArtifactError::io(path, e))?;
        Ok(Self::from_string(path, content))
    }

    /// Wrap already loaded text; `path` is used for saving and error messages
    pub fn from_string(path: impl Into<PathBuf>, content: String) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current document text, including unsaved edits
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Read a property value, trimmed and unescaped
    pub fn get(&self, key: &str) -> ArtifactResult<String> {
        match self.locate(key)? {
            ValueSpan::Text(range) => {
                let raw = &self.content[range];
                let value = quick_xml::escape::unescape(raw).map_err(|e| {
                    ArtifactError::XmlParse {
                        path: self.path.display().to_string(),
                        message: format!("property '{key}': {e}"),
                    }
                })?;
                Ok(value.trim().to_string())
            }
            ValueSpan::SelfClosing(_) => Ok(String::new()),
        }
    }

    /// Replace a property value in memory; call [`save`](Self::save) to persist
    pub fn set(&mut self, key: &str, value: &str) -> ArtifactResult<()> {
        let escaped = quick_xml::escape::escape(value);
        let (range, replacement) = match self.locate(key)? {
            ValueSpan::Text(range) => (range, escaped.into_owned()),
            ValueSpan::SelfClosing(range) => (range, format!("<{key}>{escaped}</{key}>")),
        };
        self.content.replace_range(range, &replacement);
        Ok(())
    }

    /// Write the document back to its path
    pub fn save(&self) -> ArtifactResult<()> {
        fs::write(&self.path, &self.content).map_err(|e| ArtifactError::io(&self.path, e))
    }

    fn locate(&self, key: &str) -> ArtifactResult<ValueSpan> {
        locate_property(&self.content, key)
            .map_err(|e| ArtifactError::XmlParse {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?
            .ok_or_else(|| ArtifactError::PropertyNotFound {
                key: key.to_string(),
                path: self.path.display().to_string(),
            })
    }
}

/// Read one property from a document on disk
pub fn get_property(path: &Path, key: &str) -> ArtifactResult<String> {
    PropertyDocument::open(path)?.get(key)
}

/// Overwrite one property in a document on disk
pub fn set_property(path: &Path, key: &str, value: &str) -> ArtifactResult<()> {
    let mut document = PropertyDocument::open(path)?;
    document.set(key, value)?;
    document.save()
}

fn locate_property(xml: &str, key: &str) -> Result<Option<ValueSpan>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    // (depth of the matched element, byte offset where its text starts)
    let mut open: Option<(usize, usize)> = None;

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader.read_event()?;
        let after = reader.buffer_position() as usize;

        match event {
            Event::Start(e) => {
                let matched = open.is_none()
                    && e.name().as_ref() == key.as_bytes()
                    && stack.last().is_some_and(|parent| parent == PROPERTIES_ELEMENT);
                stack.push(e.name().as_ref().to_vec());
                if matched {
                    open = Some((stack.len(), after));
                }
            }
            Event::Empty(e) => {
                if open.is_none()
                    && e.name().as_ref() == key.as_bytes()
                    && stack.last().is_some_and(|parent| parent == PROPERTIES_ELEMENT)
                {
                    return Ok(Some(ValueSpan::SelfClosing(before..after)));
                }
            }
            Event::End(_) => {
                if let Some((depth, start)) = open {
                    if stack.len() == depth {
                        return Ok(Some(ValueSpan::Text(start..before)));
                    }
                }
                stack.pop();
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "property_test.rs"]
mod tests;
