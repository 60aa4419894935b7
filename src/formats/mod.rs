//! Readers and writers that move [`Resource`]s in and out of files.
//!
//! Every supported format is selected by file extension:
//!
//! | Extension | Read                         | Write                          |
//! |-----------|------------------------------|--------------------------------|
//! | `.txt`    | one resource per line        | lines joined with CRLF         |
//! | `.resx`   | string `<data>` entries      | string `<data>` entries        |
//! | `.xlsx`   | key + text column of a sheet | new sheet with key/source/dest |

pub mod resx;
pub mod txt;
pub mod xlsx;

use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

use crate::resource::Resource;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("File type '{0}' is not supported.")]
    Unsupported(String),

    #[error("Could not find worksheet '{0}'.")]
    WorksheetNotFound(String),

    #[error("Malformed resource file {path}: {reason}")]
    Malformed { path: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Txt,
    Resx,
    Xlsx,
}

impl FileFormat {
    /// Detect format from file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        match extension.to_ascii_lowercase().as_str() {
            "txt" => Ok(Self::Txt),
            "resx" => Ok(Self::Resx),
            "xlsx" => Ok(Self::Xlsx),
            _ if extension.is_empty() => Err(FormatError::Unsupported(String::new())),
            _ => Err(FormatError::Unsupported(format!(".{extension}"))),
        }
    }
}

/// Labels written into output files that record both languages.
#[derive(Debug, Clone, Copy)]
pub struct LanguageLabels<'a> {
    /// The source language as given on the command line (may be empty).
    pub from: &'a str,
    /// The destination language as given on the command line.
    pub to: &'a str,
}

/// Reads all resources from `path`.
///
/// `from` is the declared source language; spreadsheets use it to choose the
/// worksheet and column to read.
pub fn read_resources(path: &Path, from: &str) -> Result<Vec<Resource>> {
    match FileFormat::from_path(path)? {
        FileFormat::Txt => txt::read(path),
        FileFormat::Resx => resx::read(path),
        FileFormat::Xlsx => xlsx::read(path, from),
    }
}

/// Writes translated resources to `path`, or to stdout when `path` is `None`.
pub fn write_resources(
    path: Option<&Path>,
    labels: LanguageLabels<'_>,
    resources: &[Resource],
) -> Result<()> {
    let Some(path) = path else {
        let mut stdout = io::stdout().lock();
        write_console(&mut stdout, resources)?;
        return Ok(());
    };

    match FileFormat::from_path(path)? {
        FileFormat::Txt => txt::write(path, resources),
        FileFormat::Resx => resx::write(path, resources),
        FileFormat::Xlsx => xlsx::write(path, labels, resources),
    }
}

/// Prints only the destination texts, with a line break between them and none after the last.
pub fn write_console<W: Write>(out: &mut W, resources: &[Resource]) -> io::Result<()> {
    for (index, resource) in resources.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        write!(out, "{}", resource.destination_text)?;
    }
    out.flush()
}
