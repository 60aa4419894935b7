//! `.xlsx` workbooks with one sheet per language.
//!
//! Layout: row 1 is a header, column A holds the resource name, column B the
//! base language text and column C the text of the sheet's language.

use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use indexmap::IndexMap;
use rust_xlsxwriter::{Format, FormatAlign, Workbook};
use std::path::Path;

use super::{FormatError, LanguageLabels};
use crate::resource::Resource;

/// The language of column B.
pub const BASE_LANGUAGE: &str = "en";

/// Header of the resource name column.
pub const NAME_HEADER: &str = "Resource Name";

const NAME_COLUMN: u32 = 0;
const BASE_COLUMN: u32 = 1;
const TRANSLATION_COLUMN: u32 = 2;

/// Column widths of A, B and C in character units.
const COLUMN_WIDTHS: [(u16, f64); 3] = [(0, 50.0), (1, 85.0), (2, 85.0)];

fn open(path: &Path) -> Result<Xlsx<std::io::BufReader<std::fs::File>>> {
    open_workbook(path).with_context(|| format!("Failed to open workbook: {}", path.display()))
}

/// Returns the name of the first worksheet, if the workbook has any.
pub fn first_sheet_name(path: &Path) -> Result<Option<String>> {
    Ok(open(path)?.sheet_names().into_iter().next())
}

/// Reads resources in the language `from`.
///
/// The base language is read from column B of the first sheet; any other
/// language from column C of the sheet with that name (case-insensitive).
/// Rows are keyed by column A and later rows replace earlier ones.
pub fn read(path: &Path, from: &str) -> Result<Vec<Resource>> {
    let mut workbook = open(path)?;
    let sheet_names = workbook.sheet_names();

    let (sheet, column) = if from.trim().eq_ignore_ascii_case(BASE_LANGUAGE) {
        (sheet_names.first(), BASE_COLUMN)
    } else {
        (
            sheet_names
                .iter()
                .find(|name| name.eq_ignore_ascii_case(from.trim())),
            TRANSLATION_COLUMN,
        )
    };
    let sheet = sheet.ok_or_else(|| FormatError::WorksheetNotFound(from.to_string()))?;

    let range = workbook
        .worksheet_range(sheet)
        .with_context(|| format!("Failed to read worksheet '{sheet}'"))?;

    Ok(collect_rows(&path.to_string_lossy(), &range, column))
}

fn collect_rows(file_name: &str, range: &Range<Data>, column: u32) -> Vec<Resource> {
    let Some((last_row, _)) = range.end() else {
        return Vec::new();
    };

    let mut resources: IndexMap<String, Resource> = IndexMap::new();
    for row in 1..=last_row {
        let name = cell_text(range, row, NAME_COLUMN);
        let text = cell_text(range, row, column);
        if name.is_empty() && text.is_empty() {
            continue;
        }
        resources.insert(name.clone(), Resource::new(file_name, name, text));
    }

    resources.into_values().collect()
}

fn cell_text(range: &Range<Data>, row: u32, column: u32) -> String {
    range
        .get_value((row, column))
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Writes a new workbook with a single sheet named after the destination language.
pub fn write(path: &Path, labels: LanguageLabels<'_>, resources: &[Resource]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(labels.to)
        .with_context(|| format!("Invalid worksheet name '{}'", labels.to))?;

    let cell_format = Format::new().set_align(FormatAlign::Top).set_text_wrap();
    let header_format = cell_format.clone().set_bold();

    for (column, width) in COLUMN_WIDTHS {
        worksheet.set_column_width(column, width)?;
        worksheet.set_column_format(column, &cell_format)?;
    }

    for (column, header) in [NAME_HEADER, labels.from, labels.to].into_iter().enumerate() {
        worksheet.write_string_with_format(0, column as u16, header, &header_format)?;
    }

    for (index, resource) in resources.iter().enumerate() {
        let row = index as u32 + 1;
        let cells = [
            &resource.resource_name,
            &resource.source_text,
            &resource.destination_text,
        ];
        for (column, text) in cells.into_iter().enumerate() {
            worksheet.write_string_with_format(row, column as u16, text, &cell_format)?;
        }
    }

    worksheet.autofilter(0, 0, resources.len() as u32, 2)?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}
