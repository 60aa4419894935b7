#![allow(clippy::unwrap_used)]
//! End-to-end translation runs against an in-memory provider.

use anyhow::Result;
use babelfish::cli::commands::translate::{TranslateOptions, prepare};
use babelfish::formats::{resx, xlsx};
use babelfish::translation::{Detection, Language, Translation, Translator};
use rust_xlsxwriter::Workbook;
use std::cell::Cell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Translates by tagging the text with the target code.
#[derive(Default)]
struct TaggingTranslator {
    calls: Cell<usize>,
}

impl Translator for TaggingTranslator {
    async fn detect_language(&self, _text: &str) -> Result<Vec<Detection>> {
        Ok(vec![Detection {
            language: "en".to_string(),
            confidence: 0.9,
        }])
    }

    async fn translate(
        &self,
        _from: Language,
        to: Language,
        text: &str,
    ) -> Result<Vec<Translation>> {
        self.calls.set(self.calls.get() + 1);
        Ok(vec![Translation {
            translated_text: format!("{}:{text}", to.code().unwrap()),
        }])
    }
}

fn never_asked(_: &str) -> Result<bool> {
    panic!("overwrite prompt should not be shown")
}

#[tokio::test]
async fn test_inline_text_is_translated_for_console() {
    let options = TranslateOptions {
        to: Some("ru".to_string()),
        text: "Hello World!".to_string(),
        ..TranslateOptions::default()
    };
    let translator = TaggingTranslator::default();

    let mut job = prepare(&options, never_asked).unwrap().unwrap();
    job.translate(&translator).await.unwrap();

    assert!(job.destination_file.is_none());
    assert_eq!(job.resources.len(), 1);
    assert_eq!(job.resources[0].destination_text, "ru:Hello World!");
}

#[tokio::test]
async fn test_take_limits_text_file_translation() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("en.txt");
    let destination = dir.path().join("fi.txt");
    fs::write(&source, "one\ntwo\nthree\nfour\nfive\n").unwrap();

    let options = TranslateOptions {
        from: Some("en".to_string()),
        to: Some("fi".to_string()),
        source: Some(source),
        destination: Some(destination.clone()),
        take: Some(2),
        ..TranslateOptions::default()
    };
    let translator = TaggingTranslator::default();

    let job = prepare(&options, never_asked).unwrap().unwrap();
    job.run(&translator).await.unwrap();

    assert_eq!(translator.calls.get(), 2);
    assert_eq!(fs::read_to_string(&destination).unwrap(), "fi:one\r\nfi:two");
}

fn make_workbook(path: &Path) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("fi").unwrap();
    let rows = [
        ["Resource Name", "en", "fi"],
        ["Greeting", "Hello", ""],
        ["Farewell", "Goodbye", ""],
        ["Greeting", "Hello there", ""],
    ];
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet.write_string(r as u32, c as u16, *value).unwrap();
            }
        }
    }
    workbook.save(path).unwrap();
}

#[tokio::test]
async fn test_workbook_without_destination_is_updated_in_place() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Resources.xlsx");
    make_workbook(&path);

    let options = TranslateOptions {
        source: Some(path.clone()),
        ..TranslateOptions::default()
    };
    let translator = TaggingTranslator::default();

    let job = prepare(&options, never_asked).unwrap().unwrap();
    assert_eq!(job.from, "en");
    assert_eq!(job.to, "fi");
    assert_eq!(job.destination_language, Language::Finnish);
    assert_eq!(job.destination_file.as_deref(), Some(path.as_path()));

    job.run(&translator).await.unwrap();

    assert_eq!(xlsx::first_sheet_name(&path).unwrap().as_deref(), Some("fi"));
    let translated = xlsx::read(&path, "fi").unwrap();
    assert_eq!(translated.len(), 2);
    assert_eq!(translated[0].resource_name, "Greeting");
    assert_eq!(translated[0].source_text, "fi:Hello there");
    assert_eq!(translated[1].resource_name, "Farewell");
    assert_eq!(translated[1].source_text, "fi:Goodbye");
}

#[tokio::test]
async fn test_resx_to_workbook() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("Resources.resx");
    let destination = dir.path().join("Resources.de.xlsx");
    fs::write(
        &source,
        r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <data name="Save" xml:space="preserve"><value>Save</value></data>
  <data name="$this.Text" xml:space="preserve"><value>Form</value></data>
  <data name="Empty" xml:space="preserve"><value></value></data>
</root>"#,
    )
    .unwrap();

    let options = TranslateOptions {
        from: Some("English".to_string()),
        to: Some("de".to_string()),
        source: Some(source),
        destination: Some(destination.clone()),
        ..TranslateOptions::default()
    };
    let translator = TaggingTranslator::default();

    let job = prepare(&options, never_asked).unwrap().unwrap();
    job.run(&translator).await.unwrap();

    assert_eq!(translator.calls.get(), 1);
    let rows = xlsx::read(&destination, "de").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].resource_name, "Save");
    assert_eq!(rows[0].source_text, "de:Save");
    assert_eq!(rows[1].resource_name, "Empty");
    assert!(rows[1].source_text.is_empty());
}

#[tokio::test]
async fn test_resx_to_resx_omits_untranslated() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("en.resx");
    let destination = dir.path().join("sv.resx");
    fs::write(
        &source,
        r#"<root>
  <data name="Yes" xml:space="preserve"><value>Yes</value></data>
  <data name="Blank" xml:space="preserve"><value>   </value></data>
</root>"#,
    )
    .unwrap();

    let options = TranslateOptions {
        from: Some("en".to_string()),
        to: Some("Swedish".to_string()),
        source: Some(source),
        destination: Some(destination.clone()),
        ..TranslateOptions::default()
    };

    let job = prepare(&options, never_asked).unwrap().unwrap();
    job.run(&TaggingTranslator::default()).await.unwrap();

    let written = resx::read(&destination).unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].resource_name, "Yes");
    assert_eq!(written[0].source_text, "sv:Yes");
}
