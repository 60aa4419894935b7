use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::config::{ConfigManager, resolve_api_key};
use crate::formats::{self, FileFormat, LanguageLabels, xlsx};
use crate::fs::same_file;
use crate::output;
use crate::paths;
use crate::resource::Resource;
use crate::translation::{
    GoogleTranslator, Language, Translator, current_locale_tag, translate_resources,
    wants_progress,
};
use crate::ui::{self, Progress, Style};

#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    pub from: Option<String>,
    pub to: Option<String>,
    pub source: Option<PathBuf>,
    pub destination: Option<PathBuf>,
    pub take: Option<usize>,
    pub api_key: Option<String>,
    pub text: String,
}

impl From<Args> for TranslateOptions {
    fn from(args: Args) -> Self {
        let text = args.inline_text();
        Self {
            from: args.from,
            to: args.to,
            source: args.source,
            destination: args.destination,
            take: args.take.and_then(|take| usize::try_from(take).ok()),
            api_key: args.api_key,
            text,
        }
    }
}

/// Everything needed to translate and write one batch.
#[derive(Debug)]
pub struct TranslateJob {
    /// The source language as given (or defaulted), used as a file label.
    pub from: String,
    /// The destination language as given (or defaulted), used as a file label.
    pub to: String,
    pub source_language: Language,
    pub destination_language: Language,
    pub source_file: Option<PathBuf>,
    pub destination_file: Option<PathBuf>,
    pub resources: Vec<Resource>,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let Some(job) = prepare(&options, ui::confirm_overwrite)? else {
        return Ok(());
    };

    let config = ConfigManager::new().load_or_default()?;
    let api_key = resolve_api_key(
        options.api_key.as_deref(),
        paths::api_key_file().as_deref(),
        &config,
    )?;
    let translator = GoogleTranslator::new(config.babelfish.endpoint(), api_key);

    job.run(&translator).await
}

/// Resolves languages, loads the resources and clears the way for the output file.
///
/// `confirm` is asked before an existing destination file is replaced; returns
/// `Ok(None)` when it declines.
pub fn prepare<F>(options: &TranslateOptions, confirm: F) -> Result<Option<TranslateJob>>
where
    F: FnOnce(&str) -> Result<bool>,
{
    let mut from = options.from.clone().unwrap_or_default();
    let mut to = options.to.clone().unwrap_or_default();
    let source_file = non_empty_path(options.source.as_ref());
    let mut destination_file = non_empty_path(options.destination.as_ref());

    // A workbook without destination is updated in place.
    if let Some(source) = &source_file
        && destination_file.is_none()
        && matches!(FileFormat::from_path(source), Ok(FileFormat::Xlsx))
    {
        if from.trim().is_empty() {
            from = xlsx::BASE_LANGUAGE.to_string();
        }
        if to.trim().is_empty() {
            to = xlsx::first_sheet_name(source)?.unwrap_or_default();
        }
        destination_file = Some(source.clone());
    }

    let source_language = Language::parse_optional(Some(&from))?;
    if source_language.is_unknown() && source_file.is_some() {
        bail!("from not specified.");
    }

    if to.trim().is_empty() && source_file.is_none() {
        to = current_locale_tag().unwrap_or_default();
    }

    let destination_language = Language::parse_optional(Some(&to))?;
    if destination_language.is_unknown() {
        bail!("to not specified.");
    }

    let mut resources = match &source_file {
        Some(path) => formats::read_resources(path, &from)?,
        None => vec![Resource::inline(options.text.clone())],
    };

    if let Some(take) = options.take.filter(|take| *take > 0) {
        resources.truncate(take);
    }

    if let Some(destination) = &destination_file
        && destination.exists()
        && !source_file
            .as_deref()
            .is_some_and(|source| same_file(source, destination))
    {
        if !confirm(&display_name(destination))? {
            return Ok(None);
        }
        fs::remove_file(destination)
            .with_context(|| format!("Failed to remove file: {}", destination.display()))?;
    }

    Ok(Some(TranslateJob {
        from,
        to,
        source_language,
        destination_language,
        source_file,
        destination_file,
        resources,
    }))
}

impl TranslateJob {
    /// Translates all resources, then writes them out.
    pub async fn run<T: Translator>(mut self, translator: &T) -> Result<()> {
        self.translate(translator).await?;
        self.write()
    }

    /// Whether translating this job draws the progress line.
    pub fn shows_progress(&self, quiet: bool) -> bool {
        !quiet && wants_progress(self.resources.len(), self.destination_file.is_some())
    }

    /// Fills in the destination text of every translatable resource.
    pub async fn translate<T: Translator>(&mut self, translator: &T) -> Result<()> {
        let progress = if self.shows_progress(output::is_quiet()) {
            Progress::new(self.resources.len())
        } else {
            Progress::hidden()
        };

        translate_resources(
            translator,
            &mut self.resources,
            self.source_language,
            self.destination_language,
            &progress,
        )
        .await
    }

    /// Writes the resources to the destination file, or stdout.
    pub fn write(&self) -> Result<()> {
        let labels = LanguageLabels {
            from: &self.from,
            to: &self.to,
        };
        formats::write_resources(self.destination_file.as_deref(), labels, &self.resources)?;

        if let Some(destination) = &self.destination_file {
            crate::status!(
                "Wrote {} resources to {}",
                self.resources.len(),
                Style::value(destination.display())
            );
        }
        Ok(())
    }
}

fn non_empty_path(path: Option<&PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty()).cloned()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options() -> TranslateOptions {
        TranslateOptions {
            to: Some("de".to_string()),
            text: "Hello World!".to_string(),
            ..TranslateOptions::default()
        }
    }

    fn never_asked(_: &str) -> Result<bool> {
        panic!("overwrite prompt should not be shown")
    }

    #[test]
    fn test_inline_text_becomes_single_resource() {
        let job = prepare(&options(), never_asked).unwrap().unwrap();

        assert_eq!(job.resources, vec![Resource::inline("Hello World!")]);
        assert_eq!(job.source_language, Language::Unknown);
        assert_eq!(job.destination_language, Language::German);
        assert!(job.destination_file.is_none());
    }

    #[test]
    fn test_source_file_requires_from() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("en.txt");
        fs::write(&source, "Hello").unwrap();

        let mut opts = options();
        opts.source = Some(source);

        let err = prepare(&opts, never_asked).unwrap_err();
        assert_eq!(err.to_string(), "from not specified.");
    }

    #[test]
    fn test_unresolvable_languages_fail() {
        let mut opts = options();
        opts.to = Some("Klingon".to_string());
        assert!(prepare(&opts, never_asked).is_err());

        let mut opts = options();
        opts.from = Some("xx".to_string());
        assert!(prepare(&opts, never_asked).is_err());
    }

    #[test]
    fn test_source_file_without_to_fails() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("en.txt");
        fs::write(&source, "Hello").unwrap();

        let opts = TranslateOptions {
            from: Some("en".to_string()),
            source: Some(source),
            ..TranslateOptions::default()
        };

        let err = prepare(&opts, never_asked).unwrap_err();
        assert_eq!(err.to_string(), "to not specified.");
    }

    #[test]
    fn test_take_truncates_resources() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("en.txt");
        fs::write(&source, "one\ntwo\nthree").unwrap();

        let mut opts = options();
        opts.from = Some("en".to_string());
        opts.source = Some(source);
        opts.take = Some(2);

        let job = prepare(&opts, never_asked).unwrap().unwrap();
        assert_eq!(job.resources.len(), 2);

        opts.take = Some(0);
        let job = prepare(&opts, never_asked).unwrap().unwrap();
        assert_eq!(job.resources.len(), 3);
    }

    #[test]
    fn test_negative_take_is_ignored() {
        let args = Args {
            take: Some(-1),
            text: vec!["Hello".to_string(), "World!".to_string()],
            ..Args::default()
        };
        let opts = TranslateOptions::from(args);

        assert_eq!(opts.take, None);
        assert_eq!(opts.text, "Hello World!");

        let opts = TranslateOptions::from(Args {
            take: Some(5),
            ..Args::default()
        });
        assert_eq!(opts.take, Some(5));
    }

    #[test]
    fn test_declined_overwrite_leaves_file() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("de.txt");
        fs::write(&destination, "keep me").unwrap();

        let mut opts = options();
        opts.destination = Some(destination.clone());

        let mut asked = String::new();
        let job = prepare(&opts, |name| {
            asked = name.to_string();
            Ok(false)
        })
        .unwrap();

        assert!(job.is_none());
        assert_eq!(asked, "de.txt");
        assert_eq!(fs::read_to_string(&destination).unwrap(), "keep me");
    }

    #[test]
    fn test_accepted_overwrite_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("de.txt");
        fs::write(&destination, "old").unwrap();

        let mut opts = options();
        opts.destination = Some(destination.clone());

        let job = prepare(&opts, |_| Ok(true)).unwrap();

        assert!(job.is_some());
        assert!(!destination.exists());
    }

    #[test]
    fn test_same_source_and_destination_is_not_prompted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lines.txt");
        fs::write(&path, "Hello").unwrap();

        let opts = TranslateOptions {
            from: Some("en".to_string()),
            to: Some("fi".to_string()),
            source: Some(path.clone()),
            destination: Some(path.clone()),
            ..TranslateOptions::default()
        };

        let job = prepare(&opts, never_asked).unwrap().unwrap();
        assert_eq!(job.destination_file, Some(path.clone()));
        assert!(path.exists());
    }

    fn text_file_job(lines: usize, destination: Option<&str>) -> TranslateJob {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("en.txt");
        let content: Vec<String> = (1..=lines).map(|i| format!("line {i}")).collect();
        fs::write(&source, content.join("\n")).unwrap();

        let opts = TranslateOptions {
            from: Some("en".to_string()),
            to: Some("fi".to_string()),
            source: Some(source),
            destination: destination.map(|name| temp_dir.path().join(name)),
            ..TranslateOptions::default()
        };
        prepare(&opts, never_asked).unwrap().unwrap()
    }

    #[test]
    fn test_progress_shown_for_large_file_output() {
        assert!(text_file_job(4, Some("fi.txt")).shows_progress(false));
        assert!(!text_file_job(3, Some("fi.txt")).shows_progress(false));
    }

    #[test]
    fn test_progress_hidden_for_console_output() {
        assert!(!text_file_job(10, None).shows_progress(false));
    }

    #[test]
    fn test_progress_hidden_when_quiet() {
        assert!(!text_file_job(10, Some("fi.txt")).shows_progress(true));
    }

    #[test]
    fn test_take_limits_progress_count() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("en.txt");
        fs::write(&source, "a\nb\nc\nd\ne").unwrap();

        let opts = TranslateOptions {
            from: Some("en".to_string()),
            to: Some("fi".to_string()),
            source: Some(source),
            destination: Some(temp_dir.path().join("fi.txt")),
            take: Some(3),
            ..TranslateOptions::default()
        };
        let job = prepare(&opts, never_asked).unwrap().unwrap();
        assert!(!job.shows_progress(false));
    }

    #[test]
    fn test_unsupported_source_extension() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("notes.md");
        fs::write(&source, "# Notes").unwrap();

        let mut opts = options();
        opts.from = Some("en".to_string());
        opts.source = Some(source);

        let err = prepare(&opts, never_asked).unwrap_err();
        assert_eq!(err.to_string(), "File type '.md' is not supported.");
    }
}
