//! Runs the provider over a batch of resources.

use anyhow::{Result, anyhow};
use quick_xml::escape::{resolve_html5_entity, unescape_with};

use super::client::Translator;
use super::language::Language;
use crate::resource::Resource;
use crate::ui::Progress;

/// Batches larger than this show a progress line when written to a file.
pub const PROGRESS_THRESHOLD: usize = 3;

/// Returns `true` if translating `count` resources should draw progress.
pub const fn wants_progress(count: usize, writes_to_file: bool) -> bool {
    writes_to_file && count > PROGRESS_THRESHOLD
}

/// Translates every resource with non-blank source text, in order.
///
/// When `source` is [`Language::Unknown`] the language of each resource is
/// detected separately before it is translated. Blank resources keep an empty
/// destination text and are never sent to the provider.
///
/// # Errors
///
/// The first provider failure aborts the batch.
pub async fn translate_resources<T: Translator>(
    translator: &T,
    resources: &mut [Resource],
    source: Language,
    destination: Language,
    progress: &Progress,
) -> Result<()> {
    for (index, resource) in resources.iter_mut().enumerate() {
        if resource.is_translatable() {
            let from = if source.is_unknown() {
                detect(translator, &resource.source_text).await?
            } else {
                source
            };

            let translation = translator
                .translate(from, destination, &resource.source_text)
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("The provider returned no translation."))?;

            resource.destination_text = decode_html(&translation.translated_text);
        }

        progress.set(index + 1);
    }

    progress.finish();
    Ok(())
}

async fn detect<T: Translator>(translator: &T, text: &str) -> Result<Language> {
    let detection = translator
        .detect_language(text)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("Could not detect the source language."))?;

    Language::resolve(&detection.language)
}

/// Longest character reference tried, e.g. `&CounterClockwiseContourIntegral;`.
const MAX_REFERENCE_LEN: usize = 40;

/// Decodes HTML character references (`&#39;`, `&amp;`, `&eacute;`).
///
/// A `&` that does not start a known reference is kept as is, so
/// `AT&T&#39;s` becomes `AT&T's`.
pub fn decode_html(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        rest = &rest[start..];

        match decode_reference(rest) {
            Some((len, value)) => {
                decoded.push_str(&value);
                rest = &rest[len..];
            }
            None => {
                decoded.push('&');
                rest = &rest[1..];
            }
        }
    }

    decoded.push_str(rest);
    decoded
}

/// Decodes the reference at the start of `text`, returning its length and value.
fn decode_reference(text: &str) -> Option<(usize, String)> {
    let end = text.find(';').filter(|end| *end <= MAX_REFERENCE_LEN)?;
    let name = &text[1..end];
    if name.is_empty() || !name.chars().all(|c| c == '#' || c.is_ascii_alphanumeric()) {
        return None;
    }

    let reference = &text[..=end];
    unescape_with(reference, resolve_html5_entity)
        .ok()
        .map(|value| (reference.len(), value.into_owned()))
}
