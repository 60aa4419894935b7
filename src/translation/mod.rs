mod client;
mod driver;
mod language;

pub use client::{DEFAULT_ENDPOINT, Detection, GoogleTranslator, Translation, Translator};
pub use driver::{PROGRESS_THRESHOLD, decode_html, translate_resources, wants_progress};
pub use language::{Language, SUPPORTED_LANGUAGES, current_locale_tag};
