//! # babelfish - resource file translation CLI
//!
//! `babelfish` translates a piece of text or a whole resource file with the
//! Google Translate v2 API and writes the result to the console or a file.
//!
//! Files are read into a list of [`resource::Resource`]s, translated one by
//! one, and written back through the same format layer, so any supported
//! input format can be written as any supported output format.
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate a phrase to Russian
//! babelfish --to ru "Hello World!"
//!
//! # Translate the first ten lines of a text file
//! babelfish -f en -t fi -s en.txt -d fi.txt --take 10
//!
//! # Translate a .resx dictionary
//! babelfish -f en -t de -s Resources.resx -d Resources.de.resx
//!
//! # Fill in a workbook in place (target language = first sheet name)
//! babelfish -s Resources.xlsx
//! ```
//!
//! ## Configuration
//!
//! The API key is taken from `--apikey`, from `babelfish.apikey` next to the
//! executable, or from `~/.config/babelfish/config.toml`:
//!
//! ```toml
//! [babelfish]
//! api_key_env = "GOOGLE_TRANSLATE_API_KEY"
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and API key lookup.
pub mod config;

/// Readers and writers for `.txt`, `.resx` and `.xlsx` files.
pub mod formats;

/// File system utilities.
pub mod fs;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// Config directory and key file locations.
pub mod paths;

/// The translation unit shared by all formats.
pub mod resource;

/// Languages, the translation provider and the translation run.
pub mod translation;

/// Terminal UI components (progress line, prompts, colors).
pub mod ui;
