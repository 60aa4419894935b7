use anyhow::{Context, Result, anyhow, bail};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use super::language::Language;

/// Default Google Cloud Translation endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com";

/// A language guess returned by the provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Detection {
    /// Provider language code, e.g. `en` or `zh-CN`.
    pub language: String,
    #[serde(default)]
    pub confidence: f64,
}

/// One translation candidate returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translated_text: String,
}

/// The capabilities the translation run needs from a provider.
#[allow(async_fn_in_trait)]
pub trait Translator {
    /// Guesses the language of `text`, best guess first.
    async fn detect_language(&self, text: &str) -> Result<Vec<Detection>>;

    /// Translates `text`, best candidate first.
    async fn translate(&self, from: Language, to: Language, text: &str)
    -> Result<Vec<Translation>>;
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
}

#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    q: &'a str,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct TranslationsData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct DetectionsData {
    detections: Vec<Vec<Detection>>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for the Google Translate v2 REST API.
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleTranslator {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/language/translate/v2{path}",
            self.endpoint.trim_end_matches('/')
        )
    }

    async fn post<B: Serialize + Sync>(&self, url: &str, body: &B) -> Result<Response> {
        let response = self
            .client
            .post(url)
            .header("X-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to connect to translation endpoint: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map_or(body, |envelope| envelope.error.message);
            bail!("Translation request failed with status {status}: {message}");
        }

        Ok(response)
    }
}

impl Translator for GoogleTranslator {
    async fn detect_language(&self, text: &str) -> Result<Vec<Detection>> {
        let url = self.url("/detect");
        let envelope: Envelope<DetectionsData> = self
            .post(&url, &DetectRequest { q: text })
            .await?
            .json()
            .await
            .context("Failed to parse language detection response")?;

        Ok(envelope.data.detections.into_iter().flatten().collect())
    }

    async fn translate(
        &self,
        from: Language,
        to: Language,
        text: &str,
    ) -> Result<Vec<Translation>> {
        let source = from
            .code()
            .ok_or_else(|| anyhow!("source language is not determined"))?;
        let target = to
            .code()
            .ok_or_else(|| anyhow!("destination language is not determined"))?;

        let url = self.url("");
        let envelope: Envelope<TranslationsData> = self
            .post(
                &url,
                &TranslateRequest {
                    q: text,
                    source,
                    target,
                },
            )
            .await?
            .json()
            .await
            .context("Failed to parse translation response")?;

        Ok(envelope.data.translations)
    }
}
