// src/normalize/translate.rs

use std::time::Duration;
use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Error text the translation service returns when the detected source
/// language collapses onto the target language.
pub const DISTINCT_LANGUAGES_SENTINEL: &str = "PLEASE SELECT TWO DISTINCT LANGUAGES";

const MYMEMORY_ENDPOINT: &str = "https://api.mymemory.translated.net/get";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Translation seam of the normalizer. Implementations turn a non-Latin
/// value into its English representation.
pub trait Translate {
    fn translate(&self, text: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct TranslationResponse {
    #[serde(rename = "responseData")]
    response_data: ResponseData,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Translator backed by the MyMemory web API. The source language is
/// auto-detected per request; the target is always English.
pub struct MyMemoryTranslator {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl MyMemoryTranslator {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: MYMEMORY_ENDPOINT.to_string(),
        })
    }
}

impl Translate for MyMemoryTranslator {
    fn translate(&self, text: &str) -> Result<String> {
        let body = self
            .client
            .get(&self.endpoint)
            .query(&[("q", text), ("langpair", "Autodetect|en")])
            .send()?
            .error_for_status()?
            .text()?;

        let translated = parse_translated_text(&body)?;
        debug!("Translated {:?} to {:?}", text, translated);
        Ok(translated)
    }
}

fn parse_translated_text(body: &str) -> Result<String> {
    let response: TranslationResponse = serde_json::from_str(body)?;
    let translated = response.response_data.translated_text;
    if translated.trim().is_empty() {
        return Err(Error::translation("service returned an empty translation"));
    }
    Ok(translated)
}
