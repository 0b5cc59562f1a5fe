use async_trait::async_trait;
use image::RgbaImage;
use log::{debug, info};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use tracing::Instrument;
use tt_core::{GenerationResult, SubmitError, parse_response};
use crate::error::AppError;
use crate::upload::UploadInput;

const GENERATE_PATH: &str = "ai/image";

/// Error text with its whole source chain, e.g. "error sending request: ...: Connection refused"
fn describe(e: reqwest::Error) -> String {
    format!("{:#}", anyhow::Error::from(e))
}

/// Remote image-generation service
#[async_trait]
pub trait GenerationApi: Send + Sync {
    async fn generate(&self, input: &UploadInput) -> Result<GenerationResult, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct HttpGenerationApi {
    client: Client,
    base_url: Url,
}

impl HttpGenerationApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, mut base_url: Url) -> Self {
        // Url::join replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    pub fn endpoint(&self) -> Result<Url, SubmitError> {
        self.base_url
            .join(GENERATE_PATH)
            .map_err(|e| SubmitError::Transport(e.to_string()))
    }

    /// Absolute URL for a side view; relative paths are resolved against the base URL
    pub fn resolve(&self, url: &str) -> Result<Url, AppError> {
        Url::parse(url)
            .or_else(|_| self.base_url.join(url))
            .map_err(|e| AppError::ImageFetch {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Download and decode one side view
    pub async fn fetch_image(&self, url: &str) -> Result<RgbaImage, AppError> {
        let resolved = self.resolve(url)?;
        let fetch_err = |reason: String| AppError::ImageFetch {
            url: url.to_string(),
            reason,
        };

        let response = self.client
            .get(resolved)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| fetch_err(describe(e)))?;

        let bytes = response.bytes().await.map_err(|e| fetch_err(describe(e)))?;
        let image = image::load_from_memory(&bytes).map_err(|e| fetch_err(e.to_string()))?;

        Ok(image.to_rgba8())
    }

    fn form(input: &UploadInput) -> Result<Form, SubmitError> {
        let image = input.validate()?;

        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        Ok(Form::new()
            .part("image", part)
            .text("product_name", input.product_name().to_string()))
    }
}

#[async_trait]
impl GenerationApi for HttpGenerationApi {
    async fn generate(&self, input: &UploadInput) -> Result<GenerationResult, SubmitError> {
        let span = tracing::info_span!("generate", product = %input.product_name());

        async move {
            let url = self.endpoint()?;
            let form = Self::form(input)?;

            info!("POST {}", url);

            let response = self.client
                .post(url)
                .multipart(form)
                .send()
                .await
                .map_err(|e| SubmitError::Transport(describe(e)))?;

            let status = response.status();
            let body = response
                .bytes()
                .await
                .map_err(|e| SubmitError::Transport(describe(e)))?;

            debug!("Response HTTP {} ({} bytes)", status, body.len());

            // The body decides success; the HTTP status only enriches transport errors
            parse_response(&body, input.product_name()).map_err(|e| match e {
                SubmitError::Transport(reason) if !status.is_success() => {
                    SubmitError::Transport(format!("HTTP {}: {}", status, reason))
                }
                other => other,
            })
        }
        .instrument(span)
        .await
    }
}
