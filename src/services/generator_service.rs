use crate::error::{Error, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value as JsonValue;
use url::Url;

/// Client for the external PDF-to-questions service.
#[derive(Clone)]
pub struct GeneratorService {
    client: Client,
    endpoint: Url,
}

impl GeneratorService {
    pub fn new(endpoint: Url, client: Client) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Uploads the PDF and returns the decoded JSON object.
    ///
    /// The HTTP status is not checked: the generator reports its own failures
    /// through an `error` field, so every body is read as JSON.
    pub async fn generate(&self, file_name: &str, pdf: Vec<u8>) -> Result<JsonValue> {
        let part = Part::bytes(pdf)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new().part("pdf", part);

        tracing::info!(endpoint = %self.endpoint, file_name, "Sending PDF to question generator");
        let res = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            tracing::warn!(%status, "Question generator returned a non-success status");
        }

        let body: JsonValue = serde_json::from_str(&text)?;
        if !body.is_object() {
            return Err(Error::BadGateway(
                "Generator returned a non-object JSON payload".to_string(),
            ));
        }
        Ok(body)
    }
}
