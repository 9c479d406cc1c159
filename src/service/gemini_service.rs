// service/gemini_service.rs
use serde_json::json;

use crate::{
    dtos::chatbotdtos::{GenerateRequestDto, GenerateResponseDto},
    service::error::ServiceError,
};

const GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

/// Passthrough to the Google generative-language API. The request/response
/// shape is not owned here: the upstream body is echoed back verbatim.
#[derive(Debug, Clone)]
pub struct GeminiService {
    http_client: reqwest::Client,
    api_key: Option<String>,
}

impl GeminiService {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key,
        }
    }

    pub async fn generate(
        &self,
        request: &GenerateRequestDto,
    ) -> Result<GenerateResponseDto, ServiceError> {
        // Key from the request wins over the configured one
        let key = request
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .or(self.api_key.as_deref());

        let key = match key {
            Some(key) => key,
            None => {
                return Ok(GenerateResponseDto {
                    generated_response:
                        "Error: Google API key not configured. Please provide an API key."
                            .to_string(),
                });
            }
        };

        let body = json!({
            "contents": [
                { "parts": [ { "text": request.input_text } ] }
            ]
        });

        let response = self
            .http_client
            .post(GEMINI_URL)
            .header("Content-Type", "application/json")
            .header("X-goog-api-key", key)
            .json(&body)
            .send()
            .await
            .map_err(|err| ServiceError::Upstream(err.to_string()))?;

        let generated_response = response
            .text()
            .await
            .map_err(|err| ServiceError::Upstream(err.to_string()))?;

        Ok(GenerateResponseDto { generated_response })
    }
}
