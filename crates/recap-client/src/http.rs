//! Thin reqwest wrapper shared by the collaborator clients

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
    #[error("Error response: statusCode={status}")]
    ErrorStatus { status: u16 },
    #[error("Parse error: {message}")]
    ParseError { message: String },
}

pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            user_agent: user_agent.to_string(),
        }
    }

    /// GET `url`, returning the body. Non-2xx statuses are errors.
    pub async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<String, HttpError> {
        let mut request = self.client.get(url).header("User-Agent", &self.user_agent);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| HttpError::RequestFailed {
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(HttpError::ErrorStatus { status });
        }

        response.text().await.map_err(|e| HttpError::ParseError {
            message: e.to_string(),
        })
    }

    /// POST `body` as JSON to `url`, returning the response body.
    /// Non-2xx statuses are errors.
    pub async fn post_json<B: Serialize>(
        &self,
        url: &str,
        body: &B,
        headers: &[(&str, &str)],
    ) -> Result<String, HttpError> {
        let mut request = self
            .client
            .post(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json")
            .json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| HttpError::RequestFailed {
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(HttpError::ErrorStatus { status });
        }

        response.text().await.map_err(|e| HttpError::ParseError {
            message: e.to_string(),
        })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new("recap-sync/0.1")
    }
}
