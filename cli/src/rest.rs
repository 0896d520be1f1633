//! Thin REST client over the `/api/*` endpoints.

#[cfg(test)]
#[path = "rest_test.rs"]
mod rest_test;

use frames::ApiResponse;
use frames::Credentials;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::CliError;

/// REST client bound to one backend base URL and one set of credentials.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    pub credentials: Credentials,
    pub port: String,
}

impl RestClient {
    pub fn new(base_url: &str, credentials: Credentials, port: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            credentials,
            port,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T, CliError> {
        let url = endpoint_url(&self.base_url, name);
        tracing::debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        decode(name, response).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, name: &str, body: &B) -> Result<T, CliError> {
        let url = endpoint_url(&self.base_url, name);
        tracing::debug!(%url, "POST");
        let response = self.http.post(&url).json(body).send().await?;
        decode(name, response).await
    }

    /// POST and turn an in-body `error` into [`CliError::Application`].
    pub async fn post_checked<B, T>(&self, name: &str, body: &B) -> Result<T, CliError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + ApiResponse,
    {
        let value: T = self.post(name, body).await?;
        match value.error_message() {
            Some(message) => Err(CliError::Application { endpoint: name.to_owned(), message: message.to_owned() }),
            None => Ok(value),
        }
    }

    /// POST whose reply is printed as-is (unit endpoints answer with
    /// arbitrary or empty bodies).
    pub async fn post_value<B: Serialize + ?Sized>(&self, name: &str, body: &B) -> Result<Value, CliError> {
        let url = endpoint_url(&self.base_url, name);
        tracing::debug!(%url, "POST");
        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(CliError::Http { endpoint: name.to_owned(), status: status.as_u16(), body: text });
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
    }

    /// Websocket URL for a socket path on the same backend.
    pub fn socket_url(&self, path: &str) -> Result<String, CliError> {
        socket_url(&self.base_url, path)
    }
}

async fn decode<T: DeserializeOwned>(name: &str, response: reqwest::Response) -> Result<T, CliError> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(CliError::Http { endpoint: name.to_owned(), status: status.as_u16(), body: text });
    }
    Ok(serde_json::from_str(&text)?)
}

fn endpoint_url(base_url: &str, name: &str) -> String {
    format!("{base_url}/api/{}", name.trim_start_matches('/'))
}

fn socket_url(base_url: &str, path: &str) -> Result<String, CliError> {
    let path = path.trim_start_matches('/');
    if let Some(rest) = base_url.strip_prefix("http://") {
        return Ok(format!("ws://{rest}/{path}"));
    }
    if let Some(rest) = base_url.strip_prefix("https://") {
        return Ok(format!("wss://{rest}/{path}"));
    }
    Err(CliError::InvalidBaseUrl(base_url.to_owned()))
}
