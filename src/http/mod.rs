//! The single request/response pipeline every API call goes through.
//!
//! Attaches the bearer token, unwraps JSON bodies, hands attachments back
//! whole, and turns every failure into an [`ApiError`] that has already
//! been shown to the user once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{Download, ListQuery};
use crate::notify::Notifier;

pub const LOGIN_PATH: &str = "/auth/login";

/// Shared slot for the bearer token; the session writes, the client reads
pub type TokenHandle = Arc<RwLock<Option<String>>>;

pub fn new_token_handle(token: Option<String>) -> TokenHandle {
    Arc::new(RwLock::new(token))
}

#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    token: TokenHandle,
    notifier: Arc<dyn Notifier>,
    session_expired: Arc<AtomicBool>,
    request_timeout: Duration,
    upload_timeout: Duration,
    log_requests: bool,
}

impl HttpClient {
    pub fn new(config: &ClientConfig, token: TokenHandle, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            token,
            notifier,
            session_expired: Arc::new(AtomicBool::new(false)),
            request_timeout: config.api.request_timeout(),
            upload_timeout: config.api.upload_timeout(),
            log_requests: config.api.enable_request_logging,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Whether a request was rejected with 401 since the last call; resets the flag
    pub fn take_session_expired(&self) -> bool {
        self.session_expired.swap(false, Ordering::SeqCst)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(Method::GET, path, |r| r).await?;
        decode_json(response).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(&self, path: &str, query: &ListQuery) -> ApiResult<T> {
        let response = self.send(Method::GET, path, |r| r.query(query.pairs())).await?;
        decode_json(response).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let response = self.send(Method::POST, path, |r| r.json(body)).await?;
        decode_json(response).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(Method::POST, path, |r| r).await?;
        decode_json(response).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let response = self.send(Method::PUT, path, |r| r.json(body)).await?;
        decode_json(response).await
    }

    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(Method::PUT, path, |r| r).await?;
        decode_json(response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(Method::DELETE, path, |r| r).await?;
        decode_json(response).await
    }

    pub async fn delete_with_query<T: DeserializeOwned>(&self, path: &str, query: &ListQuery) -> ApiResult<T> {
        let response = self.send(Method::DELETE, path, |r| r.query(query.pairs())).await?;
        decode_json(response).await
    }

    /// Multipart upload under the `file` field, with the longer upload timeout
    pub async fn upload<T: DeserializeOwned>(&self, path: &str, filename: &str, bytes: Vec<u8>) -> ApiResult<T> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let timeout = self.upload_timeout;
        let response = self
            .send(Method::POST, path, move |r| r.multipart(form).timeout(timeout))
            .await?;
        decode_json(response).await
    }

    /// Blob download; the whole response is kept
    pub async fn download(&self, path: &str) -> ApiResult<Download> {
        let response = self.send(Method::GET, path, |r| r).await?;
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;

        Ok(Download {
            filename: attachment_filename(&headers),
            content_type: header_str(&headers, CONTENT_TYPE.as_str()).map(str::to_string),
            bytes: bytes.to_vec(),
        })
    }

    async fn send<F>(&self, method: Method, path: &str, build: F) -> ApiResult<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .timeout(self.request_timeout);

        if let Some(token) = self.token() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = build(request);

        if self.log_requests {
            tracing::debug!("{} {}", method, path);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("API error: {} {}: {}", method, path, e);
                let err = ApiError::Network(e.to_string());
                self.notifier
                    .error("Network error, check your connection or contact an administrator.");
                return Err(err);
            }
        };

        let status = response.status();
        if status.is_success() {
            if self.log_requests {
                tracing::debug!("{} {} -> {}", method, path, status.as_u16());
            }
            return Ok(response);
        }

        let reason = status.canonical_reason().unwrap_or("request failed").to_string();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or(reason);

        let err = ApiError::from_status(status.as_u16(), message, body, is_login_path(path));
        tracing::warn!("API error: {} {} -> {} ({})", method, path, status.as_u16(), err.error_code());

        if matches!(err, ApiError::SessionExpired) {
            self.session_expired.store(true, Ordering::SeqCst);
        }

        if err.is_user_visible() {
            self.notifier.error(&err.to_string());
        }

        Err(err)
    }
}

fn is_login_path(path: &str) -> bool {
    path.split('?').next().unwrap_or(path).ends_with(LOGIN_PATH)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

pub fn is_attachment(headers: &HeaderMap) -> bool {
    header_str(headers, CONTENT_DISPOSITION.as_str())
        .map(|v| v.contains("attachment"))
        .unwrap_or(false)
}

fn attachment_filename(headers: &HeaderMap) -> Option<String> {
    let disposition = header_str(headers, CONTENT_DISPOSITION.as_str())?;
    disposition.split(';').map(str::trim).find_map(|part| {
        part.strip_prefix("filename=")
            .map(|name| name.trim_matches('"').to_string())
    })
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    if is_attachment(response.headers()) {
        return Err(ApiError::Decode(
            "response is a file attachment, use download()".to_string(),
        ));
    }

    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        // 200/204 with no body
        return Ok(serde_json::from_value(Value::Null)?);
    }

    Ok(serde_json::from_slice(&bytes)?)
}

/// Percent-encode one path segment
pub fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
