// ============================================================================
// HTTP TRANSPORT - raw request/response plumbing
// ============================================================================
// Requests are plain data so the gateway can replay them after a refresh.
// Non-2xx answers come back as `ApiResponse`; turning them into errors is
// the caller's decision.
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData, RequestCredentials};

use crate::error::{json_string_field, ApiError};
use crate::models::Attachment;
use crate::utils::constants::TOKEN_EXPIRED_DETAIL;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: Attachment },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, e.g. `/user/login/`.
    pub path: String,
    pub body: RequestBody,
    pub headers: Vec<(String, String)>,
    retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Empty,
            headers: Vec::new(),
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Request(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Whether this request is already the replay after a refresh.
    pub fn is_retried(&self) -> bool {
        self.retried
    }

    pub fn mark_retried(&mut self) {
        self.retried = true;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 401 whose `detail` says the access token expired.
    pub fn is_token_expired(&self) -> bool {
        self.status == 401
            && json_string_field(&self.body, "detail").as_deref() == Some(TOKEN_EXPIRED_DETAIL)
    }

    pub fn into_success(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Http {
                status: self.status,
                body: self.body,
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Like [`ApiResponse::json`], but an empty body decodes to `T::default()`.
    pub fn json_or_default<T: DeserializeOwned + Default>(&self) -> Result<T, ApiError> {
        if self.body.trim().is_empty() {
            Ok(T::default())
        } else {
            self.json()
        }
    }
}

/// Sends one request. Implementations never retry.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// `fetch`-backed transport. Cookies travel with every request.
#[derive(Clone, Debug)]
pub struct GlooTransport {
    base_url: String,
}

impl GlooTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn build(&self, request: &ApiRequest) -> Result<Request, ApiError> {
        let url = self.url(&request.path);
        let mut builder: RequestBuilder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Patch => Request::patch(&url),
        };
        builder = builder.credentials(RequestCredentials::Include);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let built = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => builder.body(form_data(parts)?),
        };
        built.map_err(|e| ApiError::Request(e.to_string()))
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let built = self.build(request)?;
        let response = built
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        log::debug!("{} {} -> {}", request.method.as_str(), request.path, status);
        Ok(ApiResponse { status, body })
    }
}

fn js_error(e: JsValue) -> ApiError {
    ApiError::Request(format!("{:?}", e))
}

fn form_data(parts: &[FormPart]) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(js_error)?;
    for part in parts {
        match part {
            FormPart::Text { name, value } => {
                form.append_with_str(name, value).map_err(js_error)?;
            }
            FormPart::File { name, file } => {
                let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
                let chunks = js_sys::Array::of1(&bytes);
                let options = BlobPropertyBag::new();
                options.set_type(&file.content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&chunks, &options)
                    .map_err(js_error)?;
                form.append_with_blob_and_filename(name, &blob, &file.file_name)
                    .map_err(js_error)?;
            }
        }
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_exact_expiry_detail_counts() {
        assert!(ApiResponse::new(401, r#"{"detail":"Token expired"}"#).is_token_expired());
        assert!(!ApiResponse::new(401, r#"{"detail":"Invalid token"}"#).is_token_expired());
        assert!(!ApiResponse::new(401, r#"{"detail":"token expired"}"#).is_token_expired());
        assert!(!ApiResponse::new(403, r#"{"detail":"Token expired"}"#).is_token_expired());
        assert!(!ApiResponse::new(401, "Token expired").is_token_expired());
    }

    #[test]
    fn non_2xx_becomes_http_error() {
        let err = ApiResponse::new(404, "missing").into_success().unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 404,
                body: "missing".into()
            }
        );
        assert!(ApiResponse::new(204, "").into_success().is_ok());
    }

    #[test]
    fn empty_bodies_decode_to_default() {
        #[derive(Debug, Default, PartialEq, serde::Deserialize)]
        struct Ack {
            #[serde(default)]
            message: Option<String>,
        }
        let ack: Ack = ApiResponse::new(200, "").json_or_default().unwrap();
        assert_eq!(ack, Ack::default());
        let ack: Ack = ApiResponse::new(200, r#"{"message":"bye"}"#)
            .json_or_default()
            .unwrap();
        assert_eq!(ack.message.as_deref(), Some("bye"));
        assert!(matches!(
            ApiResponse::new(200, "{").json::<Ack>(),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn replay_copy_keeps_method_path_and_body() {
        let mut request = ApiRequest::patch("/user/employees/7/status/")
            .json(&serde_json::json!({"status": "approved"}))
            .unwrap()
            .header("X-Trace", "1");
        assert!(!request.is_retried());
        let original = request.clone();
        request.mark_retried();
        assert!(request.is_retried());
        assert_eq!(request.method, original.method);
        assert_eq!(request.path, original.path);
        assert_eq!(request.body, original.body);
        assert_eq!(request.headers, original.headers);
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let transport = GlooTransport::new("http://api.test/");
        assert_eq!(transport.url("/user/login/"), "http://api.test/user/login/");
    }
}
