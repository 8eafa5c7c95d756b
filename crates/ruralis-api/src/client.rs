// HTTP client for the producer registry API.
//
// Wraps `reqwest::Client` with base-URL joining, JSON body handling and
// error-payload parsing. Endpoint methods live in `producers.rs` and
// `dashboard.rs` as inherent methods, keeping this module on transport
// mechanics only.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

// ── Error response shape ─────────────────────────────────────────────

/// `{"detail": ...}` error body. `detail` is a plain string for domain
/// rejections and a list of `{loc, msg, type}` items for request
/// validation failures.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

#[derive(serde::Deserialize)]
struct ValidationItem {
    msg: String,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client bound to a fixed base URL.
///
/// Every endpoint path is joined onto the base, so a base of
/// `https://host/api` and a path of `producers/` yields
/// `https://host/api/producers/`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages headers and TLS).
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base path ends with `/` so relative joins append
    /// instead of replacing the last segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"producers/"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let head = preview(&body, 200);
                Error::Deserialization {
                    message: format!("{e} (body preview: {head:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    /// Success is any 2xx; the body, if any, is ignored.
    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let detail = extract_detail(&raw);
        debug!(status = status.as_u16(), ?detail, "request rejected");

        Error::Remote {
            status: status.as_u16(),
            detail,
        }
    }
}

/// Leading slice of `body` no longer than `max_bytes`, cut on a char
/// boundary.
fn preview(body: &str, max_bytes: usize) -> &str {
    let end = body
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= max_bytes)
        .last()
        .unwrap_or(0);
    &body[..end]
}

/// Pull a human-readable message out of an error body.
///
/// Plain-string details are returned verbatim; validation item lists are
/// joined with `"; "`. Bodies without a usable `detail` yield `None`.
pub(crate) fn extract_detail(raw: &str) -> Option<String> {
    let parsed: ErrorResponse = serde_json::from_str(raw).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .into_iter()
                .filter_map(|item| serde_json::from_value::<ValidationItem>(item).ok())
                .map(|item| item.msg)
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn preview_never_splits_a_character() {
        let body = format!("{}ção", "x".repeat(199));
        assert_eq!(preview(&body, 200), "x".repeat(199));
        assert_eq!(preview("ação", 200), "ação");
        assert_eq!(preview("", 200), "");
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = ApiClient::with_client("http://localhost:8000/api", reqwest::Client::new())
            .unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/api/");
        assert_eq!(
            client.url("producers/").unwrap().as_str(),
            "http://localhost:8000/api/producers/"
        );
    }

    #[test]
    fn leading_slash_does_not_drop_base_path() {
        let client =
            ApiClient::with_client("http://localhost:8000/api/", reqwest::Client::new()).unwrap();
        assert_eq!(
            client.url("/producers/7").unwrap().as_str(),
            "http://localhost:8000/api/producers/7"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ApiClient::with_client("not a url", reqwest::Client::new());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn string_detail_is_used_verbatim() {
        let raw = r#"{"detail": "Produtor não encontrado"}"#;
        assert_eq!(extract_detail(raw).as_deref(), Some("Produtor não encontrado"));
    }

    #[test]
    fn validation_detail_list_is_joined() {
        let raw = r#"{"detail": [
            {"loc": ["body", "total_area"], "msg": "must be positive", "type": "value_error"},
            {"loc": ["body", "cpf_cnpj"], "msg": "invalid document", "type": "value_error"}
        ]}"#;
        assert_eq!(
            extract_detail(raw).as_deref(),
            Some("must be positive; invalid document")
        );
    }

    #[test]
    fn missing_or_blank_detail_yields_none() {
        assert!(extract_detail("Internal Server Error").is_none());
        assert!(extract_detail(r#"{"message": "nope"}"#).is_none());
        assert!(extract_detail(r#"{"detail": "  "}"#).is_none());
        assert!(extract_detail(r#"{"detail": []}"#).is_none());
    }
}
