// Snipe-IT HTTP client
//
// Wraps `reqwest::Client` with Snipe-IT URL construction, status mapping,
// rate-limit capture, and the one-shot base-URL correction used during
// validation. Endpoint modules (users, groups) add inherent methods in
// their own files so this one stays focused on transport mechanics.

use std::sync::Arc;

use arc_swap::ArcSwap;
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};
use url::Url;

use crate::error::Error;
use crate::models::{StatusEnvelope, UsersResponse};
use crate::query::Query;
use crate::rate_limit::RateLimitInfo;
use crate::transport::TransportConfig;

const API_PREFIX: &str = "api/v1";

/// A decoded payload together with the rate-limit headers it came with.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub rate_limit: Option<RateLimitInfo>,
}

/// Async client for the Snipe-IT REST API.
///
/// Every request goes to `<base>/api/v1/<path>` with the bearer token and
/// JSON accept headers baked into the underlying `reqwest::Client`. The base
/// URL sits behind an `ArcSwap` because [`validate`](Self::validate) may
/// rewrite it; concurrent `validate` calls race on that rewrite.
pub struct Client {
    http: reqwest::Client,
    base_url: ArcSwap<Url>,
}

impl Client {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL, access token, and transport config.
    ///
    /// `base_url` may be the instance root (`https://assets.example.com`) or
    /// the versioned API root (`https://assets.example.com/api/v1`); the
    /// latter is corrected by [`validate`](Self::validate).
    pub fn new(
        base_url: &str,
        access_token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(access_token)?;
        Self::with_client(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url: ArcSwap::from_pointee(base_url),
        })
    }

    /// The base URL requests are currently resolved against.
    pub fn base_url(&self) -> Url {
        Url::clone(&self.base_url.load())
    }

    // ── Validation ───────────────────────────────────────────────────

    /// Probe `GET users?offset=0&limit=1` to confirm URL and token work.
    ///
    /// When the probe 404s and the base URL ends in `api/v1`, the suffix is
    /// stripped and the probe retried exactly once. The stripped URL is kept
    /// only if that retry succeeds.
    pub async fn validate(&self) -> Result<(), Error> {
        let current = self.base_url();

        match self.probe(&current).await {
            Err(err) if err.is_not_found() => {
                let Some(stripped) = strip_api_suffix(&current) else {
                    return Err(err);
                };

                info!(
                    from = %current,
                    to = %stripped,
                    "users probe returned 404; retrying without the api/v1 suffix"
                );
                self.probe(&stripped).await?;
                self.base_url.store(Arc::new(stripped));
                Ok(())
            }
            other => other,
        }
    }

    async fn probe(&self, base: &Url) -> Result<(), Error> {
        let url = endpoint(base, "users")?;
        let query = Query::new().offset(0).limit(1);
        debug!("GET {url} (validate)");

        let resp = self.http.get(url).query(&query.pairs()).send().await?;
        Self::handle_response::<UsersResponse>(resp).await.map(|_| ())
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Resolve an API path (e.g. `"users/7"`) against the current base.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        endpoint(&self.base_url.load(), path)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
    ) -> Result<ApiResponse<T>, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={:?}", query.params());

        let resp = self.http.get(url).query(&query.pairs()).send().await?;
        Self::handle_response(resp).await
    }

    /// PATCH a JSON body, checking Snipe-IT's `{status, messages}` envelope.
    pub(crate) async fn patch<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<RateLimitInfo>, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self.http.patch(url).json(body).send().await?;
        let (raw, rate_limit) = Self::read_success(resp).await?;

        if let Ok(envelope) = serde_json::from_str::<StatusEnvelope>(&raw) {
            if envelope.is_error() {
                return Err(Error::Api {
                    message: envelope.message(),
                });
            }
        }

        Ok(rate_limit)
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<ApiResponse<T>, Error> {
        let (body, rate_limit) = Self::read_success(resp).await?;

        let data = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        Ok(ApiResponse { data, rate_limit })
    }

    /// Read the body of a 2xx response, or turn anything else into
    /// [`Error::Status`].
    async fn read_success(
        resp: reqwest::Response,
    ) -> Result<(String, Option<RateLimitInfo>), Error> {
        let status = resp.status();
        let rate_limit = RateLimitInfo::from_headers(resp.headers());

        if status.is_success() {
            let body = resp.text().await?;
            return Ok((body, rate_limit));
        }

        let request_url = resp.url().to_string();
        let raw = resp.text().await.unwrap_or_default();
        error!(
            request_url = %request_url,
            status = status.as_u16(),
            "Snipe-IT request failed"
        );
        Err(Error::Status {
            status: status.as_u16(),
            body: if raw.is_empty() {
                status.to_string()
            } else {
                raw
            },
            rate_limit,
        })
    }
}

// ── URL helpers ──────────────────────────────────────────────────────

/// Parse the configured base URL and make sure its path ends in `/` so
/// relative joins append rather than replace the last segment.
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn endpoint(base: &Url, path: &str) -> Result<Url, Error> {
    Ok(base.join(&format!("{API_PREFIX}/{}", path.trim_start_matches('/')))?)
}

/// `https://host/x/api/v1/` → `https://host/x/`; `None` if there is no suffix.
fn strip_api_suffix(base: &Url) -> Option<Url> {
    let path = base.path().trim_end_matches('/');
    let stripped = path.strip_suffix(API_PREFIX)?;

    let mut url = base.clone();
    if stripped.ends_with('/') {
        url.set_path(stripped);
    } else {
        url.set_path(&format!("{stripped}/"));
    }
    Some(url)
}
