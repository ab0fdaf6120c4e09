//! Blocking HTTP GET for the notifier, on top of `reqwest::blocking`.
//!
//! Only what the notifier needs: bounded timeouts, a redirect budget, and
//! opt-in relaxations of certificate checks.

use crate::notify::notify_error::NotifyError;

use reqwest::{
    Certificate,
    blocking::{Client, ClientBuilder},
    redirect::Policy,
};
use std::{fs, io::Read, path::PathBuf, time::Duration};
use url::Url;

/// Largest response body we bother to read; notifier replies are tiny.
const MAX_RESPONSE_BYTES: u64 = 64 * 1024;
/// Characters of a failing response body kept for the diagnostic line.
const BODY_SNIPPET_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct HttpClientSettings {
    /// Bounds the connect phase and, separately, the whole request.
    pub timeout: Duration,
    /// Certificate and host name checks for `https`. Off is insecure.
    pub verify_certificates: bool,
    /// Extra CA bundle (PEM) on top of the built-in roots.
    pub ca_file: Option<PathBuf>,
    pub max_redirects: usize,
}

impl Default for HttpClientSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            verify_certificates: true,
            ca_file: None,
            max_redirects: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Case-insensitive header lookup; first match wins.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    settings: HttpClientSettings,
    client: Client,
}

impl HttpClient {
    /// Builds the underlying connection pool from `settings`.
    ///
    /// # Errors
    ///
    /// [`NotifyError::CaFile`] if the CA bundle cannot be read, or
    /// [`NotifyError::Http`] if it is not PEM or the TLS backend fails to
    /// initialise.
    pub fn new(settings: HttpClientSettings) -> Result<Self, NotifyError> {
        let mut builder = ClientBuilder::new()
            .connect_timeout(settings.timeout)
            .timeout(settings.timeout)
            .redirect(Policy::limited(settings.max_redirects))
            .user_agent(concat!("asynclog/", env!("CARGO_PKG_VERSION")));

        if let Some(path) = &settings.ca_file {
            let pem = fs::read(path).map_err(|source| NotifyError::CaFile {
                path: path.clone(),
                source,
            })?;
            builder = builder.add_root_certificate(Certificate::from_pem(&pem)?);
        }
        if !settings.verify_certificates {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            client: builder.build()?,
            settings,
        })
    }

    /// GETs `url`, following up to `max_redirects` redirects.
    ///
    /// Any final status is returned as-is; deciding what counts as failure is
    /// the caller's business.
    ///
    /// # Errors
    ///
    /// Returns a [`NotifyError`] on URL, connect, TLS, timeout or protocol
    /// failure, or when the redirect budget runs out.
    pub fn get(&self, url: &Url) -> Result<HttpResponse, NotifyError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(NotifyError::Url(format!(
                "unsupported scheme {:?} in {}",
                url.scheme(),
                redact(url)
            )));
        }

        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| self.request_error(e))?;

        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();

        let mut raw = Vec::new();
        resp.take(MAX_RESPONSE_BYTES)
            .read_to_end(&mut raw)
            .map_err(NotifyError::Body)?;

        Ok(HttpResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&raw).into_owned(),
        })
    }

    fn request_error(&self, e: reqwest::Error) -> NotifyError {
        if e.is_redirect() {
            NotifyError::TooManyRedirects(self.settings.max_redirects)
        } else {
            e.into()
        }
    }
}

/// Shortened body for diagnostic lines.
#[must_use]
pub fn snippet(body: &str) -> String {
    body.trim().chars().take(BODY_SNIPPET_CHARS).collect()
}

/// URL text safe for stderr: the path (which carries the bot token) is cut.
#[must_use]
pub fn redact(url: &Url) -> String {
    format!("{}://{}/…", url.scheme(), url.host_str().unwrap_or(""))
}
