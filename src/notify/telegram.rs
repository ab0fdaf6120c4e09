use crate::{
    config::Config,
    log::diagnostics,
    notify::{
        Notify,
        credentials::{Credentials, SECTION},
        http_client::{self, HttpClient, HttpClientSettings, HttpResponse},
        notify_error::NotifyError,
    },
};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::{path::PathBuf, time::Duration};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

pub const API_URL_KEY: &str = "TELEGRAM_API_URL";
pub const TIMEOUT_MS_KEY: &str = "TELEGRAM_TIMEOUT_MS";
pub const MAX_REDIRECTS_KEY: &str = "TELEGRAM_MAX_REDIRECTS";
pub const INSECURE_KEY: &str = "TELEGRAM_INSECURE_SKIP_VERIFY";
pub const CA_FILE_KEY: &str = "TELEGRAM_CA_FILE";

/// Everything but RFC 3986 unreserved characters gets escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
/// The token sits in a path segment; its `:` separator stays literal.
const TOKEN_SEGMENT: &AsciiSet = &QUERY_VALUE.remove(b':');

/// Sends error messages to a Telegram chat through the Bot API
/// `sendMessage` method.
///
/// Without credentials every send is a reported no-op. Delivery is best
/// effort: one attempt, no retries, failures reported on stderr.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    credentials: Option<Credentials>,
    api_base: Url,
    settings: HttpClientSettings,
    /// `None` when the client could not be built; already reported.
    client: Option<HttpClient>,
}

impl TelegramNotifier {
    /// A client is only built when there is something to send with it.
    #[must_use]
    pub fn new(credentials: Option<Credentials>, api_base: Url, settings: HttpClientSettings) -> Self {
        if !settings.verify_certificates {
            diagnostics::report(format_args!(
                "warning: TLS certificate verification is DISABLED for notifications (insecure)"
            ));
        }
        let client = match &credentials {
            None => None,
            Some(_) => match HttpClient::new(settings.clone()) {
                Ok(client) => Some(client),
                Err(e) => {
                    diagnostics::report(format_args!("Telegram notifications unavailable: {e}"));
                    None
                }
            },
        };
        Self {
            credentials,
            api_base,
            settings,
            client,
        }
    }

    /// A notifier that never has credentials.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None, default_api_base(), HttpClientSettings::default())
    }

    /// Builds the notifier from `TELEGRAM_*` settings.
    ///
    /// A malformed `TELEGRAM_API_URL` is reported and replaced by the public
    /// Bot API endpoint.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let api_base = match config.lookup(SECTION, API_URL_KEY) {
            None => default_api_base(),
            Some(raw) => Url::parse(raw).unwrap_or_else(|e| {
                diagnostics::report(format_args!(
                    "warning: {API_URL_KEY}={raw} is not a URL ({e}); using {DEFAULT_API_URL}"
                ));
                default_api_base()
            }),
        };

        let defaults = HttpClientSettings::default();
        let default_timeout_ms = u64::try_from(defaults.timeout.as_millis()).unwrap_or(u64::MAX);
        let max_redirects =
            config.get_u64_or(SECTION, MAX_REDIRECTS_KEY, defaults.max_redirects as u64);
        let settings = HttpClientSettings {
            timeout: Duration::from_millis(
                config.get_u64_or(SECTION, TIMEOUT_MS_KEY, default_timeout_ms).max(1),
            ),
            verify_certificates: !config.get_bool_or(SECTION, INSECURE_KEY, false),
            ca_file: config.lookup(SECTION, CA_FILE_KEY).map(PathBuf::from),
            max_redirects: usize::try_from(max_redirects).unwrap_or(usize::MAX),
        };

        Self::new(Credentials::from_config(config), api_base, settings)
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    #[must_use]
    pub fn client_settings(&self) -> &HttpClientSettings {
        &self.settings
    }

    /// `<base>/bot<token>/sendMessage?chat_id=<id>&text=<escaped message>`.
    ///
    /// # Errors
    ///
    /// [`NotifyError::MissingCredentials`] without credentials, or
    /// [`NotifyError::Url`] if the result does not parse.
    pub fn send_message_url(&self, message: &str) -> Result<Url, NotifyError> {
        let creds = self
            .credentials
            .as_ref()
            .ok_or(NotifyError::MissingCredentials)?;
        let raw = format!(
            "{}/bot{}/sendMessage?chat_id={}&text={}",
            self.api_base.as_str().trim_end_matches('/'),
            utf8_percent_encode(&creds.token, TOKEN_SEGMENT),
            utf8_percent_encode(&creds.chat_id, QUERY_VALUE),
            utf8_percent_encode(message, QUERY_VALUE),
        );
        Ok(Url::parse(&raw)?)
    }

    /// One delivery attempt. A non-2xx final status is an error.
    ///
    /// # Errors
    ///
    /// Any [`NotifyError`]; see [`HttpClient::get`].
    pub fn try_send(&self, message: &str) -> Result<HttpResponse, NotifyError> {
        let url = self.send_message_url(message)?;
        let client = self.client.as_ref().ok_or(NotifyError::ClientUnavailable)?;
        let resp = client.get(&url)?;
        if resp.is_success() {
            Ok(resp)
        } else {
            Err(NotifyError::Status {
                code: resp.status,
                body: http_client::snippet(&resp.body),
            })
        }
    }
}

impl Notify for TelegramNotifier {
    fn send(&self, message: &str) {
        match self.try_send(message) {
            Ok(_) => {}
            Err(NotifyError::MissingCredentials) => diagnostics::report(format_args!(
                "warning: Telegram credentials are missing; skipping notification"
            )),
            Err(e) => diagnostics::report(format_args!(
                "failed to send message to Telegram: {e}"
            )),
        }
    }
}

// Constant input; parse cannot fail.
#[allow(clippy::expect_used)]
fn default_api_base() -> Url {
    Url::parse(DEFAULT_API_URL).expect("DEFAULT_API_URL is a valid URL")
}
