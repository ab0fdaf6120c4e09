use crate::config::Config;
use std::fmt;

pub const TOKEN_KEY: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_KEY: &str = "TELEGRAM_CHAT_ID";
pub(crate) const SECTION: &str = "Telegram";

/// Bot token and destination chat, read once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub chat_id: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Both values must be present and non-empty, otherwise `None`.
    #[must_use]
    pub fn from_config(config: &Config) -> Option<Self> {
        let token = config.lookup(SECTION, TOKEN_KEY)?;
        let chat_id = config.lookup(SECTION, CHAT_ID_KEY)?;
        Some(Self::new(token, chat_id))
    }
}

// The token is a secret; keep it out of Debug output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}
