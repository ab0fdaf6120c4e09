use std::collections::HashMap;
use std::{fmt, fs, io};

/// Default location of the settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_PATH: &str = ".env";

/// Errors raised while reading a settings file.
#[derive(Debug)]
pub enum ConfigError {
    Read { path: String, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "error reading file {path}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
        }
    }
}

/// Key/value settings in `.env` style.
///
/// Keys before any `[Section]` header are globals (the usual `.env` case);
/// keys after a header are stored per section.
#[derive(Debug, Default, Clone)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    /// Reads and parses the settings file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Like [`Config::load`], but a missing or unreadable file degrades to an
    /// empty configuration after a warning on stderr.
    #[must_use]
    pub fn load_or_empty(path: &str) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                crate::log::diagnostics::report(format_args!("warning: {e}; using defaults"));
                Self::empty()
            }
        }
    }

    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut globals = HashMap::new();
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = &line[1..line.len() - 1];
                current_section = Some(name.trim().to_string());
                continue;
            }

            if let Some(pos) = line.find('=') {
                let key = line[..pos].trim();
                let key = key.strip_prefix("export ").unwrap_or(key).trim().to_string();
                let value = unquote(line[pos + 1..].trim()).to_string();

                match &current_section {
                    None => {
                        globals.insert(key, value);
                    }
                    Some(sec) => {
                        sections.entry(sec.clone()).or_default().insert(key, value);
                    }
                }
            }
        }
        Config { globals, sections }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder-style insert of a global key, mostly useful in tests and demos.
    #[must_use]
    pub fn with_global(mut self, key: &str, value: &str) -> Self {
        self.globals.insert(key.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_global_non_empty(&self, key: &str) -> Option<&str> {
        self.get_global(key).filter(|s| !s.is_empty())
    }

    /// Looks `key` up in `section` first, then among the globals. Empty values
    /// count as absent.
    #[must_use]
    pub fn lookup(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key)
            .filter(|s| !s.is_empty())
            .or_else(|| self.get_global_non_empty(key))
    }

    #[must_use]
    pub fn get_non_empty_or_default<'a>(
        &'a self,
        section: &str,
        key: &str,
        default: &'a str,
    ) -> &'a str {
        self.lookup(section, key).unwrap_or(default)
    }

    /// Parses a boolean flag; accepts `1/0`, `true/false`, `yes/no`, `on/off`.
    /// Anything unparsable falls back to `default` with a warning.
    #[must_use]
    pub fn get_bool_or(&self, section: &str, key: &str, default: bool) -> bool {
        match self.lookup(section, key).map(str::to_ascii_lowercase).as_deref() {
            None => default,
            Some("1" | "true" | "yes" | "on") => true,
            Some("0" | "false" | "no" | "off") => false,
            Some(other) => {
                crate::log::diagnostics::report(format_args!(
                    "warning: {key}={other} is not a boolean; using {default}"
                ));
                default
            }
        }
    }

    #[must_use]
    pub fn get_u64_or(&self, section: &str, key: &str, default: u64) -> u64 {
        match self.lookup(section, key) {
            None => default,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                crate::log::diagnostics::report(format_args!(
                    "warning: {key}={raw} is not a number; using {default}"
                ));
                default
            }),
        }
    }
}

fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_dotenv_globals() {
        let cfg = Config::parse(
            "# telegram\nTELEGRAM_BOT_TOKEN=123:abc\nTELEGRAM_CHAT_ID=\"-10042\"\n\nexport LOG_DIRECTORY='var/logs'\n",
        );
        assert_eq!(cfg.get_global("TELEGRAM_BOT_TOKEN"), Some("123:abc"));
        assert_eq!(cfg.get_global("TELEGRAM_CHAT_ID"), Some("-10042"));
        assert_eq!(cfg.get_global("LOG_DIRECTORY"), Some("var/logs"));
    }

    #[test]
    fn value_may_contain_equals_sign() {
        let cfg = Config::parse("TOKEN=a=b=c");
        assert_eq!(cfg.get_global("TOKEN"), Some("a=b=c"));
    }

    #[test]
    fn section_values_shadow_globals() {
        let cfg = Config::parse("LOG_DIRECTORY=logs\n[Logging]\nLOG_DIRECTORY=other\n");
        assert_eq!(cfg.lookup("Logging", "LOG_DIRECTORY"), Some("other"));
        assert_eq!(cfg.lookup("Telegram", "LOG_DIRECTORY"), Some("logs"));
    }

    #[test]
    fn empty_values_count_as_absent() {
        let cfg = Config::parse("TELEGRAM_BOT_TOKEN=\n");
        assert_eq!(cfg.get_global("TELEGRAM_BOT_TOKEN"), Some(""));
        assert_eq!(cfg.lookup("Telegram", "TELEGRAM_BOT_TOKEN"), None);
        assert_eq!(
            cfg.get_non_empty_or_default("Telegram", "TELEGRAM_BOT_TOKEN", "x"),
            "x"
        );
    }

    #[test]
    fn typed_getters_fall_back_on_garbage() {
        let cfg = Config::parse("A=yes\nB=maybe\nN=250\nM=ten\n");
        assert!(cfg.get_bool_or("S", "A", false));
        assert!(cfg.get_bool_or("S", "B", true));
        assert!(!cfg.get_bool_or("S", "missing", false));
        assert_eq!(cfg.get_u64_or("S", "N", 1), 250);
        assert_eq!(cfg.get_u64_or("S", "M", 7), 7);
    }

    #[test]
    fn load_reads_file_and_missing_file_is_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "TELEGRAM_CHAT_ID=7").unwrap();
        let cfg = Config::load(f.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.get_global("TELEGRAM_CHAT_ID"), Some("7"));

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.env");
        let err = Config::load(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(Config::load_or_empty(missing.to_str().unwrap()).globals.is_empty());
    }
}
