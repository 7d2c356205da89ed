use std::path::PathBuf;

use segmenter_core::rules::LoadOptions;

/// Default location of the rule document, relative to the working directory.
pub const DEFAULT_RULES_PATH: &str = "rules/segmenter_rules.json";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
    /// Where and how the rule set is loaded.
    pub rules: RulesConfig,
}

/// Rule set source and load-time defaults.
#[derive(Debug, Clone)]
pub struct RulesConfig {
    pub rules_path: PathBuf,
    /// Companion code-list file; a missing file is tolerated.
    pub code_list_path: Option<PathBuf>,
    /// Used unless the rule document sets `case_insensitive` itself.
    pub case_insensitive: bool,
    pub apply_value_tables: bool,
}

impl RulesConfig {
    /// Load rule settings from `SEGMENTER_*` environment variables.
    ///
    /// | Env Var                        | Default                      |
    /// |--------------------------------|------------------------------|
    /// | `SEGMENTER_RULES_PATH`         | `rules/segmenter_rules.json` |
    /// | `SEGMENTER_CODE_LIST_PATH`     | unset                        |
    /// | `SEGMENTER_CASE_INSENSITIVE`   | `false`                      |
    /// | `SEGMENTER_APPLY_VALUE_TABLES` | `false`                      |
    pub fn from_env() -> Self {
        let rules_path = std::env::var("SEGMENTER_RULES_PATH")
            .unwrap_or_else(|_| DEFAULT_RULES_PATH.into())
            .into();

        let code_list_path = std::env::var("SEGMENTER_CODE_LIST_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            rules_path,
            code_list_path,
            case_insensitive: env_flag("SEGMENTER_CASE_INSENSITIVE"),
            apply_value_tables: env_flag("SEGMENTER_APPLY_VALUE_TABLES"),
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            default_case_insensitive: self.case_insensitive,
            apply_value_tables: self.apply_value_tables,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `LOG_FORMAT`           | `text` (or `json`)         |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let log_json = std::env::var("LOG_FORMAT")
            .map(|v| v.trim().eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            log_json,
            rules: RulesConfig::from_env(),
        }
    }
}

/// Read a boolean env var; unset means `false`.
///
/// Panics on anything other than the usual true/false spellings so a typo
/// fails at startup instead of silently changing matching behaviour.
fn env_flag(name: &str) -> bool {
    match std::env::var(name) {
        Ok(raw) => parse_flag(&raw).unwrap_or_else(|| panic!("{name} must be a boolean, got '{raw}'")),
        Err(_) => false,
    }
}

/// Lenient boolean: `1/true/yes/on` and `0/false/no/off/""`, any case.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
