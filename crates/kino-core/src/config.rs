//! Configuration management
//!
//! 設定は以下の優先順位で読み込まれます:
//! 1. 環境変数
//! 2. kino-bot.toml 設定ファイル
//! 3. デフォルト値
//!
//! 設定ファイル内では `${VAR_NAME}` 形式で環境変数を展開できます。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Error;

/// Gemini (generative-language API) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generative-language API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

/// Telegram configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token
    pub token: String,
}

/// Health endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Port for the health server
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: default_api_port(),
        }
    }
}

fn default_api_port() -> u16 {
    5000
}

/// Ambient message configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbientConfig {
    /// Whether ambient messages are sent at all
    pub enabled: bool,

    /// Lower bound of the random delay, in hours (inclusive)
    pub min_hours: u64,

    /// Upper bound of the random delay, in hours (inclusive)
    pub max_hours: u64,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_hours: 5,
            max_hours: 10,
        }
    }
}

/// Which inbound messages get a generated reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Reply to any message that is itself a reply.
    /// When false, only replies to the bot's own messages count.
    pub reply_to_any: bool,

    /// Reply when the bot's @handle appears in the text
    pub on_mention: bool,

    /// Reply when the text contains a question mark
    pub on_question: bool,

    /// Also set an emoji reaction on messages the bot replies to
    pub react_to_messages: bool,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            reply_to_any: true,
            on_mention: true,
            on_question: true,
            react_to_messages: true,
        }
    }
}

/// Main configuration for kino-bot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ambient: AmbientConfig,

    #[serde(default)]
    pub triggers: TriggerConfig,
}

impl Config {
    /// 設定ファイルから環境変数を展開する
    ///
    /// `${VAR_NAME}` 形式の文字列を環境変数の値に置換します。
    /// 環境変数が存在しない場合は空文字列になります。
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// TOML 設定ファイルから設定を読み込む
    ///
    /// 設定ファイル内の `${VAR_NAME}` は環境変数の値に置換され、
    /// その後、環境変数による上書きが適用されます。
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let mut cfg = Self::from_toml_str(&Self::expand_env_vars(&toml_content))?;
        cfg.apply_env_overrides();
        cfg.validate()?;

        Ok(cfg)
    }

    fn from_toml_str(content: &str) -> crate::Result<Self> {
        let toml: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;
        Ok(Self::from_toml_config(toml))
    }

    /// デフォルトパスから設定を読み込む
    ///
    /// `./kino-bot.toml` があればそれを使い、なければ環境変数のみ。
    pub fn load() -> crate::Result<Self> {
        if Path::new("kino-bot.toml").exists() {
            return Self::from_toml_file("kino-bot.toml");
        }

        Self::from_env()
    }

    /// TOML 構造から Config を構築
    fn from_toml_config(toml: TomlConfig) -> Self {
        let defaults = Self::default();

        let llm = toml.llm.unwrap_or_default();
        let llm_config = LlmConfig {
            api_key: llm.api_key.unwrap_or_default(),
            model: llm.model.unwrap_or_else(default_model),
            base_url: llm.base_url.unwrap_or_else(default_base_url),
            timeout_secs: llm.timeout_secs.unwrap_or_else(default_timeout_secs),
        };

        let telegram = toml.telegram.unwrap_or_default();

        let api = toml.api.unwrap_or_default();

        let ambient = toml.ambient.unwrap_or_default();
        let ambient_config = AmbientConfig {
            enabled: ambient.enabled.unwrap_or(defaults.ambient.enabled),
            min_hours: ambient.min_hours.unwrap_or(defaults.ambient.min_hours),
            max_hours: ambient.max_hours.unwrap_or(defaults.ambient.max_hours),
        };

        let triggers = toml.triggers.unwrap_or_default();
        let trigger_config = TriggerConfig {
            reply_to_any: triggers.reply_to_any.unwrap_or(defaults.triggers.reply_to_any),
            on_mention: triggers.on_mention.unwrap_or(defaults.triggers.on_mention),
            on_question: triggers.on_question.unwrap_or(defaults.triggers.on_question),
            react_to_messages: triggers
                .react_to_messages
                .unwrap_or(defaults.triggers.react_to_messages),
        };

        Config {
            llm: llm_config,
            telegram: TelegramConfig {
                token: telegram.token.unwrap_or_default(),
            },
            api: ApiConfig {
                port: api.port.unwrap_or_else(default_api_port),
            },
            ambient: ambient_config,
            triggers: trigger_config,
        }
    }

    /// 環境変数で設定を上書きする
    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            self.telegram.token = token;
        }

        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            self.llm.api_key = api_key;
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            if !model.is_empty() {
                self.llm.model = model;
            }
        }
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            if !base_url.is_empty() {
                self.llm.base_url = base_url;
            }
        }
        if let Some(secs) = env_parse("LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = secs;
        }

        if let Some(port) = env_parse("PORT") {
            self.api.port = port;
        }

        if let Some(enabled) = env_flag("AMBIENT_ENABLED") {
            self.ambient.enabled = enabled;
        }
        if let Some(hours) = env_parse("AMBIENT_MIN_HOURS") {
            self.ambient.min_hours = hours;
        }
        if let Some(hours) = env_parse("AMBIENT_MAX_HOURS") {
            self.ambient.max_hours = hours;
        }

        if let Some(v) = env_flag("REPLY_TO_ANY") {
            self.triggers.reply_to_any = v;
        }
        if let Some(v) = env_flag("REPLY_ON_MENTION") {
            self.triggers.on_mention = v;
        }
        if let Some(v) = env_flag("REPLY_ON_QUESTION") {
            self.triggers.on_question = v;
        }
        if let Some(v) = env_flag("REACT_TO_MESSAGES") {
            self.triggers.react_to_messages = v;
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check required values and ranges
    pub fn validate(&self) -> crate::Result<()> {
        if self.telegram.token.trim().is_empty() {
            return Err(Error::Config("TELEGRAM_BOT_TOKEN not set".to_string()));
        }
        if self.llm.api_key.trim().is_empty() {
            return Err(Error::Config("GEMINI_API_KEY not set".to_string()));
        }
        if self.ambient.min_hours == 0 {
            return Err(Error::Config("ambient.min_hours must be at least 1".to_string()));
        }
        if self.ambient.min_hours > self.ambient.max_hours {
            return Err(Error::Config(format!(
                "ambient.min_hours ({}) is greater than ambient.max_hours ({})",
                self.ambient.min_hours, self.ambient.max_hours
            )));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    let flag = parse_flag(&value);
    if flag.is_none() {
        tracing::warn!("Ignoring {}={:?}: expected true/false", name, value);
    }
    flag
}

/// `1/true/yes/on` or `0/false/no/off`, case-insensitive
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ============================================================================
// TOML 構造体定義（ファイル解析用）
// ============================================================================

#[derive(Debug, Deserialize)]
struct TomlConfig {
    llm: Option<TomlLlmConfig>,
    telegram: Option<TomlTelegramConfig>,
    api: Option<TomlApiConfig>,
    ambient: Option<TomlAmbientConfig>,
    triggers: Option<TomlTriggerConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlLlmConfig {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlTelegramConfig {
    token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlApiConfig {
    port: Option<u16>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlAmbientConfig {
    enabled: Option<bool>,
    min_hours: Option<u64>,
    max_hours: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlTriggerConfig {
    reply_to_any: Option<bool>,
    on_mention: Option<bool>,
    on_question: Option<bool>,
    react_to_messages: Option<bool>,
}
