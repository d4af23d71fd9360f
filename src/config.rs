use std::{env, fmt::Display, net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;

use crate::logger::Level;

pub struct Config {
    pub openai_key: String,
    pub openai_base_url: String,
    pub chat_model: String,
    pub transcription_model: String,
    pub tts_model: String,
    pub tts_voice: String,
    pub bind_addr: SocketAddr,
    pub voice_limit: u32,
    /// Completed turns resent to the reply model; 0 resends everything.
    pub history_turns: usize,
    pub request_timeout: Duration,
    pub session_idle: Duration,
    pub log_level: Level,
}

const ENV_PREFIX: &str = "SALES_VOICE__";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_VOICE_LIMIT: u32 = 10;

impl Config {
    /// A config with every optional setting at its default.
    #[must_use]
    pub fn with_defaults(openai_key: String) -> Self {
        Self {
            openai_key,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_owned(),
            chat_model: "gpt-4o-mini".to_owned(),
            transcription_model: "whisper-1".to_owned(),
            tts_model: "tts-1".to_owned(),
            tts_voice: "nova".to_owned(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 7860)),
            voice_limit: DEFAULT_VOICE_LIMIT,
            history_turns: 10,
            request_timeout: Duration::from_secs(60),
            session_idle: Duration::from_secs(3600),
            log_level: Level::Info,
        }
    }
}

/// Loads a local `.env` file if there is one, then reads the environment.
pub fn load() -> anyhow::Result<Config> {
    // A missing .env file is fine, the variables may come from the shell
    let _ = dotenvy::dotenv();
    from_env()
}

pub fn from_env() -> anyhow::Result<Config> {
    from_lookup(|name| env::var(name).ok())
}

/// Builds the config from `lookup`, which maps a full variable name such as
/// `SALES_VOICE__VOICE_LIMIT` to its value.
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
    let vars = Vars { lookup };

    let openai_key = vars.get("OPENAI_KEY")?;
    if openai_key.trim().is_empty() {
        anyhow::bail!("environment variable {ENV_PREFIX}OPENAI_KEY must not be empty");
    }
    let mut config = Config::with_defaults(openai_key);

    if let Some(url) = vars.get_opt("OPENAI_BASE_URL") {
        config.openai_base_url = url.trim_end_matches('/').to_owned();
    }
    if let Some(model) = vars.get_opt("CHAT_MODEL") {
        config.chat_model = model;
    }
    if let Some(model) = vars.get_opt("TRANSCRIPTION_MODEL") {
        config.transcription_model = model;
    }
    if let Some(model) = vars.get_opt("TTS_MODEL") {
        config.tts_model = model;
    }
    if let Some(voice) = vars.get_opt("TTS_VOICE") {
        config.tts_voice = voice;
    }
    if let Some(level) = vars.get_opt("LOG_LEVEL") {
        config.log_level = Level::from_setting(&level);
    }
    config.bind_addr = vars.get_parsed("BIND_ADDR")?.unwrap_or(config.bind_addr);
    config.voice_limit = vars.get_parsed("VOICE_LIMIT")?.unwrap_or(config.voice_limit);
    config.history_turns = vars.get_parsed("HISTORY_TURNS")?.unwrap_or(config.history_turns);
    if let Some(secs) = vars.get_parsed::<u64>("REQUEST_TIMEOUT_SECS")? {
        config.request_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = vars.get_parsed::<u64>("SESSION_IDLE_SECS")? {
        config.session_idle = Duration::from_secs(secs);
    }

    Ok(config)
}

struct Vars<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn get(&self, key: &str) -> anyhow::Result<String> {
        (self.lookup)(&format!("{ENV_PREFIX}{key}"))
            .with_context(|| format!("environment variable {ENV_PREFIX}{key} is required"))
    }

    fn get_opt(&self, key: &str) -> Option<String> {
        (self.lookup)(&format!("{ENV_PREFIX}{key}")).filter(|v| !v.trim().is_empty())
    }

    fn get_parsed<T>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.get_opt(key)
            .map(|raw| parse_setting(key, &raw))
            .transpose()
    }
}

fn parse_setting<T>(key: &str, raw: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse::<T>().map_err(|err| {
        anyhow::anyhow!("could not parse {ENV_PREFIX}{key}={raw:?}: {err}")
    })
}
