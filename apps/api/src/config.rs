use std::time::Duration;

use anyhow::{Context, Result};

/// Default completion endpoint (OpenAI-compatible chat completions).
pub const DEFAULT_COMPLETION_API_URL: &str = "https://api.deepseek.com/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "deepseek-chat";
/// Hosted payment page used when `PAYMENT_LINK` is not set.
pub const DEFAULT_PAYMENT_LINK: &str = "https://buy.stripe.com/8x2eV68jX0VNeNobeM2ZO00";
pub const DEFAULT_ROADMAP_PRICE: &str = "¥999";
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Application configuration loaded from environment variables.
/// Startup fails if the completion credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub completion_api_key: String,
    pub completion_api_url: String,
    pub completion_model: String,
    pub payment_link: Option<String>,
    pub roadmap_price: String,
    pub timings: Timings,
    /// Sessions idle for longer than this are evicted.
    pub session_ttl: Duration,
    pub session_sweep_interval: Duration,
    pub port: u16,
    pub rust_log: String,
}

/// Fixed presentation delays. None of these gate real work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Time between the redirect being issued and the orchestrator assuming payment went through.
    pub payment_assumed_success: Duration,
    pub roadmap_ai_stage: Duration,
    pub roadmap_expert_stage: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            payment_assumed_success: Duration::from_millis(800),
            roadmap_ai_stage: Duration::from_millis(3000),
            roadmap_expert_stage: Duration::from_millis(3500),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Timings::default();

        Ok(Config {
            completion_api_key: require_env("DEEPSEEK_API_KEY")?,
            completion_api_url: env_or("COMPLETION_API_URL", DEFAULT_COMPLETION_API_URL),
            completion_model: env_or("COMPLETION_MODEL", DEFAULT_COMPLETION_MODEL),
            payment_link: std::env::var("PAYMENT_LINK")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            roadmap_price: env_or("ROADMAP_PRICE", DEFAULT_ROADMAP_PRICE),
            timings: Timings {
                payment_assumed_success: millis_env(
                    "PAYMENT_ASSUMED_SUCCESS_MS",
                    defaults.payment_assumed_success,
                )?,
                roadmap_ai_stage: millis_env("ROADMAP_AI_STAGE_MS", defaults.roadmap_ai_stage)?,
                roadmap_expert_stage: millis_env(
                    "ROADMAP_EXPERT_STAGE_MS",
                    defaults.roadmap_expert_stage,
                )?,
            },
            session_ttl: secs_env("SESSION_TTL_SECS", DEFAULT_SESSION_TTL)?,
            session_sweep_interval: secs_env(
                "SESSION_SWEEP_INTERVAL_SECS",
                DEFAULT_SESSION_SWEEP_INTERVAL,
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// The payment link the gate redirects to, falling back to the hardcoded default.
    pub fn payment_link(&self) -> &str {
        self.payment_link.as_deref().unwrap_or(DEFAULT_PAYMENT_LINK)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn millis_env(key: &str, default: Duration) -> Result<Duration> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .with_context(|| format!("{key} must be a whole number of milliseconds")),
        Err(_) => Ok(default),
    }
}

fn secs_env(key: &str, default: Duration) -> Result<Duration> {
    match std::env::var(key) {
        Ok(raw) => {
            let secs = raw
                .parse::<u64>()
                .with_context(|| format!("{key} must be a whole number of seconds"))?;
            anyhow::ensure!(secs > 0, "{key} must be greater than zero");
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        completion_api_key: "test-key".to_string(),
        completion_api_url: DEFAULT_COMPLETION_API_URL.to_string(),
        completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
        payment_link: None,
        roadmap_price: DEFAULT_ROADMAP_PRICE.to_string(),
        timings: Timings::default(),
        session_ttl: DEFAULT_SESSION_TTL,
        session_sweep_interval: DEFAULT_SESSION_SWEEP_INTERVAL,
        port: 0,
        rust_log: "debug".to_string(),
    }
}
