/// Hosted-model configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AssistConfig {
    /// Base URL of an OpenAI-compatible API (no trailing `/chat/completions`).
    pub api_url: String,
    /// Bearer token. Requests are sent unauthenticated when unset.
    pub api_key: Option<String>,
    /// Model name sent with every completion request.
    pub model: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of model calls in flight at once.
    pub max_concurrency: usize,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1".into(),
            api_key: None,
            model: "gpt-4o-mini".into(),
            timeout_secs: 60,
            max_concurrency: 4,
        }
    }
}

impl AssistConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                     |
    /// |--------------------------|-----------------------------|
    /// | `ASSIST_API_URL`         | `https://api.openai.com/v1` |
    /// | `ASSIST_API_KEY`         | unset                       |
    /// | `ASSIST_MODEL`           | `gpt-4o-mini`               |
    /// | `ASSIST_TIMEOUT_SECS`    | `60`                        |
    /// | `ASSIST_MAX_CONCURRENCY` | `4`                         |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url = std::env::var("ASSIST_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let api_key = std::env::var("ASSIST_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let model = std::env::var("ASSIST_MODEL").unwrap_or(defaults.model);

        let timeout_secs: u64 = std::env::var("ASSIST_TIMEOUT_SECS")
            .unwrap_or_else(|_| defaults.timeout_secs.to_string())
            .parse()
            .expect("ASSIST_TIMEOUT_SECS must be a valid u64");

        let max_concurrency: usize = std::env::var("ASSIST_MAX_CONCURRENCY")
            .unwrap_or_else(|_| defaults.max_concurrency.to_string())
            .parse()
            .expect("ASSIST_MAX_CONCURRENCY must be a valid usize");

        Self {
            api_url,
            api_key,
            model,
            timeout_secs,
            max_concurrency: max_concurrency.max(1),
        }
    }
}
