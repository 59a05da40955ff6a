use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Title catalog + pairwise similarity matrix (JSON)
    #[serde(default = "default_title_model_path")]
    pub title_model_path: String,

    /// Vibe catalog + sentence embedding table (JSON)
    #[serde(default = "default_vibe_model_path")]
    pub vibe_model_path: String,

    /// TMDB API key. Posters fall back to a placeholder when unset.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// Older name for the TMDB key, used when `TMDB_API_KEY` is unset
    #[serde(default)]
    pub api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with a movie's poster_path
    #[serde(default = "default_tmdb_image_base")]
    pub tmdb_image_base: String,

    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Ollama-compatible embedding server
    #[serde(default = "default_embedding_api_url")]
    pub embedding_api_url: String,

    /// Must be the sentence encoder the vibe table was built with
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    #[serde(default = "default_embedding_timeout_secs")]
    pub embedding_timeout_secs: u64,

    /// Results returned when a search does not ask for a specific count
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_title_model_path() -> String {
    "data/title_model.json".to_string()
}

fn default_vibe_model_path() -> String {
    "data/vibe_model.json".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_tmdb_image_base() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_poster_timeout_secs() -> u64 {
    5
}

fn default_embedding_api_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_embedding_model() -> String {
    "all-minilm".to_string()
}

fn default_embedding_timeout_secs() -> u64 {
    30
}

fn default_top_n() -> usize {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.default_top_n == 0 {
            anyhow::bail!("DEFAULT_TOP_N must be at least 1");
        }

        Ok(config)
    }

    /// Returns the TMDB key, preferring `TMDB_API_KEY` over `API_KEY`
    /// and treating blank values as unset
    pub fn tmdb_api_key(&self) -> Option<String> {
        non_blank(self.tmdb_api_key.as_deref()).or_else(|| non_blank(self.api_key.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
}
