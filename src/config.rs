use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the MovieLens catalog (`MovieID::Title::Genres`)
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Path to the precomputed similarity matrix CSV
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Path to the per-genre top movies CSV
    #[serde(default = "default_genre_top_path")]
    pub genre_top_path: String,

    /// Path to the sample movies offered for rating
    #[serde(default = "default_samples_path")]
    pub samples_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum ratings kept per session before LRU eviction
    #[serde(default = "default_rating_capacity")]
    pub rating_capacity: usize,

    /// Minimum ratings required before recommendations are produced
    #[serde(default = "default_min_ratings")]
    pub min_ratings: usize,

    /// Default number of recommendations returned
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_movies_path() -> String {
    "./data/movies.dat".to_string()
}

fn default_similarity_path() -> String {
    "./data/top_sim.csv".to_string()
}

fn default_genre_top_path() -> String {
    "./data/top10_movies.csv".to_string()
}

fn default_samples_path() -> String {
    "./data/sample_movies.csv".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_rating_capacity() -> usize {
    10
}

fn default_min_ratings() -> usize {
    5
}

fn default_top_n() -> usize {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config =
            envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.rating_capacity == 0 {
            anyhow::bail!("RATING_CAPACITY must be positive");
        }
        if config.min_ratings > config.rating_capacity {
            anyhow::bail!(
                "MIN_RATINGS ({}) cannot exceed RATING_CAPACITY ({})",
                config.min_ratings,
                config.rating_capacity
            );
        }

        Ok(config)
    }
}
