use std::path::PathBuf;

/// Environment variable overriding the default cache directory
pub const CACHE_PATH_ENV: &str = "GOSINCE_CACHE_PATH";

/// Environment variable overriding the default source url
pub const SOURCE_URL_ENV: &str = "GOSINCE_SOURCE_URL";

/// Go repository serving the `api/` directory
pub const DEFAULT_SOURCE_URL: &str = "https://raw.githubusercontent.com/golang/go/master";

/// Runtime configuration of the api file source
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Local directory caching the retrieved api files
    pub cache_path: PathBuf,
    /// Base url of the Go source tree
    pub source_url: String,
    /// Logs cache and download activity
    pub verbose: bool,
}

impl Config {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose { "gosince=debug" } else { "warn" }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_path: cache_path(),
            source_url: source_url(),
            verbose: false,
        }
    }
}

/// Returns the cache directory.
/// Uses $GOSINCE_CACHE_PATH if set, otherwise falls back to ~/.gosince,
/// or ./.gosince if no home directory is available.
pub fn cache_path() -> PathBuf {
    cache_path_with_env(std::env::var(CACHE_PATH_ENV).ok(), dirs::home_dir())
}

/// Returns $GOSINCE_SOURCE_URL if set, otherwise the official Go repository.
pub fn source_url() -> String {
    source_url_with_env(std::env::var(SOURCE_URL_ENV).ok())
}

fn cache_path_with_env(env_path: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    env_path
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            home_dir
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".gosince")
        })
}

fn source_url_with_env(env_url: Option<String>) -> String {
    env_url
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string())
}
