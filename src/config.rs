use std::env;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    /// Public base URL this instance is reachable at
    pub base_url: String,
    pub is_dev: bool,
    /// GraphQL endpoint of the movie/series catalog API
    pub catalog_api_url: String,
    /// Base URL playable media and subtitle paths are built from
    pub media_base_url: String,
    /// Directory file-based playlist sources are resolved inside
    pub playlist_dir: String,
    /// User-Agent sent on proxied fetches
    pub proxy_user_agent: String,
    /// Optional Referer sent on proxied fetches
    pub proxy_referer: Option<String>,
    /// Per-IP requests per minute on proxy routes (0 = disabled)
    pub rate_limit_rpm: u32,
    /// TTL for cached remote playlist text, in seconds
    pub playlist_cache_ttl_secs: u64,
}

/// Default browser identity for proxied fetches. Some origins refuse
/// requests without a mainstream User-Agent.
const DEFAULT_PROXY_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

impl Config {
    /// Load configuration from environment variables
    /// In DEV mode, provides sensible defaults. In PROD mode, the
    /// service-identity vars are required.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        // Check if running in dev mode
        let is_dev = env::var("DEV_MODE")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .unwrap_or(false);

        // Port: required in prod, defaults to 3000 in dev
        let port = if is_dev {
            env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?
        } else {
            env::var("PORT")
                .map_err(|_| "PORT is required in production")?
                .parse()?
        };

        // Base URL: required in prod, defaults to localhost in dev
        let base_url = if is_dev {
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
        } else {
            env::var("BASE_URL").map_err(|_| "BASE_URL is required in production")?
        };

        // Catalog GraphQL endpoint: required in prod
        let catalog_api_url = if is_dev {
            env::var("CATALOG_API_URL")
                .unwrap_or_else(|_| "https://catalog.example.com/graphql".to_string())
        } else {
            env::var("CATALOG_API_URL").map_err(|_| "CATALOG_API_URL is required in production")?
        };

        // Media base: defaults to the catalog host with the GraphQL path stripped
        let media_base_url = env::var("MEDIA_BASE_URL").unwrap_or_else(|_| {
            catalog_api_url
                .strip_suffix("/graphql")
                .unwrap_or(&catalog_api_url)
                .to_string()
        });

        let playlist_dir = env::var("PLAYLIST_DIR").unwrap_or_else(|_| "./playlists".to_string());

        let proxy_user_agent =
            env::var("PROXY_USER_AGENT").unwrap_or_else(|_| DEFAULT_PROXY_USER_AGENT.to_string());
        let proxy_referer = env::var("PROXY_REFERER").ok();

        let rate_limit_rpm: u32 = env::var("RATE_LIMIT_RPM")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .unwrap_or(0);

        let playlist_cache_ttl_secs: u64 = env::var("PLAYLIST_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(Config {
            port,
            base_url,
            is_dev,
            catalog_api_url,
            media_base_url,
            playlist_dir,
            proxy_user_agent,
            proxy_referer,
            rate_limit_rpm,
            playlist_cache_ttl_secs,
        })
    }
}
