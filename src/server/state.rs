use crate::{
    cache::PlaylistCache,
    catalog::{CatalogProvider, GraphqlCatalog},
    config::Config,
    server::rate_limit::RateLimiter,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
    /// Shared HTTP client for connection pooling
    pub http_client: Client,
    /// Movie/series metadata source
    pub catalog: Arc<dyn CatalogProvider>,
    /// Short-TTL cache for remote playlist text
    pub playlist_cache: PlaylistCache,
    /// Per-client limiter, absent when RATE_LIMIT_RPM is 0
    pub rate_limiter: Option<RateLimiter>,
    /// Prometheus render handle; absent if a recorder was already installed
    pub metrics_handle: Option<PrometheusHandle>,
    /// Process start, for health-report uptime
    pub started_at: Instant,
}

impl AppState {
    /// Create a new AppState with the given configuration
    pub fn new(config: Config) -> Self {
        let http_client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to create HTTP client");

        let catalog = Arc::new(GraphqlCatalog::new(
            http_client.clone(),
            config.catalog_api_url.clone(),
        ));

        Self::with_catalog(config, http_client, catalog)
    }

    /// State with an explicit catalog backend (tests swap in stubs here).
    pub fn with_catalog(
        config: Config,
        http_client: Client,
        catalog: Arc<dyn CatalogProvider>,
    ) -> Self {
        let playlist_cache =
            PlaylistCache::new(Duration::from_secs(config.playlist_cache_ttl_secs));

        let rate_limiter = (config.rate_limit_rpm > 0)
            .then(|| RateLimiter::per_minute(config.rate_limit_rpm));

        // A recorder can only be installed once per process; later router
        // builds (tests) run without a render handle.
        let metrics_handle = PrometheusBuilder::new().install_recorder().ok();

        Self {
            config: Arc::new(config),
            http_client,
            catalog,
            playlist_cache,
            rate_limiter,
            metrics_handle,
            started_at: Instant::now(),
        }
    }
}
