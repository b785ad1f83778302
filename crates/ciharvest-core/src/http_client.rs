use std::sync::Once;
use std::time::Duration;

use ciharvest_api::{
    HarvestError,
    HarvestResult,
};
use reqwest::Client;

const DEFAULT_POOL_SIZE: usize = 10;

static CRYPTO_PROVIDER: Once = Once::new();

/// Installs ring as the process-wide rustls provider. Safe to call more
/// than once.
pub fn install_crypto_provider() {
    CRYPTO_PROVIDER.call_once(|| {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            tracing::debug!("A rustls crypto provider was already installed");
        }
    });
}

/// Builds the client shared by every CI provider request.
///
/// Idle connections per host default to 10 and can be overridden with
/// `CIHARVEST_HTTP_POOL_SIZE`.
pub fn build_client() -> HarvestResult<Client> {
    install_crypto_provider();

    let pool_size = std::env::var("CIHARVEST_HTTP_POOL_SIZE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_POOL_SIZE);

    Client::builder()
        .user_agent(concat!("ciharvest/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(pool_size)
        .pool_idle_timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .no_gzip()
        .build()
        .map_err(|e| HarvestError::Internal(format!("Failed to create HTTP client: {e}")))
}
