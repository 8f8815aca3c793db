//! End-to-end tests for signfetch.
//!
//! Each test starts a `wiremock` server standing in for both the signing
//! endpoint and the CDN that serves generated images, then drives the
//! blocking client against it from `spawn_blocking`.
//!
//! Run them with:
//! ```text
//! cargo test -p signfetch-integration
//! ```

use std::path::Path;
use std::sync::Once;

use chrono::{TimeZone, Utc};
use signfetch_auth::TimeContext;
use signfetch_core::{Endpoint, SignfetchConfig};
use signfetch_media::{ExtractionOutcome, MediaClient, MediaResult, ReqwestTransport};

static INIT: Once = Once::new();

/// Access key used by every test client.
pub const TEST_ACCESS_KEY: &str = "AKLTTESTACCESSKEY";

/// Secret key used by every test client.
pub const TEST_SECRET_KEY: &str = "c2VjcmV0LWtleS1mb3ItdGVzdHM=";

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Configuration pointing at `endpoint` and writing into `output_dir`.
#[must_use]
pub fn test_config(endpoint: &str, output_dir: &Path) -> SignfetchConfig {
    init_tracing();

    SignfetchConfig::builder()
        .endpoint(Endpoint::new(endpoint).expect("mock server uri is a valid endpoint"))
        .access_key(TEST_ACCESS_KEY.to_owned())
        .secret_key(TEST_SECRET_KEY.to_owned())
        .output_dir(output_dir.display().to_string())
        .request_timeout_secs(5)
        .download_timeout_secs(5)
        .build()
}

/// The fixed signing time used by [`generate`].
#[must_use]
pub fn fixed_time() -> TimeContext {
    TimeContext::from_datetime(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
}

/// Run one signed request with the real blocking transport.
pub async fn generate(config: SignfetchConfig, body: &str) -> MediaResult<ExtractionOutcome> {
    let body = body.to_owned();
    tokio::task::spawn_blocking(move || {
        let transport = ReqwestTransport::new().expect("failed to build HTTP client");
        let client = MediaClient::new(&config, transport)?;
        client.generate(config.query_params(), &body, &fixed_time())
    })
    .await
    .expect("blocking task panicked")
}

mod test_extract;
mod test_signing;
