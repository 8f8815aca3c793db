//! signfetch - sign a generative API request and save the media it returns.
//!
//! Reads a JSON request body, signs it with HMAC-SHA256, POSTs it to the
//! configured endpoint, and writes every image found in the response to the
//! output directory.
//!
//! # Usage
//!
//! ```text
//! SIGNFETCH_ACCESS_KEY=... SIGNFETCH_SECRET_KEY=... signfetch request.json
//! echo '{"req_key":"jimeng_t2i_v40","prompt":"a red fox"}' | signfetch
//! ```
//!
//! On success the extraction outcome is printed to stdout as one JSON line.
//! The process exits with status 1 if nothing was saved.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SIGNFETCH_ENDPOINT` | `https://visual.volcengineapi.com` | Request endpoint |
//! | `SIGNFETCH_REGION` | `cn-north-1` | Credential scope region |
//! | `SIGNFETCH_SERVICE` | `cv` | Credential scope service |
//! | `SIGNFETCH_ACTION` | `CVProcess` | `Action` query parameter |
//! | `SIGNFETCH_VERSION` | `2022-08-31` | `Version` query parameter |
//! | `SIGNFETCH_ACCESS_KEY` / `ACCESS_KEY` | *(unset)* | Access key id |
//! | `SIGNFETCH_SECRET_KEY` / `SECRET_KEY` | *(unset)* | Secret access key |
//! | `SIGNFETCH_OUTPUT_DIR` | `generated_images` | Artifact directory |
//! | `SIGNFETCH_REQUEST_TIMEOUT_SECS` | `60` | Signed POST timeout |
//! | `SIGNFETCH_DOWNLOAD_TIMEOUT_SECS` | `30` | Per-download timeout |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use serde_json::Value;
use signfetch_auth::TimeContext;
use signfetch_core::SignfetchConfig;
use signfetch_media::{MediaClient, ReqwestTransport};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
/// Logs go to stderr so stdout carries only the outcome.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    Ok(())
}

/// Read the raw request body from `source`, or stdin when it is absent or `-`.
fn read_body(source: Option<&str>) -> Result<String> {
    match source {
        None | Some("-") => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read request body from stdin")?;
            Ok(raw)
        }
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read request body from {path}")),
    }
}

/// Parse `raw` as a JSON object and re-serialize it compactly.
fn compact_body(raw: &str) -> Result<String> {
    let value: Value = serde_json::from_str(raw).context("request body is not valid JSON")?;
    anyhow::ensure!(value.is_object(), "request body must be a JSON object");
    Ok(serde_json::to_string(&value)?)
}

fn main() -> Result<()> {
    let config = SignfetchConfig::from_env().context("invalid configuration")?;

    init_tracing(&config.log_level)?;

    info!(
        endpoint = %config.endpoint,
        region = %config.region,
        service = %config.service,
        action = %config.action,
        output_dir = %config.output_dir,
        version = VERSION,
        "starting signfetch",
    );

    let source = std::env::args().nth(1);
    let body = compact_body(&read_body(source.as_deref())?)?;

    let transport = ReqwestTransport::new().context("failed to build HTTP client")?;
    let client = MediaClient::new(&config, transport)?;

    let outcome = client.generate(config.query_params(), &body, &TimeContext::now())?;

    for path in &outcome.saved {
        info!(path = %path.display(), "artifact saved");
    }
    println!("{}", serde_json::to_string(&outcome)?);

    if !outcome.success() {
        error!("no artifacts were extracted from the response");
        std::process::exit(1);
    }

    Ok(())
}
