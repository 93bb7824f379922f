//! Post generator web form: the browser front end for postgen.
//!
//! Serves the form page and its REST API, and generates posts through the
//! Hugging Face inference router.
//!
//! # Usage
//!
//! ```bash
//! HF_TOKEN=hf_... cargo run -p postgen-web
//! HF_TOKEN=hf_... cargo run -p postgen-web -- --port 8080
//! RUST_LOG=postgen=debug HF_TOKEN=hf_... cargo run -p postgen-web
//! ```
//!
//! Then open the printed URL in a browser.

use std::sync::{Arc, Mutex};

use clap::Parser;
use postgen::prelude::*;
use postgen_web::{WebConfig, spawn_web};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Post generator web form.
#[derive(Parser)]
#[command(about = "Keyword-driven LinkedIn / Facebook post generator with a browser UI")]
struct Args {
    /// Model to use.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Chat completions URL.
    #[arg(long, default_value = postgen::HF_ROUTER_URL)]
    endpoint: String,

    /// Port for the web UI server.
    #[arg(long, default_value_t = 3001)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Settings and the inference client. A missing token is not fatal
    //    here; the first generation will report it.
    let config = AppConfig::from_env()
        .with_model(&args.model)
        .with_endpoint(&args.endpoint);
    if config.api_token.is_none() {
        tracing::warn!("{} is not set; generation requests will likely fail", postgen::TOKEN_ENV);
    }
    let client = config.build_client().map_err(|e| e.to_string())?;

    // 2. One session for this process.
    let session = Arc::new(Mutex::new(SessionState::new()));

    // 3. Spawn the web server.
    let web_config = WebConfig {
        bind_addr: ([127, 0, 0, 1], args.port).into(),
        temperature: config.temperature,
        ..Default::default()
    };
    let addr = spawn_web(session, Arc::new(client), web_config)
        .await
        .map_err(|e| format!("failed to start web server: {e}"))?;
    println!("Web UI: http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for shutdown: {e}"))?;
    println!("Shutting down.");
    Ok(())
}
