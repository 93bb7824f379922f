//! Browser-based form UI for the postgen post generator.
//!
//! `postgen-web` serves a single page with the post form (keywords, platform,
//! length slider), a preview, an editor and a download button, backed by a
//! small REST API. One server process is one session.
//!
//! # Quick start
//!
//! ```ignore
//! use postgen::prelude::*;
//! use postgen_web::{WebConfig, spawn_web};
//! use std::sync::{Arc, Mutex};
//!
//! let config = AppConfig::from_env();
//! let generator: Arc<dyn Generator> = Arc::new(config.build_client()?);
//! let session = Arc::new(Mutex::new(SessionState::new()));
//!
//! let addr = spawn_web(session, generator, WebConfig::default()).await?;
//! println!("Web UI: http://{addr}");
//! ```
//!
//! # Endpoints
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /` | The form page |
//! | `GET /api/state` | [`SessionSnapshot`] with the current post and form limits |
//! | `POST /api/generate` | `{keywords, platform, length}` → `{post, preview_html}` |
//! | `POST /api/export` | `{platform, text?}` → `post-<Platform>.txt` attachment |

mod api;
pub mod preview;
mod server;
pub mod snapshot;

pub use api::{ExportRequest, GenerateResponse};
pub use snapshot::SessionSnapshot;

use std::net::SocketAddr;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use postgen::DEFAULT_TEMPERATURE;
use postgen::generation::Generator;
use postgen::session::SessionState;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:3001`.
    pub bind_addr: SocketAddr,
    /// Sampling temperature for generations. Default: `0.7`.
    pub temperature: f32,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// The server runs until the Tokio runtime shuts down.
///
/// # Arguments
///
/// * `session` — The session's state. Readable by the caller while the
///   server runs.
/// * `generator` — Model backend used by `POST /api/generate`.
/// * `config` — Server configuration.
pub async fn spawn_web(
    session: Arc<Mutex<SessionState>>,
    generator: Arc<dyn Generator>,
    config: WebConfig,
) -> std::io::Result<SocketAddr> {
    let app_state = api::AppState {
        session,
        generator,
        temperature: config.temperature,
        in_flight: Arc::new(AtomicBool::new(false)),
    };
    let router = server::build_router(app_state);
    server::start_server(router, config.bind_addr).await
}
