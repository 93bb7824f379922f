//! Generate a LinkedIn or Facebook post from keywords and print it.
//!
//! Reads the API token from the `HF_TOKEN` environment variable.
//!
//! # Examples
//!
//! ```sh
//! # LinkedIn post, default length (350 tokens)
//! postgen IA innovation productivité
//!
//! # Friendlier Facebook post, shorter
//! postgen --platform facebook --length 200 "coffee" "monday"
//!
//! # Touch it up in $EDITOR, then save post-LinkedIn.txt in ./out
//! postgen IA innovation --edit --output out
//! ```

use std::io::Write as _;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use postgen::prelude::*;
use postgen::prompt::DEFAULT_LENGTH;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Generate a LinkedIn or Facebook post from keywords.
///
/// Reads the API token from the HF_TOKEN environment variable.
#[derive(Parser)]
#[command(name = "postgen")]
struct Cli {
    // ── Form ───────────────────────────────────────────────────
    /// Keywords for the post (1 to 4)
    keywords: Vec<String>,

    /// Target platform: LinkedIn or Facebook
    #[arg(long, default_value = "LinkedIn")]
    platform: String,

    /// Post length budget in tokens (150 – 500)
    #[arg(long, default_value_t = DEFAULT_LENGTH)]
    length: u32,

    // ── Editing / export ───────────────────────────────────────
    /// Open the generated post in $EDITOR before printing
    #[arg(long)]
    edit: bool,

    /// Directory to write post-<Platform>.txt into
    #[arg(long)]
    output: Option<PathBuf>,

    // ── Endpoint ───────────────────────────────────────────────
    /// Model to use
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Chat completions URL
    #[arg(long, default_value = postgen::HF_ROUTER_URL)]
    endpoint: String,

    /// Log request details to stderr
    #[arg(short, long)]
    verbose: bool,
}

// ── Terminal presenter ─────────────────────────────────────────────

/// Form values come from the command line; the editor is `$EDITOR`.
struct TerminalPresenter {
    input: FormInput,
    edit: bool,
}

impl TerminalPresenter {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            input: FormInput {
                keywords: cli.keywords.clone(),
                platform: cli.platform.clone(),
                length: cli.length,
            },
            edit: cli.edit,
        }
    }
}

impl Presenter for TerminalPresenter {
    fn render_input(&mut self) -> FormInput {
        self.input.clone()
    }

    fn on_generating(&mut self, _request: &PostRequest) {
        eprintln!("Generating...");
    }

    fn render_editor(&mut self, text: &str) -> String {
        if !self.edit {
            return text.to_string();
        }
        match edit_in_editor(text) {
            Ok(edited) => edited,
            Err(e) => {
                warn!("editor failed, keeping generated text: {e}");
                text.to_string()
            }
        }
    }
}

/// Round-trip `text` through `$EDITOR` (default `vi`) via a temp file.
fn edit_in_editor(text: &str) -> Result<String, String> {
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or("EDITOR is empty")?;

    let mut file = tempfile::Builder::new()
        .prefix("postgen-")
        .suffix(".md")
        .tempfile()
        .map_err(|e| format!("failed to create temp file: {e}"))?;
    file.write_all(text.as_bytes())
        .map_err(|e| format!("failed to write temp file: {e}"))?;

    let status = process::Command::new(program)
        .args(parts)
        .arg(file.path())
        .status()
        .map_err(|e| format!("failed to launch '{program}': {e}"))?;
    if !status.success() {
        return Err(format!("'{program}' exited with {status}"));
    }

    std::fs::read_to_string(file.path()).map_err(|e| format!("failed to read edited post: {e}"))
}

// ── Helpers ────────────────────────────────────────────────────────

fn init_tracing(verbose: bool) {
    let default = if verbose { "postgen=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn generate(cli: &Cli) -> Result<TurnOutcome, PostError> {
    let config = AppConfig::from_env()
        .with_model(&cli.model)
        .with_endpoint(&cli.endpoint);
    let client = config.build_client()?;

    let mut presenter = TerminalPresenter::from_cli(cli);
    let mut session = SessionState::new();

    run_turn(&mut presenter, &mut session, &client, config.temperature).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match generate(&cli).await {
        Ok(o) => o,
        Err(e) if e.is_user_error() => {
            eprintln!("Warning: {e}");
            process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    println!("{}", outcome.edited);

    if let Some(dir) = &cli.output {
        let written = export_post(&outcome.edited, outcome.platform)
            .map_err(|e| e.to_string())
            .and_then(|export| export.write_to(dir).map_err(|e| e.to_string()));
        match written {
            Ok(path) => eprintln!("Saved {}", path.display()),
            Err(e) => {
                eprintln!("Error: failed to export post: {e}");
                process::exit(1);
            }
        }
    }
}
