//! CLI binary for plotpad.
//!
//! A thin shim over the library crate that maps CLI flags to a
//! `SessionConfig`, drives one session action, and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use plotpad::{Artifact, Preview, Session, SessionCallback, SessionConfig, SubmitReceipt};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── Notice callback printing to stderr ───────────────────────────────────────

/// Prints session notices the way a front-end would toast them. stdout is
/// reserved for the G-code itself so it can be piped.
struct CliCallback {
    quiet: bool,
}

impl SessionCallback for CliCallback {
    fn on_generate_start(&self) {
        if !self.quiet {
            eprintln!("{} generating G-code…", dim("◆"));
        }
    }

    fn on_generate_complete(&self, gcode_len: usize) {
        if !self.quiet {
            eprintln!("{} generated {} bytes of G-code", green("✔"), bold(&gcode_len.to_string()));
        }
    }

    fn on_submit_complete(&self, receipt: &SubmitReceipt) {
        if !self.quiet {
            match receipt.position {
                Some(pos) => eprintln!("{} job queued at position {}", green("✔"), bold(&pos.to_string())),
                None => eprintln!("{} job queued", green("✔")),
            }
        }
    }

    fn on_export_complete(&self, path: &std::path::Path) {
        if !self.quiet {
            eprintln!("{} exported to {}", green("✔"), bold(&path.display().to_string()));
        }
    }

    fn on_failure(&self, kind: &'static str, message: String) {
        eprintln!("{} [{kind}] {message}", red("✘"));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Generate G-code for typed text (stdout)
  plotpad "Hello plotter"

  # Generate from a text file
  plotpad --file notes.txt -o notes.gcode

  # Queue a plot job on the device
  plotpad --send "Hello plotter"

  # Export with the fixed output.gcode name
  plotpad "Hello" --export-dir ./out

  # Show what the session would preview
  plotpad --file sketch.png --preview

  # How many jobs are waiting on the plotter?
  plotpad --status

INPUT PRIORITY:
  Typed TEXT, when non-empty after trimming, always wins. Otherwise the
  first .txt file given with --file is used. Images are previewed but never
  converted; --send/generate with only an image fails with no-input-available.

ENVIRONMENT VARIABLES:
  PLOTPAD_URL       Base URL of the plotter service (default http://localhost:10000)
  PLOTPAD_TIMEOUT   Per-request timeout in seconds (default 30)
"#;

/// Preview text and plot it on a Hershey-text pen plotter.
#[derive(Parser, Debug)]
#[command(
    name = "plotpad",
    version,
    about = "Generate plotter G-code from text, or queue it as a plot job",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Text to plot. Wins over --file inputs when non-empty.
    text: Option<String>,

    /// Add a file to the session (repeatable). `.txt` files can be plotted;
    /// jpeg/png/gif are preview-only.
    #[arg(short, long = "file")]
    files: Vec<PathBuf>,

    /// Write the generated G-code to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the generated G-code as `output.gcode` into this directory.
    #[arg(long, conflicts_with = "output")]
    export_dir: Option<PathBuf>,

    /// Submit the input as a plot job instead of generating locally-viewable
    /// G-code.
    #[arg(short, long)]
    send: bool,

    /// Print the plotter service's queue length and exit.
    #[arg(long)]
    status: bool,

    /// Print the derived preview state and exit (no network).
    #[arg(long)]
    preview: bool,

    /// Base URL of the plotter service.
    #[arg(short = 'u', long, env = "PLOTPAD_URL", default_value = plotpad::DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "PLOTPAD_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors and the G-code itself.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    // ── Build session ────────────────────────────────────────────────────
    let config = SessionConfig::builder()
        .base_url(&cli.base_url)
        .request_timeout_secs(cli.timeout)
        .build()
        .context("Invalid configuration")?;

    let callback = Arc::new(CliCallback { quiet: cli.quiet });
    let mut session = Session::with_callback(config, callback).context("Failed to create session")?;

    if let Some(ref text) = cli.text {
        session.set_typed_text(text.clone());
    }
    for path in &cli.files {
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
        session.add_artifact(Artifact::from_path(path));
    }

    // ── Status-only mode ─────────────────────────────────────────────────
    if cli.status {
        let status = session
            .queue_status()
            .await
            .context("Failed to fetch queue status")?;
        println!("{} job(s) queued", status.queue_length);
        return Ok(());
    }

    // ── Preview-only mode ────────────────────────────────────────────────
    if cli.preview {
        match session.preview().context("Failed to derive preview")? {
            Preview::Image { url } => println!("image preview: {url}"),
            Preview::Text { text } => println!("text preview:\n{text}"),
            Preview::Empty => println!("empty preview"),
        }
        return Ok(());
    }

    // ── Submit mode ──────────────────────────────────────────────────────
    if cli.send {
        // The callback already printed the queue position.
        session.send().await.context("Submission failed")?;
        return Ok(());
    }

    // ── Generate mode ────────────────────────────────────────────────────
    session.generate().await.context("Generation failed")?;

    if let Some(ref dir) = cli.export_dir {
        session.export(dir).await.context("Export failed")?;
    } else if let Some(ref path) = cli.output {
        session.export_to(path).await.context("Export failed")?;
    } else {
        let gcode = session
            .state()
            .generated_output()
            .context("No output after successful generation")?;
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(gcode.as_bytes())
            .context("Failed to write to stdout")?;
        if !gcode.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    Ok(())
}
