use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sketchpad::config::EngineConfig;
use sketchpad::engine::Engine;
use sketchpad::error::{ErrorCode, ReplayError};
use sketchpad::script;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sketchpad", about = "Replay a gesture script against the shape interaction engine")]
struct Cli {
    /// JSON Lines gesture script.
    script: PathBuf,

    #[arg(long, env = "SKETCHPAD_LOG", default_value = "info")]
    log_filter: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::new(&cli.log_filter)).init();

    match run(&cli) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, code = e.error_code(), "replay failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, ReplayError> {
    let mut engine = Engine::with_config(EngineConfig::from_env()?);
    let config = engine.config();
    tracing::debug!(
        handle_tolerance = config.handle_tolerance,
        handle_size = config.handle_size,
        hit_priority = ?config.hit_priority,
        "engine configured"
    );

    let gestures = script::load_script(&cli.script)?;
    tracing::info!(path = %cli.script.display(), gestures = gestures.len(), "replaying script");

    let actions = script::play(&mut engine, &gestures);
    tracing::info!(actions = actions.len(), mode = engine.mode().as_str(), "replay finished");

    Ok(script::summarize(&engine))
}
