use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use voxscribe_core::AppConfig;

#[derive(Parser)]
#[command(name = "voxscribe", about = "Chunked offline speech transcription")]
struct Cli {
    /// Path to the audio file to transcribe
    audio_file: PathBuf,

    /// Optional path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {:?}", path))?,
        None => AppConfig::default(),
    };

    // Logs go to stderr so the progress line owns stdout
    let env_filter =
        EnvFilter::try_new(&config.general.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("voxscribe starting");

    let registry = voxscribe_engine::PluginRegistry::new();
    let mut engine = registry.create(&config.transcription.engine).with_context(|| {
        format!(
            "failed to create engine '{}' (available: {:?})",
            config.transcription.engine,
            registry.list_engines()
        )
    })?;

    let cache = voxscribe_model::ModelCache::new(&config.model.cache_dir);
    let model_path = cache
        .ensure(&config.model.name)
        .await
        .with_context(|| format!("failed to resolve model '{}'", config.model.name))?;

    engine
        .initialize(engine_config(&model_path, &config))
        .await
        .context("failed to initialize speech engine")?;
    let engine: Arc<dyn voxscribe_engine::SpeechEngine> = Arc::from(engine);

    let options = config
        .transcription_options()
        .context("invalid transcription configuration")?;
    let driver = voxscribe_pipeline::TranscriptionDriver::new(engine, options);

    let progress: voxscribe_pipeline::ProgressFn = Box::new(|fraction| {
        print!("\rprogress: {:5.1}%", fraction * 100.0);
        let _ = std::io::stdout().flush();
    });

    let transcript = driver
        .transcribe_file(&cli.audio_file, Some(&progress))
        .await
        .context("transcription failed")?;
    println!();

    let output_path = voxscribe_pipeline::transcript_path(&cli.audio_file);
    voxscribe_pipeline::write_transcript(&output_path, &transcript)
        .with_context(|| format!("failed to write transcript to {:?}", output_path))?;

    println!("transcript saved to {}", output_path.display());
    Ok(())
}

/// Engine-specific TOML table handed to `SpeechEngine::initialize`.
fn engine_config(model_path: &Path, config: &AppConfig) -> toml::Value {
    let mut table = toml::map::Map::new();
    table.insert(
        "model_path".to_string(),
        toml::Value::String(model_path.to_string_lossy().into_owned()),
    );
    table.insert(
        "language".to_string(),
        toml::Value::String(config.transcription.language.clone()),
    );
    toml::Value::Table(table)
}
