//! `bixby-turn` runs a single capsule request through the pipeline and prints
//! the response JSON.
//!
//! The platform's own launch classification is not part of this workspace, so
//! `--launch` stands in for it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bixby_audio_player::config::{self, PipelineConfig};
use bixby_audio_player::{
    BixbyRequest, RepeatMode, RequestKind, RequestType, Session, Stage, Stream,
};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RepeatArg {
    Off,
    All,
    One,
}

impl From<RepeatArg> for RepeatMode {
    fn from(arg: RepeatArg) -> Self {
        match arg {
            RepeatArg::Off => RepeatMode::Off,
            RepeatArg::All => RepeatMode::All,
            RepeatArg::One => RepeatMode::One,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bixby-turn", version)]
struct Args {
    /// Request JSON file
    #[arg(long)]
    request: PathBuf,

    /// Optional pipeline config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Session id used for logging
    #[arg(long, default_value = "cli")]
    session_id: String,

    /// Classify the turn as a launch request
    #[arg(long)]
    launch: bool,

    /// Stream URL to play during the handler stage
    #[arg(long)]
    play: Option<String>,

    /// Format of the played stream
    #[arg(long, default_value = "mp3")]
    format: String,

    /// Track title for the played stream
    #[arg(long)]
    title: Option<String>,

    /// Repeat mode for the player
    #[arg(long, value_enum)]
    repeat: Option<RepeatArg>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,bixby_audio_player=info")
        }))
        .init();

    let cfg = match args.config.as_ref() {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    let mut pipeline = config::build_pipeline(&cfg);

    if args.launch {
        pipeline.middleware(Stage::Type).use_fn(|capsule| {
            if capsule.request_type.is_none() {
                capsule.request_type = Some(RequestType::new(RequestKind::Launch));
            }
        });
    }

    if let Some(url) = args.play.clone() {
        let format = args.format.clone();
        let title = args.title.clone();
        let repeat = args.repeat.map(RepeatMode::from);
        pipeline.middleware(Stage::Handler).use_fn(move |capsule| {
            let player = capsule.audio_player();
            player.play(Stream::new(url.clone(), format.clone()));
            if let Some(title) = title.as_ref() {
                player.set_title(title.clone());
            }
            if let Some(mode) = repeat {
                player.set_repeat_mode(mode);
            }
        });
    }

    let raw = std::fs::read_to_string(&args.request)
        .with_context(|| format!("read request {:?}", args.request))?;
    let request =
        BixbyRequest::from_json(&raw).with_context(|| format!("parse request {:?}", args.request))?;
    tracing::info!(
        session_id = %args.session_id,
        directive = request.directive.as_deref().unwrap_or(""),
        "running turn"
    );

    let mut session = Session::new(args.session_id.clone());
    let response = pipeline.run(&mut session, request).unwrap_or_default();
    let out = serde_json::to_string_pretty(&response).context("serialize response")?;
    println!("{out}");
    Ok(())
}
