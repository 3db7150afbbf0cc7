use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use vietvoice::commands;
use vietvoice::config::AppPaths;
use vietvoice::utils::logger;
use vietvoice::utils::tts::SynthesisRequest;
use vietvoice::utils::tts::voices::{DEFAULT_ACCENT_ID, DEFAULT_VOICE_ID};
use vietvoice::{AppState, CommandError};

#[derive(Parser, Debug)]
#[command(name = "vietvoice")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Vietnamese text-to-speech with regional accents")]
struct Args {
    /// Override the application data directory (settings and output)
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize text into a WAV file
    Generate {
        /// Text to read aloud
        text: String,

        /// Voice id (see `voices`)
        #[arg(long, default_value = DEFAULT_VOICE_ID)]
        voice: String,

        /// Accent id (see `accents`)
        #[arg(long, default_value = DEFAULT_ACCENT_ID)]
        accent: String,

        /// Play the result once generated
        #[arg(long)]
        play: bool,

        /// Also copy the result to this path
        #[arg(long, value_name = "PATH")]
        save: Option<String>,
    },
    /// Play a WAV file with the system player
    Play { path: String },
    /// Copy a generated file elsewhere
    Save { path: String, destination: String },
    /// List available voices
    Voices,
    /// List available accents
    Accents,
    /// Print the configured API key
    GetKey,
    /// Store the API key in settings
    SetKey { key: String },
    /// Print the output directory
    OutputDir,
}

#[tokio::main]
async fn main() -> Result<()> {
    logger::init_logger();

    let args = Args::parse();
    let paths = args.data_dir.map(AppPaths::new).unwrap_or_else(AppPaths::from_system);
    info!("Using data directory: {}", paths.data_dir().display());

    let state = AppState::new(paths);
    run(&state, args.command).await.map_err(|e| anyhow!("{:?}: {}", e.kind, e.message))
}

async fn run(state: &AppState, command: Command) -> std::result::Result<(), CommandError> {
    match command {
        Command::Generate { text, voice, accent, play, save } => {
            let request = SynthesisRequest::new(text, voice, accent);
            let result = commands::generate_speech(state, request).await?;
            println!("{} (~{:.1}s)", result.audio_path.display(), result.duration);

            let audio_path = result.audio_path.to_string_lossy().into_owned();
            if let Some(destination) = save {
                let outcome = commands::save_audio(audio_path.clone(), Some(destination)).await?;
                if let Some(saved) = outcome.saved_path {
                    println!("Saved to {}", saved.display());
                }
            }
            if play {
                commands::play_audio(audio_path).await?;
            }
        }
        Command::Play { path } => commands::play_audio(path).await?,
        Command::Save { path, destination } => {
            let outcome = commands::save_audio(path, Some(destination)).await?;
            if let Some(saved) = outcome.saved_path {
                println!("{}", saved.display());
            }
        }
        Command::Voices => {
            for voice in commands::list_voices() {
                println!("{:<14} {:<14} {}", voice.id, voice.display_name, voice.timbre);
            }
        }
        Command::Accents => {
            for accent in commands::list_accents() {
                let region = format!("{:?}", accent.region);
                println!("{:<10} {:<8} {}", accent.id, region, accent.prompt);
            }
        }
        Command::GetKey => println!("{}", commands::get_api_key(state).await?),
        Command::SetKey { key } => {
            commands::set_api_key(state, key).await?;
            println!("Saved to {}", state.settings().path().display());
        }
        Command::OutputDir => println!("{}", commands::get_output_dir(state).await?),
    }
    Ok(())
}
