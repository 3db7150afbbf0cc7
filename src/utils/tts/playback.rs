//! Playback of generated files through the platform's command-line player.

use std::ffi::OsString;
use std::path::Path;

use log::{error, info, warn};
use tokio::process::Command;

use crate::utils::tts::types::{Result, TtsError};

/// Desktop platform families with distinct player commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    /// Player commands to try, in order, for this platform.
    pub fn player_commands(self) -> Vec<PlayerCommand> {
        match self {
            Platform::MacOS => vec![PlayerCommand::new("afplay", &[])],
            // `start` is a cmd builtin; the empty string is the window title.
            Platform::Windows => vec![PlayerCommand::new("cmd", &["/C", "start", ""])],
            Platform::Other => vec![
                PlayerCommand::new("aplay", &[]),
                PlayerCommand::new("paplay", &[]),
            ],
        }
    }
}

/// Command template: the audio path is appended after `args`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl PlayerCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn command_line(&self, path: &Path) -> Vec<OsString> {
        let mut line: Vec<OsString> = Vec::with_capacity(self.args.len() + 2);
        line.push(self.program.clone().into());
        line.extend(self.args.iter().map(OsString::from));
        line.push(path.as_os_str().to_owned());
        line
    }

    async fn run(&self, path: &Path) -> std::result::Result<(), String> {
        let program = which::which(&self.program).map_err(|e| format!("{}: {}", self.program, e))?;

        let status = Command::new(program)
            .args(&self.args)
            .arg(path)
            .status()
            .await
            .map_err(|e| format!("failed to start {}: {}", self.program, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(format!("{} exited with {}", self.program, status))
        }
    }
}

pub struct AudioPlayer {
    commands: Vec<PlayerCommand>,
}

impl AudioPlayer {
    pub fn new() -> Self {
        Self::for_platform(Platform::current())
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self::with_commands(platform.player_commands())
    }

    pub fn with_commands(commands: Vec<PlayerCommand>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[PlayerCommand] {
        &self.commands
    }

    /// Plays `path` and resolves when the player exits.
    ///
    /// Candidates are tried in order; the first one that exits successfully
    /// wins. If all fail, the last failure is returned.
    pub async fn play(&self, path: &Path) -> Result<()> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(TtsError::FileNotFound(path.to_path_buf()));
        }

        let mut last_error = String::from("no player command configured");
        for command in &self.commands {
            info!("Playing audio: {:?}", command.command_line(path));
            match command.run(path).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    warn!("Player {} failed: {}", command.program, e);
                    last_error = e;
                }
            }
        }

        error!("Play error: {}", last_error);
        Err(TtsError::Playback(last_error))
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}
