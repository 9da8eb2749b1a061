use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

/// Named sound cues played after a verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Cue {
    Success,
    Failure,
}

/// Voice settings handed to the announcer with every word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechSettings {
    pub locale: String,
    /// Relative speaking rate, 1.0 being the engine's normal speed
    pub rate: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            rate: 0.8,
        }
    }
}

impl SpeechSettings {
    /// espeak takes words per minute and a lowercase voice name
    pub fn espeak_args(&self, word: &str) -> Vec<String> {
        let wpm = (ESPEAK_BASE_WPM * self.rate).round().max(80.0) as u32;
        vec![
            "-v".to_string(),
            self.locale.to_lowercase(),
            "-s".to_string(),
            wpm.to_string(),
            word.to_string(),
        ]
    }
}

const ESPEAK_BASE_WPM: f32 = 175.0;

/// Speaks a word. Implementations must not block and must not fail loudly.
pub trait Announcer: Send {
    fn announce(&mut self, word: &str, settings: &SpeechSettings);
}

/// Plays a feedback cue. Same fire-and-forget contract as [`Announcer`].
pub trait FeedbackPlayer: Send {
    fn play(&mut self, cue: Cue);
}

/// Spawns a child process and reaps it on a background thread so the game
/// loop never waits on it.
fn spawn_detached(program: &str, args: &[String]) -> io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    std::thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}

/// Text-to-speech through an external program (espeak-compatible CLI)
#[derive(Debug, Clone)]
pub struct CommandAnnouncer {
    program: String,
    available: bool,
}

impl CommandAnnouncer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            available: true,
        }
    }
}

impl Default for CommandAnnouncer {
    fn default() -> Self {
        Self::new("espeak")
    }
}

impl Announcer for CommandAnnouncer {
    fn announce(&mut self, word: &str, settings: &SpeechSettings) {
        if !self.available {
            return;
        }

        match spawn_detached(&self.program, &settings.espeak_args(word)) {
            Ok(()) => tracing::debug!(word, program = %self.program, "announced word"),
            Err(err) => {
                // One failed spawn means the program is missing; stay quiet from now on.
                tracing::warn!(program = %self.program, %err, "speech unavailable, muting");
                self.available = false;
            }
        }
    }
}

/// Announcer used with `--mute`
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAnnouncer;

impl Announcer for SilentAnnouncer {
    fn announce(&mut self, _word: &str, _settings: &SpeechSettings) {}
}

/// Sound assets for each cue, played by an external audio program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundAssets {
    pub program: String,
    pub success: PathBuf,
    pub failure: PathBuf,
}

#[derive(Debug, Clone)]
pub struct CommandSoundPlayer {
    assets: SoundAssets,
    available: bool,
}

impl CommandSoundPlayer {
    pub fn new(assets: SoundAssets) -> Self {
        Self {
            assets,
            available: true,
        }
    }

    fn asset_for(&self, cue: Cue) -> &PathBuf {
        match cue {
            Cue::Success => &self.assets.success,
            Cue::Failure => &self.assets.failure,
        }
    }
}

impl FeedbackPlayer for CommandSoundPlayer {
    fn play(&mut self, cue: Cue) {
        if !self.available {
            return;
        }

        let asset = self.asset_for(cue).display().to_string();
        if let Err(err) = spawn_detached(&self.assets.program, &[asset]) {
            tracing::warn!(program = %self.assets.program, %err, "sound unavailable, muting");
            self.available = false;
        }
    }
}

/// Rings the terminal bell on a wrong answer; used when no sound assets are configured
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl FeedbackPlayer for TerminalBell {
    fn play(&mut self, cue: Cue) {
        if cue == Cue::Failure {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(b"\x07").and_then(|_| stdout.flush());
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPlayer;

impl FeedbackPlayer for SilentPlayer {
    fn play(&mut self, _cue: Cue) {}
}

/// Everything a collaborator was asked to do, in call order
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Announced(String, SpeechSettings),
    Played(Cue),
}

/// Test double that records calls into a shared log, usable as both an
/// [`Announcer`] and a [`FeedbackPlayer`]
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    log: Arc<Mutex<Vec<Recorded>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn announced(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Recorded::Announced(word, _) => Some(word),
                Recorded::Played(_) => None,
            })
            .collect()
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Recorded::Played(cue) => Some(cue),
                Recorded::Announced(..) => None,
            })
            .collect()
    }

    fn push(&self, call: Recorded) {
        if let Ok(mut log) = self.log.lock() {
            log.push(call);
        }
    }
}

impl Announcer for Recorder {
    fn announce(&mut self, word: &str, settings: &SpeechSettings) {
        self.push(Recorded::Announced(word.to_string(), settings.clone()));
    }
}

impl FeedbackPlayer for Recorder {
    fn play(&mut self, cue: Cue) {
        self.push(Recorded::Played(cue));
    }
}
