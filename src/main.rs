use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use spelltiles::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    controller::GameController,
    feedback::{
        Announcer, CommandAnnouncer, CommandSoundPlayer, FeedbackPlayer, SilentAnnouncer,
        SilentPlayer, TerminalBell,
    },
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    selection::NoRepeatPolicy,
    ui::screen::draw,
    words::WordList,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};
use tracing::info;

/// hear a word, drag the letter tiles into place
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal spelling game. Each round a word is spoken aloud; rebuild it by dragging letter tiles into the slots (or typing), then verify. Correct answers score and move on to the next word."
)]
pub struct Cli {
    /// comma-separated words to practice, replacing the configured list
    #[clap(short = 'w', long)]
    words: Option<String>,

    /// which words may come up again
    #[clap(short = 'p', long, value_enum)]
    policy: Option<NoRepeatPolicy>,

    /// speech locale, e.g. en-US
    #[clap(long)]
    locale: Option<String>,

    /// speech rate, 1.0 being normal speed
    #[clap(long)]
    rate: Option<f32>,

    /// pause after a correct answer before the next word, in milliseconds
    #[clap(long)]
    auto_advance_ms: Option<u64>,

    /// do not speak the words
    #[clap(long)]
    mute: bool,

    /// no sound effects
    #[clap(long)]
    silent: bool,

    /// config file to read instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Command line flags win over the config file
    fn apply_to(&self, cfg: &mut Config) {
        if let Some(words) = &self.words {
            cfg.words = WordList::parse(words).words().to_vec();
        }
        if let Some(policy) = self.policy {
            cfg.policy = policy;
        }
        if let Some(locale) = &self.locale {
            cfg.speech.locale = locale.clone();
        }
        if let Some(rate) = self.rate {
            cfg.speech.rate = rate;
        }
        if let Some(ms) = self.auto_advance_ms {
            cfg.auto_advance_ms = ms;
        }
        if self.mute {
            cfg.speech_enabled = false;
        }
        if self.silent {
            cfg.sound_enabled = false;
        }
    }

    fn config_store(&self) -> FileConfigStore {
        self.config
            .as_ref()
            .map(FileConfigStore::with_path)
            .unwrap_or_default()
    }
}

fn build_controller(cfg: &Config) -> GameController {
    let announcer: Box<dyn Announcer> = if cfg.speech_enabled {
        Box::new(CommandAnnouncer::new(cfg.speech_program.clone()))
    } else {
        Box::new(SilentAnnouncer)
    };

    let player: Box<dyn FeedbackPlayer> = match (&cfg.sound, cfg.sound_enabled) {
        (_, false) => Box::new(SilentPlayer),
        (Some(assets), true) => Box::new(CommandSoundPlayer::new(assets.clone())),
        (None, true) => Box::new(TerminalBell),
    };

    GameController::new(cfg.word_list(), cfg.game_settings(), announcer, player)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        if let Err(err) = logging::init_tracing(&path) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = cli.config_store();
    let mut cfg = store.load();
    cli.apply_to(&mut cfg);
    if cli.save_config {
        store.save(&cfg)?;
        info!(path = %store.path().display(), "config saved");
    }
    info!(
        words = cfg.words.len(),
        policy = %cfg.policy,
        speech = cfg.speech_enabled,
        "starting"
    );

    let mut app = App::new(build_controller(&cfg));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!(score = app.game.session().score(), "exiting");
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| draw(app, f))?;

    while !app.should_quit {
        let event = runner.step();
        if app.handle_event(event, Instant::now()) {
            terminal.draw(|f| draw(app, f))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "spelltiles",
            "--words",
            "ant, bee,,",
            "--policy",
            "no-repeat-until-exhausted",
            "--rate",
            "1.2",
            "--auto-advance-ms",
            "500",
            "--mute",
        ])
        .unwrap();

        let mut cfg = Config::default();
        cli.apply_to(&mut cfg);
        assert_eq!(cfg.words, vec!["ant", "bee"]);
        assert_eq!(cfg.policy, NoRepeatPolicy::NoRepeatUntilExhausted);
        assert_eq!(cfg.speech.rate, 1.2);
        assert_eq!(cfg.speech.locale, "en-US");
        assert_eq!(cfg.auto_advance_ms, 500);
        assert!(!cfg.speech_enabled);
        assert!(cfg.sound_enabled);
    }

    #[test]
    fn no_flags_keep_config() {
        let cli = Cli::try_parse_from(["spelltiles"]).unwrap();
        let mut cfg = Config::default();
        cli.apply_to(&mut cfg);
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(Cli::try_parse_from(["spelltiles", "--policy", "sometimes"]).is_err());
    }

    #[test]
    fn controller_uses_configured_words() {
        let cfg = Config {
            words: vec!["owl".into()],
            speech_enabled: false,
            sound_enabled: false,
            ..Config::default()
        };
        let mut game = build_controller(&cfg);
        game.start_round();
        assert_eq!(game.session().current_word(), Some("OWL"));
    }
}
