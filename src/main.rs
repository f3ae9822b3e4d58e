mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::{Duration, Instant},
};

use multitap::config::{Config, ConfigStore, FileConfigStore};
use multitap::keymap::Keymap;
use multitap::runtime::{CrosstermEvents, Event, FixedTicker, Runner};
use multitap::session::{Key, Session};
use multitap::words::WordList;
use multitap::TICK_RATE_MS;

/// retro multi-tap phone keypad typing challenge
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A retro typing challenge that emulates multi-tap (T9-style) phone keypad text entry: cycle letters with repeated digit presses, beat the clock, and get scored on speed and accuracy."
)]
pub struct Cli {
    /// number of target words per round
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// word list to draw target words from
    #[clap(short = 'l', long, value_enum)]
    word_list: Option<SupportedWordList>,

    /// explicit target words, space separated (bypasses sampling)
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// max interval between presses of the same key that still cycles its letters, in milliseconds
    #[clap(long)]
    cycle_window_ms: Option<u64>,

    /// inactivity delay after which a pending letter is committed, in milliseconds
    #[clap(long)]
    auto_confirm_ms: Option<u64>,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum SupportedWordList {
    Classic,
    Common,
}

impl SupportedWordList {
    fn as_list(&self) -> WordList {
        WordList::new(self.to_string().to_lowercase())
    }
}

/// Stored config overridden by whichever flags were given on the command line
fn effective_config(cli: &Cli, mut cfg: Config) -> Config {
    if let Some(words) = cli.number_of_words {
        cfg.number_of_words = words;
    }
    if let Some(list) = cli.word_list {
        cfg.word_list = list.to_string().to_lowercase();
    }
    if let Some(ms) = cli.cycle_window_ms {
        cfg.cycle_window_ms = ms;
    }
    if let Some(ms) = cli.auto_confirm_ms {
        cfg.auto_confirm_ms = ms;
    }
    cfg
}

fn build_targets(prompt: &Option<String>, config: &Config) -> Vec<String> {
    if let Some(prompt) = prompt {
        return prompt
            .split_whitespace()
            .map(|word| word.to_uppercase())
            .collect();
    }
    WordList::new(config.word_list.clone()).draw(config.number_of_words)
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Typing,
    Results,
}

#[derive(Debug)]
pub struct App {
    pub cli: Option<Cli>,
    pub keymap: Keymap,
    pub session: Session,
    pub config: Config,
    pub state: AppState,
}

impl App {
    pub fn new(cli: Cli, config: Config) -> Self {
        let keymap = Keymap::default();
        let targets = build_targets(&cli.prompt, &config);

        Self {
            cli: Some(cli),
            keymap,
            session: Session::new(targets, keymap, config.timing()),
            config,
            state: AppState::Typing,
        }
    }

    /// Replace the session wholesale: the same words again, or a fresh draw.
    /// Nothing carries over from the previous play-through.
    pub fn reset(&mut self, repeat_targets: Option<Vec<String>>) {
        let targets = match repeat_targets {
            Some(targets) => targets,
            None => {
                let prompt = self.cli.as_ref().and_then(|cli| cli.prompt.clone());
                build_targets(&prompt, &self.config)
            }
        };

        self.session = Session::new(targets, self.keymap, self.config.timing());
        self.state = AppState::Typing;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = effective_config(&cli, store.load());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(cli, config);
    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

#[derive(Debug)]
enum ExitType {
    Restart,
    New,
    Quit,
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEvents::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let clock = Instant::now();

    loop {
        let mut exit_type = ExitType::Quit;
        terminal.draw(|f| ui(app, f))?;

        loop {
            let now_ms = clock.elapsed().as_millis() as u64;

            match runner.step() {
                Event::Tick => {
                    if app.state == AppState::Typing && app.session.has_started() {
                        app.session.on_tick(now_ms);
                        terminal.draw(|f| ui(app, f))?;
                    }
                }
                Event::Resize => {
                    terminal.draw(|f| ui(app, f))?;
                }
                Event::Key(key) => {
                    match key.code {
                        KeyCode::Esc => {
                            break;
                        }
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break;
                        }
                        KeyCode::Left => {
                            exit_type = ExitType::Restart;
                            break;
                        }
                        KeyCode::Right => {
                            exit_type = ExitType::New;
                            break;
                        }
                        KeyCode::Backspace => {
                            if app.state == AppState::Typing {
                                app.session.key(Key::Clear, now_ms);
                            }
                        }
                        KeyCode::Enter => {
                            if app.state == AppState::Typing {
                                app.session.key(Key::Confirm, now_ms);
                                if app.session.is_finished() {
                                    app.state = AppState::Results;
                                }
                            }
                        }
                        KeyCode::Char(c) => match app.state {
                            AppState::Typing => {
                                if c.is_ascii_digit() {
                                    app.session.key(Key::Pad(c), now_ms);
                                }
                            }
                            AppState::Results => match c {
                                'r' => {
                                    exit_type = ExitType::Restart;
                                    break;
                                }
                                'n' => {
                                    exit_type = ExitType::New;
                                    break;
                                }
                                _ => {}
                            },
                        },
                        _ => {}
                    }
                    terminal.draw(|f| ui(app, f))?;
                }
            }
        }

        match exit_type {
            ExitType::Restart => {
                app.reset(Some(app.session.targets().to_vec()));
            }
            ExitType::New => {
                app.reset(None);
            }
            ExitType::Quit => {
                break;
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
