mod ui;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flipping_bird::build_info;
use flipping_bird::config::GameConfig;
use flipping_bird::game::{GameEvent, GameInput, GameState, Playfield};
use flipping_bird::leaderboard::Leaderboard;
use flipping_bird::store::{default_data_dir, FileStore, KeyValueStore, MemoryStore};
use flipping_bird::FrameDriver;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use ui::menu_scene::ProfileForm;

/// What a key press means for the host loop.
enum KeyAction {
    None,
    Quit,
    Input(GameInput),
}

fn print_help() {
    println!("Flipping Bird - flap through the pipes\n");
    println!("Usage: flipping-bird [options]\n");
    println!("Options:");
    println!("  --ephemeral     Keep profile and scores in memory only");
    println!("  --reset-scores  Clear the saved leaderboard and exit");
    println!("  --version       Show version information");
    println!("  --help          Show this help message");
    println!("\nEnvironment:");
    println!("  FLIPPING_BIRD_DATA_DIR  Where profile, scores and log are kept");
    println!("  FLIPPING_BIRD_FPS       Frame rate (10-240, default 60)");
    println!("  FLIPPING_BIRD_LOG       Log filter (default info)");
}

fn main() -> io::Result<()> {
    let mut config = GameConfig::load_or_default();
    let mut reset_scores = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--ephemeral" => config.ephemeral = true,
            "--reset-scores" => reset_scores = true,
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'flipping-bird --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let data_dir = config
        .data_dir
        .clone()
        .or_else(|| default_data_dir().ok());
    init_logging(&config, data_dir.as_ref());
    tracing::info!("{}", build_info::version_line());

    let mut store = open_store(&config, data_dir);

    if reset_scores {
        match Leaderboard::new().clear(&mut *store) {
            Ok(()) => println!("Leaderboard cleared."),
            Err(e) => {
                eprintln!("Could not clear leaderboard: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let driver = FrameDriver::new(Playfield::default(), store, rand::thread_rng());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, driver, &config);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!("Game loop failed: {}", e);
    }
    result
}

/// Log to a file in the data directory; the terminal belongs to the UI.
fn init_logging(config: &GameConfig, data_dir: Option<&PathBuf>) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let log_file = data_dir.and_then(|dir| {
        std::fs::create_dir_all(dir).ok()?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("flipping-bird.log"))
            .ok()
    });

    match log_file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file))
            .init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .init(),
    }
}

fn open_store(config: &GameConfig, data_dir: Option<PathBuf>) -> Box<dyn KeyValueStore> {
    if config.ephemeral {
        return Box::new(MemoryStore::new());
    }
    let opened = data_dir
        .ok_or(flipping_bird::StoreError::NoDataDir)
        .and_then(|dir| FileStore::open(dir));
    match opened {
        Ok(store) => {
            tracing::info!("Using data directory {}", store.dir().display());
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!("{}; scores will not be saved this session", e);
            Box::new(MemoryStore::new())
        }
    }
}

fn run<B: ratatui::backend::Backend, S: KeyValueStore, R: rand::Rng>(
    terminal: &mut Terminal<B>,
    mut driver: FrameDriver<S, R>,
    config: &GameConfig,
) -> io::Result<()> {
    let mut form = ProfileForm::new(driver.simulation().profile.as_ref());
    let frame_interval = Duration::from_millis(config.frame_interval_ms());
    let started = Instant::now();
    let mut next_frame = Instant::now();

    loop {
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                let snap = driver.snapshot();
                let has_profile = snap.profile.is_some();
                match handle_key(key, snap.state, has_profile, &mut form) {
                    KeyAction::Quit => {
                        tracing::info!(
                            "Quitting ({} inputs dropped this session)",
                            driver.dropped_inputs()
                        );
                        return Ok(());
                    }
                    KeyAction::Input(input) => {
                        driver.push(input);
                    }
                    KeyAction::None => {}
                }
            }
            continue;
        }

        let now_ms = started.elapsed().as_secs_f64() * 1000.0;
        for ev in driver.tick(now_ms) {
            match ev {
                GameEvent::ProfileRequested => form.open(),
                GameEvent::ProfileSaved(profile) => {
                    form.name_input = profile.name;
                    form.color_input = profile.color;
                }
                _ => {}
            }
        }

        terminal.draw(|f| ui::draw_ui(f, &driver.snapshot(), &form))?;

        next_frame += frame_interval;
        let now = Instant::now();
        if next_frame < now {
            next_frame = now + frame_interval;
        }
    }
}

fn handle_key(key: KeyEvent, state: GameState, has_profile: bool, form: &mut ProfileForm) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    match state {
        GameState::Idle if form.editing => match key.code {
            KeyCode::Enter => KeyAction::Input(form.submit()),
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                form.toggle_focus();
                KeyAction::None
            }
            KeyCode::Backspace => {
                form.handle_backspace();
                KeyAction::None
            }
            KeyCode::Char(c) => {
                form.handle_char_input(c);
                KeyAction::None
            }
            KeyCode::Esc if has_profile => {
                form.close();
                KeyAction::None
            }
            KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        },
        GameState::Idle => match key.code {
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => KeyAction::Input(GameInput::Flap),
            KeyCode::Char('e') | KeyCode::Char('E') => {
                form.open();
                KeyAction::None
            }
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Input(GameInput::Restart),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        },
        GameState::Running => match key.code {
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') => KeyAction::Input(GameInput::Flap),
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Input(GameInput::Restart),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        },
        GameState::GameOver => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                KeyAction::Input(GameInput::Restart)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        },
    }
}
