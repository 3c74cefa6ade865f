use clap::Parser;
use crossterm::{
    event::{PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, process::ExitCode};

use quick_folder::app::App;
use quick_folder::cli::{Cli, Commands};
use quick_folder::command::Command;
use quick_folder::config::Config;
use quick_folder::error::{QuickFolderError, Result};
use quick_folder::launcher::{RecordingLauncher, SystemLauncher};
use quick_folder::navigator::TreeNavigator;
use quick_folder::tree::PathTree;
use quick_folder::{event, screenshot, ui};

fn main() -> ExitCode {
    // Initialize logger only if QUICK_FOLDER_LOG environment variable is set
    if let Ok(log_file) = std::env::var("QUICK_FOLDER_LOG") {
        match std::fs::OpenOptions::new().create(true).append(true).open(&log_file) {
            Ok(file) => {
                env_logger::Builder::new()
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .filter_level(log::LevelFilter::Debug)
                    .init();
                log::info!("Quick Folder starting up");
            }
            Err(e) => eprintln!("Cannot open log file {}: {}", log_file, e),
        }
    }

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.style.as_deref())?;
    let tree = PathTree::load_file(&cli.config, cli.separator())?;
    let stats = tree.stats();
    log::info!(
        "Folder tree: {} nodes, {} leaves, depth {}",
        stats.nodes,
        stats.leaves,
        stats.max_depth
    );

    match cli.command.unwrap_or(Commands::Run { print: false }) {
        Commands::Run { print: false } => {
            let mut app = App::new(TreeNavigator::new(tree), config, Box::new(SystemLauncher));
            run_interactive(&mut app)
        }
        Commands::Run { print: true } => {
            let launcher = RecordingLauncher::new();
            let mut app = App::new(TreeNavigator::new(tree), config, Box::new(launcher.clone()));
            run_interactive(&mut app)?;
            if let Some(path) = launcher.opened().last() {
                println!("{}", path);
            }
            Ok(())
        }
        Commands::Screenshot {
            keys,
            output,
            width,
            height,
        } => {
            let commands = Command::parse_list(&keys).map_err(QuickFolderError::Command)?;
            let launcher = RecordingLauncher::new();
            let mut app = App::new(TreeNavigator::new(tree), config, Box::new(launcher));
            screenshot::generate_screenshot(&mut app, commands, output.as_deref(), width, height)
        }
        Commands::Tree => {
            println!("{}", serde_json::to_string_pretty(&tree)?);
            Ok(())
        }
    }
}

fn run_interactive(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let enhanced = push_keyboard_enhancement(&mut stdout);
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    // Restore terminal
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Ask the terminal to report key repeats and modified keys. Returns whether
/// the flags were pushed and must be popped on exit.
fn push_keyboard_enhancement(stdout: &mut io::Stdout) -> bool {
    match supports_keyboard_enhancement() {
        Ok(true) => {
            let flags = event::keyboard_enhancement_flags();
            match execute!(stdout, PushKeyboardEnhancementFlags(flags)) {
                Ok(()) => {
                    log::debug!("Enabled keyboard enhancement flags: {:?}", flags);
                    true
                }
                Err(e) => {
                    log::warn!("Failed to enable keyboard enhancement: {}", e);
                    false
                }
            }
        }
        Ok(false) => {
            log::info!("Terminal has no keyboard enhancement; auto-repeat arrives as presses");
            false
        }
        Err(e) => {
            log::warn!("Cannot query keyboard enhancement support: {}", e);
            false
        }
    }
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let mut redraw = true;
    loop {
        if app.needs_resize {
            terminal.clear()?;
            redraw = true;
        }
        if redraw {
            terminal.draw(|f| ui::draw(f, app))?;
        }

        // Input is the only thing that changes the popup, so block on it
        let event = crossterm::event::read()?;
        redraw = event::handle_event(event, app);

        if app.should_quit {
            return Ok(());
        }
    }
}
