use crate::command::Command;
use crate::config::Config;
use crate::launcher::Launcher;
use crate::navigator::TreeNavigator;
use std::time::{Duration, Instant};

pub struct App {
    pub navigator: TreeNavigator,
    pub config: Config,
    pub should_quit: bool,
    /// Set when the shown level changed and the popup must be refit
    pub needs_resize: bool,
    pub status_message: Option<String>,
    launcher: Box<dyn Launcher>,
    last_repeat: Option<Instant>,
}

impl App {
    pub fn new(navigator: TreeNavigator, config: Config, launcher: Box<dyn Launcher>) -> Self {
        Self {
            navigator,
            config,
            should_quit: false,
            needs_resize: true,
            status_message: None,
            launcher,
            last_repeat: None,
        }
    }

    /// Execute a command. Returns true when the popup must be redrawn.
    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::SelectionUp => {
                self.navigator.selection_up();
                true
            }
            Command::SelectionDown => {
                self.navigator.selection_down();
                true
            }
            Command::EnterSelected => {
                if self.navigator.enter_selected() {
                    self.needs_resize = true;
                }
                true
            }
            Command::EnterParent => {
                if self.navigator.enter_parent() {
                    self.needs_resize = true;
                }
                true
            }
            Command::OpenSelected { keep_open } => match self.navigator.selected_path() {
                Some(path) => self.open(&path, keep_open),
                None => false,
            },
            Command::OpenCurrent { keep_open } => {
                let path = self.navigator.current_path();
                if path.is_empty() {
                    log::debug!("Nothing to open at the top level");
                    return false;
                }
                self.open(&path, keep_open)
            }
            Command::Quit => {
                self.should_quit = true;
                false
            }
            Command::Sequence(commands) => commands
                .into_iter()
                .fold(false, |redraw, command| self.execute(command) | redraw),
        }
    }

    /// Decide whether an auto-repeated key should be handled, dropping
    /// repeats that arrive faster than the configured throttle.
    pub fn accept_repeat(&mut self, now: Instant) -> bool {
        let throttle = Duration::from_millis(self.config.repeat_throttle_ms);
        if let Some(last) = self.last_repeat {
            if now.saturating_duration_since(last) < throttle {
                return false;
            }
        }
        self.last_repeat = Some(now);
        true
    }

    fn open(&mut self, path: &str, keep_open: bool) -> bool {
        match self.launcher.open(path) {
            Ok(()) => {
                self.status_message = None;
                if !keep_open {
                    self.should_quit = true;
                }
                false
            }
            Err(e) => {
                log::error!("Failed to open {:?}: {}", path, e);
                self.status_message = Some(format!("Failed to open {}: {}", path, e));
                true
            }
        }
    }
}
