use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::fs;
use std::path::Path;

use crate::{app::App, command::Command, error::Result, ui};

/// Run `commands` against the app headlessly and render the popup once
pub fn render_after(app: &mut App, commands: Vec<Command>, width: u16, height: u16) -> Result<String> {
    for command in commands {
        app.execute(command);
    }

    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;
    terminal.draw(|frame| ui::draw(frame, app))?;

    Ok(buffer_to_string(terminal.backend().buffer()))
}

pub fn generate_screenshot(
    app: &mut App,
    commands: Vec<Command>,
    output_path: Option<&Path>,
    width: u16,
    height: u16,
) -> Result<()> {
    let screenshot = render_after(app, commands, width, height)?;

    match output_path {
        Some(path) => {
            fs::write(path, screenshot)?;
            println!("Screenshot saved to: {}", path.display());
        }
        None => {
            print!("{}", screenshot);
        }
    }

    Ok(())
}

pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();

    for y in 0..buffer.area().height {
        for x in 0..buffer.area().width {
            let sym = buffer[(x, y)].symbol();
            // Use a space for empty cells to make output more readable
            if sym.is_empty() {
                result.push(' ');
            } else {
                result.push_str(sym);
            }
        }
        result.push('\n');
    }

    result
}
