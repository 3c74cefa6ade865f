use quick_folder::app::App;
use quick_folder::command::Command;
use quick_folder::config::Config;
use quick_folder::launcher::RecordingLauncher;
use quick_folder::navigator::TreeNavigator;
use quick_folder::screenshot::{buffer_to_string, render_after};
use quick_folder::tree::{DirLister, PathTree};
use quick_folder::ui;
use ratatui::{backend::TestBackend, style::Color, Terminal};
use std::io;
use std::path::Path;

struct NoDirs;

impl DirLister for NoDirs {
    fn list_subdirs(&self, _path: &Path) -> io::Result<Vec<String>> {
        Ok(Vec::new())
    }
}

fn app(text: &str) -> App {
    let tree = PathTree::parse_with(text, '\\', &NoDirs).unwrap();
    App::new(
        TreeNavigator::new(tree),
        Config::default(),
        Box::new(RecordingLauncher::new()),
    )
}

/// Compare two screenshot strings, ignoring trailing whitespace
fn normalize(s: &str) -> String {
    s.lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Find the cell where `text` starts on screen
fn find_text(buffer: &ratatui::buffer::Buffer, text: &str) -> Option<(u16, u16)> {
    let screen = buffer_to_string(buffer);
    screen.lines().enumerate().find_map(|(y, line)| {
        line.find(text).map(|byte_x| {
            let x = line[..byte_x].chars().count();
            (x as u16, y as u16)
        })
    })
}

#[test]
fn test_root_level_lists_children_in_order() {
    let mut app = app("D:\\Work\nD:\\Games\nC:\\Users\\me");
    let screen = render_after(&mut app, vec![], 40, 10).unwrap();

    assert!(screen.contains("Quick Folder"));
    let c = screen.find("C:\\Users\\me").expect("C row rendered");
    let d = screen.find("D:").expect("D row rendered");
    assert!(c < d);
}

#[test]
fn test_descending_shows_children_and_path_title() {
    let mut app = app("D:\\Work\nD:\\Games\nD:\\Music");
    let screen = render_after(&mut app, vec![Command::EnterSelected], 40, 10).unwrap();

    assert!(screen.contains("Games"));
    assert!(screen.contains("Music"));
    assert!(screen.contains("Work"));
    // title shows the level's full path
    assert!(screen.lines().any(|line| line.trim() == "D:"));
}

#[test]
fn test_popup_is_centered_and_sized_to_content() {
    let mut app = app("aaaa\nbb\nz");
    let backend = TestBackend::new(30, 11);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::draw(frame, &mut app)).unwrap();

    // width 4 + 2*3 padding = 10, height 3 rows + 2*1 padding = 5
    let buffer = terminal.backend().buffer();
    assert_eq!(find_text(buffer, "aaaa"), Some(((30 - 10) / 2 + 3, (11 - 5) / 2 + 1)));
    assert_eq!(find_text(buffer, "bb"), Some((13, 5)));
    assert_eq!(find_text(buffer, "z"), Some((13, 6)));

    // the size got cached on the root
    let root = app.navigator.tree().root();
    let size = app.navigator.tree().node(root).longest_child_size();
    assert_eq!((size.width, size.height), (4, 1));
}

#[test]
fn test_selected_row_color_depends_on_children() {
    let theme = Config::default().theme;

    // middle child "B" has children
    let mut branch = app("A\nB\\x\nB\\y\nC");
    let backend = TestBackend::new(30, 9);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::draw(frame, &mut branch)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let (x, y) = find_text(&buffer, "B").unwrap();
    assert_eq!(buffer[(x, y)].fg, theme.selected_branch);
    let (x, y) = find_text(&buffer, "A").unwrap();
    assert_eq!(buffer[(x, y)].fg, theme.text);

    // middle child "B" is a leaf
    let mut leaf = app("A\nB\nC");
    terminal.draw(|frame| ui::draw(frame, &mut leaf)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let (x, y) = find_text(&buffer, "B").unwrap();
    assert_eq!(buffer[(x, y)].fg, theme.selected_leaf);
    assert_ne!(theme.selected_leaf, Color::Reset);
}

#[test]
fn test_screenshot_is_stable_across_renders() {
    let mut first = app("X\\1\nX\\2\nY");
    let mut second = app("X\\1\nX\\2\nY");

    let commands = Command::parse_list("up,enter,down").unwrap();
    let a = render_after(&mut first, commands.clone(), 30, 8).unwrap();
    let b = render_after(&mut second, commands, 30, 8).unwrap();
    assert_eq!(normalize(&a), normalize(&b));
    assert!(a.contains('1'));
    assert!(a.contains('2'));
}
