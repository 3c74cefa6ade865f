use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

use crate::app::App;
use crate::config::Config;
use crate::navigator::MenuView;
use crate::tree::ChildExtent;

pub fn draw(frame: &mut Frame, app: &mut App) {
    measure_current_level(app);
    app.needs_resize = false;

    let view = app.navigator.menu_view();
    let area = frame.area();
    let popup = popup_area(area, &view, &app.config);

    draw_menu(frame, app, &view, popup);

    if let Some(message) = &app.status_message {
        draw_status(frame, app, message, area);
    }
}

/// Measure the widest child of the shown level once and cache it in the tree.
/// Widths are in terminal cells, so double-width names count twice.
pub fn measure_current_level(app: &mut App) {
    let current = app.navigator.current_node();
    let tree = app.navigator.tree();
    if tree.node(current).longest_child_size().is_measured() {
        return;
    }

    let width = tree
        .children(current)
        .iter()
        .map(|&child| Line::from(tree.name(child)).width())
        .max()
        .unwrap_or(0);
    let size = ChildExtent {
        width: u16::try_from(width).unwrap_or(u16::MAX).max(1),
        height: app.config.row_height(),
    };
    log::debug!("Measured level {:?}: {:?}", tree.name(current), size);
    app.navigator.tree_mut().set_longest_child_size(current, size);
}

/// Centered popup sized to fit the shown level, clamped to `area`
pub fn popup_area(area: Rect, view: &MenuView, config: &Config) -> Rect {
    let style = &config.style;
    let rows = u16::try_from(view.items.len()).unwrap_or(u16::MAX);

    let width = view
        .longest_child_size
        .width
        .saturating_add(style.padding_horizontal.saturating_mul(2));
    let height = view
        .longest_child_size
        .height
        .saturating_mul(rows)
        .saturating_sub(style.gap)
        .saturating_add(style.padding_vertical.saturating_mul(2));

    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_menu(frame: &mut Frame, app: &App, view: &MenuView, popup: Rect) {
    let config = &app.config;
    let theme = &config.theme;

    let title = if view.title.is_empty() {
        config.title.clone()
    } else {
        view.title.clone()
    };

    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(theme.title)))
        .padding(Padding::new(
            config.style.padding_horizontal,
            config.style.padding_horizontal,
            config.style.padding_vertical,
            config.style.padding_vertical,
        ))
        .style(Style::default().bg(theme.background));

    let items: Vec<ListItem> = view
        .items
        .iter()
        .map(|item| {
            let style = if item.is_selected {
                Style::default()
                    .fg(theme.selected(item.has_children))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };

            let mut text = Text::from(Line::from(Span::styled(item.name.clone(), style)));
            for _ in 0..config.style.gap {
                text.lines.push(Line::default());
            }
            ListItem::new(text)
        })
        .collect();

    let list = List::new(items).block(block);
    let mut list_state = ListState::default();
    list_state.select(Some(view.selected_index));

    frame.render_widget(Clear, popup);
    frame.render_stateful_widget(list, popup, &mut list_state);
}

fn draw_status(frame: &mut Frame, app: &App, message: &str, area: Rect) {
    if area.height == 0 {
        return;
    }
    let line = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    let paragraph =
        Paragraph::new(message.to_string()).style(Style::default().fg(app.config.theme.status_error));
    frame.render_widget(Clear, line);
    frame.render_widget(paragraph, line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::TreeNavigator;
    use crate::tree::PathTree;

    fn view(rows: usize, width: u16, height: u16) -> MenuView {
        let mut tree = PathTree::with_separator('/');
        let root = tree.root();
        for i in 0..rows {
            tree.add_child(root, &format!("row{:02}", i));
        }
        let mut view = TreeNavigator::new(tree).menu_view();
        view.longest_child_size = ChildExtent { width, height };
        view
    }

    #[test]
    fn test_popup_fits_longest_child_and_rows() {
        let config = Config::default();
        let area = Rect::new(0, 0, 80, 24);
        let popup = popup_area(area, &view(3, 10, 1), &config);

        assert_eq!(popup.width, 10 + 2 * 3);
        assert_eq!(popup.height, 3 + 2 * 1);
        assert_eq!(popup.x, (80 - 16) / 2);
        assert_eq!(popup.y, (24 - 5) / 2);
    }

    #[test]
    fn test_popup_subtracts_trailing_gap() {
        let mut config = Config::default();
        config.style.gap = 1;
        let popup = popup_area(Rect::new(0, 0, 80, 24), &view(3, 10, 2), &config);
        assert_eq!(popup.height, 3 * 2 - 1 + 2);
    }

    #[test]
    fn test_popup_is_clamped_to_area() {
        let config = Config::default();
        let area = Rect::new(0, 0, 20, 5);
        let popup = popup_area(area, &view(40, 200, 1), &config);
        assert_eq!(popup, area);
    }

    #[test]
    fn test_measure_uses_cell_width_not_character_count() {
        use crate::launcher::RecordingLauncher;

        let mut tree = PathTree::with_separator('/');
        let root = tree.root();
        // "abcd" has the most characters, "日本語" takes the most cells
        tree.add_child(root, "abcd");
        tree.add_child(root, "日本語");
        assert_eq!(tree.node(root).longest_child_name(), "abcd");

        let mut app = App::new(
            TreeNavigator::new(tree),
            Config::default(),
            Box::new(RecordingLauncher::new()),
        );
        measure_current_level(&mut app);

        let size = app.navigator.tree().node(root).longest_child_size();
        assert_eq!(size.width, 6);
        assert_eq!(size.height, app.config.row_height());
    }
}
