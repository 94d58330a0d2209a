use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use super::state::MenuState;

const HEADER_COLOR: Color = Color::Indexed(205);
const SELECTED_COLOR: Color = Color::Indexed(170);
const STATUS_COLOR: Color = Color::Indexed(241);

/// Renders the whole menu
pub fn render(frame: &mut Frame, state: &MenuState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Series list
            Constraint::Length(2), // Key help
            Constraint::Length(2), // Status
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_series(frame, chunks[1], state);
    render_help(frame, chunks[2], state);
    render_status(frame, chunks[3], state);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::styled(
            "RSS Feed Generator",
            Style::default()
                .fg(HEADER_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw("Select a series to generate RSS feed:"),
    ]);
    frame.render_widget(header, area);
}

fn render_series(frame: &mut Frame, area: Rect, state: &MenuState) {
    let selected = Style::default()
        .fg(SELECTED_COLOR)
        .add_modifier(Modifier::BOLD);

    let lines: Vec<Line> = state
        .labels()
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            if i == state.cursor {
                Line::styled(format!("> {label}"), selected)
            } else {
                Line::raw(format!("  {label}"))
            }
        })
        .collect();

    // Keep the cursor visible on short terminals
    let scroll = state
        .cursor
        .saturating_sub(area.height.saturating_sub(1) as usize);
    let list = Paragraph::new(lines).scroll((scroll as u16, 0));
    frame.render_widget(list, area);
}

/// Key help line; the upload key is listed only when uploading is possible
pub fn help_text(state: &MenuState) -> String {
    let upload = if state.upload_enabled {
        " • u: upload to S3"
    } else {
        ""
    };
    format!(
        "j/k: navigate • enter/space: generate feed{upload} • d: show latest episode • c: copy URL • q: quit"
    )
}

fn render_help(frame: &mut Frame, area: Rect, state: &MenuState) {
    let help = Paragraph::new(Line::styled(
        help_text(state),
        Style::default().fg(STATUS_COLOR),
    ));
    frame.render_widget(help, area);
}

fn render_status(frame: &mut Frame, area: Rect, state: &MenuState) {
    let text = if state.busy {
        "Working..."
    } else {
        state.status.as_deref().unwrap_or("")
    };

    let status = Paragraph::new(Line::styled(text, Style::default().fg(STATUS_COLOR)));
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::{Terminal, backend::TestBackend};

    use crate::config::SeriesEntry;

    fn state(upload_enabled: bool) -> MenuState {
        MenuState::new(
            vec![
                SeriesEntry {
                    guid: "a".to_string(),
                    s3_path: "s3://bucket/feeds/first.rss".to_string(),
                },
                SeriesEntry {
                    guid: "b".to_string(),
                    s3_path: "s3://bucket/feeds/second.rss".to_string(),
                },
            ],
            upload_enabled,
        )
    }

    fn rendered(state: &MenuState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 12)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let mut text = String::new();
        for (i, cell) in buffer.content.iter().enumerate() {
            text.push_str(cell.symbol());
            if (i + 1) % width == 0 {
                text.push('\n');
            }
        }
        text
    }

    #[test]
    fn help_mentions_upload_only_when_enabled() {
        assert!(help_text(&state(true)).contains("u: upload to S3"));
        assert!(!help_text(&state(false)).contains("upload"));
    }

    #[test]
    fn renders_cursor_on_selected_series() {
        let mut state = state(true);
        state.select_next();

        let screen = rendered(&state);

        assert!(screen.contains("RSS Feed Generator"));
        assert!(screen.contains("  first.rss"));
        assert!(screen.contains("> second.rss"));
    }

    #[test]
    fn renders_working_indicator_while_busy() {
        let mut state = state(true);
        state.set_status("old status");
        state.begin_action();

        let screen = rendered(&state);
        assert!(screen.contains("Working..."));
        assert!(!screen.contains("old status"));

        state.finish_action("Latest episode date: Mar 15, 2024");
        let screen = rendered(&state);
        assert!(screen.contains("Latest episode date: Mar 15, 2024"));
    }
}
