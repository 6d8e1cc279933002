use crate::output::Row;
use crate::tui::app::{App, LoadState, Mode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query input
            Constraint::Min(5),    // Results
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_query_input(f, app, chunks[0]);
    draw_results(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);

    if app.mode == Mode::Help {
        draw_help(f, f.area());
    }
}

fn draw_query_input(f: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(app.query.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Query (Enter: run now, ?: help, Esc: quit) "),
        );

    f.render_widget(input, area);

    if app.mode == Mode::Search {
        let width = app.query.chars().count() as u16;
        f.set_cursor_position((area.x + width + 1, area.y + 1));
    }
}

fn draw_results(f: &mut Frame, app: &App, area: Rect) {
    let rows = app.rows();
    let header_style = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);
    let reference_style = Style::default().fg(Color::Green);

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| match row {
            Row::Header(label) => ListItem::new(Line::from(Span::styled(label.clone(), header_style))),
            Row::Verse { reference, passage } => ListItem::new(Line::from(vec![
                Span::styled(format!("{:>7}", reference), reference_style),
                Span::raw("  "),
                Span::raw(passage.text.as_str()),
            ])),
        })
        .collect();

    let title = if app.is_loading() {
        " Results (loading) ".to_string()
    } else {
        format!(" Results ({}) ", app.results.len())
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(app.selected_row(&rows));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let color = match app.load_state {
        LoadState::Failed => Color::Red,
        _ => Color::Cyan,
    };
    let status = Paragraph::new(app.status_message.as_str()).style(Style::default().fg(color));

    f.render_widget(status, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("Query syntax", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  joh 3:16          book prefix, chapter and verse"),
        Line::from("  ps 23:1-4,6       verse ranges and lists"),
        Line::from("  gen 1 \"valo\"      chapter filtered by text"),
        Line::from("  \"armo\"            text anywhere"),
        Line::from("  gen 1; joh 1      several clauses"),
        Line::from(""),
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Up/Down, Tab      move selection"),
        Line::from("  PgUp/PgDn         move by ten verses"),
        Line::from("  Ctrl+w            delete word"),
        Line::from("  Enter             run query now"),
        Line::from("  Esc               clear query, or quit when empty"),
        Line::from("  Ctrl+c            quit"),
    ];

    let width = area.width.min(60);
    let height = area.height.min(lines.len() as u16 + 2);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let help = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(help, popup);
}
