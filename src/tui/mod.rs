mod app;
mod ui;

use crate::codec::Translation;
use crate::output::HeaderLocale;
use crate::query::FilterOptions;
use crate::source::PassageSource;
use crate::store::PassageStore;
use crate::worker;
use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Settings for an interactive session
pub struct TuiOptions {
    pub translation: Translation,
    pub initial_query: String,
    pub locale: HeaderLocale,
    pub debounce: Duration,
    pub filter: FilterOptions,
}

pub fn run<S, R>(store: S, source: R, options: TuiOptions) -> Result<()>
where
    S: PassageStore + Send + 'static,
    R: PassageSource + Send + 'static,
{
    // Start loading before the terminal is set up
    let handle = worker::spawn_with(
        store,
        source,
        options.translation,
        options.initial_query.clone(),
        options.filter,
    );
    let mut app = App::new(handle, options.initial_query, options.locale, options.debounce);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.poll_worker();
        app.tick();

        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(app.poll_timeout(Duration::from_millis(100)))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Only handle key press events, not release or repeat
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(()),
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => return Ok(()),
            _ => {}
        }

        if app.mode == app::Mode::Help {
            // Any key closes help
            app.hide_help();
            continue;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('j'))
            | (KeyModifiers::CONTROL, KeyCode::Char('n')) => app.select_next(),
            (KeyModifiers::CONTROL, KeyCode::Char('k'))
            | (KeyModifiers::CONTROL, KeyCode::Char('p')) => app.select_prev(),
            (KeyModifiers::CONTROL, KeyCode::Char('d')) => app.select_page_down(),
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.select_page_up(),
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.delete_word(),
            (KeyModifiers::CONTROL, KeyCode::Char('h')) => app.pop_char(),
            (KeyModifiers::CONTROL, KeyCode::Char('a')) => app.select_first(),
            (KeyModifiers::CONTROL, KeyCode::Char('e')) => app.select_last(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
                KeyCode::Esc => {
                    if app.query.is_empty() {
                        return Ok(());
                    }
                    app.clear_query();
                }
                KeyCode::Enter => app.execute_now(),
                KeyCode::Down | KeyCode::Tab => app.select_next(),
                KeyCode::Up | KeyCode::BackTab => app.select_prev(),
                KeyCode::PageDown => app.select_page_down(),
                KeyCode::PageUp => app.select_page_up(),
                KeyCode::Char('?') | KeyCode::F(1) => app.show_help(),
                KeyCode::Char(c) => app.push_char(c),
                KeyCode::Backspace => app.pop_char(),
                _ => {}
            },
            _ => {}
        }
    }
}
