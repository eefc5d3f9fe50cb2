use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};
use std::io::{stdout, Stdout};

use slate::{log, Cli, DiskStore, EditFile, EditorConfig, Session, Viewport};

type App = Session<DiskStore>;

fn handle_event(app: &mut App, event: Event) {
    if let Event::Key(key) = event {
        if key.kind == KeyEventKind::Press {
            app.handle_key(key);
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.show_cursor()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

fn render_ui(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    terminal.draw(|frame| {
        let size = frame.area();

        // Split into text area and status bar
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(size);
        let text_area = chunks[0];

        app.resize(text_area.width as usize, text_area.height as usize);
        let screen = app.render();

        let gutter_style = Style::default().fg(Color::White).bg(Color::DarkGray);
        let lines: Vec<Line> = screen
            .lines
            .iter()
            .map(|line| {
                Line::from(vec![
                    Span::styled(app.viewport().gutter(line.number), gutter_style),
                    Span::raw(line.text.clone()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), text_area);

        let status = Paragraph::new(app.status_line())
            .style(Style::default().bg(Color::DarkGray).fg(Color::White));
        frame.render_widget(status, chunks[1]);

        let (x, y) = screen.caret;
        let x = u16::try_from(x).unwrap_or(u16::MAX);
        let y = u16::try_from(y).unwrap_or(u16::MAX);
        frame.set_cursor_position((
            text_area.x.saturating_add(x.min(text_area.width.saturating_sub(1))),
            text_area.y.saturating_add(y.min(text_area.height.saturating_sub(1))),
        ));
    })?;

    Ok(())
}

fn run(app: &mut App, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    loop {
        render_ui(terminal, app)?;

        if app.should_quit() {
            break;
        }

        // One command at a time: block until the next event
        let event = event::read()?;
        handle_event(app, event);
    }

    Ok(())
}

fn main() -> Result<()> {
    let config = EditorConfig::from(Cli::parse());
    log::try_init(&config)?;

    let file = EditFile::open(&config.path, &DiskStore)
        .with_context(|| format!("Failed to open {}", config.path.display()))?;
    let mut app = Session::new(file, Viewport::new(80, 24, config.left_margin), DiskStore);

    // Set up panic hook to restore terminal
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
        default_panic(info);
    }));

    let mut terminal = setup_terminal()?;
    let result = run(&mut app, &mut terminal);
    restore_terminal(terminal)?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "session ended with an error");
    }
    result
}
