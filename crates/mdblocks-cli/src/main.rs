mod app;
mod args;
mod input;
mod surface;

use anyhow::{Context, Result};
use app::{App, Status};
use args::InputSource;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use mdblocks_config::Config;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::{
    env,
    fs::{File, OpenOptions},
    io::{self, Read, Stdout, stdout},
    path::Path,
    process,
    time::Duration,
};
use surface::TerminalRenderer;

/// How long the loop waits for a key when there is no stream work.
const IDLE_POLL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("mdblocks");

    let source = match args::parse_args(args.get(1..).unwrap_or_default()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{}", args::usage(program));
            process::exit(1);
        }
    };

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    if let Some(log_file) = &config.log_file {
        init_logging(log_file)?;
    }
    log::info!("mdblocks starting, input {source:?}");

    let reader: Box<dyn Read + Send> = match &source {
        InputSource::Stdin => Box::new(io::stdin()),
        InputSource::File(path) => Box::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        ),
    };
    let input = input::spawn_reader(reader, config.stream.read_chunk_bytes);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let width = terminal.size()?.width;
    let renderer = TerminalRenderer::new(width, config.render.block_width_percent);
    let mut app = App::new(renderer, input, config.stream.batch_lines);

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        // Keep processing input between redraws; only block on keys when idle.
        let busy = app.pump();
        let timeout = if busy { Duration::ZERO } else { IDLE_POLL };
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    app.quit();
                    return Ok(());
                }
                KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1),
                KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1),
                KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_by(app.page()),
                KeyCode::PageUp => app.scroll_by(-app.page()),
                KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),
                KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),
                _ => {}
            },
            Event::Resize(width, _) => app.resize(width),
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    app.viewport = chunks[0].height;
    app.scroll_by(0);
    app.renderer().blit(app.scroll, chunks[0], f.buffer_mut());

    let (state, color) = match &app.status {
        Status::Reading => ("reading".to_string(), Color::Yellow),
        Status::Done => ("done".to_string(), Color::Green),
        Status::Cancelled => ("cancelled".to_string(), Color::Yellow),
        Status::Failed(e) => (format!("failed: {e}"), Color::Red),
    };
    let mut spans = vec![
        Span::styled(state, Style::default().fg(color)),
        Span::raw(format!(" | {} blocks | ", app.renderer().blocks().len())),
        Span::raw("q: Quit | j/k: Scroll | PgUp/PgDn: Page | g/G: Top/Bottom"),
    ];
    if let Some(warning) = &app.warning {
        spans.push(Span::styled(format!(" | {warning}"), Style::default().fg(Color::Red)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
}
