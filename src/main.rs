use std::io;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind,
    MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use itertools::Itertools;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;

use pi_snake::basic::{Cell, Point};
use pi_snake::config::Config;
use pi_snake::game::{DeathCause, Event, Game};

const FRAME: Duration = Duration::from_millis(33);
/// Steering impulse contributed by one key press, in input units
const KEY_DELTA: f32 = 10.;
/// Input units per character cell of mouse drag
const DRAG_SCALE: f32 = 10.;

#[derive(Parser)]
#[command(about = "steer a snake along the digits of pi")]
struct Args {
    /// Board width in cells
    #[arg(long, default_value_t = 32)]
    width: isize,
    /// Board height in cells
    #[arg(long, default_value_t = 20)]
    height: isize,
    /// Starting time per cell in milliseconds
    #[arg(long, default_value_t = 300)]
    speed: u64,
    /// Item placement seed, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::default()
        .grid(args.width, args.height)
        .start_speed(Duration::from_millis(args.speed))
        .seed(args.seed);
    let mut game = Game::new(config).context("invalid configuration")?;

    enable_raw_mode()?;
    execute!(io::stderr(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stderr()))?;

    let result = run(&mut terminal, &mut game);

    disable_raw_mode()?;
    execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    game: &mut Game,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut input_delta = Point::default();
    let mut drag_from: Option<(u16, u16)> = None;
    let mut status = String::new();

    loop {
        let frame_start = Instant::now();

        // drain everything the terminal buffered this frame
        while event::poll(FRAME.saturating_sub(frame_start.elapsed()))? {
            match event::read()? {
                TermEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('r') => {
                        game.respawn();
                        status.clear();
                    }
                    KeyCode::Up | KeyCode::Char('w') => {
                        input_delta += Point { x: 0., y: -KEY_DELTA }
                    }
                    KeyCode::Down | KeyCode::Char('s') => {
                        input_delta += Point { x: 0., y: KEY_DELTA }
                    }
                    KeyCode::Left | KeyCode::Char('a') => {
                        input_delta += Point { x: -KEY_DELTA, y: 0. }
                    }
                    KeyCode::Right | KeyCode::Char('d') => {
                        input_delta += Point { x: KEY_DELTA, y: 0. }
                    }
                    _ => {}
                },
                TermEvent::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        drag_from = Some((mouse.column, mouse.row));
                    }
                    MouseEventKind::Drag(MouseButton::Left) => {
                        if let Some((column, row)) = drag_from {
                            let step = Point {
                                x: mouse.column as f32 - column as f32,
                                y: mouse.row as f32 - row as f32,
                            };
                            input_delta += step * DRAG_SCALE;
                            drag_from = Some((mouse.column, mouse.row));
                        }
                    }
                    MouseEventKind::Up(MouseButton::Left) => drag_from = None,
                    _ => {}
                },
                _ => {}
            }
        }

        let events = game.update(start.elapsed(), std::mem::take(&mut input_delta));
        if !events.is_empty() {
            status = events.iter().map(describe).join(", ");
        }

        draw(terminal, game, &status)?;
    }
}

fn describe(event: &Event) -> String {
    match event {
        Event::Collected { digit, matched: true } => format!("{} matches pi", digit),
        Event::Collected { digit, matched: false } => format!("{} is off the sequence", digit),
        Event::Died(DeathCause::OutOfBounds) => "hit the wall".to_string(),
        Event::Died(DeathCause::SelfCollision) => "ran into itself".to_string(),
    }
}

fn draw(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    game: &mut Game,
    status: &str,
) -> anyhow::Result<()> {
    let grid_dim = game.grid_dim();
    let head = game.snake().head();
    let body: Vec<Cell> = game.snake_mut().occupied_cells().collect();
    let items: Vec<_> = game.items().cells().collect();
    let expected = game.sequence().expected();

    let progress = game.sequence().prefix();
    let pi_line = if progress.len() < 2 {
        format!("pi {}  next {}", progress, expected)
    } else {
        format!("pi {}.{}  next {}", &progress[..1], &progress[1..], expected)
    };

    terminal.draw(|frame| {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(grid_dim.y as u16 + 2),
                Constraint::Min(1),
            ])
            .split(frame.area());

        let header = vec![
            Line::from(format!(
                "score {}  best {}  {} ms/cell",
                game.score(),
                game.best(),
                game.snake().speed.as_millis()
            )),
            Line::from(pi_line),
        ];
        frame.render_widget(Paragraph::new(header), chunks[0]);

        let mut rows = Vec::with_capacity(grid_dim.y as usize);
        for y in 0..grid_dim.y {
            let mut spans = Vec::with_capacity(grid_dim.x as usize);
            for x in 0..grid_dim.x {
                let cell = Cell { x, y };
                let span = if cell == head {
                    Span::styled("@", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                } else if body.contains(&cell) {
                    Span::styled("o", Style::default().fg(Color::Green))
                } else if let Some(&(digit, _)) = items.iter().find(|&&(_, c)| c == cell) {
                    let style = if digit == expected {
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    Span::styled(digit.to_string(), style)
                } else {
                    Span::raw("·")
                };
                spans.push(span);
            }
            rows.push(Line::from(spans));
        }
        let grid = Paragraph::new(rows).block(Block::default().borders(Borders::ALL));
        frame.render_widget(grid, chunks[1]);

        let help = "arrows/wasd or mouse drag to steer, r to restart, q to quit";
        let footer = if status.is_empty() {
            help.to_string()
        } else {
            format!("{}   {}", status, help)
        };
        frame.render_widget(Paragraph::new(footer), chunks[2]);
    })?;

    Ok(())
}
