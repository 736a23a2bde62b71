use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;

use crate::owm::WeatherSource;
use crate::units::temperature::Scale;
use crate::weather::{submit, Lookup, WeatherView};

const MISSING: &str = "--";
const HELP: &str = " Enter: get weather   Esc: quit";

pub struct App<'a> {
    source: &'a dyn WeatherSource,
    scale: Scale,
    pub input: String,
    pub lookup: Lookup,
    /// Most recent city that produced a card.
    pub last_city: Option<String>,
}

impl<'a> App<'a> {
    pub fn new(source: &'a dyn WeatherSource, scale: Scale, input: String) -> Self {
        Self {
            source,
            scale,
            input,
            lookup: Lookup::Idle,
            last_city: None,
        }
    }

    pub fn submit(&mut self) {
        self.lookup = submit(self.source, &self.input, self.scale);
        if self.lookup.view().is_some() {
            self.last_city = Some(self.input.trim().to_string());
        }
    }

    /// Returns `true` when the key asks to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(_)
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
        false
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().fg(Color::Yellow)))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(BorderType::Rounded)
}

fn display_weather(view: &WeatherView) -> Vec<Line<'_>> {
    let value = Style::default().fg(Color::Green);
    vec![
        Line::from(""),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                view.city.as_str(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(view.location_line(), Style::default().fg(Color::Blue)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!("{} {}", view.temp_line(), view.icon.emoji()),
                value.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![Span::raw(" "), Span::styled(view.feels_like_line(), value)]),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(view.wind_line(), value),
            Span::styled(
                format!("  from {}", view.wind_direction.label()),
                Style::default().fg(Color::Blue),
            ),
        ]),
        Line::from(vec![Span::raw(" "), Span::styled(view.humidity_line(), value)]),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(view.description.as_str(), value),
        ]),
        Line::from(""),
        Line::from(format!(
            " Updated {} ({})",
            view.fetched_at.format("%d-%m-%Y %H:%M"),
            view.scale.symbol()
        )),
    ]
}

fn display_lookup(lookup: &Lookup) -> Vec<Line<'_>> {
    match lookup {
        Lookup::Idle => vec![Line::from(""), Line::from(format!(" {MISSING}"))],
        Lookup::Loaded(view) => display_weather(view),
        Lookup::Failed(message) => vec![
            Line::from(""),
            Line::from(vec![
                Span::raw(" "),
                Span::styled(message.as_str(), Style::default().fg(Color::Red)),
            ]),
        ],
    }
}

pub fn ui(f: &mut Frame, app: &App) {
    let vert_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    let input = Paragraph::new(app.input.as_str()).block(styled_block(" City "));
    f.render_widget(input, vert_layout[0]);
    f.set_cursor_position(input_cursor(vert_layout[0], &app.input));

    let card = Paragraph::new(display_lookup(&app.lookup)).block(styled_block(" Weather "));
    f.render_widget(card, vert_layout[1]);

    f.render_widget(
        Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
        vert_layout[2],
    );
}

fn input_cursor(area: Rect, input: &str) -> (u16, u16) {
    let width = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    let max_x = area.right().saturating_sub(2);
    ((area.x + 1).saturating_add(width).min(max_x), area.y + 1)
}
