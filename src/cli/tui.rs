use std::io::{self, Stdout, stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::Frame;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::cli::board_display::{
    ROW_WIDTH, SETBACK_MARK, SHORTCUT_MARK, render_board as render_ascii_board, token_for_seat,
};
use crate::cli::narrate_move;
use crate::dice::RandomSource;
use crate::game::{Game, GameError};

pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

const TOKEN_COLORS: [Color; 6] = [
    Color::Red,
    Color::Blue,
    Color::Green,
    Color::Magenta,
    Color::Cyan,
    Color::Yellow,
];

/// Full-screen viewer for a started game; every key press plays one move.
pub struct TuiApp<R: RandomSource> {
    game: Game<R>,
    log: Vec<String>,
    last_error: Option<GameError>,
    should_quit: bool,
    log_scroll: u16,
}

impl<R: RandomSource> TuiApp<R> {
    pub fn new(game: Game<R>) -> Self {
        Self {
            game,
            log: Vec::new(),
            last_error: None,
            should_quit: false,
            log_scroll: 0,
        }
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = loop {
            if self.should_quit {
                break Ok(());
            }

            if let Err(err) = terminal.draw(|f| self.render(f)) {
                break Err(err);
            }

            match event::poll(Duration::from_millis(50)) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Ok(_) => {}
                    Err(err) => break Err(err),
                },
                Ok(false) => {}
                Err(err) => break Err(err),
            }
        };

        let _ = terminal.clear();
        let _ = disable_raw_mode();
        let _ = terminal.show_cursor();

        result
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char(' ') => self.play_move(),
            KeyCode::Up => self.log_scroll = self.log_scroll.saturating_sub(1),
            KeyCode::Down => self.log_scroll = self.log_scroll.saturating_add(1),
            _ => {}
        }
    }

    fn play_move(&mut self) {
        if self.game.is_over() {
            return;
        }
        match self.game.next_move() {
            Ok(result) => {
                self.log.extend(narrate_move(&result));
                if let Some(winner) = self.game.winner() {
                    self.log.push(format!("{} has won the game!", winner.name));
                }
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(err),
        }
    }

    fn render(&mut self, f: &mut Frame<'_>) {
        let area = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(12), Constraint::Length(3)])
            .split(area);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[0]);

        self.render_board(f, main_chunks[0]);
        self.render_right_panel(f, main_chunks[1]);
        self.render_status_bar(f, chunks[1]);
    }

    fn render_board(&self, f: &mut Frame<'_>, area: Rect) {
        let text = render_ascii_board(self.game.board(), ROW_WIDTH);
        let lines: Vec<Line<'_>> = text
            .lines()
            .map(|line| {
                Line::from(
                    line.chars()
                        .map(|ch| Span::styled(ch.to_string(), self.style_for_board_char(ch)))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Board")
            .title_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );

        f.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Left),
            area,
        );
    }

    fn render_right_panel(&mut self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        self.render_players(f, chunks[0]);
        self.render_log(f, chunks[1]);
    }

    fn render_players(&self, f: &mut Frame<'_>, area: Rect) {
        let current = self.game.current_player().ok().map(|p| p.id);
        let mut lines: Vec<Line<'_>> = vec![Line::from(vec![
            Span::raw("Turn "),
            Span::styled(
                self.game.turn().to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  ({})", self.game.status())),
        ])];

        for (seat, player) in self.game.players().iter().enumerate() {
            let marker = if Some(player.id) == current && !self.game.is_over() {
                "> "
            } else {
                "  "
            };
            let position = self
                .game
                .position_of(player)
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string());
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{} {}", token_for_seat(seat), player.name),
                    Style::default()
                        .fg(color_for_seat(seat))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  at {position}")),
            ]));
        }

        f.render_widget(
            Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title("Players"))
                .wrap(Wrap { trim: false }),
            area,
        );
    }

    fn render_log(&mut self, f: &mut Frame<'_>, area: Rect) {
        let lines: Vec<Line<'_>> = if self.log.is_empty() {
            vec![Line::from("No moves yet.")]
        } else {
            self.log.iter().map(|l| Line::from(l.as_str())).collect()
        };

        // Stick to the bottom unless the user scrolled up.
        let viewport_height = area.height.saturating_sub(2);
        let content_height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let max_scroll = content_height.saturating_sub(viewport_height);
        if self.log_scroll == 0 || self.log_scroll > max_scroll {
            self.log_scroll = max_scroll;
        }

        f.render_widget(
            Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title("Moves"))
                .wrap(Wrap { trim: false })
                .scroll((self.log_scroll, 0)),
            area,
        );
    }

    fn render_status_bar(&self, f: &mut Frame<'_>, area: Rect) {
        let (text, style) = match (&self.last_error, self.game.winner()) {
            (Some(err), _) => (err.to_string(), Style::default().fg(Color::Red)),
            (None, Some(winner)) => (
                format!("{} has won the game! Press q to quit", winner.name),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            (None, None) => (
                "Enter/Space: roll | Up/Down: scroll moves | q/Esc: quit".to_string(),
                Style::default().fg(Color::White),
            ),
        };

        f.render_widget(
            Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL))
                .style(style)
                .alignment(Alignment::Center),
            area,
        );
    }

    fn style_for_board_char(&self, c: char) -> Style {
        match c {
            SHORTCUT_MARK => Style::default().fg(Color::Green),
            SETBACK_MARK => Style::default().fg(Color::LightRed),
            'A'..='Z' => {
                let seat = usize::from(c as u8 - b'A');
                Style::default()
                    .fg(color_for_seat(seat))
                    .add_modifier(Modifier::BOLD)
            }
            '0'..='9' => Style::default().fg(Color::DarkGray),
            _ => Style::default(),
        }
    }
}

fn color_for_seat(seat: usize) -> Color {
    TOKEN_COLORS[seat % TOKEN_COLORS.len()]
}
