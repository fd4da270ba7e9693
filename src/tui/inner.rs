// src/tui/inner.rs  —  ratatui layout
use anyhow::Result;
use crossterm::{execute, terminal::{self, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};
use super::View;
use std::io::stdout;

pub struct Tui {
    terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, EnterAlternateScreen)?;
        let backend  = CrosstermBackend::new(out);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    pub fn cleanup(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }

    pub fn draw(&mut self, v: &View<'_>) -> Result<()> {
        let bar = v.language_bar();
        self.terminal.draw(|f| {
            let area = f.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),  // header / languages
                    Constraint::Min(4),     // bound labels
                    Constraint::Length(1),  // status
                    Constraint::Length(1),  // footer hints
                ])
                .split(area);

            // ── Header ────────────────────────────────────────────────────
            let header = Paragraph::new(format!(" {}  |  {}", v.title, bar))
                .block(Block::default().borders(Borders::ALL))
                .style(Style::default().fg(Color::Black).bg(Color::Cyan)
                       .add_modifier(Modifier::BOLD));
            f.render_widget(header, chunks[0]);

            // ── Labels ────────────────────────────────────────────────────
            let width = v.board.labels().iter().map(|l| l.key().chars().count()).max().unwrap_or(0);
            let lines: Vec<Line> = v.board.labels().iter()
                .map(|l| Line::from(vec![
                    Span::styled(
                        format!("{:<width$}  ", l.key()),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(l.text(), Style::default().fg(Color::White)),
                ]))
                .collect();
            let body = Paragraph::new(lines)
                .block(Block::default()
                    .title(format!(" {} keys ", v.board.len()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)))
                .wrap(Wrap { trim: false });
            f.render_widget(body, chunks[1]);

            // ── Status ────────────────────────────────────────────────────
            let status = Paragraph::new(format!(" {}", v.status))
                .style(Style::default().fg(Color::Magenta));
            f.render_widget(status, chunks[2]);

            // ── Footer ────────────────────────────────────────────────────
            let footer = Paragraph::new(
                " ←/→ Tab = switch language   1-9 = pick   r = reload   q/Esc = quit"
            )
            .style(Style::default().fg(Color::DarkGray).bg(Color::Black));
            f.render_widget(footer, chunks[3]);
        })?;
        Ok(())
    }
}
