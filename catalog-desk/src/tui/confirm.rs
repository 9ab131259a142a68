//! Modal yes/no dialog
//!
//! Blocks on terminal input until the user answers. The dialog is drawn on
//! top of the last rendered frame so the table stays visible behind it.

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::buffer::Buffer;
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::io;

use crate::core::Confirm;

pub struct ModalConfirm<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    backdrop: Option<&'a Buffer>,
}

impl<'a, B: Backend> ModalConfirm<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>, backdrop: Option<&'a Buffer>) -> Self {
        Self { terminal, backdrop }
    }

    fn ask(&mut self, prompt: &str) -> io::Result<bool> {
        let backdrop = self.backdrop;
        loop {
            self.terminal.draw(|f| draw_dialog(f, prompt, backdrop))?;

            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return Ok(true),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                    _ => {}
                }
            }
        }
    }
}

impl<B: Backend> Confirm for ModalConfirm<'_, B> {
    fn confirm(&mut self, prompt: &str) -> bool {
        match self.ask(prompt) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!(error = %e, "Confirm dialog failed");
                false
            }
        }
    }
}

fn draw_dialog(f: &mut Frame, prompt: &str, backdrop: Option<&Buffer>) {
    let area = f.area();
    if let Some(buf) = backdrop
        && buf.area == area
    {
        f.buffer_mut().merge(buf);
    }

    let popup = centered_rect(area, 50, 7);
    f.render_widget(Clear, popup);

    let text = vec![
        Line::from(Span::styled(prompt.to_string(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] ", Style::default().fg(Color::Red)),
            Span::raw("Hapus   "),
            Span::styled("[n] ", Style::default().fg(Color::Gray)),
            Span::raw("Batal"),
        ]),
    ];

    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Konfirmasi ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(dialog, popup);
}

/// Rectangle of `width` x `height` cells centered in `area`, clipped to it
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
