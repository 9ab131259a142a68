//! Rendering

use ratatui::{prelude::*, widgets::*};
use shared::{Draft, FieldKind, FieldSpec};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::catalog::{FormMode, Severity};

use super::app::{App, Focus};
use super::table::Tabular;

/// Width of the prefix in front of every value line
const VALUE_INDENT: u16 = 2;

pub fn ui<R: Tabular>(f: &mut Frame, app: &mut App<R>) {
    let area = f.area();
    let log_height = if app.show_logs { 10 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),          // Header
            Constraint::Min(1),             // Form + Table
            Constraint::Length(log_height), // Logs
            Constraint::Length(1),          // Key hints
        ])
        .split(area);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
        .split(chunks[1]);

    render_header::<R>(f, chunks[0]);
    render_form(f, app, main_chunks[0]);
    render_table(f, app, main_chunks[1]);

    if app.show_logs {
        let logs = TuiLoggerWidget::default()
            .block(
                Block::default()
                    .title(" Logs ")
                    .border_style(Style::default().fg(Color::White).add_modifier(Modifier::DIM))
                    .borders(Borders::ALL),
            )
            .output_separator('|')
            .output_timestamp(Some("%H:%M:%S".to_string()))
            .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
            .output_target(false)
            .output_file(false)
            .output_line(false)
            .style(Style::default().fg(Color::White))
            .state(&app.logger_state);
        f.render_widget(logs, chunks[2]);
    }

    render_hints(f, app.focus, chunks[3]);
    render_notification(f, app, area);
}

fn render_header<R: Tabular>(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::raw(" Catalog Desk "),
        Span::styled(format!(" Manajemen {} ", R::ENTITY), Style::default().fg(Color::Yellow)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(title, area);
}

fn render_hints(f: &mut Frame, focus: Focus, area: Rect) {
    let text = match focus {
        Focus::Form => {
            "Tab: tabel | ↑↓: field | ←→: pilih | Space: aktif | Enter: simpan | Esc: batal | F2: log"
        }
        Focus::Table => {
            "Tab: form | ↑↓: pilih | e: edit | d: hapus | x: tutup notifikasi | q: keluar | F2: log"
        }
    };
    let hints = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    f.render_widget(hints, area);
}

fn render_form<R: Tabular>(f: &mut Frame, app: &App<R>, area: Rect) {
    let form = app.state.form();
    let editing = matches!(form.mode(), FormMode::Editing(_));
    let focused = app.focus == Focus::Form;

    let title = if editing {
        format!(" Edit {} ", R::ENTITY)
    } else {
        format!(" Tambah {} ", R::ENTITY)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        });
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_row = None;
    let value_width = inner.width.saturating_sub(VALUE_INDENT).max(1) as usize;

    for (i, spec) in App::<R>::fields().iter().enumerate() {
        let is_focused = focused && i == app.field;
        let value = form.draft().value(spec.key).unwrap_or_default();

        lines.push(label_line(spec, &value, is_focused));

        if is_focused && is_text(spec.kind) {
            cursor_row = Some(lines.len());
            let scroll = app.input.visual_scroll(value_width);
            let visible: String = app.input.value().chars().skip(scroll).collect();
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(visible, Style::default().fg(Color::Yellow)),
            ]));
        } else {
            lines.push(value_line(spec, &value));
        }

        if let FieldKind::TextArea { max_len } = spec.kind {
            let count = value.chars().count();
            lines.push(Line::from(Span::styled(
                format!("  {count}/{max_len}"),
                Style::default().fg(Color::DarkGray),
            )));
        }

        if let Some(message) = form.errors().get(spec.key) {
            lines.push(Line::from(Span::styled(
                format!("  {message}"),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::from(""));
    let submit = if editing {
        "Simpan Perubahan".to_string()
    } else {
        format!("Tambah {}", R::ENTITY)
    };
    let mut buttons = vec![
        Span::styled("[Enter] ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!(" {submit} "),
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    ];
    if editing {
        buttons.push(Span::raw("   "));
        buttons.push(Span::styled("[Esc] ", Style::default().fg(Color::DarkGray)));
        buttons.push(Span::styled(" Batal ", Style::default().fg(Color::Black).bg(Color::Gray)));
    }
    lines.push(Line::from(buttons));

    // Keep the focused field on screen when the form is taller than the card
    let offset = cursor_row
        .map(|row| (row as u16 + 1).saturating_sub(inner.height))
        .unwrap_or(0);

    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);

    if let Some(row) = cursor_row {
        let scroll = app.input.visual_scroll(value_width);
        let x = inner.x + VALUE_INDENT + (app.input.visual_cursor().max(scroll) - scroll) as u16;
        let y = inner.y + row as u16 - offset;
        if y < inner.y + inner.height {
            f.set_cursor_position((x.min(inner.x + inner.width.saturating_sub(1)), y));
        }
    }
}

fn is_text(kind: FieldKind) -> bool {
    matches!(
        kind,
        FieldKind::Text { .. } | FieldKind::TextArea { .. } | FieldKind::Number | FieldKind::Date
    )
}

fn label_line(spec: &FieldSpec, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let marker = if focused { "▶ " } else { "  " };

    let label = match spec.kind {
        FieldKind::Range { .. } => format!("{}: {value}", spec.label),
        FieldKind::Date => format!("{} (YYYY-MM-DD)", spec.label),
        _ => spec.label.to_string(),
    };

    Line::from(vec![Span::styled(marker, style), Span::styled(label, style)])
}

fn value_line(spec: &FieldSpec, value: &str) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    match spec.kind {
        FieldKind::Select { .. } if value.is_empty() => Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("< Pilih {}... >", spec.label), dim),
        ]),
        FieldKind::Select { .. } => Line::from(vec![
            Span::raw("  < "),
            Span::styled(value.to_string(), Style::default().fg(Color::Cyan)),
            Span::raw(" >"),
        ]),
        FieldKind::Range { min, max, .. } => {
            let n = value.parse::<u16>().unwrap_or(min);
            Line::from(vec![
                Span::raw("  "),
                Span::styled(slider(n, min, max, 20), Style::default().fg(Color::Cyan)),
            ])
        }
        FieldKind::Switch => {
            let on = value == "true";
            Line::from(vec![
                Span::raw("  "),
                if on {
                    Span::styled("[■] Ya", Style::default().fg(Color::Green))
                } else {
                    Span::styled("[ ] Tidak", dim)
                },
            ])
        }
        _ if value.is_empty() => Line::from(vec![Span::raw("  "), Span::styled("-", dim)]),
        _ => Line::from(vec![Span::raw("  "), Span::raw(value.to_string())]),
    }
}

/// Text slider `[#####-----]`
pub fn slider(value: u16, min: u16, max: u16, width: usize) -> String {
    let span = max.saturating_sub(min).max(1) as usize;
    let filled = (value.saturating_sub(min) as usize * width) / span;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn render_table<R: Tabular>(f: &mut Frame, app: &mut App<R>, area: Rect) {
    let focused = app.focus == Focus::Table;
    let block = Block::default()
        .title(format!(" Daftar {} ({}) ", R::ENTITY, app.state.records().len()))
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        });

    if app.state.records().is_empty() {
        let empty = Paragraph::new(format!("Belum ada data {}.", R::ENTITY))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let editing = app.state.form().editing_id();
    let rows: Vec<Row> = app
        .state
        .records()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let row = record.row(i);
            if Some(record.id()) == editing {
                row.style(Style::default().fg(Color::Yellow))
            } else {
                row
            }
        })
        .collect();

    let header = Row::new(R::headers().iter().copied())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let table = Table::new(rows, R::widths())
        .header(header)
        .block(block)
        .row_highlight_style(if focused {
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        })
        .highlight_symbol("> ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_notification<R: Tabular>(f: &mut Frame, app: &App<R>, area: Rect) {
    let Some((message, severity)) = app.state.notifier().current() else {
        return;
    };

    let color = match severity {
        Severity::Success => Color::Green,
        Severity::Danger => Color::Red,
    };

    let width = (message.chars().count() as u16 + 4).min(area.width);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + 1,
        width,
        height: 3.min(area.height),
    };

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(message.to_string())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
        popup,
    );
}
