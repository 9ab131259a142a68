//! Table columns per record schema

use ratatui::prelude::*;
use ratatui::widgets::{Cell, Row};
use shared::{Item, Product};

use crate::catalog::Record;
use crate::utils::validation::DESCRIPTION_DISPLAY_LEN;

use super::format::{format_idr, truncate_chars};

/// How a record is shown in the list table
pub trait Tabular: Record {
    fn headers() -> &'static [&'static str];

    fn widths() -> Vec<Constraint>;

    /// One table row; `index` is the zero-based display position
    fn row(&self, index: usize) -> Row<'static>;
}

impl Tabular for Product {
    fn headers() -> &'static [&'static str] {
        &["#", "Nama", "Harga", "Kategori", "Status"]
    }

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(18),
            Constraint::Length(12),
            Constraint::Length(12),
        ]
    }

    fn row(&self, index: usize) -> Row<'static> {
        let status = if self.is_active {
            Cell::from(Span::styled(" Aktif ", Style::default().fg(Color::Black).bg(Color::Green)))
        } else {
            Cell::from(Span::styled(
                " Tidak Aktif ",
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ))
        };

        Row::new(vec![
            Cell::from((index + 1).to_string()),
            Cell::from(self.name.clone()),
            Cell::from(format_idr(self.price)),
            Cell::from(self.category.to_string()),
            status,
        ])
    }
}

impl Tabular for Item {
    fn headers() -> &'static [&'static str] {
        &["#", "Nama", "Deskripsi"]
    }

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Length(4),
            Constraint::Percentage(35),
            Constraint::Min(10),
        ]
    }

    fn row(&self, index: usize) -> Row<'static> {
        let description = if self.description.is_empty() {
            Cell::from(Span::styled("-", Style::default().fg(Color::DarkGray)))
        } else {
            Cell::from(truncate_chars(&self.description, DESCRIPTION_DISPLAY_LEN).to_string())
        };

        Row::new(vec![
            Cell::from((index + 1).to_string()),
            Cell::from(self.name.clone()),
            description,
        ])
    }
}
