//! Front-end state and key handling
//!
//! Keys are turned into [`FormIntent`]s and fed to [`DeskState::update`].
//! The focused text field is edited through a `tui_input::Input` that
//! mirrors the draft value.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;
use shared::{Draft, FieldKind, FieldSpec, FormIntent};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiWidgetEvent, TuiWidgetState};

use crate::catalog::Record;
use crate::core::{Confirm, DeskState};

use super::format::truncate_chars;

/// Stock slider jump for PageUp/PageDown
pub const RANGE_PAGE: u16 = 50;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Form,
    Table,
}

/// What a key asks of the run loop
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Quit,
    /// Apply an intent (may open the confirm dialog)
    Dispatch(FormIntent),
}

pub struct App<R: Record> {
    pub state: DeskState<R>,
    pub focus: Focus,
    /// Index into the draft's field list
    pub field: usize,
    /// Editor for the focused text field
    pub input: Input,
    pub table_state: TableState,
    pub show_logs: bool,
    pub logger_state: TuiWidgetState,
}

impl<R: Record> App<R> {
    pub fn new(state: DeskState<R>) -> Self {
        let mut app = Self {
            state,
            focus: Focus::Form,
            field: 0,
            input: Input::default(),
            table_state: TableState::default(),
            show_logs: false,
            logger_state: TuiWidgetState::new(),
        };
        app.sync();
        app
    }

    pub fn fields() -> &'static [FieldSpec] {
        <R::Draft as Draft>::fields()
    }

    pub fn focused_field(&self) -> Option<&'static FieldSpec> {
        Self::fields().get(self.field)
    }

    /// Apply an intent and bring the view back in line with the state
    pub fn dispatch(&mut self, intent: FormIntent, confirm: &mut dyn Confirm) {
        tracing::debug!(?intent, "Dispatch");
        self.state.update(intent, confirm);
        self.sync();
    }

    /// Expire the notification; no confirm can be asked for here
    pub fn tick(&mut self) {
        self.state.update(FormIntent::Tick, &mut |_: &str| false);
    }

    /// Refresh the input widget and the table selection from the state
    pub fn sync(&mut self) {
        let value = self
            .focused_field()
            .and_then(|spec| self.state.form().draft().value(spec.key))
            .unwrap_or_default();
        if self.input.value() != value {
            self.input = Input::new(value);
        }

        let len = self.state.records().len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
    }

    pub fn selected_id(&self) -> Option<i64> {
        let index = self.table_state.selected()?;
        self.state.records().get(index).map(|r| r.id())
    }

    /// Translate a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        match key.code {
            KeyCode::F(2) => {
                self.show_logs = !self.show_logs;
                return Action::None;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Form => Focus::Table,
                    Focus::Table => Focus::Form,
                };
                return Action::None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Form => self.handle_form_key(key),
            Focus::Table => self.handle_table_key(key),
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Action {
        let len = self.state.records().len();
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Up => {
                if let Some(i) = self.table_state.selected() {
                    self.table_state.select(Some(i.saturating_sub(1)));
                }
                Action::None
            }
            KeyCode::Down => {
                if let Some(i) = self.table_state.selected()
                    && i + 1 < len
                {
                    self.table_state.select(Some(i + 1));
                }
                Action::None
            }
            KeyCode::Char('e') | KeyCode::Enter => match self.selected_id() {
                Some(id) => {
                    self.focus = Focus::Form;
                    self.field = 0;
                    Action::Dispatch(FormIntent::BeginEdit { id })
                }
                None => Action::None,
            },
            KeyCode::Char('d') | KeyCode::Delete => match self.selected_id() {
                Some(id) => Action::Dispatch(FormIntent::Delete { id }),
                None => Action::None,
            },
            KeyCode::Char('x') => Action::Dispatch(FormIntent::DismissNotification),
            KeyCode::PageUp if self.show_logs => {
                self.logger_state.transition(TuiWidgetEvent::PrevPageKey);
                Action::None
            }
            KeyCode::PageDown if self.show_logs => {
                self.logger_state.transition(TuiWidgetEvent::NextPageKey);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Action {
        let fields = Self::fields();
        let Some(spec) = fields.get(self.field) else {
            return Action::None;
        };

        match key.code {
            KeyCode::Up => {
                self.field = self.field.checked_sub(1).unwrap_or(fields.len() - 1);
                self.sync();
                return Action::None;
            }
            KeyCode::Down => {
                self.field = (self.field + 1) % fields.len();
                self.sync();
                return Action::None;
            }
            KeyCode::Enter => return Action::Dispatch(FormIntent::Submit),
            KeyCode::Esc => return Action::Dispatch(FormIntent::Cancel),
            _ => {}
        }

        let draft = self.state.form().draft();
        let current = draft.value(spec.key).unwrap_or_default();

        let next = match spec.kind {
            FieldKind::Text { max_len } => self.edit_text(key, max_len),
            FieldKind::TextArea { max_len } => self.edit_text(key, Some(max_len)),
            FieldKind::Number | FieldKind::Date => self.edit_text(key, None),
            FieldKind::Select { options } => cycle_option(&current, options, key.code),
            FieldKind::Range { min, max, step } => {
                let value = current.parse::<u16>().unwrap_or(min);
                adjust_range(value, min, max, step, key.code).map(|v| v.to_string())
            }
            FieldKind::Switch => match key.code {
                KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                    Some((current != "true").to_string())
                }
                _ => None,
            },
        };

        match next {
            Some(value) if value != current => Action::Dispatch(FormIntent::edit(spec.key, value)),
            _ => Action::None,
        }
    }

    /// Feed a key to the input widget; returns the new text if it changed
    fn edit_text(&mut self, key: KeyEvent, max_len: Option<usize>) -> Option<String> {
        let before = self.input.value().to_string();
        self.input.handle_event(&Event::Key(key))?;

        let mut value = self.input.value().to_string();
        if let Some(max) = max_len
            && value.chars().count() > max
        {
            value = truncate_chars(&value, max).to_string();
            self.input = Input::new(value.clone());
        }

        (value != before).then_some(value)
    }
}

/// Step through `options` (with an empty "nothing selected" slot first)
pub fn cycle_option(current: &str, options: &[&str], code: KeyCode) -> Option<String> {
    let slots = options.len() + 1;
    let pos = options
        .iter()
        .position(|o| *o == current)
        .map_or(0, |i| i + 1);

    let next = match code {
        KeyCode::Right | KeyCode::Char(' ') => (pos + 1) % slots,
        KeyCode::Left => (pos + slots - 1) % slots,
        _ => return None,
    };

    Some(match next {
        0 => String::new(),
        i => options[i - 1].to_string(),
    })
}

/// Move a slider value, clamped to `min..=max`
pub fn adjust_range(value: u16, min: u16, max: u16, step: u16, code: KeyCode) -> Option<u16> {
    let next = match code {
        KeyCode::Right => value.saturating_add(step),
        KeyCode::Left => value.saturating_sub(step),
        KeyCode::PageUp => value.saturating_add(RANGE_PAGE),
        KeyCode::PageDown => value.saturating_sub(RANGE_PAGE),
        KeyCode::Home => min,
        KeyCode::End => max,
        _ => return None,
    };
    Some(next.clamp(min, max))
}
