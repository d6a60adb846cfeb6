//! Building blocks shared by the hospital screens: the colour palette, page chrome,
//! timed status messages, input forms, record tables and confirmation dialogs.

use crate::tui::Frame;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};
use std::time::{Duration, Instant};

pub const BG: Color = Color::Rgb(16, 16, 28);
pub const PANEL_BG: Color = Color::Rgb(22, 22, 35);
pub const INPUT_BG: Color = Color::Rgb(26, 26, 36);
pub const DIALOG_BG: Color = Color::Rgb(30, 30, 46);
pub const BORDER: Color = Color::Rgb(75, 75, 120);
pub const BORDER_IDLE: Color = Color::Rgb(140, 140, 200);
pub const FOCUS: Color = Color::Rgb(250, 250, 110);
pub const TITLE: Color = Color::Rgb(230, 230, 250);
pub const TEXT: Color = Color::Rgb(220, 220, 240);
pub const MUTED: Color = Color::Rgb(180, 180, 200);
pub const HELP: Color = Color::Rgb(140, 140, 170);
pub const SUCCESS: Color = Color::Rgb(140, 219, 140);
pub const ERROR: Color = Color::Rgb(255, 100, 100);
pub const ACCENT: Color = Color::Rgb(129, 199, 245);
pub const HIGHLIGHT_BG: Color = Color::Rgb(40, 40, 65);

/// How long a status message stays on screen.
const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Draws the page background, a centred header and a help footer.
///
/// # Returns
///
/// The area between header and footer.
pub fn page(frame: &mut Frame, title: &str, help: &str) -> Rect {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(BG)), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(area);

    let header = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(BORDER))
        .style(Style::default().bg(BG));
    frame.render_widget(header, layout[0]);

    let title = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(TITLE)
                .add_modifier(Modifier::BOLD)
                .bg(BG),
        )
        .alignment(Alignment::Center);
    frame.render_widget(title, layout[0]);

    let help = Paragraph::new(help.to_string())
        .style(Style::default().fg(HELP).bg(BG))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(help, layout[2]);

    layout[1]
}

/// A rounded panel block with the focus colour on its border when `focused`.
pub fn panel(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(Style::default().fg(TITLE).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { FOCUS } else { BORDER_IDLE }))
        .style(Style::default().bg(PANEL_BG))
}

/// Renders a `► label ◄` style button.
pub fn button(frame: &mut Frame, area: Rect, label: &str, focused: bool, color: Color) {
    let (text, style) = if focused {
        (
            format!("► {label} ◄"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    } else {
        (format!("  {label}  "), Style::default().fg(MUTED))
    };
    frame.render_widget(
        Paragraph::new(text).style(style).alignment(Alignment::Center),
        area,
    );
}

/// Creates a rectangle of the given percentage size centred in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// A success or error line that disappears after a few seconds.
#[derive(Debug, Default)]
pub struct StatusMessage {
    message: Option<(String, bool)>,
    shown_at: Option<Instant>,
}

impl StatusMessage {
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.message = Some((message.into(), true));
        self.shown_at = Some(Instant::now());
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.message = Some((message.into(), false));
        self.shown_at = Some(Instant::now());
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.shown_at = None;
    }

    pub fn check_timeout(&mut self) {
        if let Some(shown_at) = self.shown_at {
            if shown_at.elapsed() > MESSAGE_TIMEOUT {
                self.clear();
            }
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.message.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn is_error(&self) -> bool {
        matches!(self.message, Some((_, true)))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let paragraph = match &self.message {
            Some((text, true)) => Paragraph::new(format!("⚠️ {text}")).style(
                Style::default()
                    .fg(ERROR)
                    .add_modifier(Modifier::BOLD)
                    .bg(BG),
            ),
            Some((text, false)) => Paragraph::new(format!("✓ {text}")).style(
                Style::default()
                    .fg(SUCCESS)
                    .add_modifier(Modifier::BOLD)
                    .bg(BG),
            ),
            None => Paragraph::new("").style(Style::default().bg(BG)),
        };
        frame.render_widget(
            paragraph.alignment(Alignment::Center).wrap(Wrap { trim: true }),
            area,
        );
    }
}

/// One input of a [`Form`].
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    required: bool,
    locked: bool,
    choices: Option<&'static [&'static str]>,
}

impl FormField {
    /// A required free-text field.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            required: true,
            locked: false,
            choices: None,
        }
    }

    /// A field cycling through fixed options with the Left/Right keys.
    pub fn choice(label: &'static str, choices: &'static [&'static str]) -> Self {
        Self {
            value: choices.first().map(|c| c.to_string()).unwrap_or_default(),
            choices: Some(choices),
            ..Self::new(label)
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Shown but not editable.
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    fn cycle(&mut self, forward: bool) {
        let Some(choices) = self.choices else { return };
        if choices.is_empty() {
            return;
        }
        let current = choices.iter().position(|c| *c == self.value).unwrap_or(0);
        let next = if forward {
            (current + 1) % choices.len()
        } else {
            (current + choices.len() - 1) % choices.len()
        };
        self.value = choices[next].to_string();
    }
}

/// What a key press in a [`Form`] asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    Back,
}

/// A vertical list of input fields followed by Submit and Back buttons.
///
/// Focus indices `0..fields.len()` are fields, then Submit, then Back. Locked fields
/// are skipped when moving focus.
#[derive(Debug)]
pub struct Form {
    pub fields: Vec<FormField>,
    focus: usize,
    pub status: StatusMessage,
    submit_label: &'static str,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self {
            fields,
            focus: 0,
            status: StatusMessage::default(),
            submit_label: "Submit",
        };
        form.focus = form.first_editable();
        form
    }

    pub fn with_submit_label(mut self, label: &'static str) -> Self {
        self.submit_label = label;
        self
    }

    fn submit_index(&self) -> usize {
        self.fields.len()
    }

    fn back_index(&self) -> usize {
        self.fields.len() + 1
    }

    fn first_editable(&self) -> usize {
        self.fields
            .iter()
            .position(|f| !f.locked)
            .unwrap_or(self.submit_index())
    }

    fn is_focusable(&self, index: usize) -> bool {
        self.fields.get(index).map_or(true, |f| !f.locked)
    }

    fn focus_next(&mut self) {
        let slots = self.fields.len() + 2;
        for _ in 0..slots {
            self.focus = (self.focus + 1) % slots;
            if self.is_focusable(self.focus) {
                break;
            }
        }
    }

    fn focus_previous(&mut self) {
        let slots = self.fields.len() + 2;
        for _ in 0..slots {
            self.focus = (self.focus + slots - 1) % slots;
            if self.is_focusable(self.focus) {
                break;
            }
        }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", |f| f.value.as_str())
    }

    pub fn values(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.value.clone()).collect()
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    /// Empties every editable free-text field and moves focus to the first one.
    pub fn reset(&mut self) {
        for field in self.fields.iter_mut().filter(|f| !f.locked && f.choices.is_none()) {
            field.value.clear();
        }
        self.focus = self.first_editable();
    }

    fn missing_required(&self) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|f| f.required && f.value.trim().is_empty())
            .map(|f| f.label)
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<FormEvent> {
        self.status.check_timeout();
        let focus = self.focus;
        match key.code {
            KeyCode::Char(c) => {
                if let Some(field) = self.fields.get_mut(focus) {
                    if !field.locked && field.choices.is_none() {
                        field.value.push(c);
                        if self.status.is_error() {
                            self.status.clear();
                        }
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.fields.get_mut(focus) {
                    if !field.locked && field.choices.is_none() {
                        field.value.pop();
                    }
                }
            }
            KeyCode::Left | KeyCode::Right => {
                if let Some(field) = self.fields.get_mut(focus) {
                    if !field.locked {
                        field.cycle(key.code == KeyCode::Right);
                    }
                } else {
                    self.focus = if focus == self.submit_index() {
                        self.back_index()
                    } else {
                        self.submit_index()
                    };
                }
            }
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_previous(),
            KeyCode::Esc => return Some(FormEvent::Back),
            KeyCode::Enter => {
                if focus == self.back_index() {
                    return Some(FormEvent::Back);
                }
                if focus < self.submit_index() {
                    self.focus_next();
                    if self.focus != self.submit_index() {
                        return None;
                    }
                }
                if let Some(label) = self.missing_required() {
                    self.status.set_error(format!("{label} cannot be empty"));
                    return None;
                }
                return Some(FormEvent::Submit);
            }
            _ => {}
        }
        None
    }

    /// Height needed to render every field, the buttons and the status line.
    pub fn height(&self) -> u16 {
        self.fields.len() as u16 * 3 + 4
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut constraints: Vec<Constraint> =
            self.fields.iter().map(|_| Constraint::Length(3)).collect();
        constraints.extend([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ]);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (i, field) in self.fields.iter().enumerate() {
            let focused = i == self.focus;
            let mut label = if field.required && !field.locked {
                format!(" {}* ", field.label)
            } else {
                format!(" {} ", field.label)
            };
            if field.choices.is_some() && !field.locked {
                label.push_str("(←/→) ");
            }

            let value = if field.choices.is_some() {
                format!("◄ {} ►", field.value)
            } else {
                field.value.clone()
            };

            let input = Paragraph::new(value)
                .style(
                    Style::default()
                        .fg(if field.locked { MUTED } else { TEXT })
                        .bg(INPUT_BG),
                )
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .title(Span::styled(label, Style::default().fg(TITLE)))
                        .border_style(Style::default().fg(if focused { FOCUS } else { BORDER_IDLE }))
                        .style(Style::default().bg(INPUT_BG)),
                );
            frame.render_widget(input, layout[i]);
        }

        let n = self.fields.len();
        self.status.render(frame, layout[n]);
        button(frame, layout[n + 1], self.submit_label, self.focus == self.submit_index(), SUCCESS);
        button(frame, layout[n + 2], "Back", self.focus == self.back_index(), ACCENT);
    }
}

/// What a key press in a [`RecordTable`] asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    /// Enter on the row at this index.
    Activate(usize),
    Back,
}

/// A scrollable table of string rows with an optional check mark per row.
#[derive(Debug, Default)]
pub struct RecordTable {
    headers: Vec<&'static str>,
    widths: Vec<u16>,
    rows: Vec<Vec<String>>,
    marks: Option<Vec<bool>>,
    state: TableState,
}

impl RecordTable {
    /// `columns` pairs each header with its width in percent.
    pub fn new(columns: &[(&'static str, u16)]) -> Self {
        Self {
            headers: columns.iter().map(|(h, _)| *h).collect(),
            widths: columns.iter().map(|(_, w)| *w).collect(),
            ..Self::default()
        }
    }

    /// Adds a check-mark column, toggled with [`RecordTable::toggle_mark`].
    pub fn with_marks(mut self) -> Self {
        self.marks = Some(Vec::new());
        self
    }

    /// Replaces the rows, keeping the selection in bounds and clearing marks.
    pub fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        if let Some(marks) = &mut self.marks {
            *marks = vec![false; rows.len()];
        }
        self.rows = rows;
        if self.rows.is_empty() {
            self.state.select(None);
        } else {
            let selection = self.state.selected().unwrap_or(0).min(self.rows.len() - 1);
            self.state.select(Some(selection));
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.rows.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.rows.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn toggle_mark(&mut self) {
        if let (Some(marks), Some(i)) = (&mut self.marks, self.state.selected()) {
            if let Some(mark) = marks.get_mut(i) {
                *mark = !*mark;
            }
        }
    }

    pub fn mark(&mut self, index: usize) {
        if let Some(mark) = self.marks.as_mut().and_then(|m| m.get_mut(index)) {
            *mark = true;
        }
    }

    /// Marks every row, or clears every mark if all rows are already marked.
    pub fn toggle_all_marks(&mut self) {
        if let Some(marks) = &mut self.marks {
            let all = marks.iter().all(|&m| m);
            marks.iter_mut().for_each(|m| *m = !all);
        }
    }

    pub fn clear_marks(&mut self) {
        if let Some(marks) = &mut self.marks {
            marks.iter_mut().for_each(|m| *m = false);
        }
    }

    pub fn marked(&self) -> Vec<usize> {
        self.marks
            .as_ref()
            .map(|marks| {
                marks
                    .iter()
                    .enumerate()
                    .filter(|(_, &m)| m)
                    .map(|(i, _)| i)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Handles navigation keys. Other keys are left to the caller.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<TableEvent> {
        match key.code {
            KeyCode::Down => self.select_next(),
            KeyCode::Up => self.select_previous(),
            KeyCode::Enter => return self.state.selected().map(TableEvent::Activate),
            KeyCode::Esc => return Some(TableEvent::Back),
            _ => {}
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str, focused: bool) {
        let mut headers: Vec<&str> = Vec::new();
        let mut widths: Vec<Constraint> = Vec::new();
        if self.marks.is_some() {
            headers.push("");
            widths.push(Constraint::Length(3));
        }
        headers.extend(self.headers.iter().copied());
        widths.extend(self.widths.iter().map(|w| Constraint::Percentage(*w)));

        let header = Row::new(
            headers
                .into_iter()
                .map(|h| Cell::from(h).style(Style::default().fg(TITLE))),
        )
        .style(Style::default().bg(INPUT_BG))
        .height(1)
        .bottom_margin(1);

        let rows = self.rows.iter().enumerate().map(|(i, row)| {
            let mut cells: Vec<Cell> = Vec::new();
            if let Some(marks) = &self.marks {
                let checked = marks.get(i).copied().unwrap_or(false);
                cells.push(Cell::from(if checked { "[x]" } else { "[ ]" }));
            }
            cells.extend(row.iter().map(|value| Cell::from(value.clone())));
            Row::new(cells)
                .style(Style::default().fg(TEXT))
                .height(1)
        });

        let highlight = if focused {
            Style::default().bg(HIGHLIGHT_BG).add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::Rgb(30, 30, 45))
        };

        let table = Table::new(rows, widths)
            .header(header)
            .block(panel(title, focused))
            .row_highlight_style(highlight)
            .highlight_symbol(if focused { "► " } else { "  " });

        frame.render_stateful_widget(table, area, &mut self.state.clone());

        if self.rows.is_empty() {
            let inner = centered_rect(80, 30, area);
            frame.render_widget(
                Paragraph::new("No records found.")
                    .style(Style::default().fg(MUTED))
                    .alignment(Alignment::Center),
                inner,
            );
        }
    }
}

/// A Yes/No confirmation dialog. `No` is preselected.
#[derive(Debug, Default)]
pub struct ConfirmDialog {
    pub open: bool,
    yes_selected: bool,
}

impl ConfirmDialog {
    pub fn show(&mut self) {
        self.open = true;
        self.yes_selected = false;
    }

    /// Returns `Some(true)` when confirmed, `Some(false)` when dismissed.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.yes_selected = !self.yes_selected;
                None
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.open = false;
                Some(true)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.open = false;
                Some(false)
            }
            KeyCode::Enter => {
                self.open = false;
                Some(self.yes_selected)
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, title: &str, message: &str) {
        if !self.open {
            return;
        }
        let area = frame.area();
        let width = 50.min(area.width);
        let height = 8.min(area.height);
        let dialog_area = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(format!(" {title} "))
            .title_style(Style::default().fg(TITLE).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_IDLE))
            .style(Style::default().bg(DIALOG_BG));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(message.to_string())
                .style(Style::default().fg(TEXT).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            layout[0],
        );

        let buttons = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(layout[1]);
        button(frame, buttons[0], "Yes", self.yes_selected, SUCCESS);
        button(frame, buttons[1], "No", !self.yes_selected, ERROR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut Form, text: &str) {
        for c in text.chars() {
            form.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_form_skips_locked_fields() {
        let mut form = Form::new(vec![
            FormField::new("Patient ID").with_value("P1").locked(),
            FormField::new("Doctor ID"),
        ]);
        assert_eq!(form.focus(), 1);

        type_text(&mut form, "D1");
        form.handle_input(key(KeyCode::Up));
        // Back button, since the locked field is skipped.
        assert_eq!(form.focus(), 3);
        assert_eq!(form.values(), ["P1", "D1"]);
    }

    #[test]
    fn test_form_enter_walks_fields_then_submits() {
        let mut form = Form::new(vec![FormField::new("Name"), FormField::new("Role")]);
        type_text(&mut form, "Ann");
        assert_eq!(form.handle_input(key(KeyCode::Enter)), None);
        assert_eq!(form.focus(), 1);

        // Role is still empty.
        assert_eq!(form.handle_input(key(KeyCode::Enter)), None);
        assert!(form.status.is_error());

        form.handle_input(key(KeyCode::Up));
        type_text(&mut form, "Nurse");
        form.handle_input(key(KeyCode::Down));
        assert_eq!(form.handle_input(key(KeyCode::Enter)), Some(FormEvent::Submit));
    }

    #[test]
    fn test_choice_field_cycles() {
        const OPTIONS: &[&str] = &["General", "Private"];
        let mut form = Form::new(vec![FormField::choice("Room Type", OPTIONS)]);
        assert_eq!(form.value(0), "General");
        form.handle_input(key(KeyCode::Right));
        assert_eq!(form.value(0), "Private");
        form.handle_input(key(KeyCode::Right));
        assert_eq!(form.value(0), "General");
        type_text(&mut form, "xyz");
        assert_eq!(form.value(0), "General");
    }

    #[test]
    fn test_table_marks() {
        let mut table = RecordTable::new(&[("ID", 100)]).with_marks();
        table.set_rows(vec![vec!["A".into()], vec!["B".into()], vec!["C".into()]]);
        table.toggle_mark();
        table.select_next();
        table.select_next();
        table.toggle_mark();
        assert_eq!(table.marked(), [0, 2]);

        table.toggle_all_marks();
        assert_eq!(table.marked(), [0, 1, 2]);
        table.toggle_all_marks();
        assert!(table.marked().is_empty());
    }

    #[test]
    fn test_table_selection_wraps() {
        let mut table = RecordTable::new(&[("ID", 100)]);
        table.set_rows(vec![vec!["A".into()], vec!["B".into()]]);
        assert_eq!(table.selected(), Some(0));
        table.select_previous();
        assert_eq!(table.selected(), Some(1));
        table.select_next();
        assert_eq!(table.selected(), Some(0));

        table.set_rows(Vec::new());
        assert_eq!(table.selected(), None);
        assert_eq!(table.handle_input(key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_form_renders() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let form = Form::new(vec![FormField::new("Name").with_value("Ann")]);
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| form.render(frame, frame.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Ann"));
        assert!(text.contains("Submit"));
    }
}
