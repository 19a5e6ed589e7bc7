//! Interactive form screen.
//!
//! `FormView` draws the mounted `FormController` and turns key and mouse
//! events into `Interaction`s. All value changes go through the controller;
//! the view itself only keeps presentation state (focus, option cursors,
//! the open editor, scroll).

pub mod picker;
pub mod render;

use std::collections::HashMap;

use color_eyre::Result;
use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use forms::input::{file, text};
use forms::{Field, FieldKind, FormController, FormError, Interaction, PickResult, SubmitOutcome};
use ratatui::layout::Rect;
use tracing::{debug, info};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::{
    action::Action,
    components::Component,
    theme::Theme,
    tui::{EventResponse, Frame},
};
use picker::PathPicker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    /// Text, textarea and number fields.
    Text,
    /// Path prompt of a file field.
    Path,
}

#[derive(Debug, Clone)]
struct Editor {
    field: String,
    kind: EditorKind,
    input: Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Screen position of a slider track, recorded at draw time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderTrack {
    pub field: String,
    pub area: Rect,
}

#[derive(Debug)]
pub struct FormView {
    form: FormController,
    theme: Theme,
    /// Index into the visible fields; one past the end is the submit button.
    focused: usize,
    cursors: HashMap<String, usize>,
    editor: Option<Editor>,
    scroll: u16,
    slider_tracks: Vec<SliderTrack>,
    hit_areas: Vec<(usize, Rect)>,
    page_size: usize,
    dragging: Option<String>,
    notice: Option<Notice>,
}

impl FormView {
    pub fn new(form: FormController, theme: Theme) -> Self {
        Self {
            form,
            theme,
            focused: 0,
            cursors: HashMap::new(),
            editor: None,
            scroll: 0,
            slider_tracks: Vec::new(),
            hit_areas: Vec::new(),
            page_size: 3,
            dragging: None,
            notice: None,
        }
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    fn target_count(&self) -> usize {
        self.form.visible_fields().count() + 1
    }

    fn focused_field(&self) -> Option<&Field> {
        self.form.visible_fields().nth(self.focused)
    }

    fn cursor_of(&self, id: &str) -> usize {
        self.cursors.get(id).copied().unwrap_or(0)
    }

    fn focus(&mut self, index: usize) {
        let last = self.target_count() - 1;
        self.focused = index.min(last);
    }

    fn focus_next(&mut self, by: usize) {
        self.focus(self.focused.saturating_add(by));
    }

    fn focus_prev(&mut self, by: usize) {
        self.focus(self.focused.saturating_sub(by));
    }

    fn move_cursor(&mut self, id: &str, len: usize, delta: isize) {
        if len == 0 {
            return;
        }
        let current = self.cursor_of(id).min(len - 1) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.cursors.insert(id.to_string(), next);
    }

    /// Apply an interaction to the focused field. Controller errors become
    /// a notice; they never end the session.
    fn apply(&mut self, id: &str, interaction: Interaction) -> Option<EventResponse<Action>> {
        match self.form.apply(id, interaction) {
            Ok(_) => {}
            Err(err) => self.set_notice(NoticeLevel::Error, err.to_string()),
        }
        Some(EventResponse::Stop(Action::Update))
    }

    fn set_notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            text: text.into(),
        });
    }

    fn open_editor(&mut self, field: &Field, kind: EditorKind) {
        let initial = match kind {
            EditorKind::Text => match &field.kind {
                FieldKind::Number(_) => forms::input::number::display(self.form.value(&field.id)),
                _ => self.form.value(&field.id).as_text().into_owned(),
            },
            EditorKind::Path => String::new(),
        };
        debug!(field = %field.id, ?kind, "editor opened");
        self.editor = Some(Editor {
            field: field.id.clone(),
            kind,
            input: Input::new(initial),
        });
    }

    /// Enter / Space on the focused target.
    fn activate(&mut self, space: bool) -> Option<EventResponse<Action>> {
        let Some(field) = self.focused_field().cloned() else {
            return if space {
                None
            } else {
                Some(EventResponse::Stop(Action::Submit))
            };
        };
        let cursor = self.cursor_of(&field.id);
        match &field.kind {
            FieldKind::Text(_) | FieldKind::Textarea(_) | FieldKind::Number(_) if !space => {
                self.open_editor(&field, EditorKind::Text);
                Some(EventResponse::Stop(Action::Update))
            }
            FieldKind::Radio(attrs) => {
                let value = attrs.options.get(cursor)?.value.clone();
                self.apply(&field.id, Interaction::Select(value))
            }
            FieldKind::Checkbox(attrs) => {
                let value = attrs.options.get(cursor)?.value.clone();
                self.apply(&field.id, Interaction::Toggle(value))
            }
            FieldKind::File(_) if !space => {
                self.open_editor(&field, EditorKind::Path);
                Some(EventResponse::Stop(Action::Update))
            }
            _ => None,
        }
    }

    /// Left / Right on the focused field.
    fn step(&mut self, delta: i8) -> Option<EventResponse<Action>> {
        let field = self.focused_field()?.clone();
        match &field.kind {
            FieldKind::Number(_) => {
                let interaction = if delta > 0 {
                    Interaction::Increment
                } else {
                    Interaction::Decrement
                };
                self.apply(&field.id, interaction)
            }
            FieldKind::Slider(_) => self.apply(&field.id, Interaction::Nudge(delta)),
            FieldKind::Radio(attrs) | FieldKind::Checkbox(attrs) => {
                self.move_cursor(&field.id, attrs.options.len(), delta as isize);
                Some(EventResponse::Stop(Action::Update))
            }
            FieldKind::File(_) => {
                let len = file::files_of(self.form.value(&field.id)).len();
                self.move_cursor(&field.id, len, delta as isize);
                Some(EventResponse::Stop(Action::Update))
            }
            _ => None,
        }
    }

    fn remove_file_at_cursor(&mut self) -> Option<EventResponse<Action>> {
        let field = self.focused_field()?.clone();
        if !matches!(field.kind, FieldKind::File(_)) {
            return None;
        }
        let cursor = self.cursor_of(&field.id);
        let response = self.apply(&field.id, Interaction::RemoveFile(cursor));
        let len = file::files_of(self.form.value(&field.id)).len();
        self.cursors.insert(field.id.clone(), cursor.min(len.saturating_sub(1)));
        response
    }

    fn handle_editor_key(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        let Some(mut editor) = self.editor.take() else {
            return Ok(None);
        };
        match (editor.kind, key.code) {
            (EditorKind::Path, KeyCode::Enter) => {
                let paths = PathPicker::parse(editor.input.value());
                return Ok(Some(EventResponse::Stop(Action::PickFiles {
                    field: editor.field,
                    paths,
                })));
            }
            (EditorKind::Path, KeyCode::Esc) => {
                return Ok(Some(EventResponse::Stop(Action::PickFiles {
                    field: editor.field,
                    paths: Vec::new(),
                })));
            }
            (EditorKind::Text, KeyCode::Enter) if self.is_multiline(&editor) => {
                editor.input = insert_at_cursor(&editor.input, "\n");
            }
            (EditorKind::Text, KeyCode::Enter | KeyCode::Esc | KeyCode::Tab) => {
                debug!(field = %editor.field, "editor closed");
                return Ok(Some(EventResponse::Stop(Action::Update)));
            }
            _ => {
                editor.input.handle_event(&CrosstermEvent::Key(key));
            }
        }

        self.sync_editor(&mut editor);
        self.editor = Some(editor);
        Ok(Some(EventResponse::Stop(Action::Update)))
    }

    fn is_multiline(&self, editor: &Editor) -> bool {
        editor.kind == EditorKind::Text
            && self
                .form
                .schema()
                .field(&editor.field)
                .is_some_and(|f| matches!(f.kind, FieldKind::Textarea(_)))
    }

    /// Push the editor text into the controller after a keystroke.
    fn sync_editor(&mut self, editor: &mut Editor) {
        if editor.kind != EditorKind::Text {
            return;
        }
        let Some(field) = self.form.schema().field(&editor.field) else {
            return;
        };
        let typed = editor.input.value().to_string();
        let text = match field.kind.text_attrs() {
            Some(attrs) => text::clip_to_max_length(attrs, &typed),
            None => typed.clone(),
        };
        if text != typed {
            editor.input = Input::new(text.clone());
        }
        if let Err(err) = self.form.apply(&editor.field, Interaction::SetText(text)) {
            self.set_notice(NoticeLevel::Error, err.to_string());
        }
    }

    fn submit(&mut self) -> Option<Action> {
        self.editor = None;
        match self.form.submit() {
            SubmitOutcome::Submitted => {
                self.notice = None;
                Some(Action::Submitted(self.form.values().clone()))
            }
            SubmitOutcome::Invalid { errors } => {
                let first = self
                    .form
                    .visible_fields()
                    .position(|f| errors.contains(&f.id));
                if let Some(index) = first {
                    self.focus(index);
                }
                let count = errors.len();
                let noun = if count == 1 { "field needs" } else { "fields need" };
                self.set_notice(NoticeLevel::Warn, format!("{count} {noun} attention"));
                None
            }
        }
    }

    /// Resolve the typed paths and attach them to the file field `field`.
    pub async fn pick_files(&mut self, field: &str, paths: &[String]) -> Result<()> {
        let picker = PathPicker::new(paths);
        match self.form.pick_files(field, &picker).await {
            Ok(PickResult::Attached(count)) => {
                let noun = if count == 1 { "file" } else { "files" };
                self.set_notice(NoticeLevel::Info, format!("{count} {noun} attached"));
            }
            Ok(PickResult::Rejected { name }) => {
                self.set_notice(NoticeLevel::Warn, format!("{name} was not attached"));
            }
            Ok(PickResult::Cancelled | PickResult::Empty) => self.notice = None,
            Err(FormError::Picker(err)) => self.set_notice(NoticeLevel::Error, err.to_string()),
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn track_at(&self, column: u16, row: u16) -> Option<&SliderTrack> {
        self.slider_tracks.iter().find(|t| {
            row == t.area.y && column >= t.area.x && column < t.area.x + t.area.width
        })
    }

    fn drag(&mut self, id: &str, column: u16) -> Option<EventResponse<Action>> {
        let track = self.slider_tracks.iter().find(|t| t.field == id)?.area;
        let position = column.saturating_sub(track.x) as f64;
        let track_width = track.width.saturating_sub(1).max(1) as f64;
        self.apply(
            id,
            Interaction::Drag {
                position,
                track_width,
            },
        )
    }
}

impl Component for FormView {
    fn init(&mut self) -> Result<()> {
        info!(
            form = %self.form.schema().form_id,
            fields = self.form.schema().field_count(),
            "form mounted"
        );
        Ok(())
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return Ok(Some(EventResponse::Stop(Action::Quit))),
                KeyCode::Char('s') => return Ok(Some(EventResponse::Stop(Action::Submit))),
                _ => {}
            }
        }
        if self.editor.is_some() {
            return self.handle_editor_key(key);
        }

        let response = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(EventResponse::Stop(Action::Quit)),
            KeyCode::Down | KeyCode::Tab => {
                self.focus_next(1);
                Some(EventResponse::Stop(Action::Update))
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.focus_prev(1);
                Some(EventResponse::Stop(Action::Update))
            }
            KeyCode::PageDown => {
                self.focus_next(self.page_size);
                Some(EventResponse::Stop(Action::Update))
            }
            KeyCode::PageUp => {
                self.focus_prev(self.page_size);
                Some(EventResponse::Stop(Action::Update))
            }
            KeyCode::Home => {
                self.focus(0);
                Some(EventResponse::Stop(Action::Update))
            }
            KeyCode::End => {
                self.focus(usize::MAX);
                Some(EventResponse::Stop(Action::Update))
            }
            KeyCode::Enter => self.activate(false),
            KeyCode::Char(' ') => self.activate(true),
            KeyCode::Left | KeyCode::Char('-') => self.step(-1),
            KeyCode::Right | KeyCode::Char('+') => self.step(1),
            KeyCode::Delete | KeyCode::Backspace => self.remove_file_at_cursor(),
            _ => None,
        };
        Ok(response)
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Result<Option<EventResponse<Action>>> {
        let response = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(track) = self.track_at(mouse.column, mouse.row).cloned() {
                    self.editor = None;
                    let position = self.form.visible_fields().position(|f| f.id == track.field);
                    if let Some(index) = position {
                        self.focus(index);
                    }
                    self.dragging = Some(track.field.clone());
                    self.drag(&track.field, mouse.column)
                } else if let Some(&(index, _)) = self
                    .hit_areas
                    .iter()
                    .find(|(_, area)| area.contains((mouse.column, mouse.row).into()))
                {
                    self.editor = None;
                    self.focus(index);
                    if index + 1 == self.target_count() {
                        Some(EventResponse::Stop(Action::Submit))
                    } else {
                        Some(EventResponse::Stop(Action::Update))
                    }
                } else {
                    None
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => match self.dragging.clone() {
                Some(id) => self.drag(&id, mouse.column),
                None => None,
            },
            MouseEventKind::Up(MouseButton::Left) => {
                self.dragging = None;
                None
            }
            MouseEventKind::ScrollDown if self.editor.is_none() => {
                self.focus_next(1);
                Some(EventResponse::Stop(Action::Update))
            }
            MouseEventKind::ScrollUp if self.editor.is_none() => {
                self.focus_prev(1);
                Some(EventResponse::Stop(Action::Update))
            }
            _ => None,
        };
        Ok(response)
    }

    fn handle_paste(&mut self, pasted: String) -> Result<Option<EventResponse<Action>>> {
        let Some(mut editor) = self.editor.take() else {
            return Ok(None);
        };
        let pasted = if self.is_multiline(&editor) {
            pasted.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            pasted.replace(['\r', '\n'], " ")
        };
        editor.input = insert_at_cursor(&editor.input, &pasted);
        self.sync_editor(&mut editor);
        self.editor = Some(editor);
        Ok(Some(EventResponse::Stop(Action::Update)))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Submit => Ok(self.submit()),
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let metrics = render::render_form(self, f, area)?;
        self.page_size = (area.height as usize / 4).max(1);
        self.slider_tracks = metrics.slider_tracks;
        self.hit_areas = metrics.hit_areas;
        Ok(())
    }
}

/// Insert `text` at the cursor and leave the cursor after it.
fn insert_at_cursor(input: &Input, text: &str) -> Input {
    let value = input.value();
    let cursor = input.cursor();
    let at = value
        .char_indices()
        .nth(cursor)
        .map_or(value.len(), |(i, _)| i);
    let mut next = value.to_string();
    next.insert_str(at, text);
    Input::new(next).with_cursor(cursor + text.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use forms::{FieldValue, FormSchema};
    use pretty_assertions::assert_eq;

    fn schema() -> FormSchema {
        FormSchema::from_json_str(
            r#"{
                "formId": "visit",
                "title": "Store visit",
                "fields": [
                    {"id": "name", "label": "Name", "type": "text", "required": true, "maxLength": 5},
                    {"id": "qty", "label": "Qty", "type": "number", "min": 0, "max": 3},
                    {"id": "mood", "label": "Mood", "type": "radio",
                     "options": [{"label": "Good", "value": "good"}, {"label": "Bad", "value": "bad"}]},
                    {"id": "level", "label": "Level", "type": "slider", "min": 0, "max": 100, "step": 25},
                    {"id": "secret", "label": "Secret", "type": "text", "hidden": true}
                ]
            }"#,
        )
        .unwrap()
    }

    fn view() -> FormView {
        FormView::new(FormController::new(schema()).unwrap(), Theme::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(view: &mut FormView, code: KeyCode) -> Option<EventResponse<Action>> {
        view.handle_key_events(key(code)).unwrap()
    }

    #[test]
    fn focus_walks_visible_fields_then_submit() {
        let mut view = view();
        assert_eq!(view.target_count(), 5);
        press(&mut view, KeyCode::End);
        assert_eq!(view.focused(), 4);
        assert!(view.focused_field().is_none());
        press(&mut view, KeyCode::Down);
        assert_eq!(view.focused(), 4);
        press(&mut view, KeyCode::Home);
        press(&mut view, KeyCode::Up);
        assert_eq!(view.focused(), 0);
    }

    #[test]
    fn typing_goes_through_the_controller_and_clips() {
        let mut view = view();
        press(&mut view, KeyCode::Enter);
        assert!(view.is_editing());
        for c in "Annabel".chars() {
            press(&mut view, KeyCode::Char(c));
        }
        assert_eq!(view.form().value("name"), &FieldValue::from("Annab"));
        press(&mut view, KeyCode::Enter);
        assert!(!view.is_editing());
    }

    #[test]
    fn arrows_step_numbers_and_pick_options() {
        let mut view = view();
        press(&mut view, KeyCode::Down);
        for _ in 0..5 {
            press(&mut view, KeyCode::Right);
        }
        assert_eq!(view.form().value("qty"), &FieldValue::from(3));

        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Right);
        press(&mut view, KeyCode::Char(' '));
        assert_eq!(view.form().value("mood"), &FieldValue::from("bad"));

        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Right);
        assert_eq!(view.form().value("level"), &FieldValue::from(25));
    }

    #[test]
    fn invalid_submit_focuses_first_error() {
        let mut view = view();
        press(&mut view, KeyCode::End);
        let response = press(&mut view, KeyCode::Enter);
        assert_eq!(response, Some(EventResponse::Stop(Action::Submit)));
        assert_eq!(view.update(Action::Submit).unwrap(), None);
        assert_eq!(view.focused(), 0);
        assert_eq!(view.notice().map(|n| n.level), Some(NoticeLevel::Warn));
    }

    #[test]
    fn valid_submit_emits_values() {
        let mut view = view();
        press(&mut view, KeyCode::Enter);
        press(&mut view, KeyCode::Char('A'));
        press(&mut view, KeyCode::Esc);
        let Some(Action::Submitted(values)) = view.update(Action::Submit).unwrap() else {
            panic!("expected submitted values");
        };
        assert_eq!(values.get("name"), Some(&FieldValue::from("A")));
        assert!(values.contains("secret"));
    }

    #[test]
    fn slider_drag_maps_columns_to_values() {
        let mut view = view();
        view.slider_tracks = vec![SliderTrack {
            field: "level".into(),
            area: Rect::new(10, 5, 5, 1),
        }];
        let down = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        view.handle_mouse_events(down).unwrap();
        assert_eq!(view.focused(), 3);
        assert_eq!(view.form().value("level"), &FieldValue::from(50));

        let drag = MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 40,
            ..down
        };
        view.handle_mouse_events(drag).unwrap();
        assert_eq!(view.form().value("level"), &FieldValue::from(100));
    }

    #[test]
    fn escape_in_path_prompt_is_a_cancelled_pick() {
        let schema = FormSchema::from_json_str(
            r#"{"formId": "f", "title": "F", "fields": [
                {"id": "docs", "label": "Docs", "type": "file", "multiple": true}
            ]}"#,
        )
        .unwrap();
        let mut view = FormView::new(FormController::new(schema).unwrap(), Theme::default());
        press(&mut view, KeyCode::Enter);
        assert!(view.is_editing());
        let response = press(&mut view, KeyCode::Esc);
        assert_eq!(
            response,
            Some(EventResponse::Stop(Action::PickFiles {
                field: "docs".into(),
                paths: vec![],
            }))
        );
        assert!(!view.is_editing());
    }

    #[tokio::test]
    async fn picked_paths_attach_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "hello").unwrap();

        let schema = FormSchema::from_json_str(
            r#"{"formId": "f", "title": "F", "fields": [
                {"id": "docs", "label": "Docs", "type": "file", "multiple": true}
            ]}"#,
        )
        .unwrap();
        let mut view = FormView::new(FormController::new(schema).unwrap(), Theme::default());
        view.pick_files("docs", &[path.display().to_string()]).await.unwrap();
        assert_eq!(file::files_of(view.form().value("docs")).len(), 1);
        assert_eq!(view.notice().map(|n| n.text.as_str()), Some("1 file attached"));

        view.pick_files("docs", &["/definitely/not/here".to_string()])
            .await
            .unwrap();
        assert_eq!(view.notice().map(|n| n.level), Some(NoticeLevel::Error));
        assert_eq!(file::files_of(view.form().value("docs")).len(), 1);
    }

    fn notes_view() -> FormView {
        let schema = FormSchema::from_json_str(
            r#"{"formId": "f", "title": "F", "fields": [
                {"id": "notes", "label": "Notes", "type": "textarea"},
                {"id": "name", "label": "Name", "type": "text"}
            ]}"#,
        )
        .unwrap();
        FormView::new(FormController::new(schema).unwrap(), Theme::default())
    }

    #[test]
    fn textarea_keeps_typed_line_breaks() {
        let mut view = notes_view();
        press(&mut view, KeyCode::Enter);
        press(&mut view, KeyCode::Char('a'));
        press(&mut view, KeyCode::Enter);
        assert!(view.is_editing());
        press(&mut view, KeyCode::Char('b'));
        press(&mut view, KeyCode::Left);
        press(&mut view, KeyCode::Left);
        press(&mut view, KeyCode::Enter);
        assert_eq!(view.form().value("notes"), &FieldValue::from("a\n\nb"));
        press(&mut view, KeyCode::Esc);
        assert!(!view.is_editing());
    }

    #[test]
    fn paste_keeps_newlines_only_in_textarea() {
        let mut view = notes_view();
        press(&mut view, KeyCode::Enter);
        view.handle_paste("one\r\ntwo".into()).unwrap();
        assert_eq!(view.form().value("notes"), &FieldValue::from("one\ntwo"));
        press(&mut view, KeyCode::Esc);

        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Enter);
        view.handle_paste("one\ntwo".into()).unwrap();
        assert_eq!(view.form().value("name"), &FieldValue::from("one two"));
        press(&mut view, KeyCode::Enter);
        assert!(!view.is_editing());
    }
}
