use color_eyre::Result;
use forms::input::{file, number, options, slider, text};
use forms::value::fmt_number;
use forms::{Field, FieldError, FieldKind, FieldValue, OptionsAttrs, OptionsLayout, SliderAttrs};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::{EditorKind, FormView, Notice, NoticeLevel, SliderTrack};
use crate::theme::{Theme, UiGroup};
use crate::tui::Frame;

/// Left indent of value rows, in cells.
pub const INDENT: u16 = 2;
const MIN_TRACK: u16 = 10;
const MAX_TRACK: u16 = 48;
/// Rows a textarea occupies while it is being edited.
const TEXTAREA_ROWS: usize = 4;

/// Geometry produced during rendering; the view keeps it for mouse mapping.
#[derive(Debug, Clone, Default)]
pub struct FormRenderMetrics {
    pub total_lines: usize,
    pub scroll: u16,
    pub thumb_y: Option<usize>,
    pub slider_tracks: Vec<SliderTrack>,
    /// Screen rows occupied by each focus target (fields, then submit).
    pub hit_areas: Vec<(usize, Rect)>,
}

/// Per-field rendering context.
pub struct FieldCtx<'a> {
    pub theme: &'a Theme,
    pub focused: bool,
    /// Option / file cursor of the field.
    pub cursor: usize,
    /// Editor contents while this field is being edited.
    pub editor: Option<&'a str>,
    pub editor_kind: Option<EditorKind>,
    pub width: u16,
}

/// Lines of one field plus the positions the view needs back.
#[derive(Debug, Default)]
pub struct FieldBlock {
    pub lines: Vec<Line<'static>>,
    /// (line, x offset, width) of a slider track.
    pub slider: Option<(usize, u16, u16)>,
    /// (line, x offset) where the editor text starts.
    pub editor: Option<(usize, u16)>,
}

/// Pure helper computing the vertical thumb position for a
/// scrollbar-like indicator.
///
/// Arguments:
/// - `total`        : total number of content lines
/// - `visible`      : number of lines that can be shown simultaneously
/// - `scroll`       : current scroll offset
/// - `track_height` : height in terminal cells of the track area
///
/// Returns `None` if no scrollbar is needed.
pub fn compute_scrollbar_thumb(
    total: usize,
    visible: usize,
    scroll: usize,
    track_height: u16,
) -> Option<usize> {
    if track_height == 0 {
        return None;
    }
    if total == 0 || visible == 0 || total <= visible {
        return None;
    }

    let max_thumb_y = track_height.saturating_sub(1) as usize;
    let denom = total.saturating_sub(visible).max(1);
    let ratio = (scroll as f32) / (denom as f32);
    let thumb_y = (ratio * (max_thumb_y as f32)).round() as usize;
    Some(thumb_y.min(max_thumb_y))
}

/// Row and character column of `cursor` (a char index) in `value`.
pub fn cursor_row_col(value: &str, cursor: usize) -> (usize, usize) {
    value
        .chars()
        .take(cursor)
        .fold((0, 0), |(row, col), c| if c == '\n' { (row + 1, 0) } else { (row, col + 1) })
}

/// Width of a slider track for a content area `width` cells wide.
pub fn track_width(width: u16) -> u16 {
    width
        .saturating_sub(INDENT + 12)
        .clamp(MIN_TRACK, MAX_TRACK)
}

/// Render the whole form screen.
///
/// Mutates only `view.scroll`, so the focused field stays in view.
pub fn render_form(view: &mut FormView, f: &mut Frame<'_>, area: Rect) -> Result<FormRenderMetrics> {
    if area.width < 10 || area.height < 6 {
        return Ok(FormRenderMetrics::default());
    }

    f.render_widget(Clear, area);
    let block = Block::default()
        .title(format!(" {} ", view.form.schema().title))
        .title_style(view.theme.style(UiGroup::Title))
        .borders(Borders::ALL)
        .border_set(symbols::border::ROUNDED)
        .border_style(view.theme.style(UiGroup::Border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [content_area, notice_area, footer_area] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    // One column on the right for the scrollbar.
    let content = Rect {
        width: content_area.width.saturating_sub(1),
        ..content_area
    };

    let mut lines: Vec<Line<'static>> = Vec::new();
    if let Some(desc) = &view.form.schema().description {
        for l in desc.lines() {
            lines.push(Line::styled(l.to_string(), view.theme.style(UiGroup::Description)));
        }
        lines.push(Line::raw(""));
    }

    // (start line, line count) per focus target
    let mut spans_of: Vec<(usize, usize)> = Vec::new();
    let mut sliders: Vec<(String, usize, u16, u16)> = Vec::new();
    let mut editor_at: Option<(usize, u16)> = None;

    let fields: Vec<&Field> = view.form.visible_fields().collect();
    for (idx, field) in fields.iter().enumerate() {
        let focused = idx == view.focused;
        let editing = view.editor.as_ref().filter(|e| e.field == field.id);
        let ctx = FieldCtx {
            theme: &view.theme,
            focused,
            cursor: view.cursor_of(&field.id),
            editor: editing.map(|e| e.input.value()),
            editor_kind: editing.map(|e| e.kind),
            width: content.width,
        };
        let block = field_block(field, view.form.value(&field.id), view.form.error(&field.id), &ctx);

        let start = lines.len();
        if let Some((line, x, w)) = block.slider {
            sliders.push((field.id.clone(), start + line, x, w));
        }
        if let Some((line, x)) = block.editor {
            editor_at = Some((start + line, x));
        }
        let count = block.lines.len();
        lines.extend(block.lines);
        lines.push(Line::raw(""));
        spans_of.push((start, count));
    }

    let submit_focused = view.focused == fields.len();
    let button_style = if submit_focused {
        view.theme.style(UiGroup::ButtonFocused)
    } else {
        view.theme.style(UiGroup::Button)
    };
    spans_of.push((lines.len(), 1));
    lines.push(Line::from(vec![
        Span::raw(" ".repeat(INDENT as usize)),
        Span::styled(format!("[ {} ]", view.form.schema().submit_label()), button_style),
    ]));

    // Keep the focused target in view.
    let height = content.height as usize;
    let total_lines = lines.len();
    if let Some(&(start, count)) = spans_of.get(view.focused) {
        let mut scroll = view.scroll as usize;
        if view.focused == 0 {
            scroll = 0;
        } else if start < scroll {
            scroll = start;
        } else if start + count > scroll + height {
            scroll = (start + count).saturating_sub(height).min(start);
        }
        view.scroll = scroll.min(u16::MAX as usize) as u16;
    }
    let scroll = view.scroll as usize;

    f.render_widget(
        Paragraph::new(Text::from(lines)).scroll((view.scroll, 0)),
        content,
    );

    let row_of = |line: usize| -> Option<u16> {
        (line >= scroll && line < scroll + height).then(|| content.y + (line - scroll) as u16)
    };

    let slider_tracks = sliders
        .into_iter()
        .filter_map(|(field, line, x, width)| {
            row_of(line).map(|y| SliderTrack {
                field,
                area: Rect::new(content.x + x, y, width, 1),
            })
        })
        .collect();

    let hit_areas = spans_of
        .iter()
        .enumerate()
        .filter_map(|(idx, &(start, count))| {
            let first = start.max(scroll);
            let last = (start + count).min(scroll + height);
            (first < last).then(|| {
                (
                    idx,
                    Rect::new(content.x, content.y + (first - scroll) as u16, content.width, (last - first) as u16),
                )
            })
        })
        .collect();

    if let (Some((line, x)), Some(editor)) = (editor_at, view.editor.as_ref()) {
        if let Some(y) = row_of(line) {
            let max_x = content.x + content.width.saturating_sub(1);
            let max_y = content.y + content.height.saturating_sub(1);
            let (row, col) = cursor_row_col(editor.input.value(), editor.input.cursor());
            // visual_cursor accounts for wide characters but not line breaks
            let col = if row == 0 { editor.input.visual_cursor() } else { col };
            let cursor_x = (content.x + x).saturating_add(col as u16);
            let cursor_y = y.saturating_add(row as u16);
            f.set_cursor_position(Position::new(cursor_x.min(max_x), cursor_y.min(max_y)));
        }
    }

    // Scrollbar / track
    let track_rect = Rect {
        x: content_area.x + content_area.width.saturating_sub(1),
        y: content_area.y,
        width: 1,
        height: content_area.height,
    };
    let thumb_y = compute_scrollbar_thumb(total_lines, height, scroll, track_rect.height);
    if let Some(thumb) = thumb_y {
        let track_lines: Vec<Line> = (0..track_rect.height)
            .map(|i| {
                if i as usize == thumb {
                    Line::styled("█", view.theme.style(UiGroup::Thumb))
                } else {
                    Line::styled("│", view.theme.style(UiGroup::Track))
                }
            })
            .collect();
        f.render_widget(Paragraph::new(Text::from(track_lines)), track_rect);
    }

    if let Some(notice) = &view.notice {
        f.render_widget(Paragraph::new(notice_line(notice, &view.theme)), notice_area);
    }
    f.render_widget(Paragraph::new(footer_line(view, &fields)), footer_area);

    Ok(FormRenderMetrics {
        total_lines,
        scroll: view.scroll,
        thumb_y,
        slider_tracks,
        hit_areas,
    })
}

/// Label, help, value rows and inline error of one field.
pub fn field_block(
    field: &Field,
    value: &FieldValue,
    error: Option<&FieldError>,
    ctx: &FieldCtx<'_>,
) -> FieldBlock {
    let theme = ctx.theme;
    let mut block = FieldBlock::default();

    let marker = if ctx.focused { "▸ " } else { "  " };
    let mut label_style = theme.style(UiGroup::Label);
    if ctx.focused {
        label_style = label_style.add_modifier(Modifier::BOLD);
    }
    let mut header = vec![
        Span::styled(marker, theme.style(UiGroup::Thumb)),
        Span::styled(field.label.clone(), label_style),
    ];
    if field.required {
        header.push(Span::styled(" *", theme.style(UiGroup::Required)));
    }
    if let Some(hint) = field.kind.text_attrs().and_then(text::keyboard_hint) {
        header.push(Span::styled(format!("  ({hint})"), theme.style(UiGroup::Hint)));
    }
    block.lines.push(Line::from(header));

    if let Some(help) = &field.help_text {
        block.lines.push(Line::from(vec![
            indent(),
            Span::styled(help.clone(), theme.style(UiGroup::Help)),
        ]));
    }

    match &field.kind {
        FieldKind::Text(attrs) | FieldKind::Textarea(attrs) => {
            let editing = ctx.editor.filter(|_| ctx.editor_kind == Some(EditorKind::Text));
            let shown = match editing {
                Some(input) => text::display(attrs, &FieldValue::from(input)),
                None => text::display(attrs, value),
            };
            let counter = attrs
                .max_length
                .filter(|max| *max > 0)
                .map(|max| format!("  {}/{}", shown.chars().count(), max));

            if editing.is_some() {
                block.editor = Some((block.lines.len(), INDENT));
                let min_rows = if matches!(field.kind, FieldKind::Textarea(_)) {
                    TEXTAREA_ROWS
                } else {
                    1
                };
                let mut rows: Vec<Line<'static>> = shown
                    .split('\n')
                    .map(|l| Line::from(vec![indent(), Span::styled(l.to_string(), theme.style(UiGroup::Focused))]))
                    .collect();
                while rows.len() < min_rows {
                    rows.push(Line::from(indent()));
                }
                if let (Some(counter), Some(first)) = (counter, rows.first_mut()) {
                    first.spans.push(Span::styled(counter, theme.style(UiGroup::Hint)));
                }
                block.lines.extend(rows);
            } else if let Some(placeholder) = text::placeholder(attrs, value) {
                block.lines.push(Line::from(vec![
                    indent(),
                    Span::styled(placeholder.to_string(), theme.style(UiGroup::Placeholder)),
                ]));
            } else {
                let mut rows: Vec<Line<'static>> = shown
                    .split('\n')
                    .map(|l| Line::from(vec![indent(), Span::styled(l.to_string(), theme.style(UiGroup::Value))]))
                    .collect();
                if let (Some(counter), Some(last)) = (counter, rows.last_mut()) {
                    last.spans.push(Span::styled(counter, theme.style(UiGroup::Hint)));
                }
                block.lines.extend(rows);
            }
        }
        FieldKind::Number(attrs) => {
            let editing = ctx.editor.filter(|_| ctx.editor_kind == Some(EditorKind::Text));
            let mut row = vec![indent(), Span::styled("[-] ", theme.style(UiGroup::Hint))];
            match editing {
                Some(input) => {
                    block.editor = Some((block.lines.len(), INDENT + 4));
                    row.push(Span::styled(input.to_string(), theme.style(UiGroup::Focused)));
                }
                None => row.push(Span::styled(number::display(value), theme.style(UiGroup::Value))),
            }
            row.push(Span::styled(" [+]", theme.style(UiGroup::Hint)));
            if let Some(hint) = number::range_hint(attrs) {
                row.push(Span::styled(format!("   {hint}"), theme.style(UiGroup::Hint)));
            }
            block.lines.push(Line::from(row));
        }
        FieldKind::Radio(attrs) | FieldKind::Checkbox(attrs) => {
            let multi = matches!(field.kind, FieldKind::Checkbox(_));
            block.lines.extend(option_rows(attrs, value, multi, ctx));
        }
        FieldKind::Slider(attrs) => {
            let width = track_width(ctx.width);
            block.slider = Some((block.lines.len(), INDENT, width));
            block.lines.push(slider_row(attrs, value, width, theme));
            if attrs.show_ticks {
                block.lines.extend(tick_rows(attrs, width, theme));
            }
        }
        FieldKind::File(attrs) => {
            let files = file::files_of(value);
            if files.is_empty() {
                block.lines.push(Line::from(vec![
                    indent(),
                    Span::styled("No file selected", theme.style(UiGroup::Placeholder)),
                ]));
            }
            for (idx, info) in files.iter().enumerate() {
                let on_cursor = ctx.focused && idx == ctx.cursor;
                let style = if on_cursor {
                    theme.style(UiGroup::Focused)
                } else {
                    theme.style(UiGroup::Value)
                };
                let mut row = vec![indent(), Span::styled(info.name.clone(), style)];
                let size = file::format_size(info.size);
                if !size.is_empty() {
                    row.push(Span::styled(format!("  {size}"), theme.style(UiGroup::Hint)));
                }
                block.lines.push(Line::from(row));
            }

            let editing = ctx.editor.filter(|_| ctx.editor_kind == Some(EditorKind::Path));
            match editing {
                Some(input) => {
                    let prompt = "Path: ";
                    block.editor = Some((block.lines.len(), INDENT + prompt.len() as u16));
                    block.lines.push(Line::from(vec![
                        indent(),
                        Span::styled(prompt, theme.style(UiGroup::Label)),
                        Span::styled(input.to_string(), theme.style(UiGroup::Focused)),
                    ]));
                }
                None => {
                    let what = if attrs.multiple { "Add files" } else { "Choose file" };
                    let mut row = vec![indent(), Span::styled(format!("[ {what} ]"), theme.style(UiGroup::Button))];
                    let mut limits = Vec::new();
                    if let Some(accept) = &attrs.accept {
                        limits.push(accept.clone());
                    }
                    if let Some(mb) = attrs.max_size_mb {
                        limits.push(format!("max {}MB", fmt_number(mb)));
                    }
                    if !limits.is_empty() {
                        row.push(Span::styled(format!("  {}", limits.join(" · ")), theme.style(UiGroup::Hint)));
                    }
                    block.lines.push(Line::from(row));
                }
            }
        }
    }

    if let Some(err) = error {
        block.lines.push(Line::from(vec![
            indent(),
            Span::styled(format!("⚠ {err}"), theme.style(UiGroup::Error)),
        ]));
    }

    block
}

fn indent() -> Span<'static> {
    Span::raw(" ".repeat(INDENT as usize))
}

fn option_rows(
    attrs: &OptionsAttrs,
    value: &FieldValue,
    multi: bool,
    ctx: &FieldCtx<'_>,
) -> Vec<Line<'static>> {
    let theme = ctx.theme;
    let mark = |selected: bool| match (multi, selected) {
        (true, true) => "[x] ",
        (true, false) => "[ ] ",
        (false, true) => "(•) ",
        (false, false) => "( ) ",
    };
    let style_for = |idx: usize, selected: bool| {
        if ctx.focused && idx == ctx.cursor {
            theme.style(UiGroup::Focused)
        } else if selected {
            theme.style(UiGroup::Selected)
        } else {
            theme.style(UiGroup::Label)
        }
    };

    match attrs.layout() {
        OptionsLayout::Dropdown if !ctx.focused => {
            let chosen: Vec<&str> = attrs
                .options
                .iter()
                .filter(|o| options::is_selected(value, &o.value))
                .map(|o| o.label.as_str())
                .collect();
            let (label, style) = if chosen.is_empty() {
                ("Select…".to_string(), theme.style(UiGroup::Placeholder))
            } else {
                (chosen.join(", "), theme.style(UiGroup::Value))
            };
            vec![Line::from(vec![
                indent(),
                Span::styled(label, style),
                Span::styled(" ▾", theme.style(UiGroup::Hint)),
            ])]
        }
        OptionsLayout::Horizontal => {
            let mut row = vec![indent()];
            for (idx, option) in attrs.options.iter().enumerate() {
                let selected = options::is_selected(value, &option.value);
                if idx > 0 {
                    row.push(Span::raw("   "));
                }
                row.push(Span::styled(
                    format!("{}{}", mark(selected), option.label),
                    style_for(idx, selected),
                ));
            }
            vec![Line::from(row)]
        }
        OptionsLayout::Vertical | OptionsLayout::Dropdown => attrs
            .options
            .iter()
            .enumerate()
            .map(|(idx, option)| {
                let selected = options::is_selected(value, &option.value);
                Line::from(vec![
                    indent(),
                    Span::styled(format!("{}{}", mark(selected), option.label), style_for(idx, selected)),
                ])
            })
            .collect(),
    }
}

/// Index of the thumb cell on a track `width` cells wide.
pub fn thumb_index(attrs: &SliderAttrs, value: &FieldValue, width: u16) -> u16 {
    let last = width.saturating_sub(1) as f64;
    (slider::fill_ratio(attrs, value) * last).round() as u16
}

fn slider_row(attrs: &SliderAttrs, value: &FieldValue, width: u16, theme: &Theme) -> Line<'static> {
    let thumb = thumb_index(attrs, value, width);
    let filled = "━".repeat(thumb as usize);
    let rest = "─".repeat(width.saturating_sub(thumb + 1) as usize);
    let current = value.as_number().map(fmt_number).unwrap_or_default();
    Line::from(vec![
        indent(),
        Span::styled(filled, theme.style(UiGroup::Thumb)),
        Span::styled("●", theme.style(UiGroup::Thumb)),
        Span::styled(rest, theme.style(UiGroup::Track)),
        Span::styled(format!("  {current}"), theme.style(UiGroup::Value)),
    ])
}

fn tick_rows(attrs: &SliderAttrs, width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let mut marks = vec![' '; width as usize];
    for tick in slider::ticks(attrs) {
        let idx = thumb_index(attrs, &FieldValue::Number(tick), width) as usize;
        if let Some(cell) = marks.get_mut(idx) {
            *cell = '╵';
        }
    }
    let min = fmt_number(attrs.min);
    let max = fmt_number(attrs.max);
    let gap = (width as usize).saturating_sub(min.chars().count() + max.chars().count());
    vec![
        Line::from(vec![
            indent(),
            Span::styled(marks.into_iter().collect::<String>(), theme.style(UiGroup::Track)),
        ]),
        Line::from(vec![
            indent(),
            Span::styled(format!("{min}{}{max}", " ".repeat(gap)), theme.style(UiGroup::Hint)),
        ]),
    ]
}

fn notice_line(notice: &Notice, theme: &Theme) -> Line<'static> {
    let style = match notice.level {
        NoticeLevel::Info => theme.style(UiGroup::Selected),
        NoticeLevel::Warn => theme.style(UiGroup::Warn),
        NoticeLevel::Error => theme.style(UiGroup::Error),
    };
    Line::styled(notice.text.clone(), style)
}

fn footer_line(view: &FormView, fields: &[&Field]) -> Line<'static> {
    let key = |k: &str| Span::styled(k.to_string(), view.theme.style(UiGroup::Label));
    let hint = |h: &str| Span::styled(h.to_string(), view.theme.style(UiGroup::Hint));

    let mut spans = Vec::new();
    match view.editor.as_ref().map(|e| e.kind) {
        Some(EditorKind::Text) => {
            let multiline = view
                .editor
                .as_ref()
                .is_some_and(|e| view.is_multiline(e));
            if multiline {
                spans.extend([key("Enter"), hint(": new line   "), key("Esc/Tab"), hint(": done   ")]);
            } else {
                spans.extend([key("Enter/Esc"), hint(": done   ")]);
            }
        }
        Some(EditorKind::Path) => {
            spans.extend([
                key("Enter"),
                hint(": attach   "),
                key("Esc"),
                hint(": cancel   "),
                hint("separate paths with ','"),
            ]);
            return Line::from(spans);
        }
        None => {
            match fields.get(view.focused).map(|f| &f.kind) {
                Some(FieldKind::Text(_) | FieldKind::Textarea(_)) => {
                    spans.extend([key("Enter"), hint(": edit   ")]);
                }
                Some(FieldKind::Number(_)) => {
                    spans.extend([key("←/→"), hint(": -/+   "), key("Enter"), hint(": type   ")]);
                }
                Some(FieldKind::Radio(_)) => {
                    spans.extend([key("←/→"), hint(": move   "), key("Space"), hint(": select   ")]);
                }
                Some(FieldKind::Checkbox(_)) => {
                    spans.extend([key("←/→"), hint(": move   "), key("Space"), hint(": toggle   ")]);
                }
                Some(FieldKind::Slider(_)) => {
                    spans.extend([key("←/→"), hint(": step   "), key("Mouse"), hint(": drag   ")]);
                }
                Some(FieldKind::File(_)) => {
                    spans.extend([
                        key("Enter"),
                        hint(": add   "),
                        key("←/→"),
                        hint(": move   "),
                        key("Del"),
                        hint(": remove   "),
                    ]);
                }
                None => {
                    spans.extend([key("Enter"), hint(": submit   ")]);
                }
            }
        }
    }
    spans.extend([
        key("Tab/↑↓"),
        hint(": navigate   "),
        key("Ctrl-S"),
        hint(": submit   "),
        key("Esc"),
        hint(": quit"),
    ]);
    Line::from(spans).style(Style::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use forms::{InputType, NumberAttrs, OptionItem, TextAttrs};

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn ctx(theme: &Theme) -> FieldCtx<'_> {
        FieldCtx {
            theme,
            focused: false,
            cursor: 0,
            editor: None,
            editor_kind: None,
            width: 60,
        }
    }

    #[test]
    fn test_compute_scrollbar_thumb_basic() {
        assert_eq!(compute_scrollbar_thumb(10, 20, 0, 10), None);
        assert_eq!(compute_scrollbar_thumb(0, 5, 0, 10), None);
        assert_eq!(compute_scrollbar_thumb(30, 10, 0, 0), None);
        assert_eq!(compute_scrollbar_thumb(30, 10, 0, 10), Some(0));
        assert_eq!(compute_scrollbar_thumb(30, 10, 20, 10), Some(9));
        assert_eq!(compute_scrollbar_thumb(30, 10, 10, 11), Some(5));
    }

    #[test]
    fn required_label_help_and_error() {
        let theme = Theme::default();
        let field = Field::new("name", "Name", FieldKind::Text(TextAttrs::default()))
            .help("As on your ID")
            .required();
        let error = FieldError::Required {
            label: "Name".into(),
        };
        let block = field_block(&field, &FieldValue::from(""), Some(&error), &ctx(&theme));
        let rows: Vec<String> = block.lines.iter().map(plain).collect();
        assert_eq!(rows[0], "  Name *");
        assert_eq!(rows[1], "  As on your ID");
        assert_eq!(rows.last().map(String::as_str), Some("  ⚠ Name is required"));
    }

    #[test]
    fn number_row_shows_range_hint() {
        let theme = Theme::default();
        let field = Field::new(
            "qty",
            "Qty",
            FieldKind::Number(NumberAttrs {
                min: Some(0.0),
                max: Some(10.0),
            }),
        );
        let block = field_block(&field, &FieldValue::from(3), None, &ctx(&theme));
        assert_eq!(plain(&block.lines[1]), "  [-] 3 [+]   Min: 0 · Max: 10");
    }

    #[test]
    fn checkbox_marks_selection() {
        let theme = Theme::default();
        let attrs = forms::OptionsAttrs::new(vec![OptionItem::new("Clean", "clean"), OptionItem::new("Stocked", "stocked")]);
        let field = Field::new("checks", "Checks", FieldKind::Checkbox(attrs));
        let value = FieldValue::List(vec!["stocked".into()]);
        let block = field_block(&field, &value, None, &ctx(&theme));
        let rows: Vec<String> = block.lines.iter().map(plain).collect();
        assert_eq!(rows[1..], ["  [ ] Clean".to_string(), "  [x] Stocked".to_string()]);
    }

    #[test]
    fn slider_thumb_tracks_value() {
        let attrs = SliderAttrs::new(0.0, 10.0);
        assert_eq!(thumb_index(&attrs, &FieldValue::from(0), 11), 0);
        assert_eq!(thumb_index(&attrs, &FieldValue::from(5), 11), 5);
        assert_eq!(thumb_index(&attrs, &FieldValue::from(10), 11), 10);

        let theme = Theme::default();
        let field = Field::new("level", "Level", FieldKind::Slider(attrs));
        let block = field_block(&field, &FieldValue::from(5), None, &ctx(&theme));
        let (line, x, width) = block.slider.unwrap();
        assert_eq!((line, x), (1, INDENT));
        assert_eq!(width, track_width(60));
        assert!(plain(&block.lines[1]).ends_with("  5"));
    }

    #[test]
    fn file_rows_list_names_and_sizes() {
        let theme = Theme::default();
        let field = Field::new(
            "docs",
            "Docs",
            FieldKind::File(forms::FileAttrs {
                multiple: true,
                max_size_mb: Some(5.0),
                ..Default::default()
            }),
        );
        let value = FieldValue::Files(vec![forms::FileInfo::new("file:///a.pdf", "a.pdf").with_size(1536)]);
        let block = field_block(&field, &value, None, &ctx(&theme));
        let rows: Vec<String> = block.lines.iter().map(plain).collect();
        assert_eq!(rows[1], "  a.pdf  1.5 KB");
        assert_eq!(rows[2], "  [ Add files ]  max 5MB");
    }

    #[test]
    fn cursor_row_col_counts_line_breaks() {
        assert_eq!(cursor_row_col("", 0), (0, 0));
        assert_eq!(cursor_row_col("abc", 2), (0, 2));
        assert_eq!(cursor_row_col("ab\ncd", 3), (1, 0));
        assert_eq!(cursor_row_col("ab\ncd\n", 7), (2, 0));
        assert_eq!(cursor_row_col("é\nxyz", 4), (1, 2));
    }

    #[test]
    fn editing_textarea_spans_several_rows() {
        let theme = Theme::default();
        let attrs = TextAttrs {
            max_length: Some(20),
            ..Default::default()
        };
        let field = Field::new("notes", "Notes", FieldKind::Textarea(attrs));
        let ctx = FieldCtx {
            editor: Some("one\ntwo"),
            editor_kind: Some(EditorKind::Text),
            ..ctx(&theme)
        };
        let block = field_block(&field, &FieldValue::from("one\ntwo"), None, &ctx);
        let rows: Vec<String> = block.lines.iter().map(plain).collect();
        assert_eq!(block.editor, Some((1, INDENT)));
        assert_eq!(rows[1..], ["  one  7/20", "  two", "  ", "  "]);
    }

    #[test]
    fn typed_inputs_name_the_expected_entry() {
        let theme = Theme::default();
        let attrs = TextAttrs {
            input_type: Some(InputType::Email),
            ..Default::default()
        };
        let field = Field::new("mail", "Email", FieldKind::Text(attrs)).required();
        let block = field_block(&field, &FieldValue::from(""), None, &ctx(&theme));
        assert_eq!(plain(&block.lines[0]), "  Email *  (email address)");
    }
}
