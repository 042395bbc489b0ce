use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use strum::IntoEnumIterator;
use unicode_width::UnicodeWidthStr;

use crate::app::editor::{EditorField, GiftEditor};
use crate::app::state::AppState;
use crate::config::themes::Palette;

pub fn draw_app(frame: &mut Frame, state: &AppState, list_state: &mut ListState, palette: &Palette) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(2)])
        .split(frame.size());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(vertical[0]);

    let mut items = Vec::with_capacity(state.len());
    for gift in state.gifts.iter() {
        let editor = state.editor(gift.id);
        let person = editor.map(GiftEditor::person).unwrap_or_default();
        let present = editor.map(GiftEditor::present).unwrap_or_default();
        let title = Line::from(vec![
            Span::styled(
                format!("#{} ", gift.id),
                Style::default().fg(palette.muted),
            ),
            Span::styled(
                display_or_placeholder(person, "(no person)"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);
        let detail = Line::from(Span::styled(
            format!("  {}", display_or_placeholder(present, "(no present)")),
            Style::default().fg(palette.muted),
        ));
        items.push(ListItem::new(vec![title, detail]));
    }
    if items.is_empty() {
        items.push(ListItem::new("No gifts yet. Press Ctrl-a to add one."));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .title("Gift Giver")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        )
        .highlight_style(
            Style::default()
                .bg(palette.selection_bg)
                .fg(palette.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");
    frame.render_stateful_widget(list, columns[0], list_state);

    frame.render_widget(Clear, columns[1]);
    match state.selected_editor() {
        Some(editor) => draw_form(frame, columns[1], editor, state.focus, palette),
        None => {
            let empty = Paragraph::new("Add a gift to start filling in the form.")
                .block(Block::default().title("Gift").borders(Borders::ALL));
            frame.render_widget(empty, columns[1]);
        }
    }

    let status = build_status_line(state, palette);
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(palette.muted)),
        vertical[1],
    );
}

fn draw_form(
    frame: &mut Frame,
    area: Rect,
    editor: &GiftEditor,
    focus: EditorField,
    palette: &Palette,
) {
    let outer = Block::default()
        .title(format!("Gift #{}", editor.gift_id()))
        .borders(Borders::ALL);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    for (field, row) in EditorField::iter().zip(rows.iter()) {
        let focused = field == focus;
        let border_style = if focused {
            Style::default().fg(palette.accent)
        } else {
            Style::default()
        };
        let value = editor.state().field(field);
        let input = Paragraph::new(value.to_string()).block(
            Block::default()
                .title(field.to_string())
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(input, *row);
        if focused {
            frame.set_cursor(cursor_column(*row, value), row.y + 1);
        }
    }

    let hint = Paragraph::new(Text::from(vec![
        Line::from("Tab switch field • Ctrl-d remove gift"),
        Line::from("Ctrl-a add gift • ↑/↓ choose gift • Esc quit"),
    ]))
    .style(Style::default().fg(palette.muted));
    frame.render_widget(hint, rows[2]);
}

fn build_status_line(state: &AppState, palette: &Palette) -> Text<'static> {
    let total = state.len();
    let position = if state.is_empty() {
        "0/0".to_string()
    } else {
        format!("{}/{}", state.selected + 1, total)
    };
    let mut spans = vec![
        Span::raw(format!("Gifts: {total}")),
        Span::raw(" | Selected: "),
        Span::styled(position, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" | Field: "),
        Span::styled(
            state.focus.to_string(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(message) = &state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::raw(message.clone()));
    }
    Text::from(Line::from(spans))
}

/// Column just past `value` inside a bordered input, clamped to the last inner cell.
fn cursor_column(area: Rect, value: &str) -> u16 {
    let width = u16::try_from(value.width()).unwrap_or(u16::MAX);
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    area.x.saturating_add(1).saturating_add(width).min(max_x)
}

fn display_or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}
