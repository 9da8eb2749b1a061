use itertools::Itertools;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::words::DEFAULT_WORDS;

pub fn render_word_input(app: &mut App, f: &mut Frame) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(5), // Input box
            Constraint::Length(2), // Preview
            Constraint::Min(0),
            Constraint::Length(1), // Legend
        ])
        .split(area);

    let title = Paragraph::new("Enter Words (comma-separated)")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let buffer = &app.word_input.buffer;
    let text = if buffer.is_empty() {
        Span::styled(
            DEFAULT_WORDS.join(", "),
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        )
    } else {
        Span::raw(buffer.as_str())
    };
    let input_block = Block::default().borders(Borders::ALL).title("Words");
    let inner = input_block.inner(chunks[1]);
    let input = Paragraph::new(Line::from(text))
        .block(input_block)
        .wrap(Wrap { trim: false });
    f.render_widget(input, chunks[1]);

    // only a single unwrapped line gets a visible cursor
    let typed = buffer.width() as u16;
    if typed < inner.width {
        f.set_cursor_position(Position::new(inner.x + typed, inner.y));
    }

    let preview = app.word_input.preview();
    let preview_text = if preview.is_empty() {
        "no words, the game will wait for a list".to_string()
    } else {
        format!(
            "{} word(s): {}",
            preview.len(),
            preview.words().iter().join(" · ")
        )
    };
    f.render_widget(
        Paragraph::new(preview_text)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[2],
    );

    let legend = Paragraph::new(Span::styled(
        "(enter) save & start game / (ctrl+u) clear / (esc) back to game",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    f.render_widget(legend, chunks[4]);
}
