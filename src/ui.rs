pub mod screen;
pub mod word_input;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::{app::App, board::BoardLayout, session::ResultStatus};

const LEGEND: &str = "(tab) start/next  (enter) verify  (←/→) move  (bksp) clear\n(ctrl+a) repeat  (ctrl+w) custom words  (ctrl+r) reset  (esc) quit";

// spaces are drawn as ␣
fn glyph(c: char) -> char {
    if c == ' ' {
        '␣'
    } else {
        c
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.game.session();
        let layout = BoardLayout::compute(area, self.board.tiles().len(), session.slots().len());

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        // header
        let prompt = if self.game.words().is_empty() {
            Span::styled("No words yet. Press ctrl+w to add some.", italic_style)
        } else if session.is_idle() {
            Span::styled("Press tab to start the game", italic_style)
        } else {
            Span::styled("Listen, then spell the word", italic_style)
        };
        let stats = Line::from(vec![
            Span::styled(format!("Score: {}", session.score()), bold_style),
            Span::raw("   "),
            Span::styled(format!("Round: {}", session.round()), dim_style),
            Span::raw("   "),
            Span::styled(
                format!(
                    "words: {}, {}",
                    self.game.words().len(),
                    self.game.settings().policy
                ),
                dim_style,
            ),
        ]);
        Paragraph::new(vec![stats, Line::from(prompt)])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
            .render(layout.header, buf);

        // tiles
        let dragging = self.board.drag().map(|d| d.letter);
        for (rect, letter) in layout.tiles.iter().zip(self.board.tiles()) {
            let style = if dragging == Some(*letter) {
                dim_style
            } else {
                bold_style
            };
            Paragraph::new(Span::styled(glyph(*letter).to_string(), style))
                .alignment(Alignment::Center)
                .block(Block::bordered().border_style(Style::default().fg(Color::Gray)))
                .render(*rect, buf);
        }

        // slots
        let hover = self.board.drag().and_then(|d| d.hover_slot);
        let border_color = match session.status() {
            ResultStatus::Correct => Color::Green,
            ResultStatus::Incorrect => Color::Red,
            ResultStatus::None | ResultStatus::GameOver => Color::White,
        };
        for (i, (rect, slot)) in layout.slots.iter().zip(session.slots()).enumerate() {
            let mut block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color));
            if hover == Some(i) {
                block = block.style(Style::default().bg(Color::LightGreen));
            } else if self.board.cursor() == i && self.board.drag().is_none() {
                block = block.border_style(Style::default().fg(Color::Yellow));
            }
            let letter = slot.map(|c| glyph(c).to_string()).unwrap_or_default();
            Paragraph::new(Span::styled(letter, bold_style))
                .alignment(Alignment::Center)
                .block(block)
                .render(*rect, buf);
        }

        // result
        let result_style = match session.status() {
            ResultStatus::Correct => Style::default().fg(Color::Green).patch(bold_style),
            ResultStatus::Incorrect => Style::default().fg(Color::Red).patch(bold_style),
            ResultStatus::GameOver => Style::default().fg(Color::Magenta).patch(bold_style),
            ResultStatus::None => Style::default(),
        };
        let mut result_lines = vec![Line::from(Span::styled(
            session.status().to_string(),
            result_style,
        ))];
        if session.status() == ResultStatus::GameOver {
            result_lines.push(Line::from(Span::styled(
                "ctrl+r to play again, ctrl+w for new words",
                italic_style,
            )));
        }
        Paragraph::new(result_lines)
            .alignment(Alignment::Center)
            .render(layout.result, buf);

        Paragraph::new(LEGEND)
            .style(italic_style.patch(dim_style))
            .alignment(Alignment::Center)
            .render(layout.legend, buf);
    }
}
