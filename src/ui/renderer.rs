//! Pure rendering of session state. Nothing here mutates the session; the
//! frame is rebuilt from the transcript, the draft text, and the in-flight
//! flag on every draw.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::core::session::ChatSession;
use crate::ui::scroll::ScrollState;

/// Rows taken by the input box (one text row plus its borders).
pub const INPUT_AREA_HEIGHT: u16 = 3;
/// Rows taken by the transcript title line.
pub const TITLE_HEIGHT: u16 = 1;

/// Transcript rows available at a given terminal height.
pub fn transcript_height(terminal_height: u16) -> u16 {
    terminal_height
        .saturating_sub(INPUT_AREA_HEIGHT)
        .saturating_sub(TITLE_HEIGHT)
}

/// Flatten the transcript into display lines: each turn is a two-line block
/// (user text, bot text) followed by a blank spacer.
pub fn build_display_lines(session: &ChatSession) -> Vec<Line<'_>> {
    let mut lines = Vec::new();

    for turn in session.transcript.iter() {
        lines.push(Line::from(vec![
            Span::styled(
                "You: ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(turn.user.as_str(), Style::default().fg(Color::Cyan)),
        ]));

        let bot_style = if turn.is_pending() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(
                "Bot: ",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Span::styled(turn.bot.as_str(), bot_style),
        ]));

        lines.push(Line::from(""));
    }

    lines
}

pub fn draw(f: &mut Frame, session: &ChatSession, scroll: &ScrollState, status: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(INPUT_AREA_HEIGHT)])
        .split(f.area());

    draw_transcript(f, session, scroll, status, chunks[0]);
    draw_input(f, session, chunks[1]);
}

fn draw_transcript(
    f: &mut Frame,
    session: &ChatSession,
    scroll: &ScrollState,
    status: &str,
    area: Rect,
) {
    let lines = build_display_lines(session);
    let available_height = area.height.saturating_sub(TITLE_HEIGHT);
    let offset = scroll.clamped_offset(lines.len() as u16, available_height);

    let title = if status.is_empty() {
        "Causerie".to_string()
    } else {
        format!("Causerie — {status}")
    };

    let transcript = Paragraph::new(lines)
        .block(Block::default().title(title))
        .wrap(Wrap { trim: true })
        .scroll((offset, 0));

    f.render_widget(transcript, area);
}

fn draw_input(f: &mut Frame, session: &ChatSession, area: Rect) {
    let (title, style) = if session.is_in_flight() {
        (
            "Waiting for reply...",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            "Type your message (Enter to send, Esc to leave)",
            Style::default().fg(Color::Yellow),
        )
    };

    let input = Paragraph::new(session.input())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });

    f.render_widget(input, area);

    // The cursor only shows while the input accepts text.
    if !session.is_in_flight() {
        f.set_cursor_position((
            area.x + session.input().width() as u16 + 1,
            area.y + 1,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::PENDING_BOT_TEXT;
    use serde_json::json;

    fn session_with_turns() -> ChatSession {
        let mut session = ChatSession::new();
        for c in "hello".chars() {
            session.push_input_char(c);
        }
        let payload = session.begin_submission().unwrap();
        session.finish_submission(&payload, Ok(json!([{ "generated_text": "hi there" }])));
        session
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn each_turn_renders_as_a_two_line_block_with_spacer() {
        let session = session_with_turns();
        let lines = build_display_lines(&session);

        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[0]), "You: hello");
        assert_eq!(line_text(&lines[1]), "Bot: hi there");
        assert_eq!(line_text(&lines[2]), "");
    }

    #[test]
    fn pending_turns_render_the_sentinel() {
        let mut session = ChatSession::new();
        session.push_input_char('x');
        session.begin_submission().unwrap();

        let lines = build_display_lines(&session);
        assert_eq!(line_text(&lines[1]), format!("Bot: {PENDING_BOT_TEXT}"));
    }

    #[test]
    fn transcript_height_accounts_for_chrome() {
        assert_eq!(transcript_height(24), 20);
        assert_eq!(transcript_height(3), 0);
    }
}
