//! Interactive event loop.
//!
//! Single-threaded and cooperative: terminal events and settled network
//! requests are both handled here, so every session mutation happens on this
//! loop. The outbound call runs in a spawned task and reports back through an
//! mpsc channel; while it is outstanding the session is in flight and the
//! input refuses new text.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::api::{ChatClient, TransportError};
use crate::core::session::ChatSession;
use crate::logging::LoggingState;
use crate::ui::renderer::{self, transcript_height};
use crate::ui::scroll::ScrollState;

/// A settled outbound request, delivered back to the loop by the request
/// task.
struct Settled {
    user_text: String,
    outcome: Result<Value, TransportError>,
}

pub async fn run_chat(
    client: ChatClient,
    logging: LoggingState,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, client, logging).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: ChatClient,
    logging: LoggingState,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = ChatSession::new();
    let mut scroll = ScrollState::default();
    let (tx, mut rx) = mpsc::unbounded_channel::<Settled>();

    let status = if logging.is_active() {
        logging.get_status_string()
    } else {
        String::new()
    };

    loop {
        terminal.draw(|f| renderer::draw(f, &session, &scroll, &status))?;

        let available_height = transcript_height(terminal.size()?.height);
        let total_lines = renderer::build_display_lines(&session).len() as u16;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break Ok(());
                    }
                    // The "back to home" affordance: leave the chat and
                    // discard the transcript.
                    KeyCode::Esc => {
                        break Ok(());
                    }
                    KeyCode::Enter => {
                        // The session rejects re-entry on its own; this only
                        // decides whether a request task gets spawned.
                        if let Ok(payload) = session.begin_submission() {
                            scroll.follow(
                                renderer::build_display_lines(&session).len() as u16,
                                available_height,
                            );
                            spawn_request(client.clone(), payload, tx.clone());
                        }
                    }
                    KeyCode::Char(c) if !session.is_in_flight() => {
                        session.push_input_char(c);
                    }
                    KeyCode::Backspace if !session.is_in_flight() => {
                        session.pop_input_char();
                    }
                    KeyCode::Up => {
                        scroll.scroll_up(1);
                    }
                    KeyCode::Down => {
                        scroll.scroll_down(1, total_lines, available_height);
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        scroll.scroll_up(3);
                    }
                    MouseEventKind::ScrollDown => {
                        scroll.scroll_down(3, total_lines, available_height);
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        // Merge any settled requests. With the in-flight guard there is at
        // most one outstanding, but draining is harmless.
        while let Ok(settled) = rx.try_recv() {
            session.finish_submission(&settled.user_text, settled.outcome);
            if let Some(turn) = session.transcript.last() {
                if let Err(e) = logging.log_turn(turn) {
                    tracing::warn!(error = %e, "failed to write transcript log");
                }
            }
            scroll.follow(
                renderer::build_display_lines(&session).len() as u16,
                available_height,
            );
        }
    }
}

fn spawn_request(client: ChatClient, payload: String, tx: mpsc::UnboundedSender<Settled>) {
    tokio::spawn(async move {
        let outcome = client.send_message(&payload).await;
        // The receiver only drops when the loop is exiting; nothing to do
        // with the reply then.
        let _ = tx.send(Settled {
            user_text: payload,
            outcome,
        });
    });
}
