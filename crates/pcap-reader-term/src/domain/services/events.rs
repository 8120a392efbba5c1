use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

/// Merges terminal input, worker events and an idle tick into one stream.
pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

fn to_input(keyevent: KeyEvent) -> Option<Input> {
    let key = match keyevent.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Tab => Key::Tab,
        KeyCode::Delete => Key::Delete,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Esc,
        _ => return None,
    };

    return Some(Input {
        key,
        ctrl: keyevent.modifiers.contains(KeyModifiers::CONTROL),
        alt: keyevent.modifiers.contains(KeyModifiers::ALT),
        shift: keyevent.modifiers.contains(KeyModifiers::SHIFT),
    });
}

/// Maps a key press to the event the UI loop understands.
pub fn key_event(input: Input) -> Event {
    match input {
        Input { key: Key::Up, .. } => return Event::UIScrollUp,
        Input { key: Key::Down, .. } => return Event::UIScrollDown,
        Input {
            key: Key::PageUp, ..
        } => return Event::UIScrollPageUp,
        Input {
            key: Key::PageDown, ..
        } => return Event::UIScrollPageDown,
        Input {
            key: Key::Char('u'),
            ctrl: true,
            ..
        } => return Event::UIScrollPageUp,
        Input {
            key: Key::Char('d'),
            ctrl: true,
            ..
        } => return Event::UIScrollPageDown,
        Input {
            key: Key::Char('c'),
            ctrl: true,
            ..
        } => return Event::KeyboardCTRLC,
        Input {
            key: Key::Enter, ..
        } => return Event::KeyboardEnter,
        input => return Event::KeyboardCharInput(input),
    }
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    fn handle_crossterm(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Paste(text) => return Some(Event::KeyboardPaste(text)),
            CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
                MouseEventKind::ScrollUp => return Some(Event::UIScrollUp),
                MouseEventKind::ScrollDown => return Some(Event::UIScrollDown),
                _ => return None,
            },
            CrosstermEvent::Key(keyevent) => {
                if keyevent.kind == KeyEventKind::Release {
                    return None;
                }
                return to_input(keyevent).map(key_event);
            }
            _ => return None,
        }
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => self.handle_crossterm(input),
                    Some(Err(err)) => {
                        tracing::warn!(error = %err, "terminal event could not be read");
                        None
                    }
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(250)) => Some(Event::UITick)
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        return key_event(to_input(KeyEvent::new(code, modifiers)).unwrap());
    }

    #[test]
    fn test_maps_hotkeys() {
        assert!(matches!(
            press(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Event::KeyboardCTRLC
        ));
        assert!(matches!(
            press(KeyCode::Char('d'), KeyModifiers::CONTROL),
            Event::UIScrollPageDown
        ));
        assert!(matches!(
            press(KeyCode::Enter, KeyModifiers::NONE),
            Event::KeyboardEnter
        ));
        assert!(matches!(
            press(KeyCode::Up, KeyModifiers::NONE),
            Event::UIScrollUp
        ));
    }

    #[test]
    fn test_passes_text_input_through() {
        match press(KeyCode::Char('c'), KeyModifiers::NONE) {
            Event::KeyboardCharInput(input) => {
                assert_eq!(input.key, Key::Char('c'));
                assert!(!input.ctrl);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_ignores_unmapped_keys() {
        assert!(to_input(KeyEvent::new(KeyCode::Insert, KeyModifiers::NONE)).is_none());
    }
}
