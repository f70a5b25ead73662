//! # Terminal Adapter
//!
//! Captures single keypresses with crossterm and feeds them to the router.
//! This is the only module that knows about crossterm.
//!
//! Raw mode is needed so `h` arrives without Enter. Output therefore uses
//! explicit `\r\n` line endings.

use std::io::{self, Write, stdout};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::{debug, info, warn};

use crate::core::key::KeySymbol;
use crate::core::router::KeyCommandRouter;
use crate::core::status::StatusSink;
use crate::host::TransportControlHandle;

/// Terminal input, after filtering out everything the router doesn't need.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminalEvent {
    Key(KeySymbol),
    Quit,
}

/// Map a crossterm key event. Releases and repeats are dropped, as are
/// keys with no character.
pub fn translate(key_event: KeyEvent) -> Option<TerminalEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TerminalEvent::Quit),
        (_, KeyCode::Esc) => Some(TerminalEvent::Quit),
        (_, KeyCode::Char(c)) => Some(TerminalEvent::Key(KeySymbol::from_char(c))),
        _ => None,
    }
}

/// Prints status lines in raw mode and mirrors them to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSink;

impl StatusSink for TerminalSink {
    fn post(&mut self, line: &str) {
        info!("{line}");
        if let Err(e) = execute!(stdout(), Print(line), Print("\r\n")) {
            warn!("Failed to write status line: {}", e);
        }
    }
}

/// Plain stdout sink for non-interactive runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl StatusSink for StdoutSink {
    fn post(&mut self, line: &str) {
        info!("{line}");
        let mut out = stdout().lock();
        if let Err(e) = writeln!(out, "{line}") {
            warn!("Failed to write status line: {}", e);
        }
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        info!("Terminal raw mode enabled");
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Read keys until Esc or Ctrl+C, dispatching each one.
pub fn run<H: TransportControlHandle>(router: &mut KeyCommandRouter<H>) -> io::Result<()> {
    let _raw_mode = RawModeGuard::new()?;
    execute!(stdout(), Print("Press Esc or Ctrl+C to quit\r\n"))?;

    loop {
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        debug!(
            "Key event: {:?} with modifiers {:?}",
            key_event.code, key_event.modifiers
        );
        match translate(key_event) {
            Some(TerminalEvent::Quit) => break,
            Some(TerminalEvent::Key(key)) => {
                router.dispatch(&key);
            }
            None => {}
        }
    }

    info!("Terminal session ended");
    Ok(())
}

/// Dispatch every character of `keys` in order.
pub fn run_script<H: TransportControlHandle>(router: &mut KeyCommandRouter<H>, keys: &str) {
    for c in keys.chars() {
        router.dispatch(&KeySymbol::from_char(c));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_shifted_letter_keeps_case() {
        assert_eq!(
            translate(press(KeyCode::Char('L'), KeyModifiers::SHIFT)),
            Some(TerminalEvent::Key(KeySymbol::ShiftL))
        );
    }

    #[test]
    fn test_space_is_a_key() {
        assert_eq!(
            translate(press(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(TerminalEvent::Key(KeySymbol::Space))
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            translate(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TerminalEvent::Quit)
        );
        assert_eq!(
            translate(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(TerminalEvent::Quit)
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('h'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(translate(release), None);
    }

    #[test]
    fn test_non_char_keys_are_ignored() {
        assert_eq!(translate(press(KeyCode::Up, KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_run_script_dispatches_each_char() {
        use crate::test_support::{FakeHandle, router_with};

        let (mut router, lines) = router_with(FakeHandle::with_tracks(3));
        run_script(&mut router, "jjjk");
        assert_eq!(
            lines.lines(),
            [
                "Selected track: 1",
                "Selected track: 2",
                "Already at last track",
                "Selected track: 1"
            ]
        );
    }
}
