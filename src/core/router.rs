//! # Key Command Router
//!
//! Resolves a key to an `Action`, runs it against the host, and posts one
//! status line. `dispatch` never fails: every host error is turned into a
//! status message here, so the router stays usable after any key.
//!
//! ```text
//! KeySymbol ─► Action ─► run_action() ─► Result<StatusMessage, HandleError>
//!                                                │
//!                         failure_status() ◄─────┘ (on Err)
//!                                                │
//!                                   StatusSink::post(text)
//! ```

use log::debug;

use super::action::{Action, HELP_LINES};
use super::config::NavSettings;
use super::key::{HostMessage, KeySymbol};
use super::state::NavigationState;
use super::status::{LogSink, StatusKind, StatusMessage, StatusSink};
use crate::host::{Collection, Command, HandleError, Property, TransportControlHandle, Value};

pub const READY_MESSAGE: &str = "HJKL Navigation ready";

#[derive(Debug, Clone, Copy)]
enum Direction {
    Left,
    Right,
}

impl Direction {
    fn label(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Left clamps at 0; right is uncapped.
    fn apply(self, position: f64, step: f64) -> f64 {
        match self {
            Direction::Left => (position - step).max(0.0),
            Direction::Right => position + step,
        }
    }
}

pub struct KeyCommandRouter<H> {
    handle: H,
    state: NavigationState,
    settings: NavSettings,
    sink: Box<dyn StatusSink>,
}

impl<H: TransportControlHandle> KeyCommandRouter<H> {
    pub fn new(handle: H, settings: NavSettings) -> Self {
        Self {
            handle,
            state: NavigationState::new(),
            settings,
            sink: Box::new(LogSink),
        }
    }

    /// Replace the default `log` sink.
    pub fn with_sink(mut self, sink: impl StatusSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn settings(&self) -> &NavSettings {
        &self.settings
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    pub fn into_handle(self) -> H {
        self.handle
    }

    /// Post the usage message.
    pub fn initialize(&mut self) {
        for line in HELP_LINES {
            self.sink.post(line);
        }
    }

    /// Answer the host's readiness check.
    pub fn ready(&mut self) -> StatusMessage {
        let status = StatusMessage::info(READY_MESSAGE);
        self.sink.post(&status.text);
        status
    }

    /// Route a raw host message: a bang checks readiness, everything else
    /// is a key.
    pub fn handle_message(&mut self, message: HostMessage) -> StatusMessage {
        match message.key() {
            Some(key) => self.dispatch(&key),
            None => self.ready(),
        }
    }

    pub fn dispatch(&mut self, key: &KeySymbol) -> StatusMessage {
        let status = match Action::from_key(key) {
            Some(action) => {
                debug!("Dispatching {:?} for key {:?}", action, key.to_string());
                self.run_action(action)
                    .unwrap_or_else(|err| failure_status(action, &err))
            }
            None => StatusMessage::new(StatusKind::Unrecognized, format!("Unknown key: {key}")),
        };
        self.sink.post(&status.text);
        status
    }

    fn run_action(&mut self, action: Action) -> Result<StatusMessage, HandleError> {
        match action {
            Action::MoveLeft => self.scroll(Direction::Left),
            Action::MoveRight => self.scroll(Direction::Right),
            Action::MoveDown => self.select_next_track(),
            Action::MoveUp => self.select_previous_track(),
            Action::MoveToStart => self.move_to_start(),
            Action::MoveToEnd => self.move_to_end(),
            Action::ZoomIn => self.zoom(Command::ZoomSelection, "Zoomed in (selection)"),
            Action::ZoomOut => self.zoom(Command::ShowEntireSong, "Zoomed out (entire song)"),
            Action::GoToPosition => self.report_position(),
            Action::TogglePlayback => self.toggle_playback(),
        }
    }

    // ── Left / right ────────────────────────────────────────────────────────

    /// Scroll the visible range when the host has one, otherwise move the
    /// playhead. Only a readable range of at least two elements selects
    /// range mode. Moving left from time 0 is a boundary and writes nothing.
    fn scroll(&mut self, direction: Direction) -> Result<StatusMessage, HandleError> {
        let range = match self.handle.get_property(Property::VisibleTimeRange) {
            Ok(value) => value.as_range(),
            Err(HandleError::MissingProperty(_)) => None,
            Err(err) => return Err(err),
        };

        let step = self.settings.move_step;
        match range {
            Some((start, end)) => {
                let duration = end - start;
                let new_start = direction.apply(start, step);
                let text = format!("Scrolled {} to: {}", direction.label(), new_start);
                if new_start == start {
                    return Ok(StatusMessage::boundary(text));
                }
                self.handle.set_property(
                    Property::VisibleTimeRange,
                    Value::List(vec![new_start, new_start + duration]),
                )?;
                Ok(StatusMessage::success(text))
            }
            None => {
                debug!("No visible time range, moving playhead instead");
                let time = self.read_song_time()?;
                let new_time = direction.apply(time, step);
                let text = format!("Moved playhead {} to: {}", direction.label(), new_time);
                if new_time == time {
                    return Ok(StatusMessage::boundary(text));
                }
                self.handle
                    .set_property(Property::CurrentSongTime, Value::Number(new_time))?;
                Ok(StatusMessage::success(text))
            }
        }
    }

    // ── Up / down ───────────────────────────────────────────────────────────

    fn select_next_track(&mut self) -> Result<StatusMessage, HandleError> {
        let track_count = self.handle.child_count(Collection::Tracks)?;
        let index = self.state.selected_track_index;
        if index + 1 < track_count {
            self.select_track(index + 1)
        } else {
            // Pull a stale index back inside a shrunken collection
            self.state.selected_track_index = index.min(track_count.saturating_sub(1));
            Ok(StatusMessage::boundary("Already at last track"))
        }
    }

    fn select_previous_track(&mut self) -> Result<StatusMessage, HandleError> {
        let index = self.state.selected_track_index;
        if index == 0 {
            return Ok(StatusMessage::boundary("Already at first track"));
        }
        let track_count = self.handle.child_count(Collection::Tracks)?;
        if track_count == 0 {
            self.state.selected_track_index = 0;
            return Ok(StatusMessage::boundary("Already at first track"));
        }
        // The collection may have shrunk since the last selection
        let target = (index - 1).min(track_count - 1);
        self.select_track(target)
    }

    /// Index only moves once the host accepted the selection.
    fn select_track(&mut self, index: usize) -> Result<StatusMessage, HandleError> {
        self.handle
            .set_property(Property::SelectedTrack, Value::Track(index))?;
        self.state.selected_track_index = index;
        Ok(StatusMessage::success(format!("Selected track: {index}")))
    }

    // ── Jumps ───────────────────────────────────────────────────────────────

    fn move_to_start(&mut self) -> Result<StatusMessage, HandleError> {
        self.handle
            .set_property(Property::CurrentSongTime, Value::Number(0.0))?;
        Ok(StatusMessage::success("Moved to start"))
    }

    fn move_to_end(&mut self) -> Result<StatusMessage, HandleError> {
        let song_length = match self.handle.get_property(Property::LastEventTime) {
            Ok(value) => value.as_number(),
            Err(err) => {
                debug!("Reading {} failed: {}", Property::LastEventTime, err);
                None
            }
        };
        let Some(song_length) = song_length else {
            return Ok(StatusMessage::failure("Could not get song length"));
        };
        self.handle
            .set_property(Property::CurrentSongTime, Value::Number(song_length))?;
        Ok(StatusMessage::success(format!("Moved to end: {song_length}")))
    }

    // ── Zoom ────────────────────────────────────────────────────────────────

    fn zoom(&mut self, command: Command, done: &str) -> Result<StatusMessage, HandleError> {
        self.handle.invoke_command(command)?;
        Ok(StatusMessage::success(done))
    }

    // ── Transport ───────────────────────────────────────────────────────────

    fn report_position(&mut self) -> Result<StatusMessage, HandleError> {
        let time = match self.handle.get_property(Property::CurrentSongTime) {
            Ok(value) => value.as_number(),
            Err(err) => {
                debug!("Reading {} failed: {}", Property::CurrentSongTime, err);
                None
            }
        };
        Ok(match time {
            Some(time) => StatusMessage::info(format!("Current playback position: {time}")),
            None => StatusMessage::failure("Could not get current song time"),
        })
    }

    fn toggle_playback(&mut self) -> Result<StatusMessage, HandleError> {
        let is_playing = self.handle.get_property(Property::IsPlaying)?.is_truthy();
        if is_playing {
            self.handle.invoke_command(Command::StopPlaying)?;
            Ok(StatusMessage::success("Stopped playback"))
        } else {
            self.handle.invoke_command(Command::StartPlaying)?;
            Ok(StatusMessage::success("Started playback"))
        }
    }

    /// A null song time counts as 0, as the host's own arithmetic does.
    fn read_song_time(&self) -> Result<f64, HandleError> {
        let value = self.handle.get_property(Property::CurrentSongTime)?;
        if value.is_null() {
            return Ok(0.0);
        }
        value.as_number().ok_or(HandleError::TypeMismatch {
            property: Property::CurrentSongTime,
            expected: "a number",
        })
    }
}

/// The one place a host failure becomes a status line.
fn failure_status(action: Action, err: &HandleError) -> StatusMessage {
    debug!("{:?} failed: {}", action, err);
    let text = match action {
        Action::MoveLeft => format!("Error moving left: {err}"),
        Action::MoveRight => format!("Error moving right: {err}"),
        Action::MoveUp => "Error selecting track up".to_string(),
        Action::MoveDown => "Error selecting track down".to_string(),
        Action::MoveToStart => format!("Error moving to start: {err}"),
        Action::MoveToEnd => format!("Error moving to end: {err}"),
        Action::ZoomIn => "Zoom in not available".to_string(),
        Action::ZoomOut => "Zoom out not available".to_string(),
        Action::GoToPosition => "Could not get current song time".to_string(),
        Action::TogglePlayback => format!("Error toggling playback: {err}"),
    };
    StatusMessage::failure(text)
}
