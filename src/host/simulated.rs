//! # Simulated Live Set
//!
//! An in-memory host used by the CLI and the tests. It loads from a JSON
//! snapshot so a session can start from any arrangement:
//!
//! ```json
//! {
//!   "tracks": ["Drums", "Bass", "Keys"],
//!   "current_song_time": 8.0,
//!   "last_event_time": 128.0,
//!   "visible_time_range": [0.0, 32.0],
//!   "is_playing": false,
//!   "unsupported_commands": ["zoom_selection"]
//! }
//! ```
//!
//! Missing fields fall back to `SimulatedSet::default()`.

use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Collection, Command, HandleError, Property, TransportControlHandle, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedSet {
    pub tracks: Vec<String>,
    pub current_song_time: f64,
    /// `None` reads as null, as an empty set does on a real host.
    pub last_event_time: Option<f64>,
    /// `None` reads as null and sends left/right into playhead mode.
    pub visible_time_range: Option<[f64; 2]>,
    pub is_playing: bool,
    pub selected_track: Option<usize>,
    /// Commands this host refuses with `UnsupportedCommand`.
    pub unsupported_commands: Vec<Command>,
    #[serde(skip)]
    command_log: Vec<Command>,
}

impl Default for SimulatedSet {
    fn default() -> Self {
        Self {
            tracks: vec![
                "1 Audio".to_string(),
                "2 Audio".to_string(),
                "3 MIDI".to_string(),
                "4 MIDI".to_string(),
            ],
            current_song_time: 0.0,
            last_event_time: Some(64.0),
            visible_time_range: Some([0.0, 16.0]),
            is_playing: false,
            selected_track: Some(0),
            unsupported_commands: Vec::new(),
            command_log: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "snapshot I/O error: {e}"),
            SnapshotError::Parse(e) => write!(f, "snapshot parse error: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl SimulatedSet {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(SnapshotError::Parse)
    }

    /// Load a snapshot file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let contents = fs::read_to_string(path).map_err(SnapshotError::Io)?;
        let set = Self::from_json(&contents)?;
        debug!(
            "Loaded simulated set from {} ({} tracks)",
            path.display(),
            set.tracks.len()
        );
        Ok(set)
    }

    /// Every command invoked so far, in order. Refused commands are not logged.
    pub fn command_log(&self) -> &[Command] {
        &self.command_log
    }

    /// Name of the selected track, if any.
    pub fn selected_track_name(&self) -> Option<&str> {
        self.selected_track
            .and_then(|index| self.tracks.get(index))
            .map(String::as_str)
    }

    fn expect_number(property: Property, value: &Value) -> Result<f64, HandleError> {
        value.as_number().ok_or(HandleError::TypeMismatch {
            property,
            expected: "a number",
        })
    }
}

impl TransportControlHandle for SimulatedSet {
    fn get_property(&self, property: Property) -> Result<Value, HandleError> {
        let value = match property {
            Property::VisibleTimeRange => match self.visible_time_range {
                Some([start, end]) => Value::List(vec![start, end]),
                None => Value::Null,
            },
            Property::CurrentSongTime => Value::Number(self.current_song_time),
            Property::LastEventTime => self.last_event_time.map_or(Value::Null, Value::Number),
            Property::IsPlaying => Value::Bool(self.is_playing),
            Property::SelectedTrack => self.selected_track.map_or(Value::Null, Value::Track),
        };
        Ok(value)
    }

    fn set_property(&mut self, property: Property, value: Value) -> Result<(), HandleError> {
        match property {
            Property::VisibleTimeRange => {
                let (start, end) = value.as_range().ok_or(HandleError::TypeMismatch {
                    property,
                    expected: "a [start, end] list",
                })?;
                match self.visible_time_range.as_mut() {
                    Some(range) => *range = [start, end],
                    None => return Err(HandleError::MissingProperty(property)),
                }
            }
            Property::CurrentSongTime => {
                self.current_song_time = Self::expect_number(property, &value)?;
            }
            Property::LastEventTime => {
                return Err(HandleError::Host(format!("{property} is read-only")));
            }
            Property::IsPlaying => {
                self.is_playing = value.is_truthy();
            }
            Property::SelectedTrack => {
                let index = value.as_track().ok_or(HandleError::TypeMismatch {
                    property,
                    expected: "a track reference",
                })?;
                if index >= self.tracks.len() {
                    return Err(HandleError::OutOfRange {
                        index,
                        len: self.tracks.len(),
                    });
                }
                self.selected_track = Some(index);
            }
        }
        Ok(())
    }

    fn invoke_command(&mut self, command: Command) -> Result<(), HandleError> {
        if self.unsupported_commands.contains(&command) {
            return Err(HandleError::UnsupportedCommand(command));
        }
        match command {
            Command::ZoomSelection => {
                if let Some([start, end]) = self.visible_time_range.as_mut() {
                    *end = *start + (*end - *start) / 2.0;
                }
            }
            Command::ShowEntireSong => {
                if let Some(range) = self.visible_time_range.as_mut() {
                    let song_end = self.last_event_time.unwrap_or(range[1]).max(range[1]);
                    *range = [0.0, song_end];
                }
            }
            Command::StartPlaying => self.is_playing = true,
            Command::StopPlaying => self.is_playing = false,
        }
        self.command_log.push(command);
        Ok(())
    }

    fn child_count(&self, collection: Collection) -> Result<usize, HandleError> {
        match collection {
            Collection::Tracks => Ok(self.tracks.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_snapshot_uses_defaults() {
        let set = SimulatedSet::from_json(r#"{ "current_song_time": 5.0 }"#).unwrap();
        assert_eq!(set.current_song_time, 5.0);
        assert_eq!(set.tracks.len(), 4);
        assert_eq!(set.visible_time_range, Some([0.0, 16.0]));
    }

    #[test]
    fn test_null_fields_read_as_null() {
        let set = SimulatedSet::from_json(
            r#"{ "visible_time_range": null, "last_event_time": null }"#,
        )
        .unwrap();
        assert_eq!(set.get_property(Property::VisibleTimeRange), Ok(Value::Null));
        assert_eq!(set.get_property(Property::LastEventTime), Ok(Value::Null));
    }

    #[test]
    fn test_unsupported_command_is_refused_and_not_logged() {
        let mut set = SimulatedSet::from_json(r#"{ "unsupported_commands": ["zoom_selection"] }"#)
            .unwrap();
        assert_eq!(
            set.invoke_command(Command::ZoomSelection),
            Err(HandleError::UnsupportedCommand(Command::ZoomSelection))
        );
        assert!(set.command_log().is_empty());
    }

    #[test]
    fn test_zoom_commands_reshape_range() {
        let mut set = SimulatedSet::default();
        set.invoke_command(Command::ZoomSelection).unwrap();
        assert_eq!(set.visible_time_range, Some([0.0, 8.0]));
        set.invoke_command(Command::ShowEntireSong).unwrap();
        assert_eq!(set.visible_time_range, Some([0.0, 64.0]));
        assert_eq!(
            set.command_log(),
            &[Command::ZoomSelection, Command::ShowEntireSong]
        );
    }

    #[test]
    fn test_selected_track_rejects_out_of_range() {
        let mut set = SimulatedSet::default();
        assert_eq!(
            set.set_property(Property::SelectedTrack, Value::Track(9)),
            Err(HandleError::OutOfRange { index: 9, len: 4 })
        );
        set.set_property(Property::SelectedTrack, Value::Track(2)).unwrap();
        assert_eq!(set.selected_track_name(), Some("3 MIDI"));
    }

    #[test]
    fn test_last_event_time_is_read_only() {
        let mut set = SimulatedSet::default();
        assert!(matches!(
            set.set_property(Property::LastEventTime, Value::Number(1.0)),
            Err(HandleError::Host(_))
        ));
    }

    #[test]
    fn test_malformed_snapshot_is_parse_error() {
        let err = SimulatedSet::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Parse(_)));
    }
}
