//! # Host Object Model
//!
//! The capability surface the router drives. A host (a Live set, a test
//! double, the in-memory simulation) exposes named properties, a track
//! collection and zero-argument commands. Nothing here knows about keys.
//!
//! ```text
//! TransportControlHandle
//! ├── get_property(Property)        -> Value
//! ├── set_property(Property, Value)
//! ├── invoke_command(Command)
//! └── child_count(Collection)       -> usize
//! ```
//!
//! Every call is fallible. The router turns failures into status lines,
//! so implementations should return `HandleError` rather than panic.

pub mod error;
pub mod simulated;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use error::HandleError;
pub use simulated::SimulatedSet;

/// Readable/writable properties on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    VisibleTimeRange,
    CurrentSongTime,
    LastEventTime,
    IsPlaying,
    SelectedTrack,
}

impl Property {
    /// Name of the property in the host's object model.
    pub fn as_str(&self) -> &'static str {
        match self {
            Property::VisibleTimeRange => "visible_time_range",
            Property::CurrentSongTime => "current_song_time",
            Property::LastEventTime => "last_event_time",
            Property::IsPlaying => "is_playing",
            Property::SelectedTrack => "selected_track",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Child collections the router can count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Tracks,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Tracks => "tracks",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-argument commands the host may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ZoomSelection,
    ShowEntireSong,
    StartPlaying,
    StopPlaying,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::ZoomSelection => "zoom_selection",
            Command::ShowEntireSong => "show_entire_song",
            Command::StartPlaying => "start_playing",
            Command::StopPlaying => "stop_playing",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property value as the host hands it out.
///
/// Hosts are loosely typed: a "null" read is a legitimate answer, distinct
/// from a failed read.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    List(Vec<f64>),
    /// Reference to a track by zero-based index.
    Track(usize),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Host truthiness: null, false, zero and empty lists are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::List(items) => !items.is_empty(),
            Value::Track(_) => true,
        }
    }

    /// Numeric view. Single-element lists count as numbers because hosts
    /// commonly wrap scalar reads in a one-element array.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::List(items) if items.len() == 1 => Some(items[0]),
            _ => None,
        }
    }

    /// The first two elements of a list value, if it has at least two.
    pub fn as_range(&self) -> Option<(f64, f64)> {
        match self {
            Value::List(items) if items.len() >= 2 => Some((items[0], items[1])),
            _ => None,
        }
    }

    pub fn as_track(&self) -> Option<usize> {
        match self {
            Value::Track(index) => Some(*index),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// The host's controllable object graph.
///
/// Calls are synchronous and assumed to be serialized by the caller; the
/// router owns its handle exclusively.
pub trait TransportControlHandle {
    fn get_property(&self, property: Property) -> Result<Value, HandleError>;

    fn set_property(&mut self, property: Property, value: Value) -> Result<(), HandleError>;

    fn invoke_command(&mut self, command: Command) -> Result<(), HandleError>;

    fn child_count(&self, collection: Collection) -> Result<usize, HandleError>;
}

impl<T: TransportControlHandle + ?Sized> TransportControlHandle for Box<T> {
    fn get_property(&self, property: Property) -> Result<Value, HandleError> {
        (**self).get_property(property)
    }

    fn set_property(&mut self, property: Property, value: Value) -> Result<(), HandleError> {
        (**self).set_property(property, value)
    }

    fn invoke_command(&mut self, command: Command) -> Result<(), HandleError> {
        (**self).invoke_command(command)
    }

    fn child_count(&self, collection: Collection) -> Result<usize, HandleError> {
        (**self).child_count(collection)
    }
}
