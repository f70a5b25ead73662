//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::config::NavSettings;
use crate::core::router::KeyCommandRouter;
use crate::core::status::StatusSink;
use crate::host::{Collection, Command, HandleError, Property, TransportControlHandle, Value};

/// One interaction with the fake host.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(Property),
    Set(Property, Value),
    Invoke(Command),
    Count(Collection),
}

/// A host whose every property can be set to any value, including ones a
/// well-behaved host would never return, and whose failures are scripted.
pub struct FakeHandle {
    pub visible_time_range: Value,
    pub current_song_time: Value,
    pub last_event_time: Value,
    pub is_playing: Value,
    pub selected_track: Value,
    pub track_count: usize,
    /// Reads of these fail with `MissingProperty`.
    pub fail_reads: Vec<Property>,
    /// Writes to these fail with `Host`.
    pub fail_writes: Vec<Property>,
    pub unsupported: Vec<Command>,
    calls: RefCell<Vec<Call>>,
}

impl FakeHandle {
    pub fn with_tracks(track_count: usize) -> Self {
        Self {
            visible_time_range: Value::List(vec![0.0, 16.0]),
            current_song_time: Value::Number(0.0),
            last_event_time: Value::Number(32.0),
            is_playing: Value::Bool(false),
            selected_track: Value::Null,
            track_count,
            fail_reads: Vec::new(),
            fail_writes: Vec::new(),
            unsupported: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Commands that were accepted, in order.
    pub fn commands(&self) -> Vec<Command> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Invoke(command) => Some(*command),
                _ => None,
            })
            .collect()
    }

    fn slot(&mut self, property: Property) -> &mut Value {
        match property {
            Property::VisibleTimeRange => &mut self.visible_time_range,
            Property::CurrentSongTime => &mut self.current_song_time,
            Property::LastEventTime => &mut self.last_event_time,
            Property::IsPlaying => &mut self.is_playing,
            Property::SelectedTrack => &mut self.selected_track,
        }
    }
}

impl TransportControlHandle for FakeHandle {
    fn get_property(&self, property: Property) -> Result<Value, HandleError> {
        self.calls.borrow_mut().push(Call::Get(property));
        if self.fail_reads.contains(&property) {
            return Err(HandleError::MissingProperty(property));
        }
        let value = match property {
            Property::VisibleTimeRange => &self.visible_time_range,
            Property::CurrentSongTime => &self.current_song_time,
            Property::LastEventTime => &self.last_event_time,
            Property::IsPlaying => &self.is_playing,
            Property::SelectedTrack => &self.selected_track,
        };
        Ok(value.clone())
    }

    fn set_property(&mut self, property: Property, value: Value) -> Result<(), HandleError> {
        if self.fail_writes.contains(&property) {
            return Err(HandleError::Host(format!("{property} rejected the write")));
        }
        self.calls
            .borrow_mut()
            .push(Call::Set(property, value.clone()));
        *self.slot(property) = value;
        Ok(())
    }

    fn invoke_command(&mut self, command: Command) -> Result<(), HandleError> {
        if self.unsupported.contains(&command) {
            return Err(HandleError::UnsupportedCommand(command));
        }
        self.calls.borrow_mut().push(Call::Invoke(command));
        Ok(())
    }

    fn child_count(&self, collection: Collection) -> Result<usize, HandleError> {
        self.calls.borrow_mut().push(Call::Count(collection));
        Ok(self.track_count)
    }
}

/// Collects posted lines; clones share the same buffer.
#[derive(Clone, Default)]
pub struct RecordingSink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl StatusSink for RecordingSink {
    fn post(&mut self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

/// Creates a router over `handle` with default settings and a recording sink.
pub fn router_with(handle: FakeHandle) -> (KeyCommandRouter<FakeHandle>, RecordingSink) {
    let sink = RecordingSink::default();
    let router = KeyCommandRouter::new(handle, NavSettings::default()).with_sink(sink.clone());
    (router, sink)
}
