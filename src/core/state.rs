//! # Navigation State
//!
//! The only thing the router remembers between keys is which track it last
//! selected. Everything else is read fresh from the host on every dispatch.
//!
//! State changes only happen through the track-selection actions in
//! router.rs.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Zero-based. Kept below the host's track count whenever it is non-zero.
    pub selected_track_index: usize,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_starts_at_first_track() {
        assert_eq!(NavigationState::new().selected_track_index, 0);
    }
}
