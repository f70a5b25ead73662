//! # Core Navigation Logic
//!
//! This module turns single keys into transport and view commands.
//! It knows nothing about terminals or how keys are captured.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • KeySymbol (input)    │
//!                    │  • Action (key table)   │
//!                    │  • KeyCommandRouter     │
//!                    │                         │
//!                    │  Always answers.        │
//!                    └───────────┬─────────────┘
//!                                │ TransportControlHandle
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │ Simulated  │      │   Fake     │      │  Live set  │
//!     │    set     │      │  (tests)   │      │ (external) │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`key`]: `KeySymbol` and the host message shapes that carry keys
//! - [`action`]: The `Action` enum and the help text derived from it
//! - [`router`]: `KeyCommandRouter`, which runs actions against a host
//! - [`state`]: `NavigationState`, the selected-track counter
//! - [`status`]: `StatusMessage` and the sinks that receive it
//! - [`config`]: Settings with defaults → file → env → CLI resolution

pub mod action;
pub mod config;
pub mod key;
pub mod router;
pub mod state;
pub mod status;

pub use action::Action;
pub use key::{HostMessage, KeySymbol};
pub use router::KeyCommandRouter;
pub use status::{StatusKind, StatusMessage, StatusSink};
