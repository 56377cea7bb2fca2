//! Session-oriented rendering API.

/// Session that owns the generated curve, the phase schedule and a backend.
pub mod spiral_session;
