//! Playback timing: which phase is active and how much of the curve is revealed.
//!
//! Everything here is derived from a frame index. Nothing is stored between frames, so any frame
//! can be computed independently (and in parallel).

/// Derived playback cursor (phase, offset, revealed count).
pub mod cursor;
/// Ordered camera phases and the scheduler that selects one for a point in time.
pub mod schedule;
