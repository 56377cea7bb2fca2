use crate::foundation::core::{Fps, FrameIndex};
use crate::playback::schedule::{PhaseKind, PhaseSchedule};

/// Unit that phase durations and speeds are expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clock {
    /// Time is `frame / fps` seconds.
    #[default]
    Seconds,
    /// Time is the raw frame index.
    Frames,
}

impl Clock {
    /// Convert a frame index into clock units.
    pub fn time_at(self, frame: FrameIndex, fps: Fps) -> f64 {
        match self {
            Self::Seconds => fps.frames_to_secs(frame.0),
            Self::Frames => frame.0 as f64,
        }
    }
}

/// How the revealed-point count is derived from time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealMode {
    /// `floor(t * speed_of_active_phase)`. The count jumps when the active speed changes.
    #[default]
    Elapsed,
    /// Each phase only advances the count while it is active.
    Integrated,
}

/// Playback state for a single frame. Derived, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackCursor {
    /// Frame the cursor was computed for.
    pub frame: FrameIndex,
    /// Time in clock units.
    pub time: f64,
    /// Active phase.
    pub phase: PhaseKind,
    /// Time since the active phase began, in clock units.
    pub phase_offset: f64,
    /// Number of completed phase cycles.
    pub lap: u64,
    /// Number of curve points drawn, always in `[0, N)`.
    pub revealed: usize,
}

impl PlaybackCursor {
    /// Compute the cursor for `frame` over a curve of `n` points.
    pub fn at(
        schedule: &PhaseSchedule,
        clock: Clock,
        reveal: RevealMode,
        fps: Fps,
        n: usize,
        frame: FrameIndex,
    ) -> Self {
        let time = clock.time_at(frame, fps);
        let slot = schedule.locate(time);

        let progress = match reveal {
            RevealMode::Elapsed => {
                let speed = schedule.phases()[slot.index].speed;
                time * speed
            }
            RevealMode::Integrated => schedule.integrated_progress(time),
        };

        Self {
            frame,
            time,
            phase: slot.kind,
            phase_offset: slot.offset,
            lap: slot.lap,
            revealed: wrap_count(progress, n),
        }
    }

    /// Index of the most recently revealed point, if any.
    pub fn tip(&self) -> Option<usize> {
        self.revealed.checked_sub(1)
    }
}

fn wrap_count(progress: f64, n: usize) -> usize {
    if n == 0 || !progress.is_finite() || progress <= 0.0 {
        return 0;
    }
    // Saturates for absurdly large values; the modulo keeps the result in range either way.
    let whole = progress.floor() as u64;
    (whole % n as u64) as usize
}

#[cfg(test)]
#[path = "../../tests/unit/playback/cursor.rs"]
mod tests;
