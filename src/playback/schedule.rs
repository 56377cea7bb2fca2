use crate::foundation::error::{SpiralError, SpiralResult};
use crate::foundation::math::wrap_unit;

/// Closed set of camera phases.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Whole curve in view; the camera does not follow the tip.
    Wide,
    /// Camera follows the tip at a medium zoom.
    Medium,
    /// Camera follows the tip at a close zoom.
    Close,
}

impl PhaseKind {
    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wide => "wide",
            Self::Medium => "medium",
            Self::Close => "close",
        }
    }

    /// Return `true` when the camera tracks the most recently revealed point.
    pub fn follows_tip(self) -> bool {
        !matches!(self, Self::Wide)
    }
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of one phase in the cycle.
///
/// `duration` and `speed` are expressed in clock units (seconds or frames, see
/// [`crate::Clock`]).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseSpec {
    /// Which phase this is.
    pub kind: PhaseKind,
    /// Length of the phase within one cycle. Zero disables the phase.
    pub duration: f64,
    /// Points revealed per clock unit while this phase is active.
    pub speed: f64,
    /// Half-width of the square viewport, in curve units.
    pub half_width: f64,
}

impl PhaseSpec {
    fn validate(&self) -> SpiralResult<()> {
        let name = self.kind.as_str();
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(SpiralError::validation(format!(
                "phase '{name}' duration must be finite and >= 0"
            )));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(SpiralError::validation(format!(
                "phase '{name}' speed must be finite and >= 0"
            )));
        }
        if !self.half_width.is_finite() || self.half_width <= 0.0 {
            return Err(SpiralError::validation(format!(
                "phase '{name}' half_width must be finite and > 0"
            )));
        }
        Ok(())
    }
}

/// Where a point in time falls inside the phase cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseSlot {
    /// Position of the active phase in the schedule.
    pub index: usize,
    /// Active phase.
    pub kind: PhaseKind,
    /// Time elapsed since the active phase began, in clock units.
    pub offset: f64,
    /// Time elapsed since the current cycle began, in clock units.
    pub cycle_time: f64,
    /// Number of completed cycles.
    pub lap: u64,
}

/// Ordered, validated list of phases that repeats forever.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseSchedule {
    phases: Vec<PhaseSpec>,
    // Cumulative end boundary of each phase.
    ends: Vec<f64>,
    total: f64,
}

impl PhaseSchedule {
    /// Validate and build a schedule.
    ///
    /// Each phase kind may appear at most once, and at least one phase must have a non-zero
    /// duration.
    pub fn new(phases: Vec<PhaseSpec>) -> SpiralResult<Self> {
        if phases.is_empty() {
            return Err(SpiralError::validation("phase schedule must not be empty"));
        }
        for (i, p) in phases.iter().enumerate() {
            p.validate()?;
            if phases[..i].iter().any(|q| q.kind == p.kind) {
                return Err(SpiralError::validation(format!(
                    "phase '{}' appears more than once",
                    p.kind
                )));
            }
        }

        let mut ends = Vec::with_capacity(phases.len());
        let mut acc = 0.0;
        for p in &phases {
            acc += p.duration;
            ends.push(acc);
        }
        if acc <= 0.0 || !acc.is_finite() {
            return Err(SpiralError::validation(
                "phase schedule total duration must be > 0",
            ));
        }

        Ok(Self {
            phases,
            ends,
            total: acc,
        })
    }

    /// Configured phases, in cycle order.
    pub fn phases(&self) -> &[PhaseSpec] {
        &self.phases
    }

    /// Length of one full cycle.
    pub fn total_duration(&self) -> f64 {
        self.total
    }

    /// Configuration for `kind`, if it is part of the schedule.
    pub fn spec(&self, kind: PhaseKind) -> Option<&PhaseSpec> {
        self.phases.iter().find(|p| p.kind == kind)
    }

    /// Active phase at time `t`.
    pub fn phase_at(&self, t: f64) -> PhaseKind {
        self.locate(t).kind
    }

    /// Active phase at time `t` together with the offset inside it.
    pub fn locate(&self, t: f64) -> PhaseSlot {
        let t = if t.is_finite() { t } else { 0.0 };
        let lap = (t / self.total).floor().max(0.0) as u64;
        let phase_time = wrap_unit(t, self.total);

        let index = self
            .ends
            .iter()
            .position(|&end| phase_time < end)
            .unwrap_or_else(|| self.last_active_index());
        let start = self.ends[index] - self.phases[index].duration;

        PhaseSlot {
            index,
            kind: self.phases[index].kind,
            offset: (phase_time - start).max(0.0),
            cycle_time: phase_time,
            lap,
        }
    }

    /// Total time spent in each phase from `0` up to `t`, summed with each phase's speed.
    ///
    /// This is the number of points a reveal would have advanced had every phase only moved
    /// the cursor while it was active.
    pub fn integrated_progress(&self, t: f64) -> f64 {
        let slot = self.locate(t.max(0.0));
        let per_lap: f64 = self.phases.iter().map(|p| p.duration * p.speed).sum();
        let before: f64 = self.phases[..slot.index]
            .iter()
            .map(|p| p.duration * p.speed)
            .sum();
        let current = slot.offset * self.phases[slot.index].speed;
        slot.lap as f64 * per_lap + before + current
    }

    fn last_active_index(&self) -> usize {
        // `new` guarantees at least one phase with a non-zero duration.
        self.phases
            .iter()
            .rposition(|p| p.duration > 0.0)
            .unwrap_or(self.phases.len() - 1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/schedule.rs"]
mod tests;
