use crate::config::model::{AnimationConfig, Style};
use crate::curve::generator::CurveSpec;
use crate::foundation::core::{Canvas, Fps};
use crate::playback::cursor::{Clock, RevealMode};
use crate::playback::schedule::{PhaseKind, PhaseSpec};

/// Built-in animation setups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Wide, medium and close phases of five seconds each.
    Classic,
    /// A single ten-second close phase over a densely sampled curve.
    CloseUp,
    /// Alternates between the wide view and a close follow every 2000 frames.
    Pulse,
    /// Plain line drawing, one point per frame, no camera movement.
    Trace,
}

impl Preset {
    /// All presets, in display order.
    pub const ALL: [Preset; 4] = [Self::Classic, Self::CloseUp, Self::Pulse, Self::Trace];

    /// Stable CLI/JSON name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::CloseUp => "close-up",
            Self::Pulse => "pulse",
            Self::Trace => "trace",
        }
    }

    /// Look up a preset by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Build the preset's configuration.
    pub fn config(self) -> AnimationConfig {
        match self {
            Self::Classic => AnimationConfig {
                canvas: Canvas {
                    width: 800,
                    height: 1200,
                },
                fps: Fps { num: 60, den: 1 },
                duration: 900,
                clock: Clock::Seconds,
                reveal: RevealMode::Elapsed,
                curve: curve(50_000),
                phases: vec![
                    phase(PhaseKind::Wide, 5.0, 105.0, 2.5),
                    phase(PhaseKind::Medium, 5.0, 50.0, 1.0),
                    phase(PhaseKind::Close, 5.0, 20.0, 0.2),
                ],
                style: Style {
                    line_width: 0.5,
                    ..Style::default()
                },
            },
            Self::CloseUp => AnimationConfig {
                canvas: Canvas {
                    width: 1350,
                    height: 1080,
                },
                fps: Fps { num: 60, den: 1 },
                duration: 3600,
                clock: Clock::Seconds,
                reveal: RevealMode::Elapsed,
                curve: curve(1_000_000),
                phases: vec![
                    phase(PhaseKind::Wide, 0.0, 2000.0, 2.5),
                    phase(PhaseKind::Medium, 0.0, 2000.0, 1.5),
                    phase(PhaseKind::Close, 10.0, 2000.0, 0.4),
                ],
                style: Style {
                    background: [24, 24, 24, 255],
                    line_width: 1.7,
                    marker_radius: 1.4,
                    ..Style::default()
                },
            },
            Self::Pulse => AnimationConfig {
                canvas: Canvas {
                    width: 800,
                    height: 1200,
                },
                fps: Fps { num: 60, den: 1 },
                duration: 8000,
                clock: Clock::Frames,
                reveal: RevealMode::Elapsed,
                curve: curve(50_000),
                phases: vec![
                    phase(PhaseKind::Wide, 2000.0, 1.0, 2.5),
                    phase(PhaseKind::Close, 2000.0, 1.0, 0.9),
                ],
                style: Style {
                    line_width: 0.5,
                    marker_radius: 0.0,
                    ..Style::default()
                },
            },
            Self::Trace => AnimationConfig {
                canvas: Canvas {
                    width: 1200,
                    height: 1200,
                },
                fps: Fps { num: 60, den: 1 },
                duration: 10_000,
                clock: Clock::Frames,
                reveal: RevealMode::Elapsed,
                curve: curve(10_000),
                phases: vec![phase(PhaseKind::Wide, 10_000.0, 1.0, 2.5)],
                style: Style {
                    background: [64, 67, 69, 255],
                    line: [255, 255, 255, 255],
                    line_width: 2.8,
                    marker_radius: 0.0,
                    ..Style::default()
                },
            },
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Preset::Classic.config()
    }
}

fn curve(samples: usize) -> CurveSpec {
    CurveSpec {
        turns: 113.0,
        samples,
        ..CurveSpec::default()
    }
}

fn phase(kind: PhaseKind, duration: f64, speed: f64, half_width: f64) -> PhaseSpec {
    PhaseSpec {
        kind,
        duration,
        speed,
        half_width,
    }
}
