//! Spiral curve sampling.
//!
//! The curve is `z(θ) = e^(iθ) + e^(i·ratio·θ)` sampled uniformly over a whole number of turns.
//! Samples are generated once per session and shared read-only afterwards.

/// Curve parameters and the eager point generator.
pub mod generator;
