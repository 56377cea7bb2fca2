//! JSON-facing animation configuration and the built-in presets.

/// Configuration document and validation.
pub mod model;
/// Named presets.
pub mod presets;
