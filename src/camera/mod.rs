//! Camera viewport selection.

/// Square viewport and the per-phase selection rule.
pub mod viewport;
