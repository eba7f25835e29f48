//! Smoothing of sparse authoritative updates: interval measurement and
//! rate-derived interpolation toward remote targets.

pub mod interpolator;
pub mod interval;
