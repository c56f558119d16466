//! Single test binary entry point.
//!
//! Everything under `tests/it/` links into one binary.
//!
//! Structure:
//! - integration: scene workflows spanning input, poses and picking
//! - unit: single-component tests
