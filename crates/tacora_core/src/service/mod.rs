//! Use-case services over repository and scheduler.
//!
//! # Responsibility
//! - Provide stable lifecycle entry points for core callers.
//! - Keep the silent no-op posture for not-found lifecycle calls at one
//!   layer instead of scattering it.

pub mod task_service;
