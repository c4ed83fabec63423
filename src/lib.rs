//! # Vidsim Library
//!
//! Content-based video recommendations. Per-modality features (visual,
//! audio, text) are fused into one embedding per video, indexed by cosine
//! similarity, and turned into cached top-K "similar videos" lists.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod extract;
pub mod processing;
pub mod storage;
pub mod ui;
