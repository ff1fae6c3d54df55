//! Computational core of an uncertainty-quantification playground.
//!
//! A browser UI lets a user pick a classifier variant, a perturbation
//! strategy, and an uncertainty measure, then shows a 2D uncertainty heatmap
//! over a synthetic "rose" dataset and, on click, a predicted-vs-ground-truth
//! probability density comparison for that grid point. This crate covers the
//! non-presentational pieces of that tool:
//!
//! - seeded rose-curve sampling ([`rose`]) over a deterministic PRNG ([`rng`])
//! - 2D and 1D Gaussian kernel density estimation ([`kde`])
//! - the ground-truth oracle and its distribution sampler ([`oracle`])
//! - validated loading of precomputed per-model result documents
//!   ([`results`], [`source`])
//! - view state, click-to-grid resolution, and the chart payloads handed to
//!   the external plotting layer ([`view`], [`plot`])
//!
//! Everything numeric is pure and synchronous; the only asynchronous boundary
//! is fetching a result document.

pub mod config;
pub mod kde;
pub mod logging;
pub mod oracle;
pub mod plot;
pub mod results;
pub mod rng;
pub mod rose;
pub mod source;
pub mod view;
