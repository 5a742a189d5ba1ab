//! Domain services used by HTTP routes and background tasks.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the dashboard's behavior (scanning, auditing,
//! simulated runs, localization-aware rendering) so route handlers can stay
//! focused on protocol translation.

pub mod ai;
pub mod assistant;
pub mod audit;
pub mod dashboard;
pub mod downloads;
pub mod extractor;
pub mod generator;
pub mod neighborhood;
pub mod scanner;
pub mod search;
pub mod simulator;
pub mod view;
pub mod zero_key;
