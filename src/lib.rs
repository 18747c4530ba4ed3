#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Terminal client for logging travelled distances to a log sheet API,
//! gated by a one-time authenticator code.

pub mod config;
pub mod logging;
pub mod model;
pub mod storage;
pub mod transport;
pub mod tui;
