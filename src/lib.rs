//! Pinggraph - ICMP Latency Sampler
//!
//! This crate provides the core functionality for pinggraph: a sampling loop
//! that periodically probes a remote host with the system ping utility,
//! parses the round-trip latency from the command output, and projects the
//! most recent samples into a chartable view. It can be used as a library,
//! or run as a terminal application with the `pinggraph` executable.
//!
//! # Architecture
//!
//! - **Probe**: one-shot echo probes via the external ping utility, plus
//!   pure latency extraction from its output
//! - **Sampler**: the `Session` handle owning the polling loop and the
//!   in-memory sample series
//! - **Presenter**: pure projection of sampler state into a renderable view
//! - **UI**: terminal front-end with a start/stop toggle and a live chart
//! - **Config**: YAML configuration with CLI/env overrides
//!
//! # Example
//!
//! ```rust,no_run
//! use pinggraph::probe::PingProber;
//! use pinggraph::sampler::{Session, SessionConfig};
//! use pinggraph::presenter;
//! use std::sync::Arc;
//!
//! # async fn demo() {
//! let config = SessionConfig::new("8.8.8.8");
//! let session = Session::start(config, Arc::new(PingProber::default()));
//!
//! // ... later: project the state for display and tear down.
//! let samples = session.samples();
//! let _view = presenter::project(session.is_active(), &samples, presenter::DISPLAY_WINDOW);
//! session.stop().await;
//! # }
//! ```

pub mod config;
pub mod presenter;
pub mod probe;
pub mod sampler;
pub mod ui;

pub use config::{AppConfig, ConfigError};
pub use presenter::{project, DisplayState, SessionStatus, DISPLAY_WINDOW};
pub use probe::{extract_latency, parse_latency_ms, PingProber, ProbeError, Prober};
pub use sampler::{Sample, Session, SessionConfig, SessionStats};
