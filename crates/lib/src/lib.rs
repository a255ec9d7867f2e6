//! pkgplan-lib: packaging plans and build orchestration.
//!
//! This crate provides:
//! - `spec`: resolving named packaging specs from YAML files into a `BuildPlan`
//! - `buildvars`: link-time variables and packaging settings derived from the environment
//! - `exec`: running external tools with captured output inside tracing spans
//! - `stack`: starting and stopping the external service stack
//! - `driver`: the binary build sequence and its cleanup
//! - `config`: layered settings from `pkgplan.toml` and the environment

pub mod buildvars;
pub mod config;
pub mod consts;
pub mod driver;
pub mod exec;
pub mod platform;
pub mod spec;
pub mod stack;
pub mod util;
