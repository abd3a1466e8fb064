//! # anvil-core
//!
//! Core library for the Anvil deployment-bundle generator providing:
//! - Template request and domain types
//! - Request validation
//! - Deterministic naming rules shared by every generator
//! - Region grouping for VM groups

pub mod error;
pub mod naming;
pub mod region;
pub mod types;

pub use error::{Error, Result};
pub use types::{Environment, OsPlatform, TemplateRequest, VmGroup};
