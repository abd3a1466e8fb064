//! # anvil-store
//!
//! Keyed storage for reusable configuration fragments:
//! - Per-platform Ansible defaults
//! - Per-environment requirements templates
//! - GitLab CI job fragments
//! - Roles and per-role variable blocks
//!
//! The generation core consumes the store through the read-only
//! [`FragmentStore`] and [`RoleStore`] traits; record management is the
//! responsibility of whatever admin surface owns the store file.

pub mod error;
pub mod memory;
pub mod store;
pub mod types;

pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use store::{FragmentStore, RoleStore};
pub use types::{
    CiFragment, CiFragmentFilter, CiFragmentKind, RequirementsScope, Role, RoleVariable,
    RoleVariableEntry,
};
