//! Read contracts consumed by the generation core
//!
//! Every method returns `Result` so a failing backend surfaces as a
//! store-lookup failure distinct from "record absent" (`Ok(None)`).

use crate::error::Result;
use crate::types::{CiFragment, CiFragmentFilter, Role, RoleVariableEntry};
use anvil_core::{Environment, OsPlatform};

/// Read access to stored configuration fragments
pub trait FragmentStore {
    /// Ansible connection defaults for a platform
    fn os_default(&self, os_platform: OsPlatform) -> Result<Option<String>>;

    /// Requirements template for an environment; an `all`-scoped record
    /// serves environments without a specific one
    fn requirements_template(&self, environment: Environment) -> Result<Option<String>>;

    /// Content of the first fragment matching the filter
    fn ci_fragment(&self, filter: &CiFragmentFilter) -> Result<Option<String>>;

    /// All fragments matching the filter, in stored order
    fn ci_fragments(&self, filter: &CiFragmentFilter) -> Result<Vec<CiFragment>>;
}

/// Read access to roles and their variable blocks
pub trait RoleStore {
    /// Role record by ID
    fn role(&self, id: i64) -> Result<Option<Role>>;

    /// Variable block for a (role, platform) pair, joined with the role name
    fn role_variable(
        &self,
        role_id: i64,
        os_platform: OsPlatform,
    ) -> Result<Option<RoleVariableEntry>>;
}
