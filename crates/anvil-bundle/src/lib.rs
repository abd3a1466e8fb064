//! Anvil bundle generation
//!
//! This crate assembles downloadable Ansible deployment bundles from a
//! template request and the configuration store. A bundle is a directory
//! tree (inventory hosts files, per-group variable files, per-group and
//! aggregate playbooks, a composite CI pipeline) packaged as a tar.gz
//! archive with a fixed `Ansible-Template` root entry.
//!
//! Generation is a pure function of the request and the store snapshot:
//! all file contents are computed up front ([`plan`]), then written into a
//! session-scoped working directory and archived. Each run owns a fresh
//! UUID-keyed session, so concurrent generations never collide.
//!
//! # Examples
//!
//! ```no_run
//! use anvil_bundle::BundleGenerator;
//! use anvil_core::TemplateRequest;
//! use anvil_store::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> anvil_bundle::Result<()> {
//!     let store = MemoryStore::new();
//!     let request: TemplateRequest =
//!         TemplateRequest::from_yaml(&std::fs::read_to_string("request.yaml")?)?;
//!
//!     let generator = BundleGenerator::new(store, std::env::temp_dir().join("anvil"));
//!     let output = generator.generate(&request).await?;
//!     println!("bundle at {}", output.archive_path.display());
//!
//!     generator.cleanup(&output.session_id);
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod defaults;
pub mod error;
pub mod generator;
pub mod inventory;
pub mod pipeline;
pub mod plan;
pub mod playbook;
pub mod session;

// Re-export commonly used types
pub use archive::DEFAULT_COMPRESSION_LEVEL;
pub use error::{Error, Result};
pub use generator::{BundleGenerator, GenerationOutput, Step};
pub use plan::{BundlePlan, PlannedFile};
pub use session::{Session, TEMPLATE_ROOT};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
