//! Packaging specifications.
//!
//! A spec file is a YAML document with a single top-level `specs` mapping from
//! spec names to lists of package build records:
//!
//! ```yaml
//! specs:
//!   oss:
//!     - name: linux-x64
//!       os: linux
//!       types: [tgz, deb]
//! ```
//!
//! Specs are resolved by name into a [`BuildPlan`], which the packaging stage
//! consumes later.

pub mod load;
pub mod packaging;
pub mod plan;
pub mod types;

pub use load::{load_specs, load_specs_with};
pub use packaging::{
  Packaging, PackagingError, load_local_named_spec, must_use_packaging, use_packaging, use_packaging_with,
};
pub use plan::BuildPlan;
pub use types::{MergePolicy, PackageBuildArgs, PackageSpecSet, SpecError};
