//! Names and defaults shared across pkgplan.

/// Config file looked up at the project root.
pub const CONFIG_FILENAME: &str = "pkgplan.toml";

/// Prefix for `PKGPLAN__SECTION__KEY` config overrides.
pub const CONFIG_ENV_PREFIX: &str = "PKGPLAN";

/// Separator between path segments in config override variables.
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Overrides project root discovery when set.
pub const ROOT_ENV: &str = "PKGPLAN_ROOT";

/// Project-relative location of the packaging spec file.
pub const PACKAGE_SPEC_FILE: &str = "dev-tools/packaging/packages.yml";

/// Spec file name looked up in the current directory by local spec loads.
pub const LOCAL_SPEC_FILE: &str = "packages.yml";

/// Development-mode flag consulted when deriving build variables.
pub const DEV_ENV: &str = "DEV";
pub const SNAPSHOT_ENV: &str = "SNAPSHOT";
pub const EXTERNAL_ENV: &str = "EXTERNAL";
pub const PLATFORMS_ENV: &str = "PLATFORMS";
pub const PACKAGES_ENV: &str = "PACKAGES";

/// Version variables, checked in order.
pub const VERSION_ENVS: [&str; 2] = ["BEAT_VERSION", "PKGPLAN_VERSION"];

/// Overlay variable handed to the stack tool to pin the agent image.
pub const IMAGE_REF_OVERRIDE_ENV: &str = "ELASTIC_AGENT_IMAGE_REF_OVERRIDE";

/// Go package that owns the release link-time variables.
pub const RELEASE_PACKAGE: &str = "github.com/elastic/elastic-agent/internal/pkg/release";
