//! Common constants used throughout the next-gen application.

/// Archive downloaded when no override is configured
pub const TEMPLATE_URL: &str = "https://github.com/AndreCox/next-template/archive/main.zip";

/// Name of the downloaded archive inside the project directory
pub const ARCHIVE_FILE: &str = "next.zip";

/// Staging directory the archive is unpacked into
pub const STAGING_DIR: &str = "nextgen-output";

/// Top-level directory of the template inside the archive
pub const TEMPLATE_ROOT: &str = "next-template-main";

/// Payloads below this many bytes are treated as a failed download
pub const MIN_ARCHIVE_SIZE: u64 = 1_000_000;

/// Additional attempts after the first undersized download
pub const MAX_RETRIES: u32 = 5;

/// Value of `next-gen.id` in the manifest of a generated project
pub const SCAFFOLD_MARKER: &str = "4326dec8a92b394498ebe4f542833e5a";

/// Package manager used to install dependencies
pub const PACKAGE_MANAGER: &str = "yarn";

/// GitHub repository publishing next-gen releases
pub const RELEASE_REPO: &str = "AndreCox/next-gen";

/// Package manifest, relative to the project root
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Tauri application descriptor, relative to the project root
pub const APP_DESCRIPTOR: &str = "src-tauri/tauri.conf.json";

/// Rust build manifest of the desktop shell, relative to the project root
pub const BUILD_MANIFEST: &str = "src-tauri/Cargo.toml";
