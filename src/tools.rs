//! External programs: version control and the package manager.

use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// Access to programs installed on the system.
pub trait Toolchain {
    /// Whether `program --version` runs successfully.
    fn is_available(&self, program: &str) -> bool;

    /// Runs `program` with `args` inside `cwd`.
    ///
    /// # Errors
    /// * `Error::IoError` if the program cannot be started or exits non-zero
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()>;
}

/// Runs programs through `std::process::Command`.
#[derive(Debug, Default)]
pub struct SystemToolchain;

impl Toolchain for SystemToolchain {
    fn is_available(&self, program: &str) -> bool {
        Command::new(program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()> {
        debug!("Running '{} {}' in '{}'.", program, args.join(" "), cwd.display());
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .status()
            .map_err(Error::IoError)?;

        if !status.success() {
            return Err(Error::IoError(std::io::Error::other(format!(
                "'{} {}' failed with status: {}",
                program,
                args.join(" "),
                status
            ))));
        }
        Ok(())
    }
}

/// Commands that put a fresh project under version control.
pub const GIT_SETUP: [&[&str]; 3] = [&["init"], &["add", "."], &["commit", "-m", "Initial commit"]];

/// Initializes a git repository in `project_root` and commits everything.
pub fn setup_git(tools: &dyn Toolchain, project_root: &Path) -> Result<()> {
    for args in GIT_SETUP {
        tools.run("git", args, project_root)?;
    }
    Ok(())
}

/// Installs dependencies with `package_manager`.
pub fn install_dependencies(
    tools: &dyn Toolchain,
    package_manager: &str,
    project_root: &Path,
) -> Result<()> {
    tools.run(package_manager, &["install"], project_root)
}
