//! Sequencing of the whole run.
//!
//! ```text
//! CheckDestination ─┬─ empty ────► Fetching ► Extracting ► Copying ► CleaningUp ─┐
//!                   ├─ scaffold ──────────────────────────────────────────────────┤
//!                   └─ foreign ──► error                                          ▼
//!                          Customizing ► GitSetup? ► DependencyInstall? ► Done
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::Settings;
use crate::copier::copy_tree;
use crate::detect::{inspect_destination, Destination};
use crate::documents;
use crate::error::{Error, Result};
use crate::extractor::extract;
use crate::fetcher::{partial_path, Fetcher, HttpSource};
use crate::metadata::{self, ProjectMetadata};
use crate::output;
use crate::prompt::Prompter;
use crate::tools::{install_dependencies, setup_git, Toolchain};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CheckDestination,
    Fetching,
    Extracting,
    Copying,
    CleaningUp,
    Customizing,
    GitSetup,
    DependencyInstall,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Which way the run went after inspecting the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Empty directory: fetch, unpack and customize the template.
    FullFetch,
    /// Existing scaffold: only customize it.
    CustomizeOnly,
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct Report {
    pub route: Route,
    pub metadata: ProjectMetadata,
    pub git_initialized: bool,
    pub dependencies_installed: bool,
}

pub struct Pipeline<'a> {
    settings: &'a Settings,
    root: PathBuf,
    source: &'a dyn HttpSource,
    prompter: &'a mut dyn Prompter,
    tools: &'a dyn Toolchain,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        settings: &'a Settings,
        root: impl Into<PathBuf>,
        source: &'a dyn HttpSource,
        prompter: &'a mut dyn Prompter,
        tools: &'a dyn Toolchain,
    ) -> Self {
        Self { settings, root: root.into(), source, prompter, tools }
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root.join(&self.settings.archive_name)
    }

    pub fn staging_path(&self) -> PathBuf {
        self.root.join(&self.settings.staging_dir)
    }

    fn enter(&self, stage: Stage) {
        debug!("Entering stage {}.", stage);
    }

    /// Runs every stage in order and reports what happened.
    pub fn run(&mut self) -> Result<Report> {
        let route = self.check_destination()?;

        if route == Route::FullFetch {
            let unpacked = self.fetch_and_unpack();
            self.clean_up();
            unpacked?;
            output::special(
                "Great I've fetched the latest version for you, now I just need your help finishing up.",
            );
        } else {
            output::info("You already have a next-gen project in this folder. We can customize it for you.");
        }

        self.enter(Stage::Customizing);
        output::info("Customizing project");
        let metadata = metadata::collect(&mut *self.prompter)?;
        documents::customize(&self.root, &metadata)?;
        output::success("Done Customization!");

        let (git_initialized, dependencies_installed) = match route {
            Route::FullFetch => (self.git_setup(), self.dependency_install()),
            Route::CustomizeOnly => (false, false),
        };

        self.enter(Stage::Done);
        Ok(Report { route, metadata, git_initialized, dependencies_installed })
    }

    /// Decides between the full pipeline and customization only.
    ///
    /// # Errors
    /// * `Error::NotAProject` if the directory holds anything but a scaffold
    pub fn check_destination(&self) -> Result<Route> {
        self.enter(Stage::CheckDestination);
        output::info("Checking folder...");

        match inspect_destination(&self.root, &self.settings.scaffold_marker)? {
            Destination::Empty => {
                output::success("Folder is empty.");
                Ok(Route::FullFetch)
            }
            Destination::Scaffold => Ok(Route::CustomizeOnly),
            Destination::Foreign => Err(Error::NotAProject {
                dir: self.root.display().to_string(),
            }),
        }
    }

    fn fetch_and_unpack(&self) -> Result<()> {
        self.enter(Stage::Fetching);
        output::info("Downloading template...");
        let fetcher = Fetcher::new(
            self.source,
            self.settings.min_archive_size,
            self.settings.max_retries,
        );
        let archive = self.archive_path();
        fetcher.fetch(self.settings.template_url.as_str(), &archive)?;
        output::success("Template downloaded.");

        self.enter(Stage::Extracting);
        output::info("Unzipping template...");
        let staging = self.staging_path();
        let files = extract(&archive, &staging)?;
        output::success(&format!("Unzipped {} files.", files));

        self.enter(Stage::Copying);
        output::info("Copying files...");
        let copied = copy_tree(staging.join(&self.settings.template_root), &self.root)?;
        output::success(&format!("Copied {} files.", copied));
        Ok(())
    }

    /// Removes the archive and the staging directory; missing paths are fine.
    pub fn clean_up(&self) {
        self.enter(Stage::CleaningUp);
        output::info("Cleaning up...");

        let archive = self.archive_path();
        for file in [partial_path(&archive), archive] {
            if let Err(e) = fs::remove_file(&file) {
                report_cleanup_failure(&file, e);
            }
        }
        let staging = self.staging_path();
        if let Err(e) = fs::remove_dir_all(&staging) {
            report_cleanup_failure(&staging, e);
        }
        output::success("Cleaned up.");
    }

    fn git_setup(&self) -> bool {
        self.enter(Stage::GitSetup);
        output::info("Now we are going to try to see if you have git installed. If you do, we will set up version control for you.");
        if !self.tools.is_available("git") {
            output::warning("Git is not installed. Skipping version control.");
            return false;
        }

        output::success("Git is installed. Setting up version control.");
        match setup_git(self.tools, &self.root) {
            Ok(()) => {
                output::success("Great we set up version control for you. You can now run git commands to manage your project.");
                true
            }
            Err(e) => {
                debug!("git setup failed: {}", e);
                output::warning(&format!("Could not set up version control: {}", e));
                false
            }
        }
    }

    fn dependency_install(&self) -> bool {
        self.enter(Stage::DependencyInstall);
        let manager = self.settings.package_manager.as_str();
        output::info(&format!(
            "Now we are going to try to see if you have {} installed. If you do, we will install dependencies for you.",
            manager
        ));
        if !self.tools.is_available(manager) {
            output::warning(&format!("{} is not installed. Skipping dependency installation.", manager));
            output::special(&format!("All done! You can now run '{} install' to install the dependencies.", manager));
            return false;
        }

        output::success(&format!("{} is installed. Installing dependencies.", manager));
        match install_dependencies(self.tools, manager, &self.root) {
            Ok(()) => {
                output::success(&format!(
                    "Great we installed dependencies for you. You can now run {} commands to manage your project.",
                    manager
                ));
                true
            }
            Err(e) => {
                debug!("{} install failed: {}", manager, e);
                output::warning(&format!("Could not install dependencies: {}", e));
                false
            }
        }
    }
}

fn report_cleanup_failure(path: &Path, e: io::Error) {
    if e.kind() != io::ErrorKind::NotFound {
        debug!("Failed to remove '{}': {}", path.display(), e);
        output::warning(&format!("Could not remove '{}': {}", path.display(), e));
    }
}
