//! next-gen's main application entry point.
//! Parses arguments, sets up logging, runs the startup update check and
//! hands over to the pipeline.

use std::io::{self, IsTerminal};

use next_gen::{
    cli::{get_args, Args},
    config::Settings,
    error::{default_error_handler, Result},
    fetcher::ReqwestSource,
    logger::init_logger,
    output,
    pipeline::{Pipeline, Route},
    prompt::{DialoguerPrompter, Prompter, ReaderPrompter},
    tools::SystemToolchain,
    update::{check_for_update, GitHubReleaseFeed, UpdateStatus},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn report_update(settings: &Settings) {
    output::info("Checking for updates...");
    let status = match GitHubReleaseFeed::new(settings.release_repo.clone()) {
        Ok(feed) => check_for_update(&feed, env!("CARGO_PKG_VERSION")),
        Err(e) => UpdateStatus::Unknown(e.to_string()),
    };

    match status {
        UpdateStatus::UpToDate => output::info(&format!(
            "Current version ({}) is the latest",
            env!("CARGO_PKG_VERSION")
        )),
        UpdateStatus::Available(release) => {
            output::warning(&format!("A new version is available: {}", release.version));
            if let Some(url) = release.asset_url {
                output::help(&format!("Download it from {}", url));
            }
        }
        UpdateStatus::Unknown(reason) => {
            log::debug!("Update check failed: {}", reason);
            output::warning("An error occurred while detecting the latest version");
        }
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads settings and checks the release feed
/// 2. Classifies the project directory
/// 3. Fetches and unpacks the template when the directory is empty
/// 4. Collects project metadata and rewrites the configuration documents
/// 5. Sets up git and installs dependencies when the tools are present
fn run(args: Args) -> Result<()> {
    output::banner();
    output::special("Let's get you set up with the Next Template!");

    let settings = Settings::from_env()?;
    if !args.skip_update_check {
        report_update(&settings);
    }

    let source = ReqwestSource::new()?;
    let tools = SystemToolchain;
    let mut prompter: Box<dyn Prompter> = if io::stdin().is_terminal() {
        Box::new(DialoguerPrompter::new())
    } else {
        Box::new(ReaderPrompter::new(io::stdin().lock()))
    };

    let mut pipeline = Pipeline::new(&settings, &args.directory, &source, &mut *prompter, &tools);
    let report = pipeline.run()?;

    match report.route {
        Route::CustomizeOnly => output::success("Done!"),
        Route::FullFetch => output::special(&format!(
            "{} is ready in '{}'.",
            report.metadata.pretty_name,
            args.directory.display()
        )),
    }
    Ok(())
}
