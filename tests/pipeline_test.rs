mod common;

use std::fs;
use std::io::Cursor;

use common::{template_zip, write_project, zip_bytes, RecordingToolchain, Reply, ScriptedSource, ANSWERS};
use next_gen::config::Settings;
use next_gen::error::Error;
use next_gen::pipeline::{Pipeline, Route};
use next_gen::prompt::ReaderPrompter;
use serde_json::{json, Value};
use tempfile::TempDir;

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test_log::test]
fn test_full_fetch_route() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let settings = Settings::default();
    let source = ScriptedSource::new(vec![Reply::small(), Reply::ok(2_500_000, template_zip())]);
    let mut prompter = ReaderPrompter::new(Cursor::new(ANSWERS));
    let tools = RecordingToolchain::with(&["git", "yarn"]);

    let report = Pipeline::new(&settings, root, &source, &mut prompter, &tools).run().unwrap();

    assert_eq!(report.route, Route::FullFetch);
    assert!(report.git_initialized);
    assert!(report.dependencies_installed);
    assert_eq!(report.metadata.pretty_name, "My Cool App");
    assert_eq!(source.requests.get(), 2);

    assert!(!root.join("next.zip").exists());
    assert!(!root.join("nextgen-output").exists());
    assert!(root.join("pages/index.tsx").is_file());

    let package = read_json(&root.join("package.json"));
    assert_eq!(package["name"], json!("my-cool-app"));
    assert_eq!(package["description"], json!("A cool app"));
    assert_eq!(package["author"], json!("Jane Doe"));

    let descriptor = read_json(&root.join("src-tauri/tauri.conf.json"));
    assert_eq!(descriptor["tauri"]["windows"][0]["title"], json!("My Cool App"));
    assert_eq!(descriptor["tauri"]["identifier"], json!("com.jane.coolapp"));
    assert_eq!(descriptor["tauri"]["bundle"]["identifier"], json!("com.jane.coolapp"));
    assert_eq!(descriptor["package"]["productName"], json!("my-cool-app"));

    let build: toml::Table =
        toml::from_str(&fs::read_to_string(root.join("src-tauri/Cargo.toml")).unwrap()).unwrap();
    assert_eq!(build["package"]["authors"], toml::Value::Array(vec![toml::Value::from("Jane Doe")]));

    assert_eq!(
        tools.commands(),
        ["git init", "git add .", "git commit -m Initial commit", "yarn install"]
    );
    assert!(tools.calls.borrow().iter().all(|(_, _, cwd)| cwd == root));
}

#[test]
fn test_customize_only_route() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_project(root);
    let settings = Settings::default();
    let source = ScriptedSource::new(Vec::new());
    let mut prompter = ReaderPrompter::new(Cursor::new(ANSWERS));
    let tools = RecordingToolchain::with(&["git", "yarn"]);

    let report = Pipeline::new(&settings, root, &source, &mut prompter, &tools).run().unwrap();

    assert_eq!(report.route, Route::CustomizeOnly);
    assert_eq!(source.requests.get(), 0);
    assert!(!report.git_initialized);
    assert!(tools.commands().is_empty());
    assert_eq!(read_json(&root.join("package.json"))["name"], json!("my-cool-app"));
}

#[test]
fn test_foreign_directory_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("package.json"), "{\"name\": \"someone-else\"}").unwrap();
    let settings = Settings::default();
    let source = ScriptedSource::new(Vec::new());
    let mut prompter = ReaderPrompter::new(Cursor::new(ANSWERS));
    let tools = RecordingToolchain::default();

    let err = Pipeline::new(&settings, root, &source, &mut prompter, &tools).run().unwrap_err();

    assert!(matches!(err, Error::NotAProject { .. }));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(source.requests.get(), 0);
    assert_eq!(fs::read_to_string(root.join("package.json")).unwrap(), "{\"name\": \"someone-else\"}");
}

#[test]
fn test_missing_tools_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let settings = Settings::default();
    let source = ScriptedSource::new(vec![Reply::ok(1_000_000, template_zip())]);
    let mut prompter = ReaderPrompter::new(Cursor::new(ANSWERS));
    let tools = RecordingToolchain::default();

    let report = Pipeline::new(&settings, root, &source, &mut prompter, &tools).run().unwrap();

    assert!(!report.git_initialized);
    assert!(!report.dependencies_installed);
    assert!(tools.commands().is_empty());
}

#[test]
fn test_failing_tools_are_warnings() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let settings = Settings { package_manager: "pnpm".to_string(), ..Settings::default() };
    let source = ScriptedSource::new(vec![Reply::ok(1_000_000, template_zip())]);
    let mut prompter = ReaderPrompter::new(Cursor::new(ANSWERS));
    let mut tools = RecordingToolchain::with(&["git", "pnpm"]);
    tools.failing.insert("git".to_string());

    let report = Pipeline::new(&settings, root, &source, &mut prompter, &tools).run().unwrap();

    assert!(!report.git_initialized);
    assert!(report.dependencies_installed);
    assert_eq!(tools.commands(), ["git init", "pnpm install"]);
}

#[test]
fn test_undersized_downloads_abort_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let settings = Settings::default();
    let source = ScriptedSource::new(vec![Reply::small(); 6]);
    let mut prompter = ReaderPrompter::new(Cursor::new(ANSWERS));
    let tools = RecordingToolchain::default();

    let err = Pipeline::new(&settings, root, &source, &mut prompter, &tools).run().unwrap_err();

    assert!(matches!(err, Error::UndersizedArchive { attempts: 6, .. }));
    assert_eq!(source.requests.get(), 6);
    assert_eq!(fs::read_dir(root).unwrap().count(), 0);
}

#[test]
fn test_illegal_archive_cleans_up_staging() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("project");
    fs::create_dir(&root).unwrap();
    let archive = zip_bytes(&[("next-template-main/ok.txt", b"ok"), ("../../escape.txt", b"evil")]);
    let settings = Settings::default();
    let source = ScriptedSource::new(vec![Reply::ok(1_000_000, archive)]);
    let mut prompter = ReaderPrompter::new(Cursor::new(ANSWERS));
    let tools = RecordingToolchain::default();

    let err = Pipeline::new(&settings, &root, &source, &mut prompter, &tools).run().unwrap_err();

    assert_eq!(err.exit_code(), 3);
    assert!(!temp_dir.path().join("escape.txt").exists());
    assert!(!root.join("nextgen-output").exists());
    assert!(!root.join("next.zip").exists());
    assert!(!root.join("ok.txt").exists());
}

#[test]
fn test_archive_without_template_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let settings = Settings::default();
    let source = ScriptedSource::new(vec![Reply::ok(1_000_000, zip_bytes(&[("other/file.txt", b"x")]))]);
    let mut prompter = ReaderPrompter::new(Cursor::new(ANSWERS));
    let tools = RecordingToolchain::default();

    let err = Pipeline::new(&settings, root, &source, &mut prompter, &tools).run().unwrap_err();

    assert!(matches!(err, Error::CopyError(_)));
    assert_eq!(fs::read_dir(root).unwrap().count(), 0);
}
