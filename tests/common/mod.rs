#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use next_gen::error::{Error, Result};
use next_gen::fetcher::{HttpResponse, HttpSource};
use next_gen::tools::Toolchain;

pub const MARKER: &str = "4326dec8a92b394498ebe4f542833e5a";

pub const PACKAGE_JSON: &str = r#"{
  "name": "next-template",
  "private": true,
  "version": "0.1.0",
  "description": "Template",
  "scripts": {
    "dev": "next dev",
    "tauri": "tauri"
  },
  "author": "Andre Cox",
  "next-gen": {
    "id": "4326dec8a92b394498ebe4f542833e5a"
  },
  "dependencies": {
    "react": "^18.2.0",
    "next": "13.0.0"
  }
}
"#;

pub const TAURI_CONF: &str = r#"{
  "$schema": "../node_modules/@tauri-apps/cli/schema.json",
  "build": {
    "beforeBuildCommand": "yarn build",
    "distDir": "../out"
  },
  "package": {
    "productName": "next-template",
    "version": "0.1.0"
  },
  "tauri": {
    "allowlist": {
      "all": false
    },
    "bundle": {
      "active": true,
      "icon": ["icons/32x32.png", "icons/icon.ico"],
      "identifier": "com.tauri.dev",
      "targets": "all"
    },
    "security": {
      "csp": null
    },
    "windows": [
      {
        "fullscreen": false,
        "height": 600,
        "resizable": true,
        "title": "Next Template",
        "width": 800
      }
    ]
  }
}
"#;

pub const CARGO_TOML: &str = r#"[package]
name = "app"
version = "0.1.0"
description = "A Tauri App"
authors = ["you"]
license = ""
edition = "2021"
rust-version = "1.57"

[build-dependencies]
tauri-build = { version = "1.2", features = [] }

[dependencies]
serde_json = "1.0"
serde = { version = "1.0", features = ["derive"] }
tauri = { version = "1.2", features = ["api-all"] }

[features]
default = ["custom-protocol"]
custom-protocol = ["tauri/custom-protocol"]
"#;

/// Writes the three configuration documents of a generated project.
pub fn write_project(root: &Path) {
    fs::create_dir_all(root.join("src-tauri")).unwrap();
    fs::write(root.join("package.json"), PACKAGE_JSON).unwrap();
    fs::write(root.join("src-tauri/tauri.conf.json"), TAURI_CONF).unwrap();
    fs::write(root.join("src-tauri/Cargo.toml"), CARGO_TOML).unwrap();
}

/// Builds an in-memory zip; names ending in `/` become directories.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, zip::write::FileOptions::default()).unwrap();
        } else {
            let options = zip::write::FileOptions::default().unix_permissions(0o644);
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }
    }
    zip.finish().unwrap().into_inner()
}

/// Zip of a template rooted at `next-template-main/`.
pub fn template_zip() -> Vec<u8> {
    zip_bytes(&[
        ("next-template-main/", b""),
        ("next-template-main/package.json", PACKAGE_JSON.as_bytes()),
        ("next-template-main/src-tauri/", b""),
        ("next-template-main/src-tauri/tauri.conf.json", TAURI_CONF.as_bytes()),
        ("next-template-main/src-tauri/Cargo.toml", CARGO_TOML.as_bytes()),
        ("next-template-main/pages/index.tsx", b"export default function Home() {}\n"),
    ])
}

pub fn write_zip(path: &Path, bytes: &[u8]) {
    fs::write(path, bytes).unwrap();
}

/// One scripted HTTP answer.
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub content_length: Option<u64>,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn ok(content_length: u64, body: Vec<u8>) -> Self {
        Self { status: 200, content_length: Some(content_length), body }
    }

    pub fn small() -> Self {
        Self::ok(1_024, b"<html>moved</html>".to_vec())
    }

    pub fn status(status: u16) -> Self {
        Self { status, content_length: Some(0), body: Vec::new() }
    }
}

/// `HttpSource` replaying scripted replies in order.
pub struct ScriptedSource {
    replies: RefCell<VecDeque<Reply>>,
    pub requests: Cell<u32>,
}

impl ScriptedSource {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self { replies: RefCell::new(replies.into()), requests: Cell::new(0) }
    }
}

impl HttpSource for ScriptedSource {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        self.requests.set(self.requests.get() + 1);
        let reply = self.replies.borrow_mut().pop_front().ok_or_else(|| Error::RequestError {
            url: url.to_string(),
            reason: "no scripted reply left".to_string(),
        })?;
        Ok(HttpResponse {
            status: reply.status,
            content_length: reply.content_length,
            body: Box::new(Cursor::new(reply.body)),
        })
    }
}

/// `Toolchain` that records invocations instead of running anything.
#[derive(Default)]
pub struct RecordingToolchain {
    pub installed: HashSet<String>,
    pub failing: HashSet<String>,
    pub calls: RefCell<Vec<(String, Vec<String>, PathBuf)>>,
}

impl RecordingToolchain {
    pub fn with(programs: &[&str]) -> Self {
        Self {
            installed: programs.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(program, args, _)| format!("{} {}", program, args.join(" ")))
            .collect()
    }
}

impl Toolchain for RecordingToolchain {
    fn is_available(&self, program: &str) -> bool {
        self.installed.contains(program)
    }

    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()> {
        self.calls.borrow_mut().push((
            program.to_string(),
            args.iter().map(|a| a.to_string()).collect(),
            cwd.to_path_buf(),
        ));
        if self.failing.contains(program) {
            return Err(Error::IoError(std::io::Error::other(format!("{} failed", program))));
        }
        Ok(())
    }
}

pub const ANSWERS: &str = "my-cool-app\nA cool app\nJane Doe\ncom.jane.coolapp\n";
