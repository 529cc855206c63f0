//! Loading captured rendering contexts.
//!
//! A capture records which template a page rendered and the context it was
//! rendered with, so the render benchmark can replay it without the
//! application that produced it:
//!
//! ```json
//! {
//!   "template": "front_page.html",
//!   "context": { "issues": [ ... ] },
//!   "host": { "libraries": ["builtins", "review"] }
//! }
//! ```
//!
//! `host` is optional and falls back to [`HostConfig::default`].
//!
//! A front-page capture and its template are compiled into the crate, so the
//! render benchmark works without any files on disk.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::host::HostConfig;

/// Directory, relative to the capture file, that holds its templates.
pub const TEMPLATE_DIR: &str = "templates";

/// Name reported for the bundled capture in errors and logs.
pub const BUNDLED_CAPTURE_NAME: &str = "<bundled>/front_page.json";

/// The capture compiled into the crate.
pub const BUNDLED_CAPTURE: &str = include_str!("../data/front_page.json");

/// Templates referenced by the bundled capture, as `(name, source)`.
pub const BUNDLED_TEMPLATES: &[(&str, &str)] = &[(
    "front_page.html",
    include_str!("../data/templates/front_page.html"),
)];

/// A captured template invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Capture {
    /// Name of the template, relative to the template directory.
    pub template: String,
    /// Context the template was rendered with.
    #[serde(default)]
    pub context: Map<String, Value>,
    /// Host setup the capture expects.
    #[serde(default)]
    pub host: HostConfig,
}

impl Capture {
    /// Read and parse a capture file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    /// Parse the capture compiled into the crate.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_CAPTURE, Path::new(BUNDLED_CAPTURE_NAME))
    }

    fn parse(raw: &str, path: &Path) -> Result<Self> {
        let capture: Capture = serde_json::from_str(raw).map_err(|source| Error::Capture {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            template = %capture.template,
            keys = capture.context.len(),
            "loaded capture"
        );
        Ok(capture)
    }

    /// Default template directory for a capture stored at `path`.
    pub fn template_dir_for(path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(TEMPLATE_DIR)
    }
}
