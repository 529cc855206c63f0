//! Host environment setup for template rendering.
//!
//! Rendering needs a few environment variables and a set of registered helper
//! libraries before the first template is compiled. Instead of mutating
//! process-wide state, [`HostEnv::initialize`] builds an isolated value from an
//! explicit [`HostConfig`]: variables are exposed to templates under the `env`
//! context key and libraries are registered on a template environment owned by
//! the value.
//! Initializing twice from the same config yields equivalent environments, and
//! two environments never observe each other.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use minijinja::{path_loader, Environment, Template};
use serde_json::{Map, Value};

use crate::data::BUNDLED_TEMPLATES;
use crate::error::{Error, Result};
use crate::filters::Library;

/// Context key under which host variables are visible to templates.
pub const ENV_CONTEXT_KEY: &str = "env";

/// Inputs to host setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Environment variables made available to templates.
    pub vars: BTreeMap<String, String>,
    /// Helper libraries to register, by name. Duplicates are ignored.
    pub libraries: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::empty()
            .var("SERVER_SOFTWARE", "Dev")
            .var("AUTH_DOMAIN", "gmail.com")
            .var("USER_EMAIL", "test@example.com")
            .library(Library::builtins().name())
            .library(Library::review().name())
    }
}

impl HostConfig {
    /// A config with no variables and no libraries.
    pub fn empty() -> Self {
        Self {
            vars: BTreeMap::new(),
            libraries: Vec::new(),
        }
    }

    /// Add or replace a variable.
    pub fn var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Request a helper library.
    pub fn library(mut self, name: impl Into<String>) -> Self {
        self.libraries.push(name.into());
        self
    }
}

/// An initialized host environment.
#[derive(Debug, Clone)]
pub struct HostEnv {
    vars: BTreeMap<String, String>,
    libraries: Vec<&'static str>,
    templates: Environment<'static>,
}

impl HostEnv {
    /// Validate `config` and build the environment it describes.
    ///
    /// Fails on malformed variable names and on unknown library names. The
    /// returned environment has no template source yet; see
    /// [`load_templates_from`](Self::load_templates_from) and
    /// [`add_bundled_templates`](Self::add_bundled_templates).
    pub fn initialize(config: &HostConfig) -> Result<Self> {
        if let Some(bad) = config
            .vars
            .keys()
            .find(|name| name.is_empty() || name.contains('='))
        {
            return Err(Error::Config(format!("invalid environment variable name '{bad}'")));
        }

        let mut templates = Environment::new();
        let mut libraries = Vec::new();
        for name in &config.libraries {
            let library =
                Library::by_name(name).ok_or_else(|| Error::UnknownLibrary(name.clone()))?;
            if libraries.contains(&library.name()) {
                tracing::debug!(library = %name, "library already registered");
                continue;
            }
            library.register(&mut templates);
            libraries.push(library.name());
        }

        tracing::info!(
            vars = config.vars.len(),
            libraries = ?libraries,
            "host environment initialized"
        );
        Ok(Self {
            vars: config.vars.clone(),
            libraries,
            templates,
        })
    }

    /// Resolve template names to files under `dir`.
    pub fn load_templates_from(&mut self, dir: impl AsRef<Path>) {
        let dir = dir.as_ref().to_path_buf();
        tracing::debug!(dir = %dir.display(), "template directory");
        self.templates.set_loader(path_loader(dir));
    }

    /// Register the templates compiled into the binary.
    pub fn add_bundled_templates(&mut self) -> Result<()> {
        for &(name, source) in BUNDLED_TEMPLATES {
            self.templates.add_template(name, source)?;
        }
        Ok(())
    }

    /// Load and compile `name`.
    pub fn template(&self, name: &str) -> Result<Template<'_, '_>> {
        let template = self.templates.get_template(name)?;
        tracing::info!(template = name, "compiled template");
        Ok(template)
    }

    /// Registered library names, in registration order.
    pub fn libraries(&self) -> &[&'static str] {
        &self.libraries
    }

    /// Look up a variable.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// All variables.
    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Build a render context: `context` plus the `env` key.
    ///
    /// A context that already defines `env` keeps its own value.
    pub fn prepare_context(&self, mut context: Map<String, Value>) -> Value {
        if !context.contains_key(ENV_CONTEXT_KEY) {
            let env = self
                .vars
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            context.insert(ENV_CONTEXT_KEY.to_string(), Value::Object(env));
        }
        Value::Object(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let env = HostEnv::initialize(&HostConfig::default()).unwrap();
        assert_eq!(env.var("SERVER_SOFTWARE"), Some("Dev"));
        assert_eq!(env.var("USER_EMAIL"), Some("test@example.com"));
        assert_eq!(env.libraries(), &["builtins", "review"]);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let config = HostConfig::default().library("review");
        let a = HostEnv::initialize(&config).unwrap();
        let b = HostEnv::initialize(&config).unwrap();
        assert_eq!(a.vars(), b.vars());
        assert_eq!(a.libraries(), b.libraries());
        assert_eq!(a.libraries(), &["builtins", "review"]);
    }

    #[test]
    fn test_unknown_library() {
        let err = HostEnv::initialize(&HostConfig::empty().library("codereview")).unwrap_err();
        assert!(matches!(err, Error::UnknownLibrary(ref name) if name == "codereview"));
    }

    #[test]
    fn test_invalid_var_name() {
        let err = HostEnv::initialize(&HostConfig::empty().var("A=B", "x")).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_process_environment_untouched() {
        let config = HostConfig::empty().var("MICROBENCH_HOST_SCRATCH", "1");
        let env = HostEnv::initialize(&config).unwrap();
        assert_eq!(env.var("MICROBENCH_HOST_SCRATCH"), Some("1"));
        assert!(std::env::var("MICROBENCH_HOST_SCRATCH").is_err());
    }

    #[test]
    fn test_prepare_context() {
        let env = HostEnv::initialize(&HostConfig::empty().var("AUTH_DOMAIN", "example.org")).unwrap();
        let ctx = env.prepare_context(json!({"title": "x"}).as_object().unwrap().clone());
        assert_eq!(ctx["env"]["AUTH_DOMAIN"], "example.org");
        assert_eq!(ctx["title"], "x");

        let own = json!({"env": "mine"}).as_object().unwrap().clone();
        assert_eq!(env.prepare_context(own)["env"], "mine");
    }

    #[test]
    fn test_bundled_templates() {
        let mut env = HostEnv::initialize(&HostConfig::default()).unwrap();
        assert!(env.template("front_page.html").is_err());
        env.add_bundled_templates().unwrap();
        assert_eq!(env.template("front_page.html").unwrap().name(), "front_page.html");
    }

    #[test]
    fn test_templates_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hi.html"), "hi {{ env.USER_EMAIL }}").unwrap();

        let mut env = HostEnv::initialize(&HostConfig::default()).unwrap();
        env.load_templates_from(dir.path());
        let out = env
            .template("hi.html")
            .unwrap()
            .render(env.prepare_context(Map::new()))
            .unwrap();
        assert_eq!(out, "hi test@example.com");

        let err = env.template("absent.html").unwrap_err();
        assert!(matches!(err, Error::Template(ref e) if e.kind() == ErrorKind::TemplateNotFound));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: HostConfig = serde_json::from_str(r#"{"libraries": ["builtins"]}"#).unwrap();
        assert_eq!(config.vars, HostConfig::default().vars);
        assert_eq!(config.libraries, vec!["builtins"]);
        assert!(serde_json::from_str::<HostConfig>(r#"{"bogus": 1}"#).is_err());
    }
}
