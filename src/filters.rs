//! Named filter libraries registered on a template environment.
//!
//! The environment already carries the Jinja builtins (`upper`, `join`,
//! `default`, `safe` and so on). Libraries add the Django-style helpers that
//! captured templates call, and host setup decides which of them exist.

use std::fmt;

use minijinja::value::ValueKind;
use minijinja::{Environment, Error, ErrorKind, Value};

/// A named set of filters.
pub struct Library {
    name: &'static str,
    register: fn(&mut Environment<'static>),
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library").field("name", &self.name).finish()
    }
}

static BUILTINS: Library = Library {
    name: "builtins",
    register: |env| {
        env.add_filter("capfirst", capfirst);
    },
};

static REVIEW: Library = Library {
    name: "review",
    register: |env| {
        env.add_filter("pluralize", pluralize);
        env.add_filter("truncatewords", truncatewords);
        env.add_filter("yesno", yesno);
        env.add_filter("filesizeformat", filesizeformat);
    },
};

static ALL: [&Library; 2] = [&BUILTINS, &REVIEW];

impl Library {
    /// General-purpose helpers missing from the Jinja builtins.
    pub fn builtins() -> &'static Library {
        &BUILTINS
    }

    /// Presentation helpers used by code-review pages.
    pub fn review() -> &'static Library {
        &REVIEW
    }

    /// Look up a library by name.
    pub fn by_name(name: &str) -> Option<&'static Library> {
        ALL.iter().copied().find(|lib| lib.name == name)
    }

    /// Library name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Add this library's filters to `env`.
    pub fn register(&self, env: &mut Environment<'static>) {
        (self.register)(env);
    }
}

fn invalid(message: String) -> Error {
    Error::new(ErrorKind::InvalidOperation, message)
}

fn number(value: &Value, what: &str) -> Result<f64, Error> {
    match value.kind() {
        ValueKind::Number => f64::try_from(value.clone())
            .map_err(|_| invalid(format!("{value} is not a {what}"))),
        ValueKind::String => value
            .as_str()
            .and_then(|s| s.trim().parse().ok())
            .ok_or_else(|| invalid(format!("'{value}' is not a {what}"))),
        ValueKind::Seq | ValueKind::Map => Ok(value.len().unwrap_or(0) as f64),
        _ => Ok(0.0),
    }
}

fn capfirst(value: &Value) -> String {
    let s = value.to_string();
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => s,
    }
}

fn pluralize(value: &Value, suffixes: Option<&str>) -> Result<String, Error> {
    let (singular, plural) = match suffixes.unwrap_or("s").split_once(',') {
        Some((singular, plural)) => (singular, plural),
        None => ("", suffixes.unwrap_or("s")),
    };
    let count = number(value, "number")?;
    Ok(if count == 1.0 { singular } else { plural }.to_string())
}

fn truncatewords(value: &Value, limit: usize) -> String {
    let s = value.to_string();
    let words: Vec<&str> = s.split_whitespace().collect();
    if words.len() <= limit {
        return words.join(" ");
    }
    let mut truncated = words[..limit].join(" ");
    truncated.push_str(" \u{2026}");
    truncated
}

fn yesno(value: &Value, mapping: Option<&str>) -> Result<String, Error> {
    let mapping = mapping.unwrap_or("yes,no,maybe");
    let choices: Vec<&str> = mapping.split(',').collect();
    let (yes, no, maybe) = match choices.as_slice() {
        [yes, no] => (*yes, *no, *no),
        [yes, no, maybe] => (*yes, *no, *maybe),
        _ => return Err(invalid(format!("invalid yesno mapping '{mapping}'"))),
    };
    Ok(if value.is_none() || value.is_undefined() {
        maybe
    } else if value.is_true() {
        yes
    } else {
        no
    }
    .to_string())
}

fn filesizeformat(value: &Value) -> Result<String, Error> {
    const KB: f64 = 1024.0;
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    let bytes = number(value, "size")?;
    if bytes < KB {
        let whole = bytes as u64;
        return Ok(if whole == 1 {
            "1 byte".to_string()
        } else {
            format!("{whole} bytes")
        });
    }

    let mut size = bytes / KB;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if size < KB {
            break;
        }
        size /= KB;
        unit = next;
    }
    Ok(format!("{size:.1} {unit}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    fn env_with(libraries: &[&Library]) -> Environment<'static> {
        let mut env = Environment::new();
        for lib in libraries {
            lib.register(&mut env);
        }
        env
    }

    #[test]
    fn test_library_lookup() {
        assert_eq!(Library::by_name("builtins").map(Library::name), Some("builtins"));
        assert_eq!(Library::by_name("review").map(Library::name), Some("review"));
        assert!(Library::by_name("nope").is_none());
    }

    #[test]
    fn test_capfirst() {
        assert_eq!(capfirst(&Value::from("review")), "Review");
        assert_eq!(capfirst(&Value::from("")), "");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(&Value::from(1), None).unwrap(), "");
        assert_eq!(pluralize(&Value::from(2), None).unwrap(), "s");
        assert_eq!(pluralize(&Value::from(vec![1]), Some("es")).unwrap(), "");
        assert_eq!(pluralize(&Value::from(0), Some("y,ies")).unwrap(), "ies");
        assert_eq!(pluralize(&Value::from(1), Some("y,ies")).unwrap(), "y");
        assert!(pluralize(&Value::from("many"), None).is_err());
    }

    #[test]
    fn test_truncatewords() {
        assert_eq!(
            truncatewords(&Value::from("fix the  race in watcher"), 3),
            "fix the race \u{2026}"
        );
        assert_eq!(truncatewords(&Value::from("short one"), 3), "short one");
    }

    #[test]
    fn test_yesno() {
        assert_eq!(yesno(&Value::from(true), None).unwrap(), "yes");
        assert_eq!(yesno(&Value::from(false), None).unwrap(), "no");
        assert_eq!(yesno(&Value::from(()), None).unwrap(), "maybe");
        assert_eq!(yesno(&Value::from(()), Some("open,closed")).unwrap(), "closed");
        assert!(yesno(&Value::from(true), Some("one")).is_err());
    }

    #[test]
    fn test_filesizeformat() {
        assert_eq!(filesizeformat(&Value::from(1)).unwrap(), "1 byte");
        assert_eq!(filesizeformat(&Value::from(512)).unwrap(), "512 bytes");
        assert_eq!(filesizeformat(&Value::from(2048)).unwrap(), "2.0 KB");
        assert_eq!(filesizeformat(&Value::from(5 * 1024 * 1024)).unwrap(), "5.0 MB");
    }

    #[test]
    fn test_filters_callable_from_templates() {
        let env = env_with(&[Library::builtins(), Library::review()]);
        let out = env
            .render_str(
                "{{ name|capfirst }}: {{ n }} file{{ n|pluralize }}, {{ size|filesizeformat }}",
                context! { name => "patch", n => 3, size => 3072 },
            )
            .unwrap();
        assert_eq!(out, "Patch: 3 files, 3.0 KB");
    }

    #[test]
    fn test_unregistered_library_filters_missing() {
        let env = env_with(&[Library::builtins()]);
        let err = env
            .render_str("{{ n|pluralize }}", context! { n => 2 })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownFilter);
    }
}
