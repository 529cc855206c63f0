//! Template-rendering workload.

use std::fmt;

use minijinja::Template;

use crate::error::{Error, Result};
use crate::measurement::black_box;

use super::probe::Probe;
use super::Benchmark;

/// Default renders per sample. Repeating the render inside one sample keeps
/// loop bookkeeping negligible next to the measured work.
pub const DEFAULT_RENDERS_PER_SAMPLE: usize = 30;

/// Renders one compiled template against one context.
///
/// Both are built before timing starts and only read afterwards. The context
/// is converted to the engine's value type once, up front.
pub struct RenderWorkload<'env> {
    template: Template<'env, 'env>,
    context: minijinja::Value,
    renders_per_sample: usize,
}

impl fmt::Debug for RenderWorkload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderWorkload")
            .field("template", &self.template.name())
            .field("renders_per_sample", &self.renders_per_sample)
            .finish()
    }
}

impl<'env> RenderWorkload<'env> {
    /// Create a workload rendering `template` with `context`.
    pub fn new(
        template: Template<'env, 'env>,
        context: &serde_json::Value,
        renders_per_sample: usize,
    ) -> Result<Self> {
        if renders_per_sample == 0 {
            return Err(Error::Config("renders per sample must be > 0".into()));
        }
        Ok(Self {
            template,
            context: minijinja::Value::from_serialize(context),
            renders_per_sample,
        })
    }

    /// Name of the template being rendered.
    pub fn template_name(&self) -> &str {
        self.template.name()
    }

    /// Renders performed per sample.
    pub fn renders_per_sample(&self) -> usize {
        self.renders_per_sample
    }
}

impl Benchmark for RenderWorkload<'_> {
    fn name(&self) -> &str {
        self.template.name()
    }

    fn sample<P: Probe>(&self, probe: &P) -> Result<()> {
        for _ in 0..self.renders_per_sample {
            let _frame = probe.render(self.template.name());
            black_box(self.template.render(&self.context)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::Untraced;
    use minijinja::Environment;
    use serde_json::json;

    fn env(source: &'static str) -> Environment<'static> {
        let mut env = Environment::new();
        env.add_template("t.html", source).unwrap();
        env
    }

    #[test]
    fn test_sample_renders() {
        let env = env("{{ a|upper }}");
        let workload =
            RenderWorkload::new(env.get_template("t.html").unwrap(), &json!({"a": "x"}), 3)
                .unwrap();
        assert_eq!(workload.template_name(), "t.html");
        assert_eq!(workload.renders_per_sample(), 3);
        assert!(workload.sample(&Untraced).is_ok());
    }

    #[test]
    fn test_zero_renders_rejected() {
        let env = env("x");
        let err = RenderWorkload::new(env.get_template("t.html").unwrap(), &json!({}), 0)
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_render_failure_propagates() {
        let mut env = env("{{ n|fail }}");
        env.add_filter(
            "fail",
            |_: &minijinja::Value| -> std::result::Result<String, minijinja::Error> {
                Err(minijinja::Error::new(
                    minijinja::ErrorKind::InvalidOperation,
                    "filter gave up",
                ))
            },
        );
        let workload =
            RenderWorkload::new(env.get_template("t.html").unwrap(), &json!({"n": 0}), 2)
                .unwrap();
        let err = workload.sample(&Untraced).unwrap_err();
        assert!(matches!(err, Error::Template(_)));
        assert!(err.to_string().contains("filter gave up"));
    }
}
