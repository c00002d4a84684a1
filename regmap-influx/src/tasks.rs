//! Flux task rendering.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use once_cell::sync::Lazy;
use regex::Regex;
use regmap_openhab::SitePlan;
use serde_json::Value;
use tera::{Context, Tera};
use tracing::{debug, info};

use crate::context;
use crate::error::{Result, TaskError};

/// Extension of task templates.
pub const TEMPLATE_EXTENSION: &str = "flux";

/// Templates shipped with the generator.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("deadman.flux", include_str!("../tasks/deadman.flux")),
    ("range_alerts.flux", include_str!("../tasks/range_alerts.flux")),
];

// Runs of blank lines left behind by template tags.
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// A rendered Flux script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTask {
    /// Template file name, reused as the output file name.
    pub name: String,
    pub flux: String,
}

/// Renders Flux task templates against a resolved site.
///
/// Templates can call `check_id()`, which returns a fresh check id of the
/// form `55555555xxxxxxxx` with a hexadecimal counter starting at 1. The
/// counter belongs to the generator: it runs on across templates and
/// renders, and a new generator starts over.
pub struct TaskGenerator {
    tera: Tera,
    names: Vec<String>,
    counter: Arc<AtomicU32>,
}

impl TaskGenerator {
    /// Generator over the built-in templates.
    pub fn builtin() -> Result<Self> {
        Self::with_templates(
            BUILTIN_TEMPLATES
                .iter()
                .map(|(name, source)| (name.to_string(), source.to_string()))
                .collect(),
        )
    }

    /// Generator over every `*.flux` file of `dir`, in file name order.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let read_err = |source| TaskError::Read {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(TaskError::NoTemplates(dir.to_path_buf()));
        }

        let mut templates = Vec::with_capacity(paths.len());
        for path in paths {
            let source = fs::read_to_string(&path).map_err(|source| TaskError::Read {
                path: path.clone(),
                source,
            })?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            templates.push((name, source));
        }

        info!(dir = %dir.display(), templates = templates.len(), "Loaded task templates");
        Self::with_templates(templates)
    }

    /// Generator over `(file name, source)` pairs.
    pub fn with_templates(templates: Vec<(String, String)>) -> Result<Self> {
        let counter = Arc::new(AtomicU32::new(0));
        let mut tera = Tera::default();

        let ids = Arc::clone(&counter);
        tera.register_function("check_id", move |_: &HashMap<String, Value>| -> tera::Result<Value> {
            let id = ids.fetch_add(1, Ordering::Relaxed) + 1;
            Ok(Value::String(check_id(id)))
        });
        tera.register_filter("quote", quote);

        let mut names = Vec::with_capacity(templates.len());
        for (name, source) in templates {
            tera.add_raw_template(&name, &source)
                .map_err(|source| TaskError::Template {
                    name: name.clone(),
                    source,
                })?;
            names.push(name);
        }

        Ok(Self {
            tera,
            names,
            counter,
        })
    }

    /// Template names in render order.
    pub fn template_names(&self) -> &[String] {
        &self.names
    }

    /// Number of check ids handed out so far.
    pub fn issued_ids(&self) -> u32 {
        self.counter.load(Ordering::Relaxed)
    }

    /// Render every template against `site`.
    pub fn render(&self, site: &SitePlan<'_>) -> Result<Vec<RenderedTask>> {
        let mut ctx = Context::new();
        ctx.insert("files", &context::files(site));

        self.names
            .iter()
            .map(|name| {
                let rendered = self.tera.render(name, &ctx).map_err(|source| TaskError::Render {
                    name: name.clone(),
                    source,
                })?;
                let flux = BLANK_LINES.replace_all(&rendered, "\n").into_owned();

                debug!(template = %name, bytes = flux.len(), "Rendered task");
                Ok(RenderedTask {
                    name: name.clone(),
                    flux,
                })
            })
            .collect()
    }
}

impl std::fmt::Debug for TaskGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskGenerator")
            .field("names", &self.names)
            .field("issued_ids", &self.issued_ids())
            .finish()
    }
}

/// Write rendered tasks into `dir`, returning the written paths.
pub fn write_all(dir: &Path, tasks: &[RenderedTask]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|source| TaskError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(tasks.len());
    for task in tasks {
        let path = dir.join(&task.name);
        fs::write(&path, &task.flux).map_err(|source| TaskError::Write {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }

    info!(dir = %dir.display(), tasks = written.len(), "Wrote Flux tasks");
    Ok(written)
}

fn check_id(counter: u32) -> String {
    format!("55555555{:08x}", counter)
}

/// Surround a value with double quotes.
fn quote(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let quoted = match value {
        Value::String(s) => format!("\"{}\"", s),
        other => format!("\"{}\"", other),
    };
    Ok(Value::String(quoted))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(source: &str) -> TaskGenerator {
        TaskGenerator::with_templates(vec![("test.flux".to_string(), source.to_string())]).unwrap()
    }

    fn empty_site() -> SitePlan<'static> {
        SitePlan { files: Vec::new() }
    }

    #[test]
    fn test_check_id_format() {
        assert_eq!(check_id(1), "5555555500000001");
        assert_eq!(check_id(255), "55555555000000ff");
    }

    #[test]
    fn test_check_ids_count_per_generator() {
        let tasks = generator("{{ check_id() }} {{ check_id() }}");
        let site = empty_site();

        assert_eq!(tasks.render(&site).unwrap()[0].flux, "5555555500000001 5555555500000002");
        assert_eq!(tasks.render(&site).unwrap()[0].flux, "5555555500000003 5555555500000004");
        assert_eq!(tasks.issued_ids(), 4);

        let fresh = generator("{{ check_id() }}");
        assert_eq!(fresh.render(&site).unwrap()[0].flux, "5555555500000001");
    }

    #[test]
    fn test_quote_filter() {
        let tasks = generator(r#"{{ "a" | quote }} {{ 3 | quote }}"#);
        assert_eq!(tasks.render(&empty_site()).unwrap()[0].flux, r#""a" "3""#);
    }

    #[test]
    fn test_quote_non_string_values() {
        let args = HashMap::new();
        assert_eq!(quote(&serde_json::json!(12.5), &args).unwrap(), serde_json::json!("\"12.5\""));
        assert_eq!(quote(&serde_json::json!(true), &args).unwrap(), serde_json::json!("\"true\""));
    }

    #[test]
    fn test_blank_lines_collapse() {
        let tasks = generator("a\n\n\n  \nb\n{% if false %}x{% endif %}\n\nc");
        assert_eq!(tasks.render(&empty_site()).unwrap()[0].flux, "a\nb\nc");
    }

    #[test]
    fn test_invalid_template() {
        let result = TaskGenerator::with_templates(vec![("bad.flux".to_string(), "{% for %}".to_string())]);
        assert!(matches!(result, Err(TaskError::Template { name, .. }) if name == "bad.flux"));
    }

    #[test]
    fn test_builtin_templates_parse() {
        let tasks = TaskGenerator::builtin().unwrap();
        assert_eq!(tasks.template_names(), ["deadman.flux", "range_alerts.flux"]);
    }
}
