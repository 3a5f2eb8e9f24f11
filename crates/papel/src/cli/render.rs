//! The `render` subcommand

use super::output;
use crate::document::DocumentTemplate;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use papel_eval::FunctionCatalog;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};

pub struct RenderArgs {
    pub template: PathBuf,
    pub inputs: Option<PathBuf>,
    pub params: Vec<String>,
    pub now: Option<String>,
    pub output: Option<PathBuf>,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let template = load_template(&args.template)?;

    let mut supplied = match &args.inputs {
        Some(path) => load_inputs(path)?,
        None => IndexMap::new(),
    };
    // Command-line parameters override the inputs file
    for (key, value) in super::parse_params(&args.params)? {
        supplied.insert(key, value);
    }

    let fixed_now = args.now.as_deref().map(super::parse_now).transpose()?;

    let catalog = FunctionCatalog::new();
    let rendered = template.render(&supplied, &catalog, fixed_now);

    for name in &rendered.missing_inputs {
        eprintln!("{}", output::format_warning(&format!("missing required input '{name}'")));
    }
    for error in &rendered.errors {
        eprintln!("{}", output::format_warning(&error.to_string()));
    }

    output::write_output(&rendered.text(), args.output.as_deref())
}

fn load_template(path: &Path) -> Result<DocumentTemplate> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read template: {}", path.display()))?;
    DocumentTemplate::from_json(&text)
        .with_context(|| format!("invalid template: {}", path.display()))
}

fn load_inputs(path: &Path) -> Result<IndexMap<String, JsonValue>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read inputs file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("inputs file is not a JSON object: {}", path.display()))
}
