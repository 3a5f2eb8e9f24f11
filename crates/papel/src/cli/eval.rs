//! The `eval` subcommand: one-off expression evaluation

use super::output;
use anyhow::{Context, Result, anyhow};
use indexmap::IndexMap;
use papel_eval::{EvaluationContext, FunctionCatalog, evaluate};
use papel_parser::parse_expression;
use papel_types::Value;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};

pub struct EvalArgs {
    pub expression: String,
    pub context: Option<PathBuf>,
    pub params: Vec<String>,
    pub now: Option<String>,
    pub pretty: bool,
    pub output: Option<PathBuf>,
}

/// Context file shape: any subset of the three namespaces
#[derive(Default, Deserialize)]
struct ContextFile {
    #[serde(default)]
    inputs: IndexMap<String, JsonValue>,
    #[serde(default)]
    constants: IndexMap<String, JsonValue>,
    #[serde(default)]
    vars: IndexMap<String, JsonValue>,
}

pub fn run(args: EvalArgs) -> Result<()> {
    let file = match &args.context {
        Some(path) => load_context(path)?,
        None => ContextFile::default(),
    };

    let mut inputs = convert(file.inputs);
    for (key, value) in super::parse_params(&args.params)? {
        inputs.insert(key, Value::from_json(&value));
    }

    let mut ctx = EvaluationContext::new()
        .with_inputs(inputs)
        .with_constants(convert(file.constants))
        .with_vars(convert(file.vars));
    if let Some(now) = &args.now {
        ctx = ctx.with_fixed_now(super::parse_now(now)?);
    }

    let expr = parse_expression(&args.expression).map_err(|err| anyhow!("{err}"))?;
    let value = evaluate(&expr, &ctx, &FunctionCatalog::new()).map_err(|err| anyhow!("{err}"))?;

    let json = value.to_json();
    let text = if args.pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    output::write_output(&text, args.output.as_deref())
}

fn convert(values: IndexMap<String, JsonValue>) -> IndexMap<String, Value> {
    values
        .into_iter()
        .map(|(key, value)| (key, Value::from_json(&value)))
        .collect()
}

fn load_context(path: &Path) -> Result<ContextFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read context file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid context file: {}", path.display()))
}
