//! The `check` subcommand: template validation
//!
//! Parses every expression a template contains (derived variables,
//! visibility guards, body spans) and runs the variable resolver against
//! declared defaults to surface cycles and bad function calls before any
//! real input exists.

use super::output;
use crate::document::DocumentTemplate;
use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use papel_eval::{FunctionCatalog, resolve_variables, template_errors};
use papel_parser::parse_expression;
use std::path::{Path, PathBuf};

pub struct CheckArgs {
    pub files: Vec<PathBuf>,
    pub strict: bool,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let catalog = FunctionCatalog::new();
    let mut total_problems = 0;

    for path in &args.files {
        let problems = check_file(path, &catalog)?;
        for problem in &problems {
            eprintln!("{}", output::format_warning(&format!("{}: {problem}", path.display())));
        }
        if problems.is_empty() {
            println!("{}", output::format_success(&format!("{} is valid", path.display())));
        }
        total_problems += problems.len();
    }

    if total_problems > 0 && args.strict {
        bail!("{total_problems} problem(s) found");
    }
    Ok(())
}

fn check_file(path: &Path, catalog: &FunctionCatalog) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read template: {}", path.display()))?;
    let template = DocumentTemplate::from_json(&text)
        .with_context(|| format!("invalid template: {}", path.display()))?;
    Ok(check_template(&template, catalog))
}

/// All problems in one template, in declaration order
pub fn check_template(template: &DocumentTemplate, catalog: &FunctionCatalog) -> Vec<String> {
    let mut problems = Vec::new();

    // Resolving against the declared defaults surfaces cycles and unknown
    // functions; unknown inputs read as absent and never fail here
    let (ctx, _missing) = template.build_context(&IndexMap::new());
    let (_vars, errors) = resolve_variables(&template.variables, &ctx, catalog);
    problems.extend(errors.iter().map(ToString::to_string));

    for element in &template.body {
        let label = element.name.as_deref().unwrap_or("<unnamed>");
        if let Some(guard) = &element.visible_when
            && !guard.trim().is_empty()
            && let Err(err) = parse_expression(guard)
        {
            problems.push(format!("element '{label}' visibility: {}", err.message()));
        }
        for err in template_errors(&element.text) {
            problems.push(format!("element '{label}' text: {}", err.message()));
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(json: &str) -> Vec<String> {
        let template = DocumentTemplate::from_json(json).unwrap();
        check_template(&template, &FunctionCatalog::new())
    }

    #[test]
    fn test_valid_template_has_no_problems() {
        let problems = check(
            r#"{
                "inputs": [{"key": "amount", "type": "number"}],
                "variables": {"total": "inputs.amount * 2"},
                "body": [{"text": "{{ vars.total }}", "visibleWhen": "inputs.amount > 0"}]
            }"#,
        );
        assert_eq!(problems, Vec::<String>::new());
    }

    #[test]
    fn test_detects_cycles_and_bad_syntax() {
        let problems = check(
            r#"{
                "variables": {"a": "vars.b", "b": "vars.a", "broken": "1 +"},
                "body": [
                    {"name": "head", "text": "{{ ) }}", "visibleWhen": "1 ("}
                ]
            }"#,
        );
        assert_eq!(problems.len(), 4);
        assert!(problems.iter().any(|p| p.contains("circular dependency")));
        assert!(problems.iter().any(|p| p.contains("'broken'")));
        assert!(problems.iter().any(|p| p.contains("visibility")));
        assert!(problems.iter().any(|p| p.contains("text")));
    }

    #[test]
    fn test_unknown_function_reported() {
        let problems = check(r#"{"variables": {"x": "frobnicate()"}}"#);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("unknown function"));
    }
}
