//! Template string renderer
//!
//! Substitutes `{{ expression }}` spans inside free text. Rendering is a
//! total function: a span that fails to parse or evaluate is replaced with a
//! bracketed inline error marker so the surrounding document stays intact
//! for the author to fix, and text outside spans passes through unchanged.

use crate::catalog::FunctionCatalog;
use crate::context::EvaluationContext;
use crate::engine::evaluate;
use papel_diagnostics::PapelError;
use papel_parser::parse_expression;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Render a template against a fully resolved context
pub fn render(template: &str, ctx: &EvaluationContext, catalog: &FunctionCatalog) -> String {
    // Fast path: no delimiter, no work
    let Some(first) = template.find(OPEN) else {
        return template.to_string();
    };

    let mut out = String::with_capacity(template.len());
    out.push_str(&template[..first]);
    let mut rest = &template[first..];

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let body = &rest[start + OPEN.len()..];

        match span_end(body) {
            Some(end) => {
                out.push_str(&render_span(&body[..end], ctx, catalog));
                rest = &body[end + CLOSE.len()..];
            }
            None => {
                // Unterminated span: emit the remainder verbatim
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }

    out.push_str(rest);
    out
}

fn render_span(source: &str, ctx: &EvaluationContext, catalog: &FunctionCatalog) -> String {
    match eval_span(source, ctx, catalog) {
        Ok(text) => text,
        Err(err) => format!("[error: {}]", err.message()),
    }
}

fn eval_span(
    source: &str,
    ctx: &EvaluationContext,
    catalog: &FunctionCatalog,
) -> papel_diagnostics::Result<String> {
    let expr = parse_expression(source)?;
    let value = evaluate(&expr, ctx, catalog).map_err(PapelError::from)?;
    Ok(value.to_display_string())
}

/// Parse every span in a template without evaluating, collecting failures
///
/// Used by authoring tools to validate a template before any input values
/// exist.
pub fn template_errors(template: &str) -> Vec<PapelError> {
    let mut errors = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        let body = &rest[start + OPEN.len()..];
        let Some(end) = span_end(body) else {
            break;
        };
        if let Err(err) = parse_expression(&body[..end]) {
            errors.push(err);
        }
        rest = &body[end + CLOSE.len()..];
    }

    errors
}

/// Offset of the closing delimiter within a span body
///
/// Braces belonging to the expression's own syntax (object literals, braces
/// inside string literals) do not terminate the span.
fn span_end(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' if depth > 0 => depth -= 1,
            b'}' if bytes.get(i + 1) == Some(&b'}') => return Some(i),
            quote @ (b'\'' | b'"') => i = skip_string(bytes, i, quote),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index of the closing quote of a string literal starting at `start`, or
/// the last byte when unterminated
fn skip_string(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b if b == quote => return i,
            _ => {}
        }
        i += 1;
    }
    bytes.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use papel_types::Value;
    use pretty_assertions::assert_eq;

    fn render_with(template: &str) -> String {
        let ctx = EvaluationContext::new()
            .with_inputs(
                [
                    ("name".to_string(), Value::String("ada".into())),
                    ("amount".to_string(), Value::Number(250000.0)),
                ]
                .into_iter()
                .collect(),
            )
            .with_vars(
                [("total".to_string(), Value::Number(270000.0))]
                    .into_iter()
                    .collect(),
            );
        render(template, &ctx, &FunctionCatalog::new())
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(render_with("no spans here"), "no spans here");
        assert_eq!(render_with(""), "");
        assert_eq!(render_with("lone { brace }"), "lone { brace }");
    }

    #[test]
    fn test_substitution() {
        assert_eq!(
            render_with("Hello {{ upper(inputs.name) }}!"),
            "Hello ADA!"
        );
        assert_eq!(render_with("Total: {{ vars.total }}"), "Total: 270000");
    }

    #[test]
    fn test_multiple_spans() {
        assert_eq!(
            render_with("{{ inputs.name }} owes {{ vars.total }}"),
            "ada owes 270000"
        );
    }

    #[test]
    fn test_absent_and_null_render_empty() {
        assert_eq!(render_with("[{{ inputs.missing }}]"), "[]");
        assert_eq!(render_with("[{{ null }}]"), "[]");
        assert_eq!(render_with("[{{ coalesce(inputs.missing) }}]"), "[]");
    }

    #[test]
    fn test_error_marker_keeps_document_intact() {
        assert_eq!(
            render_with("before {{ frobnicate() }} after"),
            "before [error: unknown function: frobnicate] after"
        );
        assert_eq!(
            render_with("x {{ 1 + }} y"),
            "x [error: expected expression] y"
        );
    }

    #[test]
    fn test_pathological_nesting_renders_error_marker() {
        // A span too deeply nested to parse degrades to an inline marker
        // like any other bad span; rendering never aborts
        let template = format!("ok {{{{ {}1{} }}}} ok", "(".repeat(100_000), ")".repeat(100_000));
        assert_eq!(
            render_with(&template),
            "ok [error: expected expression] ok"
        );
    }

    #[test]
    fn test_object_literal_braces_inside_span() {
        assert_eq!(render_with("{{ {a: 1, b: 2}.b }}"), "2");
    }

    #[test]
    fn test_braces_inside_string_literal() {
        assert_eq!(render_with("{{ '}}' }}"), "}}");
        assert_eq!(render_with("{{ concat('{', '}') }}"), "{}");
    }

    #[test]
    fn test_unterminated_span_is_literal() {
        assert_eq!(render_with("text {{ inputs.name"), "text {{ inputs.name");
    }

    #[test]
    fn test_template_errors_parse_only() {
        assert!(template_errors("no spans").is_empty());
        assert!(template_errors("{{ inputs.x }} and {{ 1 + 1 }}").is_empty());
        // Unknown identifiers are not parse errors, only bad syntax is
        assert!(template_errors("{{ mystery.value }}").is_empty());
        assert_eq!(template_errors("{{ 1 + }} then {{ ) }}").len(), 2);
    }

    #[test]
    fn test_rendering_is_idempotent_on_plain_output() {
        let once = render_with("Hello {{ upper(inputs.name) }}!");
        assert_eq!(render_with(&once), once);
    }
}
