//! Document template model
//!
//! The JSON shape a template author produces: declared inputs, fixed
//! constants, derived-variable expressions, and a body of guarded text
//! elements. This module wires the evaluation layers together: it builds
//! the evaluation context from supplied input values, resolves derived
//! variables, applies visibility guards and renders the body.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::debug;
use papel_eval::{EvaluationContext, FunctionCatalog, VariableError, is_visible, render, resolve_variables};
use papel_types::Value;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Kind of value an input field accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Number,
    Date,
    Boolean,
}

/// A declared input field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDefinition {
    /// Key the field is bound to in the `inputs` namespace
    pub key: String,
    /// Human-readable label for form rendering
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub input_type: InputType,
    /// Whether omission should be reported to the author
    #[serde(default)]
    pub required: bool,
    /// Value used when the caller supplies none
    #[serde(default)]
    pub default: Option<JsonValue>,
}

/// A block of free text, optionally guarded by a visibility expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextElement {
    #[serde(default)]
    pub name: Option<String>,
    /// Template text, may contain `{{ expression }}` spans
    pub text: String,
    /// Guard expression; absent means always visible
    #[serde(default, rename = "visibleWhen")]
    pub visible_when: Option<String>,
}

/// A complete document template as described in JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentTemplate {
    #[serde(default)]
    pub inputs: Vec<InputDefinition>,
    #[serde(default)]
    pub constants: IndexMap<String, JsonValue>,
    /// Derived-variable expressions, resolved in dependency order
    #[serde(default)]
    pub variables: IndexMap<String, String>,
    #[serde(default)]
    pub body: Vec<TextElement>,
}

/// Result of rendering a template
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// Rendered text of the visible body elements, in order
    pub body: Vec<String>,
    /// Per-variable resolution failures
    pub errors: Vec<VariableError>,
    /// Required inputs the caller did not supply
    pub missing_inputs: Vec<String>,
}

impl RenderedDocument {
    /// The visible elements joined into one text block
    pub fn text(&self) -> String {
        self.body.join("\n")
    }
}

impl DocumentTemplate {
    /// Deserialize a template from its JSON text
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Build the evaluation context from caller-supplied input values
    ///
    /// Declared inputs take the supplied value, then the declared default,
    /// then stay absent. Supplied values for undeclared keys pass through
    /// untouched so callers can feed ad-hoc data during authoring. The
    /// second return lists required inputs that ended up missing.
    pub fn build_context(
        &self,
        supplied: &IndexMap<String, JsonValue>,
    ) -> (EvaluationContext, Vec<String>) {
        let mut inputs: IndexMap<String, Value> = IndexMap::new();
        let mut missing = Vec::new();

        for definition in &self.inputs {
            let value = supplied
                .get(&definition.key)
                .or(definition.default.as_ref())
                .map(Value::from_json)
                .unwrap_or(Value::Absent);
            if definition.required && value.is_missing() {
                missing.push(definition.key.clone());
            }
            inputs.insert(definition.key.clone(), value);
        }

        for (key, value) in supplied {
            if !inputs.contains_key(key) {
                inputs.insert(key.clone(), Value::from_json(value));
            }
        }

        let constants = self
            .constants
            .iter()
            .map(|(key, value)| (key.clone(), Value::from_json(value)))
            .collect();

        (
            EvaluationContext::new()
                .with_inputs(inputs)
                .with_constants(constants),
            missing,
        )
    }

    /// Render the template body against supplied input values
    ///
    /// Variables resolve first; a variable failure never aborts rendering,
    /// it is reported in the result and reads as absent downstream. Hidden
    /// elements are omitted entirely.
    pub fn render(
        &self,
        supplied: &IndexMap<String, JsonValue>,
        catalog: &FunctionCatalog,
        fixed_now: Option<DateTime<Utc>>,
    ) -> RenderedDocument {
        let (mut ctx, missing_inputs) = self.build_context(supplied);
        if let Some(now) = fixed_now {
            ctx = ctx.with_fixed_now(now);
        }

        let (vars, errors) = resolve_variables(&self.variables, &ctx, catalog);
        let ctx = ctx.with_vars(vars);

        let mut body = Vec::new();
        for element in &self.body {
            if is_visible(element.visible_when.as_deref(), &ctx, catalog) {
                body.push(render(&element.text, &ctx, catalog));
            } else {
                debug!(
                    "element {} hidden by visibility guard",
                    element.name.as_deref().unwrap_or("<unnamed>")
                );
            }
        }

        RenderedDocument {
            body,
            errors,
            missing_inputs,
        }
    }
}
