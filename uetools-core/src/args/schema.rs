// ============================================================================
// uetools-core/src/args/schema.rs
// ============================================================================
//
// ARGUMENT SCHEMA: Self-Describing Parameter Declarations
//
// Each command declares its parameters as a list of `FieldSpec`s. A field
// carries a semantic type, an optional default rule, and flags marking it
// as required or positional.
//
// KEY COMPONENTS:
// - FieldKind: string / int / bool / enumerated choice
// - DefaultRule: static value, environment variable, or computed lookup
// - FieldSpec: One parameter declaration with a fluent constructor API
// - ArgumentSchema: The ordered set of fields of one command
//
// AI-ASSISTANT-INFO: Declarative argument schema used by the binder

use super::value::Value;
use crate::environment::Environment;
use crate::error::{CoreResult, binding_error};
use std::fmt;

/// Computes a default from the environment. Must be read-only.
pub type DefaultFn = fn(&dyn Environment) -> Option<Value>;

/// Semantic type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Int,
    Bool,
    Choice(Vec<String>),
}

impl FieldKind {
    /// Converts a raw token into a typed value, validating choices.
    ///
    /// `origin` names where the raw value came from (an option or an
    /// environment variable) and is used in error messages.
    pub fn parse(&self, field: &str, origin: &str, raw: &str) -> CoreResult<Value> {
        match self {
            FieldKind::Str => Ok(Value::Str(raw.to_string())),
            FieldKind::Int => raw.trim().parse::<i64>().map(Value::Int).map_err(|_| {
                binding_error(format!(
                    "invalid integer '{}' for '{}' (from {})",
                    raw, field, origin
                ))
            }),
            FieldKind::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(Value::Bool(true)),
                "0" | "false" | "no" | "off" => Ok(Value::Bool(false)),
                _ => Err(binding_error(format!(
                    "invalid boolean '{}' for '{}' (from {})",
                    raw, field, origin
                ))),
            },
            FieldKind::Choice(choices) => {
                if choices.iter().any(|c| c == raw) {
                    Ok(Value::Str(raw.to_string()))
                } else {
                    Err(binding_error(format!(
                        "invalid value '{}' for '{}' (from {}): expected one of {}",
                        raw,
                        field,
                        origin,
                        choices.join(", ")
                    )))
                }
            }
        }
    }

    /// Checks that an already typed value fits this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldKind::Str, Value::Str(_)) => true,
            (FieldKind::Int, Value::Int(_)) => true,
            (FieldKind::Bool, Value::Bool(_)) => true,
            (FieldKind::Choice(choices), Value::Str(s)) => choices.iter().any(|c| c == s),
            _ => false,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FieldKind::Str => "STRING",
            FieldKind::Int => "INT",
            FieldKind::Bool => "BOOL",
            FieldKind::Choice(_) => "CHOICE",
        }
    }
}

/// How a field obtains its value when none is given explicitly.
#[derive(Clone)]
pub enum DefaultRule {
    /// A constant value.
    Static(Value),
    /// An environment variable, with an optional constant fallback.
    Env {
        var: &'static str,
        fallback: Option<Value>,
    },
    /// A read-only lookup such as "derive the project from the working
    /// directory".
    Computed(DefaultFn),
}

impl fmt::Debug for DefaultRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultRule::Static(value) => f.debug_tuple("Static").field(value).finish(),
            DefaultRule::Env { var, fallback } => f
                .debug_struct("Env")
                .field("var", var)
                .field("fallback", fallback)
                .finish(),
            DefaultRule::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Declaration of a single named parameter.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub help: Option<&'static str>,
    pub default: Option<DefaultRule>,
    pub required: bool,
    pub positional: bool,
}

impl FieldSpec {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            help: None,
            default: None,
            required: false,
            positional: false,
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::Str)
    }

    pub fn int(name: &'static str) -> Self {
        Self::new(name, FieldKind::Int)
    }

    /// A boolean switch. Defaults to `false` and takes no value on the
    /// command line.
    pub fn flag(name: &'static str) -> Self {
        Self::new(name, FieldKind::Bool).default(false)
    }

    pub fn choice(name: &'static str, choices: &[&str]) -> Self {
        Self::new(
            name,
            FieldKind::Choice(choices.iter().map(|c| c.to_string()).collect()),
        )
    }

    pub fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultRule::Static(value.into()));
        self
    }

    pub fn env(mut self, var: &'static str) -> Self {
        self.default = Some(DefaultRule::Env {
            var,
            fallback: None,
        });
        self
    }

    pub fn env_or(mut self, var: &'static str, fallback: impl Into<Value>) -> Self {
        self.default = Some(DefaultRule::Env {
            var,
            fallback: Some(fallback.into()),
        });
        self
    }

    pub fn computed(mut self, rule: DefaultFn) -> Self {
        self.default = Some(DefaultRule::Computed(rule));
        self
    }

    /// Binding fails if no value can be resolved for this field.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn positional(mut self) -> Self {
        self.positional = true;
        self
    }

    pub fn is_flag(&self) -> bool {
        self.kind == FieldKind::Bool
    }

    /// Long option spelling, e.g. `api_url` -> `api-url`.
    pub fn long_name(&self) -> String {
        self.name.replace('_', "-")
    }

    pub fn value_name(&self) -> String {
        if matches!(self.kind, FieldKind::Str) {
            self.name.to_ascii_uppercase()
        } else {
            self.kind.label().to_string()
        }
    }

    /// Help line including choices and the default source.
    pub fn describe(&self) -> String {
        let mut text = self.help.unwrap_or_default().to_string();
        if let FieldKind::Choice(choices) = &self.kind {
            text.push_str(&format!(" [choices: {}]", choices.join(", ")));
        }
        match &self.default {
            Some(DefaultRule::Static(value)) if !self.is_flag() => {
                text.push_str(&format!(" [default: {}]", value));
            }
            Some(DefaultRule::Env { var, fallback }) => {
                text.push_str(&format!(" [env: {}", var));
                if let Some(fallback) = fallback {
                    text.push_str(&format!(", default: {}", fallback));
                }
                text.push(']');
            }
            _ => {}
        }
        text.trim().to_string()
    }
}

/// The ordered parameter set of one command.
#[derive(Debug, Clone, Default)]
pub struct ArgumentSchema {
    fields: Vec<FieldSpec>,
}

impl ArgumentSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
