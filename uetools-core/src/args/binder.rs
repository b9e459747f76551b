// ============================================================================
// uetools-core/src/args/binder.rs
// ============================================================================
//
// ARGUMENT BINDER: Resolving Raw Tokens and Defaults into Arguments
//
// Binding happens in three passes, each overriding the previous one:
//   1. static defaults (including the constant fallback of env rules)
//   2. environment-derived defaults (env variables, computed lookups)
//   3. explicit invocation-time values
// Afterwards every required field must hold a value.
//
// Token parsing is delegated to clap, using a parser generated from the
// schema. clap only splits tokens; typing and choice validation happen in
// `resolve` so explicit and environment values go through the same checks.
//
// AI-ASSISTANT-INFO: Three-pass argument resolution with clap token parsing

use super::schema::{ArgumentSchema, DefaultRule, FieldSpec};
use super::value::{Arguments, Value};
use crate::environment::Environment;
use crate::error::{CoreResult, binding_error};

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches};
use log::debug;

/// Outcome of binding a command's tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// All fields resolved; ready for `execute`.
    Bound(Arguments),
    /// The user asked for help; the rendered text should be printed and the
    /// command must not run.
    Help(String),
}

/// Explicit values collected from the command line, in field order.
pub type ExplicitValues = Vec<(&'static str, String)>;

/// Generates a clap parser for `schema`.
///
/// `bin_name` is used in usage lines, e.g. `uecli publish`.
pub fn build_parser(bin_name: &str, about: &str, schema: &ArgumentSchema) -> clap::Command {
    let mut parser = clap::Command::new(bin_name.to_string())
        .bin_name(bin_name.to_string())
        .about(about.to_string())
        .no_binary_name(true)
        .disable_version_flag(true);

    let mut index = 1;
    for field in schema.fields() {
        let mut arg = Arg::new(field.name).help(field.describe());
        if field.positional {
            arg = arg.index(index).value_name(field.value_name());
            index += 1;
        } else {
            let long = field.long_name();
            if long != field.name {
                arg = arg.alias(field.name.to_string());
            }
            arg = arg.long(long);
            arg = if field.is_flag() {
                arg.action(ArgAction::SetTrue)
            } else {
                arg.action(ArgAction::Set).value_name(field.value_name())
            };
        }
        parser = parser.arg(arg);
    }
    parser
}

/// Parses `tokens` with `parser` and resolves them against `schema`.
///
/// Never starts processes or performs network access; default rules may
/// only read the environment and the filesystem.
pub fn bind(
    parser: clap::Command,
    schema: &ArgumentSchema,
    tokens: &[String],
    env: &dyn Environment,
) -> CoreResult<Binding> {
    let matches = match parser.try_get_matches_from(tokens) {
        Ok(matches) => matches,
        Err(e) => {
            return match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                | ErrorKind::DisplayVersion => Ok(Binding::Help(e.render().to_string())),
                _ => Err(binding_error(clean_clap_message(&e.render().to_string()))),
            };
        }
    };

    let explicit = collect_explicit(schema, &matches);
    resolve(schema, &explicit, env).map(Binding::Bound)
}

fn clean_clap_message(rendered: &str) -> String {
    let trimmed = rendered.trim();
    trimmed.strip_prefix("error: ").unwrap_or(trimmed).to_string()
}

fn collect_explicit(schema: &ArgumentSchema, matches: &ArgMatches) -> ExplicitValues {
    let mut explicit = Vec::new();
    for field in schema.fields() {
        if matches.value_source(field.name) != Some(ValueSource::CommandLine) {
            continue;
        }
        if field.is_flag() {
            explicit.push((field.name, matches.get_flag(field.name).to_string()));
        } else if let Some(raw) = matches.get_one::<String>(field.name) {
            explicit.push((field.name, raw.clone()));
        }
    }
    explicit
}

/// Resolves defaults and explicit values into `Arguments`.
pub fn resolve(
    schema: &ArgumentSchema,
    explicit: &[(&'static str, String)],
    env: &dyn Environment,
) -> CoreResult<Arguments> {
    let mut args = Arguments::new();

    // Pass 1: static defaults
    for field in schema.fields() {
        let value = match &field.default {
            Some(DefaultRule::Static(value)) => value,
            Some(DefaultRule::Env {
                fallback: Some(value),
                ..
            }) => value,
            _ => continue,
        };
        check_default(field, value)?;
        args.insert(field.name, value.clone());
    }

    // Pass 2: environment-derived defaults
    for field in schema.fields() {
        match &field.default {
            Some(DefaultRule::Env { var, .. }) => {
                if let Some(raw) = env.var(var) {
                    let value = field.kind.parse(field.name, &format!("${}", var), &raw)?;
                    debug!("argument '{}' taken from ${}", field.name, var);
                    args.insert(field.name, value);
                }
            }
            Some(DefaultRule::Computed(rule)) => {
                if let Some(value) = rule(env) {
                    check_default(field, &value)?;
                    debug!("argument '{}' computed as '{}'", field.name, value);
                    args.insert(field.name, value);
                }
            }
            _ => {}
        }
    }

    // Pass 3: explicit values
    for (name, raw) in explicit {
        let field = schema
            .get(name)
            .ok_or_else(|| binding_error(format!("unexpected argument '{}'", name)))?;
        let origin = option_label(field);
        let value = field.kind.parse(field.name, &origin, raw)?;
        args.insert(field.name, value);
    }

    let missing: Vec<String> = schema
        .fields()
        .iter()
        .filter(|field| field.required && !args.contains(field.name))
        .map(missing_hint)
        .collect();
    if !missing.is_empty() {
        return Err(binding_error(format!(
            "missing required argument(s): {}",
            missing.join(", ")
        )));
    }

    Ok(args)
}

fn check_default(field: &FieldSpec, value: &Value) -> CoreResult<()> {
    if field.kind.accepts(value) {
        Ok(())
    } else {
        Err(binding_error(format!(
            "default '{}' is not valid for '{}'",
            value, field.name
        )))
    }
}

fn option_label(field: &FieldSpec) -> String {
    if field.positional {
        format!("<{}>", field.value_name())
    } else {
        format!("--{}", field.long_name())
    }
}

fn missing_hint(field: &FieldSpec) -> String {
    match &field.default {
        Some(DefaultRule::Env { var, .. }) => {
            format!("{} (or set {})", option_label(field), var)
        }
        _ => option_label(field),
    }
}
