//! `{{ command args }}` substitution for request bodies and URIs.
//!
//! Supported commands:
//!
//! * `isotime <format>` renders the local time with a strftime format.
//! * `env <NAME>` renders an environment variable, empty when unset.
//!
//! Anything else renders as the command text itself.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::util::time::format_local_now;

static TEMPLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{ *([^{}]+) *\}\}").expect("template pattern is valid"));

pub fn has_template(text: &str) -> bool {
    TEMPLATE.is_match(text)
}

/// Expands templates, resolving `env` from the process environment.
pub fn expand(text: &str) -> Cow<'_, str> {
    expand_with(text, |name| std::env::var(name).ok())
}

/// Expands templates, resolving `env` through `lookup`.
pub fn expand_with<F>(text: &str, lookup: F) -> Cow<'_, str>
where
    F: Fn(&str) -> Option<String>,
{
    TEMPLATE.replace_all(text, |captures: &Captures<'_>| {
        render_command(captures[1].trim(), &lookup)
    })
}

pub fn render_command<F>(command: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let (name, args) = command.split_once(' ').unwrap_or((command, ""));
    match name {
        "isotime" => {
            let format = args.trim_matches(|c: char| matches!(c, '"' | '`' | ' '));
            format_local_now(format).unwrap_or_else(|| command.to_string())
        }
        "env" => {
            let variable = args
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .trim_matches('"');
            lookup(variable).unwrap_or_default()
        }
        _ => command.to_string(),
    }
}
