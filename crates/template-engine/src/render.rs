//! Single-pass `{{placeholder}}` substitution over HTML template text
//!
//! The input is scanned exactly once: replacement text is never rescanned,
//! so a bound value containing a `{{...}}`-shaped substring comes through
//! literally instead of being substituted again.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use shared_types::PolicyTemplate;

use crate::errors::TemplateError;

/// Variable binding set: placeholder name to user-supplied value
pub type Bindings = BTreeMap<String, String>;

lazy_static! {
    /// `{{identifier}}` tokens; anything else between double braces is left alone
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{([A-Za-z_][A-Za-z0-9_]*)\}\}").unwrap();
}

/// What to do with a placeholder that has no binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnboundPolicy {
    /// Leave the token literally in the output
    #[default]
    Keep,
    /// Replace the token with the empty string
    Blank,
    /// Fail the render, reporting every unbound placeholder
    Error,
}

/// How bound values are inserted into the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueMode {
    /// Entity-escape `& < > " '` so values are text, not markup
    #[default]
    EscapeHtml,
    /// Insert values verbatim; the caller vouches for them
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub unbound: UnboundPolicy,
    pub values: ValueMode,
}

/// Render with default options: unbound tokens kept, values HTML-escaped.
pub fn render_template(template: &str, bindings: &Bindings) -> String {
    substitute(template, bindings, RenderOptions::default())
}

/// Render with explicit options.
///
/// Only `UnboundPolicy::Error` can fail.
pub fn render_template_with(
    template: &str,
    bindings: &Bindings,
    options: RenderOptions,
) -> Result<String, TemplateError> {
    if options.unbound == UnboundPolicy::Error {
        let missing = unbound_placeholders(template, bindings);
        if !missing.is_empty() {
            return Err(TemplateError::UnboundPlaceholders(missing));
        }
    }
    Ok(substitute(template, bindings, options))
}

/// Render a [`PolicyTemplate`], overlaying `bindings` on its defaults.
pub fn render_policy(
    template: &PolicyTemplate,
    bindings: &Bindings,
    options: RenderOptions,
) -> Result<String, TemplateError> {
    let mut effective = template.defaults.clone();
    for (key, value) in bindings {
        effective.insert(key.clone(), value.clone());
    }
    render_template_with(&template.body, &effective, options)
}

/// Unique placeholder names in order of first appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        let name = &caps[1];
        if !seen.iter().any(|s: &String| s == name) {
            seen.push(name.to_string());
        }
    }
    seen
}

/// Placeholders occurring in `template` that have no entry in `bindings`.
pub fn unbound_placeholders(template: &str, bindings: &Bindings) -> Vec<String> {
    placeholders(template)
        .into_iter()
        .filter(|name| !bindings.contains_key(name))
        .collect()
}

fn substitute(template: &str, bindings: &Bindings, options: RenderOptions) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            match bindings.get(name) {
                Some(value) => match options.values {
                    ValueMode::EscapeHtml => escape_html(value),
                    ValueMode::Raw => value.clone(),
                },
                // Error policy is enforced before substitution; an unbound
                // token reaching here is kept.
                None => match options.unbound {
                    UnboundPolicy::Blank => String::new(),
                    UnboundPolicy::Keep | UnboundPolicy::Error => caps[0].to_string(),
                },
            }
        })
        .into_owned()
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn identifier() -> impl Strategy<Value = String> {
        "[a-z_][a-z0-9_]{0,15}"
    }

    /// Text with no placeholder-shaped substrings and no escapable characters
    fn plain_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,;:!?-]{0,64}"
    }

    proptest! {
        /// Property: templates without placeholders render unchanged
        #[test]
        fn no_placeholder_template_unchanged(
            template in plain_text(),
            key in identifier(),
            value in plain_text(),
        ) {
            let mut bindings = Bindings::new();
            bindings.insert(key, value);
            prop_assert_eq!(render_template(&template, &bindings), template);
        }

        /// Property: every bound token disappears from the output
        #[test]
        fn bound_tokens_fully_replaced(
            key in identifier(),
            value in plain_text(),
            prefix in plain_text(),
            suffix in plain_text(),
            repeats in 1usize..5,
        ) {
            let token = format!("{{{{{}}}}}", key);
            let template = format!("{}{}{}", prefix, token.repeat(repeats), suffix);

            let mut bindings = Bindings::new();
            bindings.insert(key.clone(), value.clone());

            let out = render_template(&template, &bindings);
            prop_assert!(!out.contains(&token));
            prop_assert_eq!(out, format!("{}{}{}", prefix, value.repeat(repeats), suffix));
        }

        /// Property: unbound tokens survive the default policy literally
        #[test]
        fn unbound_tokens_kept(key in identifier(), text in plain_text()) {
            let template = format!("{}{{{{{}}}}}", text, key);
            let out = render_template(&template, &Bindings::new());
            prop_assert_eq!(out, template);
        }

        /// Property: Blank policy leaves no token for any binding set
        #[test]
        fn blank_policy_removes_all_tokens(
            keys in prop::collection::vec(identifier(), 1..5),
        ) {
            let template: String = keys
                .iter()
                .map(|k| format!("{{{{{}}}}} ", k))
                .collect();
            let options = RenderOptions {
                unbound: UnboundPolicy::Blank,
                ..Default::default()
            };
            let out = render_template_with(&template, &Bindings::new(), options).unwrap();
            prop_assert!(!out.contains("{{"));
        }

        /// Property: escaped output never contains a raw angle bracket
        /// introduced by a value
        #[test]
        fn escaped_values_carry_no_markup(value in ".{0,64}") {
            let mut bindings = Bindings::new();
            bindings.insert("v".to_string(), value);
            let out = render_template("[{{v}}]", &bindings);
            let inner = &out[1..out.len() - 1];
            prop_assert!(!inner.contains('<'));
            prop_assert!(!inner.contains('>'));
        }
    }
}
