//! Placeholder rendering shared by manifest templates and source skeletons.
//!
//! ## Syntax
//!
//! | Form | Meaning |
//! |------|---------|
//! | `{{KEY}}` | replaced by the variable value; unknown keys stay literal |
//! | `{{#KEY}}…{{/KEY}}` | body kept only when `KEY` is truthy |
//! | `{{^KEY}}…{{/KEY}}` | body kept only when `KEY` is falsy or missing |
//!
//! A variable is truthy unless it is missing, empty, `false` or `0`.
//! Section tags placed on their own line do not leave blank lines behind.

use std::collections::HashMap;

/// Variable map for substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, consuming self and returning the context.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Add `KEY`, `KEY_SNAKE`, `KEY_KEBAB`, `KEY_PASCAL` and `KEY_CAMEL` for a name.
    ///
    /// | Variable | "user service" |
    /// |----------|----------------|
    /// | `KEY` | "user service" |
    /// | `KEY_SNAKE` | "user_service" |
    /// | `KEY_KEBAB` | "user-service" |
    /// | `KEY_PASCAL` | "UserService" |
    /// | `KEY_CAMEL` | "userService" |
    pub fn with_name_variants(self, key: &str, name: &str) -> Self {
        self.with_variable(key, name)
            .with_variable(format!("{key}_SNAKE"), to_snake_case(name))
            .with_variable(format!("{key}_KEBAB"), to_kebab_case(name))
            .with_variable(format!("{key}_PASCAL"), to_pascal_case(name))
            .with_variable(format!("{key}_CAMEL"), to_camel_case(name))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    pub fn is_truthy(&self, key: &str) -> bool {
        !matches!(self.get(key), None | Some("") | Some("false") | Some("0"))
    }

    /// Render a template string.
    ///
    /// Placeholders are substituted in one left-to-right pass over the
    /// template. Inserted values are never scanned again, so a value that
    /// itself contains `{{KEY}}` comes out verbatim.
    pub fn render(&self, template: &str) -> String {
        let expanded = self.render_sections(template);
        let mut out = String::with_capacity(expanded.len());
        let mut rest = expanded.as_str();

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let tail = &rest[open + 2..];
            let Some(close) = tail.find("}}") else {
                rest = &rest[open..];
                break;
            };
            match self.get(&tail[..close]) {
                Some(value) => {
                    out.push_str(value);
                    rest = &tail[close + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = tail;
                }
            }
        }

        out.push_str(rest);
        out
    }

    fn render_sections(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = find_section_open(rest) {
            out.push_str(&rest[..start]);
            let inverted = rest.as_bytes()[start + 2] == b'^';
            let after_open = &rest[start + 3..];

            let Some(name_end) = after_open.find("}}") else {
                out.push_str(&rest[start..]);
                return out;
            };
            let key = after_open[..name_end].trim();
            let body_and_rest = &after_open[name_end + 2..];
            let close = format!("{{{{/{key}}}}}");

            let Some(close_at) = body_and_rest.find(&close) else {
                out.push_str(&rest[start..]);
                return out;
            };

            let body = &body_and_rest[..close_at];
            let body = body.strip_prefix('\n').unwrap_or(body);
            if self.is_truthy(key) != inverted {
                out.push_str(&self.render_sections(body));
            }

            rest = &body_and_rest[close_at + close.len()..];
            rest = rest.strip_prefix('\n').unwrap_or(rest);
        }

        out.push_str(rest);
        out
    }
}

fn find_section_open(s: &str) -> Option<usize> {
    match (s.find("{{#"), s.find("{{^")) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

/// Convert a string to snake_case.
///
/// | Input | Output |
/// |-------|--------|
/// | "MyApp" | "my_app" |
/// | "my-app" | "my_app" |
/// | "HTTPRequest" | "http_request" |
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Same as [`to_snake_case`] but joined with `-`. Used for Kubernetes object
/// names and package names.
pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// Convert a string to PascalCase.
///
/// | Input | Output |
/// |-------|--------|
/// | "my-app" | "MyApp" |
/// | "HTTPRequest" | "HttpRequest" |
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).into_iter().map(|w| capitalize(&w)).collect()
}

/// Convert a string to camelCase.
pub fn to_camel_case(s: &str) -> String {
    let mut words = split_words(s).into_iter();
    match words.next() {
        Some(first) => {
            let mut out = first;
            out.extend(words.map(|w| capitalize(&w)));
            out
        }
        None => String::new(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::new();
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Split a string into lowercase words.
///
/// Word boundaries:
/// 1. Separators `_`, `-`, `.`, `/`, whitespace and braces always split
/// 2. camelCase transition: `aB` splits between `a` and `B`
/// 3. Acronym boundary: `HTTPRequest` splits between `P` and `R`
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_variants() {
        let ctx = RenderContext::new().with_name_variants("NODE_NAME", "user service");

        assert_eq!(ctx.get("NODE_NAME"), Some("user service"));
        assert_eq!(ctx.get("NODE_NAME_SNAKE"), Some("user_service"));
        assert_eq!(ctx.get("NODE_NAME_KEBAB"), Some("user-service"));
        assert_eq!(ctx.get("NODE_NAME_PASCAL"), Some("UserService"));
        assert_eq!(ctx.get("NODE_NAME_CAMEL"), Some("userService"));
    }

    #[test]
    fn unknown_placeholder_stays_literal() {
        let ctx = RenderContext::new().with_variable("A", "1");
        assert_eq!(ctx.render("{{A}} {{B}}"), "1 {{B}}");
    }

    #[test]
    fn values_are_not_expanded_again() {
        // Each context gets its own hash seed.
        for _ in 0..64 {
            let ctx = RenderContext::new()
                .with_variable("NODE_NAME", "api")
                .with_variable("SERVER_PORT", "8080")
                .with_variable("ROUTES", "// summary mentions {{NODE_NAME}}\n");
            assert_eq!(
                ctx.render("{{ROUTES}}{{NODE_NAME}}:{{SERVER_PORT}}"),
                "// summary mentions {{NODE_NAME}}\napi:8080"
            );
        }
    }

    #[test]
    fn stray_braces_do_not_swallow_placeholders() {
        let ctx = RenderContext::new().with_variable("A", "1");
        assert_eq!(ctx.render("{{{{A}} {{A"), "{{1 {{A");
    }

    #[test]
    fn sections_follow_truthiness() {
        let ctx = RenderContext::new()
            .with_variable("IS_SERVER", "true")
            .with_variable("PORT", "8080");
        let template = "a\n{{#IS_SERVER}}\nport: {{PORT}}\n{{/IS_SERVER}}\n{{^IS_SERVER}}\nworker\n{{/IS_SERVER}}\nb\n";

        assert_eq!(ctx.render(template), "a\nport: 8080\nb\n");

        let worker = RenderContext::new().with_variable("IS_SERVER", "false");
        assert_eq!(worker.render(template), "a\nworker\nb\n");
    }

    #[test]
    fn whole_template_in_false_section_renders_blank() {
        let ctx = RenderContext::new();
        let rendered = ctx.render("{{#IS_SERVER}}\nkind: Service\n{{/IS_SERVER}}\n");
        assert!(rendered.trim().is_empty());
    }

    #[test]
    fn unterminated_section_is_left_as_is() {
        let ctx = RenderContext::new().with_variable("X", "true");
        assert_eq!(ctx.render("{{#X}} open"), "{{#X}} open");
    }

    #[test]
    fn case_conversions() {
        assert_eq!(to_snake_case("XMLHttpRequest"), "xml_http_request");
        assert_eq!(to_kebab_case("UserService"), "user-service");
        assert_eq!(to_pascal_case("/users/{id}"), "UsersId");
        assert_eq!(to_camel_case("list_users"), "listUsers");
    }
}
