use std::sync::OnceLock;

use regex::Regex;

/// Replaces every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// Escapes text for a C string literal. Backslashes go first so the
/// backslashes added for quotes are not doubled.
pub fn escape_c_literal(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Rewrites `${name}` references into `{name}`.
pub fn rewrite_variables(text: &str) -> String {
    variable_regex().replace_all(text, "{${1}}").into_owned()
}

fn variable_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("variable regex"))
}

#[cfg(test)]
mod transform_tests {
    use super::*;

    #[test]
    fn sanitize_name_replaces_everything_outside_identifier_set() {
        assert_eq!(sanitize_name("Login Flow #1"), "Login_Flow__1");
        assert_eq!(sanitize_name("api-v2_users"), "api-v2_users");
        assert_eq!(sanitize_name("a/b\\c.d"), "a_b_c_d");
        assert_eq!(sanitize_name("Über"), "_ber");
        assert_eq!(sanitize_name(""), "");
    }

    #[test]
    fn escape_c_literal_handles_backslash_before_quote() {
        assert_eq!(escape_c_literal(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_c_literal(r"C:\tmp"), r"C:\\tmp");
        assert_eq!(escape_c_literal(r#"\""#), r#"\\\""#);
        assert_eq!(escape_c_literal("plain"), "plain");
    }

    #[test]
    fn rewrite_variables_converts_each_reference() {
        assert_eq!(rewrite_variables("id=${uid}"), "id={uid}");
        assert_eq!(
            rewrite_variables("${host}/${path}?q=${__time(,)}"),
            "{host}/{path}?q={__time(,)}"
        );
        assert_eq!(rewrite_variables(r#"{"k":"${v}"}"#), r#"{"k":"{v}"}"#);
    }

    #[test]
    fn rewrite_variables_leaves_unmatched_syntax_alone() {
        assert_eq!(rewrite_variables("${}"), "${}");
        assert_eq!(rewrite_variables("${open"), "${open");
        assert_eq!(rewrite_variables("$uid"), "$uid");
    }

    #[test]
    fn rewrite_variables_is_idempotent() {
        let once = rewrite_variables("a=${x}&b=${y}");
        assert_eq!(rewrite_variables(&once), once);
        assert_eq!(rewrite_variables("{already}"), "{already}");
    }
}
