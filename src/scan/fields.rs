//! Field splitting for brace initializers.
//!
//! An initializer such as
//!
//! ```text
//! VX_KERNEL_ORT_CPU_INF,   // Unique kernel ID
//! "ort.cpu.runner",        // Kernel name
//! VxOrtRunner::ortRunWrapper,
//! const_cast<vx_param_description_t*>(VxOrtRunner::kernelParams),
//! ```
//!
//! is split on top-level commas. Commas inside double-quoted strings and
//! anything after `//` up to the end of the line are not separators.
//! Parentheses and angle brackets are not tracked.

/// Split an initializer body into trimmed, non-empty fields in source order.
pub fn split_fields(body: &str) -> Vec<String> {
    let chars: Vec<char> = body.chars().collect();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '"' && (i == 0 || chars[i - 1] != '\\') {
            in_string = !in_string;
            current.push(c);
            i += 1;
            continue;
        }

        if !in_string {
            if c == '/' && chars.get(i + 1) == Some(&'/') {
                // Resume at the newline itself; it lands in the field as whitespace.
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
                continue;
            }
            if c == ',' {
                push_field(&mut fields, &current);
                current.clear();
                i += 1;
                continue;
            }
        }

        current.push(c);
        i += 1;
    }

    push_field(&mut fields, &current);
    fields
}

fn push_field(fields: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        fields.push(trimmed.to_string());
    }
}

/// Trim whitespace, then remove one layer of surrounding double quotes.
pub fn unquote(field: &str) -> &str {
    let trimmed = field.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_split() {
        assert_eq!(split_fields("A, \"b.c.d\", fn, params"), vec!["A", "\"b.c.d\"", "fn", "params"]);
    }

    #[test]
    fn test_comma_inside_string_kept() {
        let fields = split_fields("ID, \"a,b\", run, params");
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[1], "\"a,b\"");
    }

    #[test]
    fn test_line_comment_with_comma_ignored() {
        let body = "ID, // note, with comma\n\"x.y.z\", run, params";
        let fields = split_fields(body);
        assert_eq!(fields, vec!["ID", "\"x.y.z\"", "run", "params"]);
    }

    #[test]
    fn test_quoted_and_commented_commas_together() {
        let body = "\n    ID,          // note, with comma\n    \"a,b\",       // another, one\n    run,\n    params\n";
        assert_eq!(split_fields(body), vec!["ID", "\"a,b\"", "run", "params"]);
    }

    #[test]
    fn test_escaped_quote_does_not_close_string() {
        let fields = split_fields(r#"ID, "say \"hi, there\"", run"#);
        assert_eq!(fields, vec!["ID", r#""say \"hi, there\"""#, "run"]);
    }

    #[test]
    fn test_comment_marker_inside_string_is_text() {
        let fields = split_fields("ID, \"http://x,y\", run");
        assert_eq!(fields, vec!["ID", "\"http://x,y\"", "run"]);
    }

    #[test]
    fn test_comment_at_end_without_newline() {
        assert_eq!(split_fields("a, b // trailing, text"), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_fields_discarded() {
        assert_eq!(split_fields(" a, , ,b,\n"), vec!["a", "b"]);
        assert!(split_fields("   ").is_empty());
        assert!(split_fields("").is_empty());
    }

    #[test]
    fn test_parentheses_not_tracked() {
        // Commas inside a call still split.
        assert_eq!(split_fields("f(a, b)"), vec!["f(a", "b)"]);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("  \"ort.cpu.runner\" "), "ort.cpu.runner");
        assert_eq!(unquote("bare"), "bare");
        assert_eq!(unquote("\"\"inner\"\""), "\"inner\"");
        assert_eq!(unquote("\"open"), "\"open");
    }
}
