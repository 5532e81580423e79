/// Makes user text safe inside a quoted node label or an edge label.
///
/// Whitespace (newlines included) collapses to single spaces. Characters the diagram syntax
/// treats specially become entity codes.
pub fn escape_label(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            escaped.push(' ');
        }
        for c in word.chars() {
            match c {
                '#' => escaped.push_str("#35;"),
                '"' => escaped.push_str("#quot;"),
                '[' => escaped.push_str("#91;"),
                ']' => escaped.push_str("#93;"),
                '{' => escaped.push_str("#123;"),
                '}' => escaped.push_str("#125;"),
                '|' => escaped.push_str("#124;"),
                ';' => escaped.push_str("#59;"),
                '<' => escaped.push_str("#lt;"),
                '>' => escaped.push_str("#gt;"),
                other => escaped.push(other),
            }
        }
    }
    escaped
}

/// Turns a recipe id into a usable node identifier: ASCII letters, digits and underscores only.
pub fn sanitize_id(id: &str) -> String {
    let sanitized: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    // "end" closes a subgraph
    if sanitized.is_empty() || sanitized.eq_ignore_ascii_case("end") {
        format!("recipe_{}", sanitized)
    } else {
        sanitized
    }
}
