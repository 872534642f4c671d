// file: src/utils/template.rs
// description: string helpers for assembling the html report
// reference: https://html.spec.whatwg.org/multipage/syntax.html#escapingString

/// Escapes text for use both in element content and in quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Groups digits by thousands with a plain space: `1234567` → `1 234 567`.
pub fn format_number(num: u64) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }

    out
}

pub fn pluralize(count: usize, word: &str) -> String {
    if count > 1 {
        format!("{}s", word)
    } else {
        word.to_string()
    }
}
