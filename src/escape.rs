/// Converts raw text into markup-safe text.
///
/// Maps `&`, `<`, `>`, `"` and `'` to their HTML entities. Each character is
/// visited once, so entities produced here are never escaped a second time.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
