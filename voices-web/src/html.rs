//! HTML helpers shared by page renderers

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap page body in the shared document shell
pub fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Keep Med School Accessible</title>
</head>
<body>
<nav>
    <a href="/">Home</a>
    <a href="/student-stories">Student Stories</a>
    <a href="/submit-story">Share Your Story</a>
</nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}
