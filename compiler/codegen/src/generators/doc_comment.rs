use crate::layout::Body;

/// Split help text into `//` comment lines.
///
/// The text is trimmed first; empty lines become a bare `//`.
pub fn comment_lines(help: &str) -> Vec<String> {
    let help = help.trim();
    if help.is_empty() {
        return Vec::new();
    }
    help.split('\n')
        .map(|line| if line.is_empty() { "//".to_string() } else { format!("// {line}") })
        .collect()
}

/// Append the doc comment for a declaration, preceded by a blank line when `separate`.
pub fn add_help(body: &mut Body, help: &str, separate: bool) {
    let lines = comment_lines(help);
    if lines.is_empty() {
        return;
    }
    if separate {
        body.add_line("");
    }
    for line in lines {
        body.add_line(line);
    }
}
