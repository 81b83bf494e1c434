//! Output formatting utilities.

/// Prints a table header with the given column labels.
#[allow(clippy::print_literal)]
pub fn print_table_header(first: &str, second: &str) {
    println!("{:<72} {}", first, second);
    println!("{}", "-".repeat(100));
}

/// Formats one table row.
pub fn format_table_row(key: &str, detail: &str) -> String {
    format!("{:<72} {}", truncate(key, 72), detail)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let keep = max_len.saturating_sub(3);
        let start = s
            .char_indices()
            .map(|(idx, _)| idx)
            .find(|&idx| s.len() - idx <= keep)
            .unwrap_or(s.len());
        format!("...{}", &s[start..])
    }
}
