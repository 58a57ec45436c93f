//! Terminal output for the spawn CLI.
//!
//! Every line is built by a `format_*` function and printed by the matching
//! `print_*` wrapper. Styling goes through [`console`], which drops the colors
//! when the output is not a terminal.

use console::style;

/// Width of the feature-id column in `spawn features` and the prompt.
pub const FEATURE_COLUMN: usize = 14;

pub fn format_header(text: &str) -> String {
    format!(
        "\n{}\n{}",
        style(text).bold().cyan(),
        style("=".repeat(text.chars().count())).dim()
    )
}

pub fn format_step(step: u32, total: u32, text: &str) -> String {
    format!("{} {text}", style(format!("[{step}/{total}]")).dim())
}

pub fn format_key_value(key: &str, value: &str) -> String {
    format!("  {}: {value}", style(key).dim())
}

/// A registry row: padded feature id, then its description.
pub fn format_feature(name: &str, description: &str) -> String {
    format!(
        "{} {description}",
        style(format!("{name:<width$}", width = FEATURE_COLUMN)).bold()
    )
}

/// The getting-started block shown after a successful generation.
pub fn format_next_steps(commands: &[&str]) -> String {
    let mut out = String::from("\n  Next steps:\n");
    for cmd in commands {
        out.push_str(&format!("    {cmd}\n"));
    }
    out
}

pub fn print_header(text: &str) {
    println!("{}", format_header(text));
}

pub fn print_success(text: &str) {
    println!("{} {text}", style("[OK]").green().bold());
}

pub fn print_warning(text: &str) {
    println!("{} {text}", style("[WARN]").yellow().bold());
}

/// Errors go to stderr so they survive `spawn new ... > log`.
pub fn print_error(text: &str) {
    eprintln!("{} {text}", style("[ERROR]").red().bold());
}

pub fn print_step(step: u32, total: u32, text: &str) {
    println!("{}", format_step(step, total, text));
}

pub fn print_key_value(key: &str, value: &str) {
    println!("{}", format_key_value(key, value));
}

pub fn print_feature(name: &str, description: &str) {
    println!("{}", format_feature(name, description));
}

pub fn print_next_steps(commands: &[&str]) {
    println!("{}", format_next_steps(commands));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        console::set_colors_enabled(false);
    }

    #[test]
    fn test_header_underline_matches_text() {
        plain();
        assert_eq!(format_header("spawn new: x"), "\nspawn new: x\n============");
    }

    #[test]
    fn test_step_and_key_value() {
        plain();
        assert_eq!(format_step(2, 3, "Initializing git"), "[2/3] Initializing git");
        assert_eq!(format_key_value("Binary", "appd"), "  Binary: appd");
    }

    #[test]
    fn test_feature_rows_align() {
        plain();
        let row = format_feature("poa", "Proof-of-Authority validator set");
        assert_eq!(row, format!("{:<14} Proof-of-Authority validator set", "poa"));
        let long = format_feature("ibc-ratelimit", "x");
        assert_eq!(long.find('x'), row.find('P'));
    }

    #[test]
    fn test_next_steps_block() {
        plain();
        assert_eq!(
            format_next_steps(&["cd rollchain", "make install"]),
            "\n  Next steps:\n    cd rollchain\n    make install\n"
        );
    }
}
