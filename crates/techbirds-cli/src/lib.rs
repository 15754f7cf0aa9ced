use std::io::{self, BufRead, Write};

use anyhow::Context;
use serde::Serialize;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Ask a yes/no question. Anything but "y" or "yes" is a no, including EOF.
pub fn confirm_prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<bool> {
    write!(output, "{} [y/N] ", question)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Initialize tracing for CLI binaries. Logs go to stderr so stdout stays parseable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn truncate_string_short() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("", 5), "");
    }

    #[test]
    fn truncate_string_exact() {
        assert_eq!(truncate_string("hello", 5), "hello");
    }

    #[test]
    fn truncate_string_long() {
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("abc", 2), "...");
    }

    #[test]
    fn truncate_string_counts_characters() {
        assert_eq!(truncate_string("café au lait", 7), "café...");
        assert_eq!(truncate_string("×××××", 5), "×××××");
    }

    #[test]
    fn confirm_prompt_accepts_yes() {
        let mut out = Vec::new();
        let answer = confirm_prompt(&mut Cursor::new("Yes\n"), &mut out, "Delete?").unwrap();
        assert!(answer);
        assert_eq!(String::from_utf8(out).unwrap(), "Delete? [y/N] ");
    }

    #[test]
    fn confirm_prompt_defaults_to_no() {
        let mut out = Vec::new();
        assert!(!confirm_prompt(&mut Cursor::new("\n"), &mut out, "Delete?").unwrap());
        assert!(!confirm_prompt(&mut Cursor::new(""), &mut out, "Delete?").unwrap());
        assert!(!confirm_prompt(&mut Cursor::new("nope\n"), &mut out, "Delete?").unwrap());
    }
}
