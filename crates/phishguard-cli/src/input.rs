//! Email text input

use anyhow::{bail, Context};
use std::io::Read;
use std::path::Path;

/// Read the email from `--text`, a `.txt` file, or stdin, in that order
pub fn read_email(text: Option<String>, file: Option<&Path>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = file {
        return read_text_file(path);
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read email text from stdin")?;
    Ok(buf)
}

/// Read an uploaded plain-text email; only `.txt` files are accepted
pub fn read_text_file(path: &Path) -> anyhow::Result<String> {
    let is_txt = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if !is_txt {
        bail!("Only .txt files are supported: {}", path.display());
    }

    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", path.display()))
}

/// True when there is nothing to analyze; whitespace-only text is still analyzed
pub fn is_blank(text: &str) -> bool {
    text.is_empty()
}
