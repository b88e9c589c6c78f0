//! System clipboard access

use anyhow::{Context, Result};
use arboard::Clipboard;
use tracing::debug;

/// Copy the given text to the system clipboard
pub fn copy_text(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("clipboard is not available")?;
    clipboard
        .set_text(text.to_owned())
        .context("failed to write to clipboard")?;
    debug!("Copied {} characters to clipboard", text.len());
    Ok(())
}
