//! Copy calculator output to the system clipboard.

use anyhow::{Context, Result};
use arboard::Clipboard;
use tracing::debug;

/// Put `text` on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("failed to access clipboard")?;

    clipboard
        .set_text(text.to_string())
        .context("failed to copy to clipboard")?;

    debug!(text, "copied result to clipboard");
    Ok(())
}
