//! Append-only plain-text writer.
//!
//! Each category owns `<output_dir>/<code>.txt`. Titles and article bodies
//! are appended one per line; nothing is ever truncated.

use crate::models::Category;
use std::error::Error;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

/// Append `lines` to the category file, each followed by `\n`.
///
/// The file is created when missing, even if `lines` is empty.
///
/// # Returns
///
/// The path written to.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display(), category = category.code, lines = lines.len()))]
pub async fn append_lines(
    output_dir: &Path,
    category: &Category,
    lines: &[String],
) -> Result<PathBuf, Box<dyn Error>> {
    let path = output_dir.join(category.file_name());

    let mut buf = String::new();
    for line in lines {
        writeln!(buf, "{line}")?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await?;
    file.write_all(buf.as_bytes()).await?;
    file.flush().await?;
    info!(path = %path.display(), bytes = buf.len(), "Appended lines");
    Ok(path)
}
