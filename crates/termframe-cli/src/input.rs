use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, Read},
    path::Path,
};

/// Reads a frame from `path`, or from stdin when the path is `-`.
///
/// Invalid UTF-8 is replaced rather than rejected; the renderer degrades on
/// odd input instead of failing.
pub fn read_frame(path: &Path) -> Result<String> {
    let bytes = if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("reading frame from stdin")?;
        buf
    } else {
        fs::read(path).with_context(|| format!("reading frame from {}", path.display()))?
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
