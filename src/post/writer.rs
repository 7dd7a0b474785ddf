use std::io::Write;

use super::Post;
use crate::error::PostError;

const DELIMITER: &[u8] = b"---\n";

pub(super) fn write<W: Write>(post: &Post, mut w: W) -> Result<(), PostError> {
    let yaml = serde_yaml::to_string(&post.metadata).map_err(PostError::EncodeFrontmatter)?;

    w.write_all(DELIMITER)?;
    w.write_all(indent_sequences(&yaml).as_bytes())?;
    w.write_all(DELIMITER)?;
    w.write_all(&post.content)?;
    w.flush()?;

    Ok(())
}

/// serde_yaml writes block sequences flush with their key; posts use
/// two-space indented lists. Shifts every line of a top-level sequence
/// (entries and their continuation lines) right by two spaces.
fn indent_sequences(yaml: &str) -> String {
    let mut out = String::with_capacity(yaml.len());
    let mut in_sequence = false;

    for line in yaml.lines() {
        if line.starts_with('-') {
            in_sequence = true;
        } else if !line.is_empty() && !line.starts_with(' ') {
            in_sequence = false;
        }

        if in_sequence && !line.is_empty() {
            out.push_str("  ");
        }
        out.push_str(line);
        out.push('\n');
    }

    out
}
