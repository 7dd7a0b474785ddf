use super::Post;
use crate::{error::PostError, metadata::Metadata};

const DELIMITER: &[u8] = b"---";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Nothing consumed yet; a delimiter here opens the frontmatter.
    FirstLine,
    Frontmatter,
    Body,
}

/// Splits `input` into frontmatter and body.
///
/// Every consumed line is re-terminated with `\n`, whatever its original
/// terminator was. A file that does not start with `---` has no frontmatter
/// and is all body.
pub(super) fn parse(input: &[u8]) -> Result<Post, PostError> {
    let mut state = ScanState::FirstLine;
    let mut frontmatter = Vec::new();
    let mut metadata = Metadata::default();
    let mut content = Vec::new();

    for line in lines(input) {
        state = match state {
            ScanState::FirstLine if line == DELIMITER => ScanState::Frontmatter,
            ScanState::Frontmatter if line == DELIMITER => {
                metadata = decode(&frontmatter)?;
                ScanState::Body
            }
            ScanState::Frontmatter => {
                push_line(&mut frontmatter, line);
                ScanState::Frontmatter
            }
            ScanState::FirstLine | ScanState::Body => {
                push_line(&mut content, line);
                ScanState::Body
            }
        };
    }

    if state == ScanState::Frontmatter {
        return Err(PostError::UnterminatedFrontmatter);
    }

    Ok(Post { metadata, content })
}

/// Lines without their `\n` or `\r\n` terminator.
fn lines(input: &[u8]) -> impl Iterator<Item = &[u8]> {
    input.split_inclusive(|b| *b == b'\n').map(|line| {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        line.strip_suffix(b"\r").unwrap_or(line)
    })
}

fn push_line(buf: &mut Vec<u8>, line: &[u8]) {
    buf.extend_from_slice(line);
    buf.push(b'\n');
}

fn decode(frontmatter: &[u8]) -> Result<Metadata, PostError> {
    let text = std::str::from_utf8(frontmatter)?;
    if text.trim().is_empty() {
        return Ok(Metadata::default());
    }
    serde_yaml::from_str(text).map_err(PostError::InvalidFrontmatter)
}
