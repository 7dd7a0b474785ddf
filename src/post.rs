use std::{
    fs::File,
    io::{BufReader, Read, Write},
    path::Path,
};

use tempfile::NamedTempFile;

use crate::{error::PostError, metadata::Metadata};

mod parser;
mod slug;
mod writer;

pub(crate) use slug::slugify;

/// One post file: frontmatter plus the untouched body that follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Post {
    pub metadata: Metadata,
    pub content: Vec<u8>,
}

impl Post {
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            content: Vec::new(),
        }
    }

    pub fn parse(input: &[u8]) -> Result<Self, PostError> {
        parser::parse(input)
    }

    pub fn read<R: Read>(mut reader: R) -> Result<Self, PostError> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::parse(&buf)
    }

    pub fn read_from_file(path: &Path) -> Result<Self, PostError> {
        let fd = File::open(path)?;
        Self::read(BufReader::new(fd))
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<(), PostError> {
        writer::write(self, writer)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PostError> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        Ok(buf)
    }

    /// Replaces `path` atomically: the post is written to a temporary file
    /// next to it and renamed into place.
    pub fn write_to_file(&self, path: &Path) -> Result<(), PostError> {
        let bytes = self.to_bytes()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        match std::fs::metadata(path) {
            Ok(existing) => tmp.as_file().set_permissions(existing.permissions())?,
            Err(_) => set_default_permissions(tmp.as_file())?,
        }
        tmp.persist(path).map_err(|e| e.error)?;

        Ok(())
    }

    /// Slug for this post's title. Unlike [`slugify`], a result without any
    /// letters (empty, or hyphens only) is an error.
    pub fn slug(&self, max_len: usize) -> Result<String, PostError> {
        let slug = slugify(&self.metadata.title, max_len);
        if !slug.chars().any(char::is_alphabetic) {
            return Err(PostError::EmptySlug {
                title: self.metadata.title.clone(),
            });
        }
        Ok(slug)
    }
}

// tempfile creates files with mode 0600
#[cfg(unix)]
fn set_default_permissions(file: &File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &File) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Post {
        Post {
            metadata: Metadata {
                categories: vec!["tech".to_string()],
                tags: vec!["rust".to_string(), "cli".to_string()],
                date: "2024-03-01".to_string(),
                title: "Hello, World".to_string(),
            },
            content: b"# Heading\n\nSome text.\n".to_vec(),
        }
    }

    #[test]
    fn file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.md");
        let post = sample();

        post.write_to_file(&path).unwrap();
        let read = Post::read_from_file(&path).unwrap();

        assert_eq!(read, post);
    }

    #[test]
    fn write_to_file_replaces_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.md");
        std::fs::write(&path, "stale contents that are much longer than the new post\n").unwrap();

        let post = Post::new(Metadata {
            title: "Short".to_string(),
            ..Default::default()
        });
        post.write_to_file(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), post.to_bytes().unwrap());
        // no temporary files left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn read_from_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = Post::read_from_file(&dir.path().join("nope.md")).unwrap_err();
        assert!(matches!(err, PostError::Io(_)));
    }

    #[test]
    fn slug_of_punctuation_only_title_is_rejected() {
        let post = Post::new(Metadata {
            title: "!!! 42 ???".to_string(),
            ..Default::default()
        });
        let err = post.slug(30).unwrap_err();
        assert!(matches!(err, PostError::EmptySlug { .. }));
    }

    #[test]
    fn slug_uses_title() {
        assert_eq!(sample().slug(30).unwrap(), "hello-world");
    }

    #[test]
    fn slug_with_zero_max_len_is_rejected() {
        assert!(matches!(sample().slug(0), Err(PostError::EmptySlug { .. })));
    }
}
