use thiserror::Error;

/// Errors raised while reading, writing or naming a post.
#[derive(Error, Debug)]
pub(crate) enum PostError {
    #[error("malformed post: frontmatter block is never closed by a `---` line")]
    UnterminatedFrontmatter,

    #[error("malformed post: invalid frontmatter: {0}")]
    InvalidFrontmatter(#[source] serde_yaml::Error),

    #[error("malformed post: frontmatter is not valid UTF-8")]
    NonUtf8Frontmatter(#[from] std::str::Utf8Error),

    #[error("failed to encode frontmatter: {0}")]
    EncodeFrontmatter(#[source] serde_yaml::Error),

    #[error("title {title:?} yields an empty slug")]
    EmptySlug { title: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
