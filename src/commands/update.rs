use std::path::Path;

use anyhow::{bail, Context as _};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::info;

use super::{category_arg, date_arg, date_value, list_values, new::POST_FILE_NAME, tag_arg};
use crate::{metadata::MetadataUpdate, post::Post};

pub(crate) fn command() -> Command {
    Command::new("update")
        .about("Update date, tags or categories of existing posts")
        .arg(
            Arg::new("slugs")
                .value_name("SLUG")
                .help("Directories of the posts to update")
                .required(true)
                .num_args(1..),
        )
        .arg(
            Arg::new("append")
                .short('a')
                .long("append")
                .help("Append tags/categories")
                .action(ArgAction::SetTrue),
        )
        .arg(tag_arg())
        .arg(category_arg())
        .arg(date_arg())
}

#[derive(Debug, Clone)]
pub(crate) struct UpdatePosts {
    pub slugs: Vec<String>,
    pub update: MetadataUpdate,
}

impl UpdatePosts {
    pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        let slugs: Vec<String> = matches
            .get_many::<String>("slugs")
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        if slugs.iter().any(|slug| slug.trim().is_empty()) {
            bail!("slug must not be empty");
        }

        Ok(Self {
            slugs,
            update: MetadataUpdate {
                date: date_value(matches, None)?,
                tags: list_values(matches, "tag"),
                categories: list_values(matches, "category"),
                append: matches.get_flag("append"),
            },
        })
    }
}

/// Applies the update to each post in turn, stopping at the first failure.
pub(crate) fn run(base_dir: &Path, update_posts: &UpdatePosts) -> anyhow::Result<()> {
    let update = &update_posts.update;

    for slug in &update_posts.slugs {
        let post_path = base_dir.join(slug).join(POST_FILE_NAME);
        let mut post = Post::read_from_file(&post_path)
            .with_context(|| format!("while reading {post_path:?}"))?;

        if let Some(date) = &update.date {
            info!("{slug}: setting date to {date}");
        }
        if !update.tags.is_empty() {
            info!("{slug}: setting tags");
        }
        if !update.categories.is_empty() {
            info!("{slug}: setting categories");
        }
        post.metadata.apply(update);

        info!("{slug}: writing updated post");
        post.write_to_file(&post_path)
            .with_context(|| format!("while writing {post_path:?}"))?;
    }

    Ok(())
}
