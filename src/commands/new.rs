use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{debug, info};

use super::{category_arg, date_arg, date_value, list_values, tag_arg};
use crate::{context::Context, metadata::Metadata, post::Post};

pub(crate) const POST_FILE_NAME: &str = "index.md";

pub(crate) fn command() -> Command {
    Command::new("new")
        .about("Create a new post in <slug>/index.md")
        .arg(
            Arg::new("title")
                .help("Title of the post")
                .required(true),
        )
        .arg(tag_arg())
        .arg(category_arg())
        .arg(date_arg())
        .arg(
            Arg::new("slug")
                .short('s')
                .long("slug")
                .help("Specify post slug (default: derived from the title)"),
        )
        .arg(
            Arg::new("git")
                .short('g')
                .long("git")
                .help("Create new git branch for post")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("start_branch")
                .short('b')
                .long("start-branch")
                .help("Name of start branch [default: master]"),
        )
        .arg(
            Arg::new("max_slug_len")
                .long("max-slug-len")
                .help("Set maximum length of slug")
                .value_parser(value_parser!(usize))
                .hide(true),
        )
        .arg(
            Arg::new("force")
                .short('f')
                .long("force")
                .help("Overwrite an existing post")
                .action(ArgAction::SetTrue),
        )
}

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub title: String,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub date: String,
    pub slug: Option<String>,
    pub git: bool,
    pub start_branch: Option<String>,
    pub max_slug_len: Option<usize>,
    pub force: bool,
}

impl NewPost {
    pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        Ok(Self {
            title: matches
                .get_one::<String>("title")
                .cloned()
                .unwrap_or_default(),
            tags: list_values(matches, "tag"),
            categories: list_values(matches, "category"),
            date: date_value(matches, Some("today"))?.unwrap_or_default(),
            slug: matches.get_one::<String>("slug").cloned(),
            git: matches.get_flag("git"),
            start_branch: matches.get_one::<String>("start_branch").cloned(),
            max_slug_len: matches.get_one::<usize>("max_slug_len").copied(),
            force: matches.get_flag("force"),
        })
    }
}

/// Writes the new post under `base_dir` and returns the path of its file.
pub(crate) fn run(ctx: &Context, base_dir: &Path, new_post: &NewPost) -> anyhow::Result<PathBuf> {
    if new_post.title.trim().is_empty() {
        bail!("title must not be empty");
    }

    let post = Post::new(Metadata::new(
        new_post.title.clone(),
        new_post.tags.clone(),
        new_post.categories.clone(),
        new_post.date.clone(),
    ));

    let slug = match &new_post.slug {
        Some(slug) if slug.trim().is_empty() => bail!("slug must not be empty"),
        Some(slug) => slug.clone(),
        None => post.slug(new_post.max_slug_len.unwrap_or(ctx.config.max_slug_len))?,
    };

    let post_dir = base_dir.join(&slug);
    let post_path = post_dir.join(POST_FILE_NAME);
    if post_path.exists() && !new_post.force {
        bail!("{post_path:?} already exists (use --force to overwrite)");
    }

    fs_extra::dir::create_all(&post_dir, false)
        .with_context(|| format!("while creating {post_dir:?}"))?;
    post.write_to_file(&post_path)
        .with_context(|| format!("while writing {post_path:?}"))?;
    info!("created {post_path:?}");

    if new_post.git {
        let start_branch = new_post
            .start_branch
            .as_deref()
            .unwrap_or(&ctx.config.start_branch);

        debug!("{slug}: creating new branch from {start_branch}");
        ctx.vcs.create_branch(&format!("draft/{slug}"), start_branch)?;

        debug!("{slug}: adding post");
        ctx.vcs.add_files(&[post_path.as_path()])?;

        debug!("{slug}: committing changes");
        ctx.vcs.commit(&format!("Add {slug}"))?;
    }

    Ok(post_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, error::PostError, git::testing::FakeVcs};
    use tempfile::TempDir;

    fn new_post(args: &[&str]) -> NewPost {
        let matches = command()
            .try_get_matches_from(std::iter::once("new").chain(args.iter().copied()))
            .unwrap();
        NewPost::from_matches(&matches).unwrap()
    }

    #[test]
    fn creates_post_in_slug_directory() {
        let dir = TempDir::new().unwrap();
        let vcs = FakeVcs::default();
        let ctx = Context::new(Config::default(), &vcs);

        let opts = new_post(&[
            "Hello, World!",
            "-t",
            "rust,cli",
            "--tag",
            "rust",
            "-c",
            "tech",
            "-d",
            "2024-01-02",
        ]);
        let path = run(&ctx, dir.path(), &opts).unwrap();

        assert_eq!(path, dir.path().join("hello-world").join("index.md"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "---\ncategories:\n  - tech\ntags:\n  - rust\n  - cli\ndate: 2024-01-02\ntitle: Hello, World!\n---\n"
        );
        assert!(vcs.calls.borrow().is_empty());
    }

    #[test]
    fn date_defaults_to_today() {
        let opts = new_post(&["Title"]);
        assert_eq!(opts.date, crate::date::format(chrono::Local::now().date_naive()));
    }

    #[test]
    fn invalid_date_is_rejected_before_writing() {
        let matches = command()
            .try_get_matches_from(["new", "Title", "-d", "03/04/2024"])
            .unwrap();
        assert!(NewPost::from_matches(&matches).is_err());
    }

    #[test]
    fn explicit_slug_and_config_max_len() {
        let dir = TempDir::new().unwrap();
        let vcs = FakeVcs::default();
        let config = Config {
            max_slug_len: 5,
            ..Default::default()
        };
        let ctx = Context::new(config, &vcs);

        let path = run(&ctx, dir.path(), &new_post(&["Long title here"])).unwrap();
        assert_eq!(path, dir.path().join("long-").join("index.md"));

        let path = run(&ctx, dir.path(), &new_post(&["Other", "-s", "custom"])).unwrap();
        assert_eq!(path, dir.path().join("custom").join("index.md"));

        let path = run(
            &ctx,
            dir.path(),
            &new_post(&["Long title here", "--max-slug-len", "9"]),
        )
        .unwrap();
        assert_eq!(path, dir.path().join("long-titl").join("index.md"));
    }

    #[test]
    fn title_without_letters_is_rejected() {
        let dir = TempDir::new().unwrap();
        let vcs = FakeVcs::default();
        let ctx = Context::new(Config::default(), &vcs);

        let err = run(&ctx, dir.path(), &new_post(&["2024!!!"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PostError>(),
            Some(PostError::EmptySlug { .. })
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let vcs = FakeVcs::default();
        let ctx = Context::new(Config::default(), &vcs);

        let path = run(&ctx, dir.path(), &new_post(&["Same"])).unwrap();
        std::fs::write(&path, "---\ntitle: Same\n---\nhand written\n").unwrap();

        assert!(run(&ctx, dir.path(), &new_post(&["Same"])).is_err());
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .ends_with("hand written\n"));

        run(&ctx, dir.path(), &new_post(&["Same", "--force"])).unwrap();
        assert!(!std::fs::read_to_string(&path)
            .unwrap()
            .contains("hand written"));
    }

    #[test]
    fn git_creates_branch_stages_and_commits() {
        let dir = TempDir::new().unwrap();
        let vcs = FakeVcs::default();
        let config = Config {
            start_branch: "main".to_string(),
            ..Default::default()
        };
        let ctx = Context::new(config, &vcs);

        let path = run(&ctx, dir.path(), &new_post(&["My Post", "-g"])).unwrap();

        assert_eq!(
            *vcs.calls.borrow(),
            vec![
                "checkout -b draft/my-post main".to_string(),
                format!("add {}", path.display()),
                "commit -m Add my-post".to_string(),
            ]
        );
    }

    #[test]
    fn start_branch_flag_overrides_config() {
        let dir = TempDir::new().unwrap();
        let vcs = FakeVcs::default();
        let ctx = Context::new(Config::default(), &vcs);

        run(&ctx, dir.path(), &new_post(&["Post", "-g", "-b", "develop"])).unwrap();
        assert_eq!(vcs.calls.borrow()[0], "checkout -b draft/post develop");
    }

    #[test]
    fn git_failure_keeps_written_post() {
        let dir = TempDir::new().unwrap();
        let vcs = FakeVcs {
            fail_on: Some("commit"),
            ..Default::default()
        };
        let ctx = Context::new(Config::default(), &vcs);

        assert!(run(&ctx, dir.path(), &new_post(&["Post", "--git"])).is_err());
        assert!(dir.path().join("post").join("index.md").is_file());
        assert_eq!(vcs.calls.borrow().len(), 3);
    }
}
