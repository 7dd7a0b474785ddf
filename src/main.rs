use std::path::Path;

use anyhow::bail;
use clap::{command, Arg, ArgAction, Command};
use commands::{new::NewPost, update::UpdatePosts};
use config::Config;
use context::Context;
use git::GitCli;
use log::LevelFilter;

mod commands;
mod config;
mod context;
mod date;
mod error;
mod git;
mod metadata;
mod post;

fn cli() -> Command {
    command!()
        .about("Create and update blog posts stored as <slug>/index.md")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase verbosity")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(commands::new::command())
        .subcommand(commands::update::command())
        .subcommand(commands::version::command())
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    // RUST_LOG, if set, takes precedence over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_logger(matches.get_count("verbose"));

    // posts live in directories relative to the working directory
    let base_dir = Path::new("");

    match matches.subcommand() {
        Some(("new", sub_matches)) => {
            let new_post = NewPost::from_matches(sub_matches)?;
            let git = GitCli::new();
            let ctx = Context::new(Config::discover(&git)?, &git);
            let post_path = commands::new::run(&ctx, base_dir, &new_post)?;
            println!("{}", post_path.display());
        }
        Some(("update", sub_matches)) => {
            let update_posts = UpdatePosts::from_matches(sub_matches)?;
            commands::update::run(base_dir, &update_posts)?;
        }
        Some(("version", _)) => commands::version::run(),
        Some((name, _)) => bail!("unknown command: {name}"),
        None => bail!("no command given"),
    }

    Ok(())
}
