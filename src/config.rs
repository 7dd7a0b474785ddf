use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use log::{debug, info};
use serde::Deserialize;

use crate::git::{Vcs, DEFAULT_START_BRANCH};

const CONFIG_NAME: &str = ".blogtool";
const CONFIG_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Config {
    pub max_slug_len: usize,
    pub start_branch: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_slug_len: 30,
            start_branch: DEFAULT_START_BRANCH.to_string(),
        }
    }
}

impl Config {
    /// Loads `.blogtool.{yaml,yml,json}` from the repository root, falling
    /// back to `~/.config`. Without any config file the defaults are used.
    pub fn discover(vcs: &dyn Vcs) -> anyhow::Result<Self> {
        let mut search_dirs = vec![];
        match vcs.toplevel() {
            Ok(repo_dir) => {
                debug!("looking for config in repodir {repo_dir:?}");
                search_dirs.push(repo_dir);
            }
            Err(e) => debug!("not inside a git repository ({e})"),
        }
        if let Some(home) = dirs::home_dir() {
            search_dirs.push(home.join(".config"));
        }

        Self::load_from_dirs(&search_dirs)
    }

    pub fn load_from_dirs(search_dirs: &[PathBuf]) -> anyhow::Result<Self> {
        match find_config_file(search_dirs) {
            Some(path) => {
                info!("using config file {path:?}");
                Self::from_file(&path)
            }
            None => {
                debug!("no config file found. using defaults...");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("while reading config {path:?}"))?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("while parsing config {path:?}"))?,
            Some("yaml" | "yml") => {
                if content.trim().is_empty() {
                    Self::default()
                } else {
                    serde_yaml::from_str(&content)
                        .with_context(|| format!("while parsing config {path:?}"))?
                }
            }
            _ => bail!("unsupported config format: {path:?}"),
        };

        Ok(config)
    }
}

fn find_config_file(search_dirs: &[PathBuf]) -> Option<PathBuf> {
    search_dirs
        .iter()
        .flat_map(|dir| {
            CONFIG_EXTENSIONS
                .iter()
                .map(move |ext| dir.join(format!("{CONFIG_NAME}.{ext}")))
        })
        .find(|path| path.is_file())
}
