use crate::{config::Config, git::Vcs};

/// Everything a command needs besides its own arguments.
pub(crate) struct Context<'a> {
    pub config: Config,
    pub vcs: &'a dyn Vcs,
}

impl<'a> Context<'a> {
    pub fn new(config: Config, vcs: &'a dyn Vcs) -> Self {
        Self { config, vcs }
    }
}
