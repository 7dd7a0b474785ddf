use clap::{crate_version, Command};

const UNKNOWN: &str = "unknown";

pub(crate) fn command() -> Command {
    Command::new("version").about("Show version and build information")
}

pub(crate) fn build_info() -> String {
    format!(
        "Version: {}\nBuild ref: {}\nBuild date: {}\n",
        crate_version!(),
        option_env!("BLOGTOOL_BUILD_REF").unwrap_or(UNKNOWN),
        option_env!("BLOGTOOL_BUILD_DATE").unwrap_or(UNKNOWN),
    )
}

pub(crate) fn run() {
    print!("{}", build_info());
}
