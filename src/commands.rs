use clap::{Arg, ArgAction, ArgMatches};

use crate::date;

pub(crate) mod new;
pub(crate) mod update;
pub(crate) mod version;

fn list_arg(id: &'static str, short: char, help: &'static str) -> Arg {
    Arg::new(id)
        .short(short)
        .long(id)
        .help(help)
        .value_name("NAME[,NAME...]")
        .value_delimiter(',')
        .action(ArgAction::Append)
}

fn tag_arg() -> Arg {
    list_arg("tag", 't', "Specify tags for post")
}

fn category_arg() -> Arg {
    list_arg("category", 'c', "Specify category for post")
}

fn date_arg() -> Arg {
    Arg::new("date")
        .short('d')
        .long("date")
        .help("Specify post date (\"today\" or a date such as 2024-01-31)")
}

/// Values of a repeatable, comma separated flag, in command line order.
fn list_values(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.filter(|v| !v.is_empty()).cloned().collect())
        .unwrap_or_default()
}

/// `--date` resolved to `YYYY-MM-DD`. `default` is used when the flag is absent.
fn date_value(matches: &ArgMatches, default: Option<&str>) -> anyhow::Result<Option<String>> {
    let Some(input) = matches
        .get_one::<String>("date")
        .map(String::as_str)
        .filter(|d| !d.is_empty())
        .or(default)
    else {
        return Ok(None);
    };
    let date = date::resolve(input)?;
    Ok(Some(date::format(date)))
}
