use std::path::PathBuf;
use std::str::FromStr;

use structopt::StructOpt;

use crate::common::time::parse_iso_time;
use crate::error::{Error, Result};
use crate::model::{parse_matcher, LabelMatcher, Timestamp};

#[derive(Debug, StructOpt)]
#[structopt(name = "seriesset", about = "Turn per-series query rows into labeled series")]
pub struct CliOpt {
    /// JSON array of rows.
    #[structopt(long = "rows", short = "r", parse(from_os_str))]
    pub rows: PathBuf,

    /// JSON array of {"id", "name", "value"} labels.
    #[structopt(long = "labels", short = "l", parse(from_os_str))]
    pub labels: PathBuf,

    #[structopt(long = "since", short = "s", parse(try_from_str = parse_iso_time))]
    pub since: Option<Timestamp>,

    #[structopt(long = "until", short = "u", parse(try_from_str = parse_iso_time))]
    pub until: Option<Timestamp>,

    /// Label matcher, e.g. job=~"api.*". Can be repeated.
    #[structopt(long = "match", short = "m", parse(try_from_str = parse_matcher))]
    pub matchers: Vec<LabelMatcher>,

    #[structopt(long = "encode", short = "e", default_value = "promapi")]
    pub encode: Encoding,

    /// Stored timestamps count from 2000-01-01 instead of the Unix epoch.
    #[structopt(long = "pg-epoch")]
    pub pg_epoch: bool,

    #[structopt(long = "verbose", short = "v")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Encoding {
    PromApi,
    HumanReadable,
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "promapi" => Ok(Encoding::PromApi),
            "h" | "human" => Ok(Encoding::HumanReadable),
            _ => Err(format!("unknown encoding '{}'", s).into()),
        }
    }
}
