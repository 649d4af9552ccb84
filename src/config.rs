//! Command line options of the `strbst` binary.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;
use strum_macros::{Display, EnumString};

use crate::error::{Error, Result};
use crate::keys;

/// The containers a workload can be run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ContainerKind {
    /// This crate's unbalanced [`Tree`](crate::tree::Tree).
    Bst,
    /// `std::collections::BTreeSet<String>`.
    BtreeSet,
    /// `std::collections::HashSet<String>`.
    HashSet,
    /// `std::collections::BTreeMap<String, String>`, mapping each key to itself.
    BtreeMap,
}

impl ContainerKind {
    /// Every container, in the order `run` benchmarks them by default.
    pub const ALL: [ContainerKind; 4] = [
        ContainerKind::Bst,
        ContainerKind::BtreeSet,
        ContainerKind::HashSet,
        ContainerKind::BtreeMap,
    ];

    /// A human readable name for reports.
    pub fn label(self) -> &'static str {
        match self {
            ContainerKind::Bst => "Unbalanced BST",
            ContainerKind::BtreeSet => "BTreeSet",
            ContainerKind::HashSet => "HashSet",
            ContainerKind::BtreeMap => "BTreeMap",
        }
    }
}

/// Benchmarks an unbalanced string BST against the standard containers.
#[derive(Debug, StructOpt)]
#[structopt(name = "strbst")]
pub struct Options {
    /// Log per-phase details (same as `RUST_LOG=debug`).
    #[structopt(short, long)]
    pub verbose: bool,

    /// The subcommand to run.
    #[structopt(subcommand)]
    pub command: Command,
}

/// What to do.
#[derive(Debug, StructOpt)]
pub enum Command {
    /// Write unique random alphanumeric keys to a data file.
    Generate(GenerateOptions),
    /// Insert, search and delete every key of a data file in each container.
    Run(RunOptions),
}

/// Options for `generate`.
#[derive(Debug, StructOpt)]
pub struct GenerateOptions {
    /// Where to write the keys.
    #[structopt(short, long, default_value = "data.txt", parse(from_os_str))]
    pub output: PathBuf,

    /// How many distinct keys to write.
    #[structopt(short = "n", long, default_value = "1000000")]
    pub count: usize,

    /// Length of every key.
    #[structopt(short, long, default_value = "15")]
    pub length: usize,

    /// Seed for a reproducible data file.
    #[structopt(long)]
    pub seed: Option<u64>,
}

impl GenerateOptions {
    /// Rejects options that can't produce a data file.
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(Error::InvalidConfig("--count must be at least 1".into()));
        }
        keys::check_capacity(self.count, self.length)
    }

    /// The generator's random source.
    pub fn rng(&self) -> StdRng {
        seeded(self.seed)
    }
}

/// Options for `run`.
#[derive(Debug, StructOpt)]
pub struct RunOptions {
    /// The data file to read keys from.
    #[structopt(short, long, default_value = "data.txt", parse(from_os_str))]
    pub input: PathBuf,

    /// Comma separated containers to benchmark, in order.
    #[structopt(
        short,
        long,
        use_delimiter = true,
        default_value = "bst,btree-set,hash-set,btree-map"
    )]
    pub containers: Vec<ContainerKind>,

    /// Seed for reproducible shuffles.
    #[structopt(long)]
    pub seed: Option<u64>,
}

impl RunOptions {
    /// Rejects options that would benchmark nothing.
    pub fn validate(&self) -> Result<()> {
        if self.containers.is_empty() {
            return Err(Error::InvalidConfig(
                "--containers needs at least one container".into(),
            ));
        }
        Ok(())
    }

    /// The random source for the shuffles between phases.
    pub fn rng(&self) -> StdRng {
        seeded(self.seed)
    }
}

fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
