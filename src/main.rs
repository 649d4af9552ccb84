use std::process;

use log::{error, info};
use structopt::StructOpt;

use strbst::config::{Command, GenerateOptions, Options, RunOptions};
use strbst::{keys, workload};

fn main() {
    let options = Options::from_args();
    init_logger(options.verbose);

    if let Err(err) = dispatch(options.command) {
        error!("{}", err);
        process::exit(1);
    }
}

/// Logs to stderr so the reports on stdout stay clean. `RUST_LOG` wins over
/// `--verbose`.
fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn dispatch(command: Command) -> strbst::Result<()> {
    match command {
        Command::Generate(opts) => generate(&opts),
        Command::Run(opts) => run(&opts),
    }
}

fn generate(opts: &GenerateOptions) -> strbst::Result<()> {
    opts.validate()?;
    info!(
        "creating {} with {} keys of length {}",
        opts.output.display(),
        opts.count,
        opts.length
    );

    let mut rng = opts.rng();
    let keys = keys::generate_keys(&mut rng, opts.count, opts.length)?;
    keys::write_keys_to(&opts.output, &keys)
}

fn run(opts: &RunOptions) -> strbst::Result<()> {
    opts.validate()?;
    let keys = keys::read_keys(&opts.input)?;
    let mut rng = opts.rng();

    println!(
        "--- Running {} keys through {} containers ---",
        keys.len(),
        opts.containers.len()
    );
    for &container in &opts.containers {
        let report = workload::run(container, &keys, &mut rng);
        println!("\n{}", report);
    }
    println!("\n--- Done ---");

    Ok(())
}
