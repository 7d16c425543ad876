use std::env;

use anyhow::{bail, Result};
use getopts::Options;
use hashkey_set::{Command, Operation};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

fn program_name(args: &[String]) -> String {
    args.first()
        .cloned()
        .unwrap_or_else(|| String::from("hashkey_set"))
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = program_name(&args);

    let mut opts = Options::new();
    opts.optopt(
        "o",
        "op",
        "values, keys, size, hash-key, union, intersection or difference",
        "OP",
    );
    opts.optopt("s", "string", "print the djb2 hash of a string", "TEXT");
    opts.optflag("v", "verbose", "debug logging");
    opts.optflag("h", "help", "print this help");
    let matches = opts.parse(args.iter().skip(1))?;

    if matches.opt_present("h") {
        let brief = format!("Usage: {} [options] LEFT [RIGHT]", program);
        print!("{}", opts.usage(&brief));
        return Ok(());
    }

    let level = if matches.opt_present("v") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let command = match matches.opt_str("s") {
        Some(text) => Command::Hash(text),
        None => {
            let op = match matches.opt_str("o") {
                Some(op) => op.parse()?,
                None => Operation::Values,
            };
            let mut free = matches.free.into_iter();
            let Some(left) = free.next() else {
                bail!("missing set literal, see --help");
            };
            Command::Set {
                op,
                left,
                right: free.next(),
            }
        }
    };
    debug!(?command, "running");

    println!("{}", hashkey_set::run(&command)?);
    Ok(())
}
