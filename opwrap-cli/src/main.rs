use std::collections::VecDeque;
use std::error::Error;

use log::LevelFilter;
use opwrap::env::{env_flag, VERBOSE_ENV_VAR};
use opwrap::{OpRegistry, WrapperGenerator};

mod logger;

#[derive(Debug, PartialEq)]
struct Args {
    /// Registry dump to load.
    registry: String,

    /// Operator to generate a wrapper for.
    op_type: Option<String>,

    /// List the operators in the registry instead of generating a wrapper.
    list: bool,

    /// Enable debug logging.
    verbose: bool,
}

fn parse_args(mut parser: lexopt::Parser) -> Result<Args, lexopt::Error> {
    use lexopt::prelude::*;

    let mut values = VecDeque::new();
    let mut list = false;
    let mut verbose = false;

    while let Some(arg) = parser.next()? {
        match arg {
            Value(val) => values.push_back(val.string()?),
            Short('l') | Long("list") => list = true,
            Short('v') | Long("verbose") => verbose = true,
            Short('h') | Long("help") => {
                println!(
                    "Generate a Python layer function for an operator.

Usage: {bin_name} [OPTIONS] <registry> <op_type>

<registry> is a JSON (.json) or Protocol Buffers (.pb) registry dump.

  -l, --list     List registered operators
  -v, --verbose  Enable verbose logging
  -h, --help     Print help

Set {env_var}=1 to enable verbose logging from the environment.
",
                    bin_name = parser.bin_name().unwrap_or("opwrap"),
                    env_var = VERBOSE_ENV_VAR,
                );
                std::process::exit(0);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    let registry = values.pop_front().ok_or("missing `<registry>` arg")?;
    let op_type = values.pop_front();
    if !list && op_type.is_none() {
        return Err("missing `<op_type>` arg".into());
    }
    if let Some(extra) = values.pop_front() {
        return Err(lexopt::Error::UnexpectedArgument(extra.into()));
    }

    Ok(Args {
        registry,
        op_type,
        list,
        verbose,
    })
}

/// Generate a Python wrapper function for an operator in a registry dump.
///
/// ```
/// cargo run -p opwrap-cli -- ops.json uniform_random > uniform_random.py
/// ```
///
/// The generated code is written to stdout. Logs go to stderr.
fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args(lexopt::Parser::from_env())?;

    logger::init_log()?;
    let verbose = args.verbose || env_flag(VERBOSE_ENV_VAR, false);
    log::set_max_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let registry = OpRegistry::load_file(&args.registry)?;

    if args.list {
        for op_type in registry.op_types() {
            println!("{}", op_type);
        }
        return Ok(());
    }

    let op_type = args.op_type.as_deref().ok_or("missing `<op_type>` arg")?;
    let generator = WrapperGenerator::new()?;
    let code = generator.generate(&registry, op_type)?;
    print!("{}", code);

    Ok(())
}
