use std::{
    fs,
    io::{self, BufWriter, Read, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use log::LevelFilter;
use water::{Error, interpreter::lexer::tokenize, parse, run};

/// Exit status for interpreter bugs, as opposed to errors in the program.
const EXIT_FATAL: u8 = 70;

/// water runs small S-expression programs against a library of host
/// functions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to run. Reads standard input when omitted.
    file: Option<PathBuf>,

    /// Runs the given source text instead of a file.
    #[arg(short, long, conflicts_with = "file")]
    eval: Option<String>,

    /// Prints the token stream instead of running the program.
    #[arg(long, conflicts_with = "ast")]
    tokens: bool,

    /// Prints the syntax tree instead of running the program.
    #[arg(long)]
    ast: bool,

    /// Raises the log level; repeat for more detail. `RUST_LOG` also applies.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    let source = match read_source(&args) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("ERROR: cannot read the program source: {e}");
            return ExitCode::FAILURE;
        },
    };

    let stdout = io::stdout();
    let mut output = BufWriter::new(stdout.lock());
    let result = if args.tokens {
        dump_tokens(&source, &mut output)
    } else if args.ast {
        dump_ast(&source, &mut output)
    } else {
        run(&source, &mut output)
    };
    let flushed = output.flush();

    match result.and(flushed.map_err(Error::from)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            if e.is_fatal() {
                ExitCode::from(EXIT_FATAL)
            } else {
                ExitCode::FAILURE
            }
        },
    }
}

fn read_source(args: &Args) -> io::Result<String> {
    if let Some(source) = &args.eval {
        return Ok(source.clone());
    }
    match &args.file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        },
    }
}

fn dump_tokens(source: &str, output: &mut impl Write) -> Result<(), Error> {
    for token in tokenize(source)? {
        writeln!(output, "{token}")?;
    }
    Ok(())
}

fn dump_ast(source: &str, output: &mut impl Write) -> Result<(), Error> {
    writeln!(output, "{:#?}", parse(source)?)?;
    Ok(())
}
