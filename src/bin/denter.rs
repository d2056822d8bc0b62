//! Command-line interface for denter
//! This binary runs the indentation pipeline over a file and prints the result in one of the
//! processor formats.
//!
//! Usage:
//!   denter execute `<path>` [--format `<format>`] [--config `<file>`]  - Process a file
//!   denter list-formats                                          - List all available formats
//!
//! Configuration is read from the embedded defaults, then `./denter.toml` if present (or the
//! file given with `--config`), then command-line flags.

use clap::{Arg, ArgAction, ArgMatches, Command};
use denter::denter::config::{DenterConfig, Loader};
use denter::denter::logging::init_tracing;
use denter::denter::processor::{
    available_formats, process_file, ProcessingOptions, ProcessingSpec,
};

const LOCAL_CONFIG: &str = "denter.toml";

fn main() {
    init_tracing();

    let matches = Command::new("denter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for turning indentation into explicit block structure")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("execute")
                .about("Process a file and print the result")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'token-simple', 'calc-value'); see list-formats"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the defaults"),
                )
                .arg(
                    Arg::new("ignore-eof")
                        .long("ignore-eof")
                        .help("Leave open blocks open at end of input")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("eof-statement-break")
                        .long("eof-statement-break")
                        .help("Emit a statement break before closing blocks at end of input")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("tab-width")
                        .long("tab-width")
                        .help("Columns per tab stop when measuring indentation")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("execute", execute_matches)) => handle_execute_command(execute_matches),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

/// Build the configuration from defaults, config file and flags
fn load_config(matches: &ArgMatches) -> Result<DenterConfig, config::ConfigError> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };

    if matches.get_flag("ignore-eof") {
        loader = loader.set_override("tokenizer.ignore_eof", true)?;
    }
    if matches.get_flag("eof-statement-break") {
        loader = loader.set_override("tokenizer.eof_statement_break", true)?;
    }
    if let Some(tab_width) = matches.get_one::<u32>("tab-width") {
        loader = loader.set_override("source.tab_width", u64::from(*tab_width))?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }

    loader.build()
}

/// Handle the execute command
fn handle_execute_command(matches: &ArgMatches) {
    let config = load_config(matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let spec = ProcessingSpec::from_string(&config.output.format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Available formats: {}", available_formats().join(", "));
        std::process::exit(1);
    });

    let options = ProcessingOptions {
        source: config.source_options(),
        tokenizer: config.tokenizer_options(),
    };

    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    match process_file(path, &spec, &options) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}
