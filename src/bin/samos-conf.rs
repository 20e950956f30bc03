//! Command-line interface for samos-conf
//! Inspects, normalizes and runs SAMoS control scripts.
//!
//! Usage:
//!   samos-conf tokens `<path>` [--format simple|json]      - List the tokens of a script
//!   samos-conf parse `<path>` [--format json|yaml]         - Print the parsed script
//!   samos-conf fmt `<path>` [--output `<path>`]            - Rewrite a script in canonical form
//!   samos-conf run `<path>` [--dir `<dir>`] [--settings `<toml>`] [--silent] [--debug]
//!                                                          - Write the script and run the simulator
//!   samos-conf clear `<dir>`                               - Remove result files from a run directory
//!   samos-conf result `<dir>`                              - Print the data file of the last step

use clap::{Arg, ArgAction, Command};
use samos_conf::conf::runner::{self, Simulation};
use samos_conf::conf::settings::{Loader, LOCAL_SETTINGS_FILE};
use samos_conf::conf::{generate, parse_file, tokenize_file, write_script, Config, Token};
use std::error::Error;

type CliResult = Result<(), Box<dyn Error>>;

fn cli() -> Command {
    Command::new("samos-conf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting, normalizing and running SAMoS control scripts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug output to stderr")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("tokens")
                .about("List the tokens of a script")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["simple", "json"])
                        .default_value("simple"),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Print the parsed script")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["json", "yaml"])
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("fmt")
                .about("Rewrite a script in canonical form")
                .arg(path_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write to this file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("run")
                .about("Write the script into the run directory and run the simulator on it")
                .arg(path_arg())
                .arg(
                    Arg::new("dir")
                        .long("dir")
                        .short('d')
                        .help("Run directory (overrides output.directory)"),
                )
                .arg(
                    Arg::new("settings")
                        .long("settings")
                        .short('s')
                        .help("Settings file layered over the defaults"),
                )
                .arg(
                    Arg::new("silent")
                        .long("silent")
                        .help("Discard the simulator's output")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("debug")
                        .long("debug")
                        .help("Run the debug build of the simulator")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("clear")
                .about("Remove result files from a run directory")
                .arg(dir_arg()),
        )
        .subcommand(
            Command::new("result")
                .about("Print the data file of the last simulation step")
                .arg(dir_arg()),
        )
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the script")
        .required(true)
        .index(1)
}

fn dir_arg() -> Arg {
    Arg::new("dir")
        .help("Run directory")
        .required(true)
        .index(1)
}

fn main() {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    let result = match matches.subcommand() {
        Some(("tokens", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let format = sub.get_one::<String>("format").unwrap();
            handle_tokens_command(path, format)
        }
        Some(("parse", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let format = sub.get_one::<String>("format").unwrap();
            handle_parse_command(path, format)
        }
        Some(("fmt", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            handle_fmt_command(path, sub.get_one::<String>("output"))
        }
        Some(("run", sub)) => handle_run_command(
            sub.get_one::<String>("path").unwrap(),
            sub.get_one::<String>("dir"),
            sub.get_one::<String>("settings"),
            sub.get_flag("silent"),
            sub.get_flag("debug"),
        ),
        Some(("clear", sub)) => handle_clear_command(sub.get_one::<String>("dir").unwrap()),
        Some(("result", sub)) => handle_result_command(sub.get_one::<String>("dir").unwrap()),
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load(path: &str) -> Result<Config, Box<dyn Error>> {
    Ok(parse_file(path)?.into_result()?)
}

/// Handle the tokens command
fn handle_tokens_command(path: &str, format: &str) -> CliResult {
    let lexed = tokenize_file(path)?;
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&lexed.tokens)?),
        _ => {
            for (token, location) in &lexed.tokens {
                let text = match token {
                    Token::Newline => String::new(),
                    other => other.to_string(),
                };
                println!("{:>4}  {:<8} {}", location.line, token.kind_name(), text);
            }
        }
    }
    Ok(())
}

/// Handle the parse command
fn handle_parse_command(path: &str, format: &str) -> CliResult {
    let config = load(path)?;
    let output = match format {
        "yaml" => serde_yaml::to_string(&config)?,
        _ => serde_json::to_string_pretty(&config)? + "\n",
    };
    print!("{}", output);
    Ok(())
}

/// Handle the fmt command
fn handle_fmt_command(path: &str, output: Option<&String>) -> CliResult {
    let config = load(path)?;
    match output {
        Some(output) => write_script(&config, output)?,
        None => print!("{}", generate(&config)),
    }
    Ok(())
}

/// Handle the run command
fn handle_run_command(
    path: &str,
    dir: Option<&String>,
    settings: Option<&String>,
    silent: bool,
    debug: bool,
) -> CliResult {
    let config = load(path)?;

    let mut loader = Loader::new().with_optional_file(LOCAL_SETTINGS_FILE);
    if let Some(settings) = settings {
        loader = loader.with_file(settings);
    }
    if let Some(dir) = dir {
        loader = loader.set_override("output.directory", dir.as_str())?;
    }
    if silent {
        loader = loader.set_override("simulator.silent", true)?;
    }
    if debug {
        loader = loader.set_override("simulator.debug", true)?;
    }

    let simulation = Simulation::new(config, loader.build()?);
    let status = simulation.run()?;
    if !status.success() {
        return Err(format!("simulator exited with {}", status).into());
    }
    if let Some(result) = simulation.latest_result()? {
        println!("{}", result.display());
    }
    Ok(())
}

/// Handle the clear command
fn handle_clear_command(dir: &str) -> CliResult {
    let removed = runner::clear(dir)?;
    println!("Removed {} result files", removed);
    Ok(())
}

/// Handle the result command
fn handle_result_command(dir: &str) -> CliResult {
    match runner::latest_result(dir)? {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => Err(format!("no step result files in {}", dir).into()),
    }
}
