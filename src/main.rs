use clap::{Parser as ClapParser, Subcommand};
use aql_lang::cli::{self, CheckOptions, CheckResult, CliError, FilterOptions};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

#[derive(ClapParser)]
#[command(name = "aql")]
#[command(about = "AQL - A boolean query language for filtering test-result records")]
#[command(version)]
struct Cli {
    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an AQL query and run it against JSON records
    Check {
        /// The AQL query to execute
        query: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// JSON object resolving name() placeholders
        #[arg(long)]
        context: Option<String>,

        /// Path to a JSON parser configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't execute
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the syntax tree of an AQL query as JSON
    Parse {
        /// The AQL query to parse
        query: String,

        /// JSON object resolving name() placeholders
        #[arg(long)]
        context: Option<String>,

        /// Path to a JSON parser configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Apply structured field filters to JSON records
    Filter {
        /// JSON array of filters
        #[arg(short, long)]
        filters: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'aql docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check {
            query,
            input,
            context,
            config,
            pretty,
            syntax_only,
        } => read_config(config).and_then(|config| {
            let options = CheckOptions {
                query,
                input: input_or_stdin(input)?,
                context,
                config,
                syntax_only,
            };
            run_check(&options, pretty)
        }),
        Commands::Parse {
            query,
            context,
            config,
            pretty,
        } => read_config(config).and_then(|config| {
            let options = CheckOptions {
                query,
                context,
                config,
                ..Default::default()
            };
            print_json(&cli::execute_parse(&options)?, pretty)
        }),
        Commands::Filter {
            filters,
            input,
            pretty,
        } => input_or_stdin(input).and_then(|input| {
            let options = FilterOptions { filters, input };
            print_json(&cli::execute_filter(&options)?, pretty)
        }),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn input_or_stdin(input: Option<String>) -> Result<Option<String>, CliError> {
    match input {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn read_config(path: Option<PathBuf>) -> Result<Option<String>, CliError> {
    path.map(fs::read_to_string).transpose().map_err(CliError::Io)
}

fn run_check(options: &CheckOptions, pretty: bool) -> Result<(), CliError> {
    match cli::execute_check(options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(output) => print_json(&output, pretty)?,
    }
    Ok(())
}

fn print_json(output: &serde_json::Value, pretty: bool) -> Result<(), CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(output)
    } else {
        serde_json::to_string(output)
    }?;
    println!("{}", json);
    Ok(())
}
