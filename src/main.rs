use clap::{Args as ClapArgs, Parser, Subcommand};
use env_logger::Env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use seqguess::search::{
    ComplexityProfile, Enumerator, SearchConfig, SearchDriver, load_profiles, parse_operators,
};
use seqguess::sequence::samples::find_sample;
use seqguess::sequence::{Request, SAMPLES, Sequence, format_value, parse_request, parse_sequence};
use seqguess::{Error, Result};

/// Exit status when the search ends without a formula
const EXIT_NOT_FOUND: i32 = 2;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "seqguess")]
#[command(about = "seqguess - guess the next number in a sequence")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that runs a search
#[derive(ClapArgs)]
struct SearchOptions {
    /// TOML file with [[profile]] tables replacing the default ladder
    #[arg(long)]
    profiles: Option<PathBuf>,
    /// Only try the first N profiles of the ladder
    #[arg(long)]
    max_profile: Option<usize>,
    /// Timeout in seconds for the whole search
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a formula for a sequence and predict its next value
    Guess {
        /// Known values, separated by spaces or commas
        #[arg(allow_negative_numbers = true, required_unless_present = "sample")]
        values: Vec<String>,
        /// Use a built-in sample instead (A-D)
        #[arg(long, short, conflicts_with = "values")]
        sample: Option<char>,
        #[command(flatten)]
        search: SearchOptions,
    },
    /// List the built-in sample sequences
    Samples,
    /// Read sequences from stdin until 'q' or end of input
    Interactive {
        #[command(flatten)]
        search: SearchOptions,
    },
    /// List the candidate formulas of one profile in search order
    Enumerate {
        /// Longest formula, in items
        #[arg(long, default_value = "3")]
        max_items: usize,
        /// Operators, comma separated (e.g. "+,-,*,sqrt")
        #[arg(long, value_delimiter = ',', default_value = "+", allow_hyphen_values = true)]
        ops: Vec<String>,
        /// Deepest back-reference S(i-N)
        #[arg(long, default_value = "2")]
        back: u8,
        /// Number of constants, counting from 1
        #[arg(long, default_value = "1")]
        constants: u8,
        /// Stop after this many candidates
        #[arg(long)]
        limit: Option<usize>,
        /// Show the infix form next to each candidate
        #[arg(long)]
        infix: bool,
    },
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let outcome = match args.command {
        Commands::Guess {
            values,
            sample,
            search,
        } => build_config(&search, args.verbose).and_then(|config| {
            let sequence = match sample {
                Some(letter) => sample_sequence(letter)?,
                None => parse_sequence(&values.join(" "))?,
            };
            run_guess(&sequence, &config)
        }),
        Commands::Samples => {
            print_samples();
            Ok(true)
        }
        Commands::Interactive { search } => {
            build_config(&search, args.verbose).and_then(|config| run_interactive(&config))
        }
        Commands::Enumerate {
            max_items,
            ops,
            back,
            constants,
            limit,
            infix,
        } => run_enumerate(max_items, &ops, back, constants, limit, infix),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_NOT_FOUND),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn build_config(options: &SearchOptions, verbose: bool) -> Result<SearchConfig> {
    let mut config = SearchConfig::default()
        .with_timeout_option(options.timeout.map(Duration::from_secs))
        .with_verbose(verbose);
    if let Some(path) = &options.profiles {
        config = config.with_profiles(load_profile_file(path)?);
    }
    if let Some(count) = options.max_profile {
        config = config.with_max_profiles(count);
    }
    config.validate()?;
    Ok(config)
}

fn load_profile_file(path: &Path) -> Result<Vec<ComplexityProfile>> {
    let profiles = load_profiles(path)?;
    log::info!("Loaded {} profiles from {}", profiles.len(), path.display());
    Ok(profiles)
}

fn sample_sequence(letter: char) -> Result<Sequence> {
    let sample = find_sample(letter).ok_or(Error::UnknownSample(letter))?;
    Sequence::new(sample.values.to_vec())
}

/// Search and print the outcome. Returns whether a formula was found.
fn run_guess(sequence: &Sequence, config: &SearchConfig) -> Result<bool> {
    println!("Sequence: {}", sequence);

    let result = SearchDriver::new().search(sequence, config)?;

    println!("{}", result);
    if config.verbose {
        println!("\nSearch Statistics:");
        print!("{}", result.statistics.format_summary());
    }
    Ok(result.outcome.is_found())
}

fn print_samples() {
    for sample in &SAMPLES {
        let values: Vec<String> = sample.values.iter().map(|v| format_value(*v)).collect();
        println!("{}: {}", sample.letter, sample.name);
        println!("   {}", values.join(", "));
    }
}

fn run_interactive(config: &SearchConfig) -> Result<bool> {
    println!("I'll try to guess the next number in your sequence.");
    println!("Enter at least two numbers, or one of these samples:");
    print_samples();

    let stdin = io::stdin();
    let mut lines = stdin.lock();
    loop {
        print!("\nSequence (q to quit): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if lines.read_line(&mut line)? == 0 {
            println!();
            return Ok(true);
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_request(&line) {
            Ok(Request::Quit) => return Ok(true),
            Ok(Request::Guess(sequence)) => {
                run_guess(&sequence, config)?;
            }
            Err(e) => println!("{}", e),
        }
    }
}

fn run_enumerate(
    max_items: usize,
    ops: &[String],
    back: u8,
    constants: u8,
    limit: Option<usize>,
    infix: bool,
) -> Result<bool> {
    let operators = parse_operators(ops)?;
    let profile = ComplexityProfile::new(max_items, operators, back, constants);
    profile.validate()?;
    log::info!("Enumerating {}", profile);

    let mut count = 0usize;
    for expression in Enumerator::new(&profile).take(limit.unwrap_or(usize::MAX)) {
        count += 1;
        match expression.to_infix().filter(|_| infix) {
            Some(text) => println!("{:<40} {}", expression.to_string(), text),
            None => println!("{}", expression),
        }
    }
    log::info!("{} candidates", count);
    Ok(true)
}
