#![allow(clippy::cast_precision_loss)]
//! The command-line interface.
//!
//! Uses `clap` for parsing arguments. A circuit file is a single
//! expression; whitespace, including newlines, only separates tokens.

use circuit_sat::circuit::Circuit;
use circuit_sat::circuit::report::report;
use circuit_sat::sat::dpll::Dpll;
use circuit_sat::sat::engine::{Outcome, solve_formula};
use clap::{Args, CommandFactory, Parser, Subcommand};
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Exit code for a satisfiable circuit.
const EXIT_SAT: i32 = 0;
/// Exit code for an unsatisfiable circuit.
const EXIT_UNSAT: i32 = 1;
/// Exit code for malformed input or a reporting failure.
const EXIT_INPUT: i32 = 2;
/// Exit code for an engine failure (including an exceeded deadline).
const EXIT_ENGINE: i32 = 3;

/// Defines the command-line interface for the circuit solver.
#[derive(Parser, Debug)]
#[command(name = "circuit_sat", version, about = "A Boolean circuit satisfiability tool")]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a
    /// subcommand, it's treated as the path to a circuit file to solve.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands for the circuit solver.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a circuit file.
    File {
        /// Path to the circuit file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a circuit expression provided as plain text.
    Text {
        /// The expression itself (e.g. "(a & b) | ~c").
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.circ` file under a directory.
    Dir {
        /// Path to the directory to walk.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug output, providing more verbose information during solving.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Enable verification of the found model against the encoded formula.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,

    /// Enable printing of the full model, including derived gate variables.
    #[arg(short, long, default_value_t = false)]
    print_solution: bool,

    /// The signal whose value is reported as the circuit output Z.
    /// Defaults to the whole expression, which a satisfying assignment
    /// drives to 1.
    #[arg(long)]
    output: Option<String>,

    /// Comma-separated input signals to report, in order. Defaults to
    /// every named signal in order of first appearance.
    #[arg(long, value_delimiter = ',')]
    inputs: Option<Vec<String>>,

    /// Write the rendered result to this file instead of stdout.
    #[arg(long)]
    out_file: Option<PathBuf>,

    /// If true, the encoded DIMACS CNF representation of the circuit
    /// will be printed and saved to a file.
    #[arg(short, long, default_value_t = false)]
    export_dimacs: bool,

    /// Abort solving after this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

/// Parses the command line and runs the selected subcommand, returning
/// the process exit code.
pub(crate) fn run() -> i32 {
    let cli = Cli::parse();

    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            return solve_file(&path, &cli.common);
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),
        Some(Commands::Text { input, common }) => solve_text(&input, None, &common),
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "circuit_sat",
                &mut io::stdout(),
            );
            EXIT_SAT
        }
        None => {
            eprintln!("No command provided. Use --help for more information.");
            EXIT_INPUT
        }
    }
}

fn solve_file(path: &Path, common: &CommonOptions) -> i32 {
    match fs::read_to_string(path) {
        Ok(text) => solve_text(&text, Some(path), common),
        Err(e) => {
            eprintln!("Failed to read {}: {e}", path.display());
            EXIT_INPUT
        }
    }
}

/// Walks `path`, solving every `.circ` file found.
fn solve_dir(path: &Path, common: &CommonOptions) -> i32 {
    if !path.is_dir() {
        eprintln!("Provided path is not a directory: {}", path.display());
        return EXIT_INPUT;
    }

    let mut worst = EXIT_SAT;
    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() || file_path.extension().is_none_or(|ext| ext != "circ") {
            continue;
        }

        let code = solve_file(file_path, common);
        worst = worst.max(code);
    }

    worst
}

fn solve_text(text: &str, label: Option<&Path>, common: &CommonOptions) -> i32 {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    epoch::advance().unwrap();
    let parse_start = Instant::now();
    let circuit = match Circuit::parse(text) {
        Ok(circuit) => circuit,
        Err(e) => {
            eprintln!("parse error: {e}");
            return EXIT_INPUT;
        }
    };
    let parse_time = parse_start.elapsed();

    let inputs: Vec<String> = common.inputs.clone().unwrap_or_else(|| {
        circuit.inputs().map(ToOwned::to_owned).collect()
    });

    let encode_start = Instant::now();
    let compiled = circuit.compile();
    let encode_time = encode_start.elapsed();

    if common.debug {
        println!("CNF: {}", compiled.cnf());
        println!("Variables: {}", compiled.cnf().num_vars);
        println!("Clauses: {}", compiled.cnf().len());
        println!("Output literal: {}", compiled.root());
    }

    if common.export_dimacs {
        let dimacs = compiled.cnf().to_string();
        println!("DIMACS:\n{dimacs}");

        if let Some(path) = label {
            let dimacs_path = format!("{}.cnf", path.display());
            fs::write(&dimacs_path, dimacs)
                .unwrap_or_else(|e| panic!("Unable to write file {dimacs_path}: {e}"));
            println!("DIMACS written to: {dimacs_path}");
        }
    }

    let mut engine = Dpll::new();
    if let Some(secs) = common.timeout_secs {
        engine = engine.with_time_budget(Duration::from_secs(secs));
    }

    let solve_start = Instant::now();
    let outcome = match solve_formula(compiled.cnf(), &mut engine) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{e}");
            return EXIT_ENGINE;
        }
    };
    let solve_time = solve_start.elapsed();
    info!("solved in {solve_time:?}");

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        if let Some(model) = outcome.model() {
            let ok = compiled.cnf().evaluate(model);
            println!("Verified: {ok:?}");
            assert!(ok, "Model failed verification!");
        }
    }

    if common.stats {
        print_stats(
            parse_time,
            encode_time,
            solve_time,
            &compiled,
            allocated_mib,
            resident_mib,
            &outcome,
        );
    }

    match outcome {
        Outcome::Satisfiable(model) => {
            if common.print_solution {
                let rendered: Vec<String> = (1..=compiled.cnf().num_vars)
                    .map(|v| {
                        let var = u32::try_from(v).expect("variable count overflowed");
                        if model.value(var) { format!("{var}") } else { format!("-{var}") }
                    })
                    .collect();
                println!("Model: {}", rendered.join(" "));
            }

            let result = match &common.out_file {
                Some(path) => fs::File::create(path).and_then(|mut f| {
                    report(
                        &mut f,
                        &inputs,
                        common.output.as_deref(),
                        &model,
                        compiled.registry(),
                    )
                    .map_err(io::Error::other)
                }),
                None => report(
                    &mut io::stdout().lock(),
                    &inputs,
                    common.output.as_deref(),
                    &model,
                    compiled.registry(),
                )
                .map_err(io::Error::other),
            };

            match result {
                Ok(()) => EXIT_SAT,
                Err(e) => {
                    eprintln!("{e}");
                    EXIT_INPUT
                }
            }
        }
        Outcome::Unsatisfiable => {
            println!("no satisfying assignment");
            EXIT_UNSAT
        }
    }
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    encode_time: Duration,
    solve_time: Duration,
    compiled: &circuit_sat::circuit::CompiledCircuit,
    allocated: f64,
    resident: f64,
    outcome: &Outcome,
) {
    println!("\n=====================[ Problem Statistics ]======================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line(
        "Encode time (s)",
        format!("{:.3}", encode_time.as_secs_f64()),
    );
    stat_line("Named signals", compiled.registry().num_named());
    stat_line("Variables (incl. gates)", compiled.cnf().num_vars);
    stat_line("Clauses", compiled.cnf().len());
    stat_line("Literals", compiled.cnf().num_literals());
    println!("======================[ Search Statistics ]======================");
    stat_line("Solve time (s)", format!("{:.3}", solve_time.as_secs_f64()));
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    println!("=================================================================");

    if outcome.is_sat() {
        println!("\nSATISFIABLE");
    } else {
        println!("\nUNSATISFIABLE");
    }
}
