//! Tomasulo simulator CLI.
//!
//! This binary drives the simulator from the command line. It provides:
//! 1. **Program run:** Decode a program file, apply register/memory seeds and run it to completion.
//! 2. **Demo:** Run the built-in sample program on the default machine.
//!
//! Both print the instruction ledger, registers, memory and statistics, or a
//! JSON document with `--json`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::{fs, process};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tomasulo_core::config::Config;
use tomasulo_core::isa::decode::parse_program;
use tomasulo_core::sim::Simulator;

/// Sample program exercising loads, stores, renaming and a long divide.
const DEMO_PROGRAM: &str = "\
SW   R3,100(R14)
LW   R11,200(R2)
LW   R15,96(R19)
LW   R30,12(R6)
LW   R19,60(R16)
ADD  R6,R2,R3
SUB  R2,R8,R0
DIV  R10,R8,R9
SW   R10,100(R2)
MUL  R20,R14,R19
ADD  R3,R4,R4
SUB  R2,R9,R8
SW   R2,100(R0)
SW   R7,116(R0)
SW   R10,228(R0)
";

/// Default cap on simulated cycles.
const DEFAULT_MAX_CYCLES: u64 = 10_000;

#[derive(Parser, Debug)]
#[command(
    name = "tomasim",
    author,
    version,
    about = "Cycle-stepped Tomasulo scheduling simulator",
    long_about = "Run a program through a Tomasulo machine and report per-instruction timing.\n\nExamples:\n  tomasim demo\n  tomasim run prog.s --reg R1=5 --mem 100=7\n  tomasim run prog.s --config machine.json --json"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program file (one instruction per line).
    Run {
        /// Program source.
        program: PathBuf,

        #[command(flatten)]
        opts: RunOpts,
    },

    /// Run the built-in sample program.
    Demo {
        #[command(flatten)]
        opts: RunOpts,
    },
}

#[derive(Args, Debug)]
struct RunOpts {
    /// JSON machine configuration (latencies, station pools).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial register value, e.g. `R1=5`. Repeatable.
    #[arg(long = "reg", value_parser = parse_register_seed)]
    regs: Vec<(String, i64)>,

    /// Initial memory word, e.g. `100=7`. Repeatable.
    #[arg(long = "mem", value_parser = parse_memory_seed)]
    mem: Vec<(i64, i64)>,

    /// Stop after this many cycles even if the machine has not drained.
    #[arg(long, default_value_t = DEFAULT_MAX_CYCLES)]
    cycles: u64,

    /// Print the final snapshot, ledger and statistics as JSON.
    #[arg(long)]
    json: bool,
}

fn parse_register_seed(s: &str) -> Result<(String, i64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("bad register value `{value}`: {e}"))?;
    Ok((name.trim().to_string(), value))
}

fn parse_memory_seed(s: &str) -> Result<(i64, i64), String> {
    let (addr, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ADDR=VALUE, got `{s}`"))?;
    let addr = addr
        .trim()
        .parse()
        .map_err(|e| format!("bad address `{addr}`: {e}"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("bad memory value `{value}`: {e}"))?;
    Ok((addr, value))
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run { program, opts } => {
            let source = fs::read_to_string(&program).unwrap_or_else(|e| {
                eprintln!("Error reading program {}: {}", program.display(), e);
                process::exit(1);
            });
            cmd_run(&source, &opts);
        }
        Commands::Demo { opts } => cmd_run(DEMO_PROGRAM, &opts),
    }
}

/// Decodes `source`, runs it until drained or out of cycles, and reports.
///
/// Exits with code 1 on configuration errors and code 2 when the cycle cap
/// is hit before the machine drains.
fn cmd_run(source: &str, opts: &RunOpts) {
    let config = match &opts.config {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        }),
        None => Config::default(),
    };

    let program = parse_program(source);
    tracing::info!(instructions = program.len(), "program decoded");
    let regs: BTreeMap<String, i64> = opts.regs.iter().cloned().collect();
    let mem: BTreeMap<i64, i64> = opts.mem.iter().copied().collect();

    let mut sim = Simulator::new(config);
    if let Err(e) = sim.initialize(program, &regs, &mem) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
    if let Err(e) = sim.run_until_drained(opts.cycles) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let Ok(cpu) = sim.cpu() else {
        eprintln!("Error: simulator lost its machine state");
        process::exit(1);
    };

    if opts.json {
        let doc = serde_json::json!({
            "state": cpu.state,
            "ledger": cpu.ledger,
            "stats": cpu.stats,
        });
        match serde_json::to_string_pretty(&doc) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    } else {
        print_ledger(cpu);
        print_registers(cpu);
        print_memory(cpu);
        cpu.stats.print();
    }

    if !sim.is_drained() {
        eprintln!("[!] stopped after {} cycles with work still in flight", opts.cycles);
        process::exit(2);
    }
}

fn cycle(c: Option<u64>) -> String {
    c.map_or_else(|| "-".to_string(), |c| c.to_string())
}

fn print_ledger(cpu: &tomasulo_core::Cpu) {
    println!("{:<22} {:>6} {:>6} {:>6} {:>6}", "INSTRUCTION", "ISSUE", "START", "END", "WRITE");
    for entry in cpu.ledger.entries() {
        println!(
            "{:<22} {:>6} {:>6} {:>6} {:>6}",
            entry.instruction.to_string(),
            cycle(entry.issue),
            cycle(entry.exec_start),
            cycle(entry.exec_end),
            cycle(entry.write_result),
        );
    }
    println!();
}

fn print_registers(cpu: &tomasulo_core::Cpu) {
    println!("REGISTERS (non-zero or pending)");
    let state = &cpu.state;
    for reg in state.registers.iter() {
        match reg.producer {
            Some(tag) => println!(
                "  {:<4} {:>12}  <- {}",
                reg.name,
                reg.value,
                state.stations.name(tag)
            ),
            None if reg.value != 0.0 => println!("  {:<4} {:>12}", reg.name, reg.value),
            None => {}
        }
    }
    println!();
}

fn print_memory(cpu: &tomasulo_core::Cpu) {
    println!("MEMORY");
    for (addr, value) in cpu.state.memory.iter() {
        println!("  [{addr:>6}] {value}");
    }
}
