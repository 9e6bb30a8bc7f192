//! Dual-issue core simulator CLI.
//!
//! This binary is the command-line front end of the simulator. It performs:
//! 1. **Run:** Load a text or binary program and clock the pipeline until it drains,
//!    reporting breakpoints along the way.
//! 2. **Reference run:** Execute the same program on the non-pipelined interpreter.
//! 3. **Disassembly:** Print a program with addresses, labels and source lines.
//!
//! On a fatal simulation error the statistics gathered so far are written before the
//! process exits with a non-zero status.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dualsim_core::config::Config;
use dualsim_core::isa::disasm::disassemble;
use dualsim_core::sim::loader::{self, Program};
use dualsim_core::sim::{ReferenceModel, RenderFormat, RunExit, Simulator};
use dualsim_core::soc::net::NetworkTasks;
use dualsim_core::stats::SimStats;

#[derive(Parser, Debug)]
#[command(
    name = "dualsim",
    author,
    version,
    about = "Cycle-level dual-issue core simulator",
    long_about = "Run a program on the dual-issue timing model or the reference interpreter.\n\nExamples:\n  dualsim run prog.txt\n  dualsim run --binary prog.bin --stats stats.json\n  dualsim run prog.txt --break '*' --verbose\n  dualsim disasm prog.txt"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program to completion.
    Run {
        /// Program file (text format unless `--binary`).
        program: PathBuf,

        /// Treat the program as raw big-endian words.
        #[arg(long)]
        binary: bool,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Per-cycle pipeline trace.
        #[arg(short, long)]
        verbose: bool,

        /// Breakpoint selector: a breakpoint name, or `*` for all.
        #[arg(short = 'b', long = "break", default_value = "")]
        breakpoint: String,

        /// Stop after this many cycles (overrides the config file).
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Write the statistics report as JSON.
        #[arg(long)]
        stats: Option<PathBuf>,

        /// Print both register banks at exit in this format.
        #[arg(long)]
        dump: Option<RenderFormat>,

        /// Use the non-pipelined reference interpreter.
        #[arg(long)]
        reference: bool,
    },

    /// Print the disassembly of a program.
    Disasm {
        /// Program file (text format unless `--binary`).
        program: PathBuf,

        /// Treat the program as raw big-endian words.
        #[arg(long)]
        binary: bool,
    },
}

/// Options of the `run` subcommand.
struct RunOptions {
    verbose: bool,
    breakpoint: String,
    max_cycles: Option<u64>,
    stats: Option<PathBuf>,
    dump: Option<RenderFormat>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = matches!(cli.command, Commands::Run { verbose: true, .. });
    init_tracing(verbose);

    let result = match cli.command {
        Commands::Run {
            program,
            binary,
            config,
            verbose,
            breakpoint,
            max_cycles,
            stats,
            dump,
            reference,
        } => {
            let opts = RunOptions {
                verbose,
                breakpoint,
                max_cycles,
                stats,
                dump,
            };
            cmd_run(&program, binary, config.as_deref(), &opts, reference)
        }
        Commands::Disasm { program, binary } => cmd_disasm(&program, binary),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n[!] FATAL: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr subscriber; `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_program(path: &Path, binary: bool) -> Result<Program> {
    let program = if binary {
        loader::load_binary_file(path)
    } else {
        loader::load_text_file(path)
    };
    program.with_context(|| format!("loading program {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    path.map_or_else(
        || Ok(Config::default()),
        |p| Config::from_file(p).with_context(|| format!("loading config {}", p.display())),
    )
}

/// Runs a program on the pipeline or the reference interpreter.
///
/// Statistics are reported before a fatal simulation error is returned.
fn cmd_run(
    path: &Path,
    binary: bool,
    config_path: Option<&Path>,
    opts: &RunOptions,
    reference: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let program = load_program(path, binary)?;
    let max_cycles = opts.max_cycles.or(config.general.max_cycles);
    info!(program = %path.display(), words = program.words.len(), "loaded");

    if reference {
        let mut model = ReferenceModel::new(&config, program.words);
        let outcome = model.run(max_cycles);
        report(&model.cpu.stats, opts)?;
        let steps = outcome.context("reference run failed")?;
        println!("[*] Reference model executed {steps} instructions");
        if let Some(format) = opts.dump {
            dump_registers(
                format,
                |i| model.cpu.regs.read_int(i),
                |i| model.cpu.regs.read_float(i),
            );
        }
        return Ok(());
    }

    let mut sim = Simulator::new(&config, program);
    let network = NetworkTasks::start(&config.network, &sim.io().receive, &sim.io().send)
        .context("starting network tasks")?;

    let outcome = drive(&mut sim, max_cycles, opts);
    network.shutdown();
    report(sim.stats(), opts)?;
    outcome?;

    if let Some(format) = opts.dump {
        dump_registers(
            format,
            |i| sim.int_register(i),
            |i| sim.float_register(i),
        );
    }
    Ok(())
}

/// Clocks the simulator to the end, printing each breakpoint reached.
fn drive(sim: &mut Simulator, max_cycles: Option<u64>, opts: &RunOptions) -> Result<()> {
    loop {
        let remaining = max_cycles.map(|max| max.saturating_sub(sim.stats().cycles));
        match sim
            .run(remaining, opts.verbose, &opts.breakpoint)
            .context("simulation failed")?
        {
            RunExit::Ended => {
                println!("[*] Program finished after {} cycles", sim.stats().cycles);
                return Ok(());
            }
            RunExit::Breakpoint(pc) => {
                let debug = sim.debug_info();
                let name = debug.breakpoint_at(pc).unwrap_or("?");
                let label = debug.label_at(pc).map(|l| format!(" <{l}>")).unwrap_or_default();
                let line = debug
                    .line_of(pc)
                    .map(|l| format!(" line {l}"))
                    .unwrap_or_default();
                println!(
                    "[*] Breakpoint `{name}` at {pc:#010x}{label}{line} (cycle {})",
                    sim.stats().cycles
                );
            }
            RunExit::CycleLimit => {
                warn!(cycles = sim.stats().cycles, "cycle limit reached");
                return Ok(());
            }
        }
    }
}

/// Prints the statistics and writes the JSON report if requested.
fn report(stats: &SimStats, opts: &RunOptions) -> Result<()> {
    stats.print();
    if let Some(path) = &opts.stats {
        stats
            .write_json(path)
            .with_context(|| format!("writing stats to {}", path.display()))?;
    }
    Ok(())
}

fn dump_registers(format: RenderFormat, int: impl Fn(usize) -> u32, float: impl Fn(usize) -> u32) {
    for i in 0..32 {
        println!(
            "x{i:<2} {:<36} f{i:<2} {}",
            format.render(int(i)),
            format.render(float(i))
        );
    }
}

/// Prints every word with its address, label and source line.
fn cmd_disasm(path: &Path, binary: bool) -> Result<()> {
    let program = load_program(path, binary)?;
    for (i, &word) in program.words.iter().enumerate() {
        let pc = (i * 4) as u32;
        if let Some(label) = program.debug.label_at(pc) {
            println!("{label}:");
        }
        let line = program
            .debug
            .line_of(pc)
            .map(|l| format!("  ; line {l}"))
            .unwrap_or_default();
        println!("  {pc:#010x}: {word:08x}  {}{line}", disassemble(word));
    }
    Ok(())
}
