//! Spawn harness CLI

use clap::{Parser, Subcommand, ValueEnum};
use fastspawn::{posix_spawn, uses_vfork_attribute, vfork_spawn, SpawnOptions};
use log::warn;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::Pid;

#[derive(Parser)]
#[command(name = "fastspawn-ctl")]
#[command(about = "Spawn a command through the low-overhead process-creation engines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Engine {
    /// vfork + execvp
    Vfork,
    /// posix_spawnp with file actions
    Posix,
}

#[derive(Subcommand)]
enum Commands {
    /// Spawn a command, wait for it, and propagate its exit status
    Run {
        /// Spawn engine to use
        #[arg(short, long, value_enum, default_value_t = Engine::Posix)]
        engine: Engine,

        /// Descriptor to close in the child: stdin, stdout, stderr, or a
        /// raw descriptor number (repeatable; posix engine only)
        #[arg(short, long = "close", value_name = "SELECTOR")]
        close: Vec<String>,

        /// Program to run (resolved via PATH)
        program: String,

        /// Program arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List the available spawn engines
    Engines,
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            engine,
            close,
            program,
            args,
        } => match run(engine, &close, &program, &args) {
            Ok(status) => std::process::exit(status),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Engines => list_engines(),
    }
}

fn run(
    engine: Engine,
    close: &[String],
    program: &str,
    args: &[String],
) -> Result<i32, Box<dyn std::error::Error>> {
    let mut argv = Vec::with_capacity(args.len() + 1);
    argv.push(program.to_string());
    argv.extend(args.iter().cloned());

    let options = build_options(close);

    let pid = match engine {
        Engine::Vfork => vfork_spawn(&argv, None, &options)?,
        Engine::Posix => posix_spawn(&argv, None, &options)?,
    };

    Ok(wait_for(pid)?)
}

fn build_options(close: &[String]) -> SpawnOptions {
    let mut options = SpawnOptions::new();
    for selector in close {
        options = match selector.as_str() {
            "stdin" => options.close_stdin(),
            "stdout" => options.close_stdout(),
            "stderr" => options.close_stderr(),
            other => match other.parse::<i32>() {
                Ok(fd) if fd >= 0 => options.close_fd(fd),
                _ => {
                    warn!("ignoring unrecognized descriptor selector {:?}", other);
                    options
                }
            },
        };
    }
    options
}

fn wait_for(pid: Pid) -> nix::Result<i32> {
    loop {
        match waitpid(pid, None)? {
            WaitStatus::Exited(_, status) => return Ok(status),
            WaitStatus::Signaled(_, signal, _) => return Ok(128 + signal as i32),
            _ => continue,
        }
    }
}

fn list_engines() {
    println!("Available spawn engines:");
    println!("  vfork  - vfork + execvp; caller suspended until exec");
    println!("  posix  - posix_spawnp with per-descriptor close actions");
    if uses_vfork_attribute() {
        println!();
        println!("posix engine requests the vfork-based implementation (POSIX_SPAWN_USEVFORK)");
    }
}
