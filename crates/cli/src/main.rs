//! Stackpool CLI
//!
//! Command-line driver for the stack pool: runs the reference scenarios,
//! shows the effective configuration and generates shell completions.

use clap::{CommandFactory, Parser as ClapParser, Subcommand};
use clap_complete::{Shell, generate};
use stackpool_core::{Handle, PoolConfig, PoolError, StackPool, push_all};
use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

type CliResult = Result<(), Box<dyn Error>>;

#[derive(ClapParser)]
#[command(name = "stackpool")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Many integer stacks sharing one node arena", long_about = None)]
struct Cli {
    /// Pool configuration file (TOML); defaults to STACKPOOL_* environment variables
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log pool activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build two stacks in one pool and unroll them
    Demo,

    /// Fill a fixed-capacity pool until it is exhausted, then recover
    Exhaust {
        /// Number of nodes in the pool
        #[arg(short, long, default_value_t = 8)]
        capacity: usize,
    },

    /// Print the effective pool configuration
    Show,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut stdout = io::stdout().lock();
    let result = match cli.command {
        Commands::Demo => {
            load_config(cli.config.as_deref()).and_then(|config| run_demo(config, &mut stdout))
        }
        Commands::Exhaust { capacity } => run_exhaust(capacity, &mut stdout),
        Commands::Show => {
            load_config(cli.config.as_deref()).and_then(|config| run_show(&config, &mut stdout))
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "stackpool", &mut stdout);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` replaces the default level when set
fn init_tracing(verbose: bool) {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose, from_env.as_deref()))
        .with_writer(io::stderr)
        .init();
}

fn build_filter(verbose: bool, from_env: Option<&str>) -> EnvFilter {
    if let Some(directives) = from_env
        && !directives.trim().is_empty()
    {
        return EnvFilter::new(directives);
    }

    let level = if verbose { "debug" } else { "warn" };
    let mut filter = EnvFilter::default();
    for target in ["stackpool_core", "stackpool_cli"] {
        if let Ok(directive) = format!("{}={}", target, level).parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Configuration from `--config`, else from the environment
fn load_config(path: Option<&Path>) -> Result<PoolConfig, Box<dyn Error>> {
    let config = match path {
        Some(path) => PoolConfig::load(path)?,
        None => PoolConfig::from_env(),
    };
    debug!(?config, "pool configuration");
    Ok(config)
}

/// Print a stack's size, then pop it value by value
fn unroll_stack(pool: &mut StackPool, mut head: Handle, out: &mut impl Write) -> CliResult {
    let size = pool.size(head)?;
    writeln!(out, "The given stack has size {}", size)?;
    for _ in 0..size {
        writeln!(out, "{}", pool.value(head)?)?;
        head = pool.pop(head)?;
    }
    Ok(())
}

fn run_demo(config: PoolConfig, out: &mut impl Write) -> CliResult {
    let mut pool = StackPool::new(config)?;

    let head1 = pool.new_stack();
    let head1 = push_all(&mut pool, head1, [10, 100, 1000])?;
    let head2 = pool.new_stack();
    let head2 = push_all(&mut pool, head2, [2, 4, 8, 16])?;
    info!(stats = %pool.stats(), "stacks built");

    writeln!(out, "This is stack1")?;
    unroll_stack(&mut pool, head1, out)?;

    writeln!(out, "This is stack2")?;
    unroll_stack(&mut pool, head2, out)?;

    writeln!(out, "This is stack3")?;
    let empty = pool.new_stack();
    unroll_stack(&mut pool, empty, out)?;

    pool.teardown();
    Ok(())
}

fn run_exhaust(capacity: usize, out: &mut impl Write) -> CliResult {
    let mut pool = StackPool::new(PoolConfig::fixed(capacity))?;
    let mut head = pool.new_stack();

    let mut pushed: i64 = 0;
    let err = loop {
        match pool.push(pushed, head) {
            Ok(next) => {
                head = next;
                pushed += 1;
            }
            Err(e) => break e,
        }
    };
    if !matches!(err, PoolError::PoolExhausted { .. }) {
        return Err(err.into());
    }
    writeln!(out, "pushed {} values: {}", pushed, err)?;

    if head.is_sentinel() {
        writeln!(out, "nothing to pop from an empty pool")?;
        return Ok(());
    }

    head = pool.pop(head)?;
    writeln!(out, "popped one, stats: {}", pool.stats())?;

    head = pool.push(pushed, head)?;
    writeln!(
        out,
        "pushed {} again, size {}, stats: {}",
        pool.value(head)?,
        pool.size(head)?,
        pool.stats()
    )?;
    Ok(())
}

fn run_show(config: &PoolConfig, out: &mut impl Write) -> CliResult {
    write!(out, "{}", toml::to_string_pretty(config)?)?;

    // The sample has to fit a fixed pool, even an empty one
    let sample = config.slot_limit().unwrap_or(3).min(3);
    let mut pool = StackPool::new(config.clone())?;
    let head = push_all(&mut pool, Handle::SENTINEL, (1..).take(sample))?;
    writeln!(out, "{}", pool.display(head))?;
    writeln!(out, "{}", pool.stats())?;
    Ok(())
}
