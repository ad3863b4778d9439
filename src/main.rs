//! CLI entry point for treesize

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use treesize::{JsonFormatter, OutputConfig, StreamingFormatter, WalkerConfig, report_sizes};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "treesize")]
#[command(about = "Report the cumulative size of every directory, one block per top-level subtree")]
#[command(version)]
struct Args {
    /// Directory to measure
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Skip entries matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Skip entries matched by the .gitignore in the measured directory
    #[arg(short = 'g', long = "gitignore")]
    gitignore: bool,

    /// Print only N levels of each block (sizes still include everything)
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// Print sizes in human-readable form (1.5K, 3.2M)
    #[arg(short = 'H', long = "human")]
    human: bool,

    /// Indentation marker repeated once per level
    #[arg(long = "indent", default_value = "\t")]
    indent: String,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Output in JSON lines format
    #[arg(long = "json")]
    json: bool,

    /// Print a summary line with directory, file and byte totals
    #[arg(long = "total")]
    total: bool,

    /// Log skipped and ignored entries
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("treesize=debug,warn")
        } else {
            EnvFilter::new("treesize=info,warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    let walker_config = WalkerConfig {
        ignore_patterns: args.ignore.clone(),
        use_gitignore: args.gitignore,
    };

    let output_config = OutputConfig {
        use_color: !args.json && should_use_color(args.color),
        human_sizes: args.human,
        indent: args.indent.clone(),
        max_level: args.level,
        show_total: args.total,
    };

    let root = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(&args.path)
    };
    tracing::debug!("measuring {}", root.display());

    let result = if args.json {
        report_sizes(&root, walker_config, JsonFormatter::new(output_config)).map(|_| ())
    } else {
        report_sizes(&root, walker_config, StreamingFormatter::new(output_config)).map(|_| ())
    };

    if let Err(e) = result {
        eprintln!("treesize: {}", e);
        process::exit(1);
    }
}
