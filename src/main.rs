//! treewalk - depth-first directory traversal from the command line.
//!
//! Usage:
//!   treewalk [PATH] [OPTIONS]        Walk a tree with filters, sorting and limits
//!   treewalk files [PATH] [-r]       List files
//!   treewalk dirs [PATH] [-r]        List directories
//!   treewalk match [PATH] PATTERN    List children whose name matches
//!   treewalk --help                  Show help

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use treewalk_traverse::{
    ControlSignal, Entry, EntryKind, Predicate, TraversalOptions, each_dir, each_dir_recurse,
    each_file, each_file_match, each_file_recurse, sort, traverse_with,
};

#[derive(Parser)]
#[command(
    name = "treewalk",
    version,
    about = "Depth-first directory traversal",
    long_about = "treewalk walks a directory tree depth-first and prints what it finds.\n\n\
                  Run `treewalk [PATH]` with filters, sorting, depth limits and pruning, \
                  or use subcommands for quick listings.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Directory to walk (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    #[command(flatten)]
    walk: WalkArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args)]
struct WalkArgs {
    /// Which entries to print: any, files or directories
    #[arg(short = 't', long = "type", default_value = "any")]
    kind: EntryKind,

    /// Directory levels to recurse into (-1 = unlimited, 0 = no recursion)
    #[arg(short = 'd', long, default_value_t = -1, allow_negative_numbers = true)]
    max_depth: i64,

    /// Only entries whose name matches this regex
    #[arg(long, conflicts_with = "glob")]
    name: Option<String>,

    /// Only entries whose name matches this glob
    #[arg(short, long)]
    glob: Option<String>,

    /// Only entries whose full path matches this regex
    #[arg(long = "path-filter")]
    path_filter: Option<String>,

    /// Skip entries whose name matches this regex
    #[arg(long, conflicts_with = "exclude_glob")]
    exclude_name: Option<String>,

    /// Skip entries whose name matches this glob
    #[arg(short = 'x', long)]
    exclude_glob: Option<String>,

    /// Skip entries whose full path matches this regex
    #[arg(long)]
    exclude_path: Option<String>,

    /// Order of entries within each directory
    #[arg(short, long, default_value = "name")]
    sort: SortOrder,

    /// Also print the root, after everything below it
    #[arg(long)]
    visit_root: bool,

    /// Do not descend into directories with this name (repeatable)
    #[arg(short, long)]
    prune: Vec<String>,

    /// Stop after printing this many entries
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Print per-directory entry counts to stderr
    #[arg(long)]
    summary: bool,

    /// Show file sizes
    #[arg(short, long)]
    long: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Command {
    /// List files
    Files {
        /// Directory to list
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Include files in subdirectories
        #[arg(short, long)]
        recursive: bool,
    },

    /// List directories
    Dirs {
        /// Directory to list
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Include nested directories
        #[arg(short, long)]
        recursive: bool,
    },

    /// List immediate children whose name matches a pattern
    Match {
        /// Directory to list
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Regex the whole name must match (or a glob with --glob)
        pattern: String,

        /// Treat the pattern as a glob
        #[arg(short, long)]
        glob: bool,

        /// Which entries to consider: any, files or directories
        #[arg(short = 't', long = "type", default_value = "any")]
        kind: EntryKind,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum SortOrder {
    /// Listing order as returned by the filesystem
    None,
    #[default]
    Name,
    Path,
    DirsFirst,
    FilesFirst,
}

impl SortOrder {
    fn comparator(self) -> Option<fn(&Entry, &Entry) -> Ordering> {
        match self {
            SortOrder::None => None,
            SortOrder::Name => Some(sort::by_name),
            SortOrder::Path => Some(sort::by_path),
            SortOrder::DirsFirst => Some(sort::directories_first),
            SortOrder::FilesFirst => Some(sort::files_first),
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Files { path, recursive }) => {
            let listed = if recursive {
                each_file_recurse(&path, EntryKind::Files, print_path)
            } else {
                each_file(&path, EntryKind::Files, print_path)
            };
            listed.context("Listing failed")?;
        }
        Some(Command::Dirs { path, recursive }) => {
            let listed = if recursive {
                each_dir_recurse(&path, print_path)
            } else {
                each_dir(&path, print_path)
            };
            listed.context("Listing failed")?;
        }
        Some(Command::Match {
            path,
            pattern,
            glob,
            kind,
        }) => {
            let filter = if glob {
                Predicate::glob(&pattern)?
            } else {
                Predicate::regex(&pattern)?
            };
            each_file_match(&path, kind, filter, print_path).context("Listing failed")?;
        }
        None => {
            run_walk(&cli.path, &cli.walk)?;
        }
    }

    Ok(())
}

/// Walk a tree with the full set of options.
fn run_walk(path: &Path, args: &WalkArgs) -> Result<()> {
    let prune: HashSet<&str> = args.prune.iter().map(String::as_str).collect();
    let counts: RefCell<Vec<u64>> = RefCell::new(Vec::new());
    let budget = Budget::new(args.limit);
    let collected: RefCell<Vec<Entry>> = RefCell::new(Vec::new());

    let mut builder = TraversalOptions::builder()
        .kind(args.kind)
        .max_depth(args.max_depth)
        .visit_root(args.visit_root)
        .pre_root(args.summary)
        .post_root(args.summary);

    if let Some(cmp) = args.sort.comparator() {
        builder = builder.sort(cmp);
    }
    if let Some(pattern) = &args.name {
        builder = builder.name_filter(Predicate::regex(pattern)?);
    }
    if let Some(pattern) = &args.glob {
        builder = builder.name_filter(Predicate::glob(pattern)?);
    }
    if let Some(pattern) = &args.path_filter {
        builder = builder.filter(Predicate::regex(pattern)?);
    }
    if let Some(pattern) = &args.exclude_name {
        builder = builder.exclude_name_filter(Predicate::regex(pattern)?);
    }
    if let Some(pattern) = &args.exclude_glob {
        builder = builder.exclude_name_filter(Predicate::glob(pattern)?);
    }
    if let Some(pattern) = &args.exclude_path {
        builder = builder.exclude_filter(Predicate::regex(pattern)?);
    }

    let options = builder
        .pre_dir(|dir: &Entry| {
            if args.summary {
                counts.borrow_mut().push(0);
            }
            if prune.contains(dir.name()) {
                tracing::debug!(path = %dir.path.display(), "pruned");
                ControlSignal::SkipSubtree
            } else {
                ControlSignal::Continue
            }
        })
        .post_dir(|dir: &Entry| {
            if let Some(count) = counts.borrow_mut().pop() {
                eprintln!("{count:>8} entries in {}", dir.path.display());
            }
        })
        .visit(|entry: &Entry| {
            if !budget.take() {
                return ControlSignal::Terminate;
            }
            if let Some(count) = counts.borrow_mut().last_mut() {
                *count += 1;
            }

            match args.format {
                OutputFormat::Text => print_entry(entry, args.long),
                OutputFormat::Json => collected.borrow_mut().push(entry.clone()),
            }

            if budget.exhausted() {
                ControlSignal::Terminate
            } else {
                ControlSignal::Continue
            }
        })
        .build()
        .context("Invalid options")?;

    traverse_with(path, options).context("Traversal failed")?;

    if let OutputFormat::Json = args.format {
        println!("{}", serde_json::to_string_pretty(&*collected.borrow())?);
    }

    Ok(())
}

/// How many more entries `--limit` lets through.
struct Budget {
    limit: Option<usize>,
    used: Cell<usize>,
}

impl Budget {
    fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            used: Cell::new(0),
        }
    }

    /// Claim one slot; false once the limit is reached.
    fn take(&self) -> bool {
        if self.exhausted() {
            return false;
        }
        self.used.set(self.used.get() + 1);
        true
    }

    fn exhausted(&self) -> bool {
        self.limit.is_some_and(|limit| self.used.get() >= limit)
    }
}

/// Print just the path of an entry.
fn print_path(entry: &Entry) {
    println!("{}", entry.path.display());
}

/// Print an entry, optionally with its size.
fn print_entry(entry: &Entry, long: bool) {
    let marker = if entry.is_dir() { "/" } else { "" };

    if long {
        let size = if entry.is_file() {
            std::fs::metadata(&entry.path).map(|m| m.len()).unwrap_or(0)
        } else {
            0
        };
        println!(
            "{:>10}  {}{}",
            format_size(size),
            entry.path.display(),
            marker
        );
    } else {
        println!("{}{}", entry.path.display(), marker);
    }
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
