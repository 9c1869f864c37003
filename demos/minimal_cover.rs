use std::path::PathBuf;

use clap::Parser;

use fd_cover::cover::MinimalCover;
use fd_cover::format::{
    load_fd_set, parse_fd_set, parse_schema, render_attrs, render_fd, render_fd_set, FormatConfig,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Canonical cover of functional dependencies")]
struct Cli {
    /// Relation attributes, e.g. "ABC" (or "a, b, c" with --words). Defaults to ABCDE.
    #[arg(long, short, value_name = "ATTRS")]
    relation: Option<String>,

    /// Dependency, e.g. "A -> BE". May be repeated.
    #[arg(long = "fd", value_name = "FD")]
    fds: Vec<String>,

    /// Read dependencies from a file, one per line.
    #[arg(long, short, value_name = "FILE", conflicts_with = "fds")]
    file: Option<PathBuf>,

    /// Multi-character attributes separated by commas or spaces ("roll_no -> name, age").
    #[arg(long)]
    words: bool,

    /// Print every redundancy decision.
    #[arg(long)]
    trace: bool,

    /// Enable debug logging.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    println!("args = {:?}", args);

    let config = if args.words {
        FormatConfig::default()
    } else {
        FormatConfig::compact()
    };

    // The textbook relation and dependencies are written in compact notation
    let schema = match &args.relation {
        Some(relation) => parse_schema(relation, &config)?,
        None => parse_schema("ABCDE", &FormatConfig::compact())?,
    };
    println!("relation = {}", schema);

    let fds = if let Some(path) = &args.file {
        load_fd_set(path, &config)?
    } else if args.fds.is_empty() {
        // Textbook example: D -> F and C -> R fall outside the relation
        parse_fd_set("A -> BE\nA -> C\nC -> B\nD -> F\nC -> R", &FormatConfig::compact())?
    } else {
        parse_fd_set(&args.fds.join("\n"), &config)?
    };

    println!("***** FUNCTIONAL DEPENDENCIES *****");
    println!("{}", render_fd_set(&fds, &config));

    let time_total = std::time::Instant::now();
    let mc = MinimalCover::new(fds, schema);

    println!("simplified = {}", render_fd_set(mc.simplified(), &config));
    println!("filtered = {}", render_fd_set(mc.filtered(), &config));
    if args.trace {
        for step in mc.trace() {
            let verdict = if step.redundant { "redundant" } else { "keep" };
            println!(
                "- {}: closure = {} => {}",
                render_fd(&step.fd, &config),
                render_attrs(&step.closure, &config),
                verdict
            );
        }
    }

    println!();
    println!("***** CANONICAL COVER OF FUNCTIONAL DEPENDENCY *****");
    println!("{}", render_fd_set(mc.canonical_cover(), &config));

    println!();
    println!("Total time: {:?}", time_total.elapsed());

    Ok(())
}
