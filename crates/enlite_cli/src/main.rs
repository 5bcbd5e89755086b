//! Command-line driver for enlite.
//!
//! # Responsibility
//! - Parse subcommands and build the core services over a read-only store.
//! - Report lookups that fail per identifier on stderr without aborting.

mod config;
mod input;
mod report;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use config::CliConfig;
use enlite_core::db::open_db;
use enlite_core::{
    count_carbons, init_logging, AliasResolver, EntityKind, EntityService,
    Namespace, ResolveError, SqliteReferenceStore, TargetNamespace,
};
use input::collect_identifiers;
use log::{info, warn};
use report::{write_report, OutputFormat};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "enlite", version)]
#[command(about = "Resolve compound and reaction identifiers across ModelSEED, MetaCyc, BiGG and KEGG")]
struct Cli {
    /// TOML config file [default: config/enlite.toml when present].
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Reference database; overrides `database_path` from the config file.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Lookup(LookupCommand),
    /// Count carbon atoms in one or more sum formulas.
    Carbons {
        #[arg(required = true)]
        formulas: Vec<String>,
    },
}

#[derive(Subcommand)]
enum LookupCommand {
    /// Show the canonical record of one or more compounds.
    CpdInfo(InputArgs),
    /// Show the canonical record of one or more reactions.
    RxnInfo(InputArgs),
    /// Find the first alias of one or more compounds.
    CpdSingle(AliasArgs),
    /// Find all aliases of one or more compounds.
    CpdMulti(AliasArgs),
    /// Find the first alias of one or more reactions.
    RxnSingle(AliasArgs),
    /// Find all aliases of one or more reactions.
    RxnMulti(AliasArgs),
}

#[derive(Args)]
struct InputArgs {
    /// One identifier, or a file with one identifier per line when --list is set.
    input: String,
    /// Namespace of the input: m|c|b|k (or modelseed|metacyc|bigg|kegg).
    #[arg(short = 'i', long = "in")]
    source: Namespace,
    /// Treat INPUT as a list file.
    #[arg(short, long)]
    list: bool,
    /// MetaCyc input is in mangled (altered) form.
    #[arg(long, visible_alias = "al")]
    altered: bool,
}

#[derive(Args)]
struct AliasArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Target namespace: m|c|b|k, or a for all.
    #[arg(short = 'o', long = "out")]
    target: TargetNamespace,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Carbons { formulas } => cmd_carbons(&formulas, cli.format),
        Command::Lookup(command) => {
            let config = CliConfig::resolve(cli.config.as_deref(), cli.db.as_deref())?;
            start_logging(&config)?;
            let conn = open_db(&config.database_path).with_context(|| {
                format!(
                    "failed to open reference database {}",
                    config.database_path.display()
                )
            })?;
            run_lookup(command, SqliteReferenceStore::new(&conn), cli.format)
        }
    }
}

fn start_logging(config: &CliConfig) -> anyhow::Result<()> {
    let Some(log_dir) = &config.log_dir else {
        return Ok(());
    };
    let log_dir = if log_dir.is_absolute() {
        log_dir.clone()
    } else {
        std::env::current_dir()?.join(log_dir)
    };
    init_logging(config.effective_log_level(), &log_dir)?;
    Ok(())
}

fn run_lookup(
    command: LookupCommand,
    store: SqliteReferenceStore<'_>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let started_at = std::time::Instant::now();
    let (name, result) = match &command {
        LookupCommand::CpdInfo(args) => {
            ("cpd-info", cmd_info(store, EntityKind::Compound, args, format))
        }
        LookupCommand::RxnInfo(args) => {
            ("rxn-info", cmd_info(store, EntityKind::Reaction, args, format))
        }
        LookupCommand::CpdSingle(args) => {
            ("cpd-single", cmd_single(store, EntityKind::Compound, args, format))
        }
        LookupCommand::CpdMulti(args) => {
            ("cpd-multi", cmd_multi(store, EntityKind::Compound, args, format))
        }
        LookupCommand::RxnSingle(args) => {
            ("rxn-single", cmd_single(store, EntityKind::Reaction, args, format))
        }
        LookupCommand::RxnMulti(args) => {
            ("rxn-multi", cmd_multi(store, EntityKind::Reaction, args, format))
        }
    };
    info!(
        "event=cli_command module=cli status={} command={} duration_ms={}",
        if result.is_ok() { "ok" } else { "error" },
        name,
        started_at.elapsed().as_millis()
    );
    result
}

fn cmd_info(
    store: SqliteReferenceStore<'_>,
    kind: EntityKind,
    args: &InputArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let identifiers = collect_identifiers(&args.input, args.list)?;
    let service = EntityService::new(store);
    let mut stdout = io::stdout().lock();

    match kind {
        EntityKind::Compound => {
            let found = service.compound_info_batch(&identifiers, args.source, args.altered)?;
            report_omitted(kind, args.source, &identifiers, |id| found.contains(id));
            write_report(&mut stdout, format, None, found.iter())
        }
        EntityKind::Reaction => {
            let found = service.reaction_info_batch(&identifiers, args.source, args.altered)?;
            report_omitted(kind, args.source, &identifiers, |id| found.contains(id));
            write_report(&mut stdout, format, None, found.iter())
        }
    }
}

fn cmd_single(
    store: SqliteReferenceStore<'_>,
    kind: EntityKind,
    args: &AliasArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let input = &args.input;
    let identifiers = collect_identifiers(&input.input, input.list)?;
    let resolver = AliasResolver::new(store, kind);

    let mut found = Vec::with_capacity(identifiers.len());
    for identifier in identifiers {
        match resolver.resolve_one(&identifier, input.source, args.target, input.altered) {
            Ok(resolution) => found.push((identifier, resolution)),
            Err(err) if err.is_not_found() => report_miss(&err),
            Err(err) => return Err(err.into()),
        }
    }

    let header = format!("Input database: {}", input.source);
    write_report(
        &mut io::stdout().lock(),
        format,
        Some(&header),
        found.iter().map(|(identifier, resolution)| (identifier.as_str(), resolution)),
    )
}

fn cmd_multi(
    store: SqliteReferenceStore<'_>,
    kind: EntityKind,
    args: &AliasArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let input = &args.input;
    let identifiers = collect_identifiers(&input.input, input.list)?;
    let resolver = AliasResolver::new(store, kind);

    let found = resolver.resolve_batch(&identifiers, input.source, args.target, input.altered)?;
    report_omitted(kind, input.source, &identifiers, |id| found.contains(id));

    let header = format!("Input database: {}", input.source);
    write_report(&mut io::stdout().lock(), format, Some(&header), found.iter())
}

fn cmd_carbons(formulas: &[String], format: OutputFormat) -> anyhow::Result<()> {
    let mut counts = Vec::with_capacity(formulas.len());
    for formula in formulas {
        match count_carbons(formula) {
            Ok(count) => counts.push((formula.as_str(), count)),
            Err(err) => eprintln!("{formula}: {err}"),
        }
    }
    write_report(
        &mut io::stdout().lock(),
        format,
        None,
        counts.iter().map(|(formula, count)| (*formula, count)),
    )
}

fn report_miss(err: &ResolveError) {
    warn!("event=lookup_miss module=cli status=not_found");
    eprintln!("{err}");
}

// Batches drop unresolved ids; name them so the user sees every miss.
fn report_omitted(
    kind: EntityKind,
    source: Namespace,
    identifiers: &[String],
    resolved: impl Fn(&str) -> bool,
) {
    for identifier in identifiers.iter().filter(|id| !resolved(id)) {
        report_miss(&ResolveError::NotFound {
            kind,
            namespace: source,
            identifier: identifier.clone(),
        });
    }
}
