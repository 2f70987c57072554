//! Command handlers for the `llb` CLI.

use std::io::{self, Write};

use llb_symtab::fatal::report_fatal_error;
use llb_symtab::{ArenaConfig, SharedStringArena, SymbolId, SymbolKind, SymbolTable};
use rustc_hash::FxHashMap;

use crate::output::Output;
use crate::scan::{ScanError, Scanner, Word};

/// Options for `llb symbols`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolsOptions {
    /// Print table statistics after the listing.
    pub stats: bool,
    /// Arena chunk size override, in bytes.
    pub chunk_size: Option<usize>,
}

impl SymbolsOptions {
    fn arena_config(&self) -> ArenaConfig {
        let mut config = ArenaConfig::default();
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        config
    }
}

/// Parse `symbols` flags. Returns the offending argument on failure.
pub fn parse_symbols_options(args: &[String]) -> Result<SymbolsOptions, String> {
    let mut options = SymbolsOptions::default();
    for arg in args {
        if arg == "--stats" {
            options.stats = true;
        } else if let Some(size) = arg.strip_prefix("--chunk-size=") {
            match size.parse::<usize>() {
                Ok(size) if size > 0 => options.chunk_size = Some(size),
                _ => return Err(arg.clone()),
            }
        } else {
            return Err(arg.clone());
        }
    }
    Ok(options)
}

/// One listed symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolEntry {
    pub kind: Option<SymbolKind>,
    pub name: String,
    pub occurrences: usize,
}

/// Table shape at the end of a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolStats {
    pub symbols: usize,
    pub nodes: usize,
    pub collisions: usize,
    pub chunks: usize,
}

/// Everything `llb symbols` prints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolReport {
    /// Sorted by canonical name.
    pub entries: Vec<SymbolEntry>,
    pub stats: SymbolStats,
}

/// Run a source file through one symbol table.
///
/// A declaration keyword classifies the identifier right after it, unless
/// that symbol already has a kind.
pub fn collect_symbols(source: &str, config: ArenaConfig) -> Result<SymbolReport, ScanError> {
    let arena = SharedStringArena::with_config(config);
    let mut table = SymbolTable::new(arena.clone());
    let mut occurrences: FxHashMap<SymbolId, usize> = FxHashMap::default();
    let mut pending: Option<SymbolKind> = None;

    for lexeme in Scanner::new(source) {
        match lexeme?.word {
            Word::Declarator(kind) => pending = Some(kind),
            Word::Ident(text) => {
                let id = table.get_symbol(text);
                *occurrences.entry(id).or_default() += 1;
                if let Some(kind) = pending.take() {
                    if table[id].kind().is_none() {
                        table[id].set_kind(kind);
                    }
                }
            }
        }
    }

    let mut entries: Vec<SymbolEntry> = table
        .iter()
        .map(|(id, symbol)| SymbolEntry {
            kind: symbol.kind(),
            name: table.name(id),
            occurrences: occurrences.get(&id).copied().unwrap_or(0),
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let stats = SymbolStats {
        symbols: table.len(),
        nodes: table.node_count(),
        collisions: table.collision_count(),
        chunks: arena.lock().chunk_count(),
    };
    let teardown = table.destroy();
    tracing::debug!(
        nodes = teardown.nodes,
        symbols = teardown.symbols,
        "symbols run finished"
    );

    Ok(SymbolReport { entries, stats })
}

/// Render a report through the diagnostic writer.
pub fn write_report<W: Write>(
    report: &SymbolReport,
    with_stats: bool,
    out: &mut Output<W>,
) -> io::Result<()> {
    for entry in &report.entries {
        let kind = entry.kind.map_or("-", SymbolKind::as_str);
        out.print(&format!("{kind:<8} {} {}", entry.name, entry.occurrences))?;
    }
    if with_stats {
        let stats = &report.stats;
        out.print(&format!(
            "{} symbols, {} nodes, {} collisions, {} arena chunks",
            stats.symbols, stats.nodes, stats.collisions, stats.chunks
        ))?;
    }
    out.flush()
}

/// `llb symbols <file>`: list every identifier the file uses.
pub fn symbols_file(path: &str, options: &SymbolsOptions) {
    let source = read_file(path);
    let report = match collect_symbols(&source, options.arena_config()) {
        Ok(report) => report,
        Err(e) => report_fatal_error(&e.to_string(), &format!("{path}:{}", e.context())),
    };

    let mut out = Output::stdout();
    if let Err(e) = write_report(&report, options.stats, &mut out) {
        eprintln!("error writing output: {e}");
        std::process::exit(1);
    }
}

fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
                io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}
