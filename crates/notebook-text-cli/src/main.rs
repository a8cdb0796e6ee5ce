// Command-line tools for plain-text notebooks.
//
// Usage:
//  nbtext fmt <file> [--check]          - Rewrite a notebook in the canonical dialect
//  nbtext check [path]                  - Parse one notebook or every notebook under a directory
//  nbtext cells <file>                  - List the cells of a notebook
//  nbtext json <file>                   - Print a notebook as JSON
//  nbtext insert <file> [--at N] ...    - Insert a cell
//  nbtext remove <file> <index>         - Remove a cell

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use notebook_text_config::Config;
use notebook_text_engine::{
    BuiltinCellTypes, CellTypeRegistry, Cmd, EditError, InsertPosition, NotebookContent,
    ParseError, ParsedNotebook, Severity, io, notebook_content_to_text, parse_with_diagnostics,
};
use std::error::Error as _;
use std::path::{Path, PathBuf};
use std::{fs, process};

#[derive(Parser)]
#[command(name = "nbtext", version, about = "Tools for plain-text notebooks")]
struct Cli {
    /// Config file to use instead of ~/.config/notebook-text/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a notebook in the canonical dialect
    Fmt {
        file: PathBuf,
        /// Exit with status 1 instead of rewriting when the file is not canonical
        #[arg(long)]
        check: bool,
    },
    /// Parse a notebook, or every notebook under a directory, and report problems
    Check { path: Option<PathBuf> },
    /// List the cells of a notebook
    Cells { file: PathBuf },
    /// Print a notebook as JSON
    Json { file: PathBuf },
    /// Insert a new cell
    Insert {
        file: PathBuf,
        /// Index to insert at (default: append)
        #[arg(long)]
        at: Option<usize>,
        /// Cell type (default: inherited from the neighbouring cell)
        #[arg(long)]
        cell_type: Option<String>,
        #[arg(long, default_value = "")]
        text: String,
    },
    /// Remove the cell at an index
    Remove { file: PathBuf, index: usize },
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Fmt { file, check } => fmt(&file, check),
        Commands::Check { path } => {
            let path = path
                .or_else(|| config.notebooks_path.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            check_path(&path, &config)
        }
        Commands::Cells { file } => cells(&file),
        Commands::Json { file } => json(&file),
        Commands::Insert {
            file,
            at,
            cell_type,
            text,
        } => insert(&file, at, cell_type, text, &config),
        Commands::Remove { file, index } => remove(&file, index, &config),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load().context("loading user config")?,
    };
    Ok(loaded.unwrap_or_default())
}

fn registry(config: &Config) -> BuiltinCellTypes {
    match &config.default_cell_type {
        Some(default_type) => BuiltinCellTypes::with_default(default_type),
        None => BuiltinCellTypes::new(),
    }
}

fn load(file: &Path) -> Result<NotebookContent> {
    io::load_notebook(file).with_context(|| format!("Error reading notebook {}", file.display()))
}

/// Loads a notebook that is about to be rewritten.
fn load_for_edit(file: &Path) -> Result<NotebookContent> {
    let parsed = parse_file(file)?;
    ensure_no_preamble(file, &parsed)?;
    Ok(parsed.content)
}

fn parse_file(file: &Path) -> Result<ParsedNotebook> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Error reading file {}", file.display()))?;
    parse_with_diagnostics(&text)
        .with_context(|| format!("Error parsing notebook {}", file.display()))
}

/// Text before the first cell has no place in the model, so rewriting the
/// file would drop it.
fn ensure_no_preamble(file: &Path, parsed: &ParsedNotebook) -> Result<()> {
    if parsed.preamble.is_some() {
        bail!(
            "{} has text before the first cell that would be lost; move it into a cell first",
            file.display()
        );
    }
    Ok(())
}

fn save(file: &Path, content: &NotebookContent) -> Result<()> {
    io::save_notebook(file, content)
        .with_context(|| format!("Error writing notebook {}", file.display()))
}

fn fmt(file: &Path, check: bool) -> Result<i32> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Error reading file {}", file.display()))?;
    let parsed = parse_with_diagnostics(&text)
        .with_context(|| format!("Error parsing notebook {}", file.display()))?;
    let canonical = notebook_content_to_text(&parsed.content)?;

    if canonical == text {
        return Ok(0);
    }
    if check {
        println!("{} is not canonical", file.display());
        return Ok(1);
    }
    ensure_no_preamble(file, &parsed)?;

    fs::write(file, canonical)
        .with_context(|| format!("Error writing file {}", file.display()))?;
    println!("formatted {}", file.display());
    Ok(0)
}

fn check_path(path: &Path, config: &Config) -> Result<i32> {
    let files: Vec<PathBuf> = if path.is_dir() {
        io::scan_notebook_files(path, &config.extensions)?
            .iter()
            .map(|relative| relative.to_path(path))
            .collect()
    } else if path.exists() {
        vec![path.to_path_buf()]
    } else {
        bail!("{} does not exist", path.display());
    };

    let mut warnings = 0;
    let mut errors = 0;
    for file in &files {
        let text = fs::read_to_string(file)
            .with_context(|| format!("Error reading file {}", file.display()))?;
        match parse_with_diagnostics(&text) {
            Ok(parsed) => {
                for diagnostic in &parsed.diagnostics {
                    let label = match diagnostic.severity() {
                        Severity::Warning => {
                            warnings += 1;
                            "warning"
                        }
                        Severity::Error => {
                            errors += 1;
                            "error"
                        }
                    };
                    println!("{}: {label}: {diagnostic}", file.display());
                }
            }
            Err(e) => {
                errors += 1;
                println!("{}: fatal: {e}", file.display());
                print_causes(&e);
            }
        }
    }

    println!(
        "checked {} notebook(s): {warnings} warning(s), {errors} error(s)",
        files.len()
    );
    Ok(if errors > 0 { 1 } else { 0 })
}

fn print_causes(e: &ParseError) {
    let mut source = e.source();
    while let Some(cause) = source {
        println!("  caused by: {cause}");
        source = cause.source();
    }
}

fn cells(file: &Path) -> Result<i32> {
    let content = load(file)?;
    let registry = BuiltinCellTypes::new();

    println!("{:>5}  {:<20} {:<10} {:>5}  properties", "index", "type", "registered", "lines");
    for (i, cell) in content.cells.iter().enumerate() {
        let properties: Vec<String> = cell
            .metadata
            .properties
            .iter()
            .map(|(name, value)| {
                let name = name.as_str().unwrap_or("?");
                match value.as_bool() {
                    Some(true) => name.to_string(),
                    _ => format!("{name}={}", scalar(value)),
                }
            })
            .collect();
        let cell_type = if cell.cell_type.is_empty() {
            "-"
        } else {
            cell.cell_type.as_str()
        };
        println!(
            "{i:>5}  {cell_type:<20} {:<10} {:>5}  {}",
            if registry.is_registered(&cell.cell_type) {
                "yes"
            } else {
                "no"
            },
            cell.line_count(),
            properties.join(", ")
        );
    }
    Ok(0)
}

/// Renders a YAML scalar the way it would appear in JSON, strings unquoted.
fn scalar<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => "?".to_string(),
    }
}

fn json(file: &Path) -> Result<i32> {
    let content = load(file)?;
    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(0)
}

fn insert(
    file: &Path,
    at: Option<usize>,
    cell_type: Option<String>,
    text: String,
    config: &Config,
) -> Result<i32> {
    let mut content = load_for_edit(file)?;
    let position = at.map_or(InsertPosition::End, InsertPosition::At);

    let patch = content.apply(
        Cmd::InsertCell {
            position,
            cell_type,
            text,
        },
        &registry(config),
    )?;
    save(file, &content)?;

    for id in &patch.changed {
        if let Some(index) = content.index_of(id) {
            println!("inserted cell {index} [{}]", content.cells[index].cell_type);
        }
    }
    Ok(0)
}

fn remove(file: &Path, index: usize, config: &Config) -> Result<i32> {
    let mut content = load_for_edit(file)?;
    let Some(cell) = content.cells.get(index) else {
        return Err(EditError::IndexOutOfBounds {
            index,
            len: content.cells.len(),
        }
        .into());
    };
    let id = cell.id.clone();

    content.apply(Cmd::RemoveCell { id }, &registry(config))?;
    save(file, &content)?;
    println!("removed cell {index}");
    Ok(0)
}
