// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use passage_search::utils::logging::{
    format_error, format_info, format_score, format_step, format_success, format_warning,
    init_logger,
};
use passage_search::{
    Config, DocumentLoader, IndexSnapshot, IndexedPassage, JsonExporter, KnowledgeBase, SearchResult, Validator,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "passage_search")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Lexical passage retrieval over a folder of study documents", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    /// Document directory, or a .json file holding an array of {id, title, text}
    #[arg(long, value_name = "PATH")]
    corpus: Option<PathBuf>,

    #[arg(long, value_name = "CHARS")]
    chunk_size: Option<usize>,

    #[arg(long, value_name = "CHARS")]
    overlap_size: Option<usize>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank passages by similarity to a query
    Search {
        /// Search query text
        query: String,

        #[arg(short, long)]
        limit: Option<usize>,

        /// Print results as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Also write results and a manifest to this directory
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,
    },

    /// Show index statistics for the corpus
    Stats {
        #[arg(long)]
        json: bool,

        /// Write index-stats.json to this directory
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,
    },

    /// List indexed passages
    Passages {
        #[arg(long, value_name = "ID")]
        document: Option<String>,
    },

    /// Read queries from stdin; `:reload`, `:stats` and `:quit` are commands
    Interactive,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli)?;
    let kb = KnowledgeBase::from_config(&config).context("Invalid index configuration")?;

    match cli.command {
        Commands::Search {
            query,
            limit,
            json,
            export,
            pretty,
        } => {
            let snapshot = rebuild(&kb, &config, !json)?;
            cmd_search(&kb, &config, &snapshot, &query, limit, json, export, pretty)?;
        }
        Commands::Stats { json, export } => {
            let snapshot = rebuild(&kb, &config, !json)?;
            if let Some(dir) = export {
                let path = JsonExporter::new(dir)?.export_stats(&snapshot.stats(), true)?;
                eprintln!(
                    "{}",
                    format_success(&format!("Statistics written to {}", path.display()))
                );
            }
            cmd_stats(&snapshot, json)?;
        }
        Commands::Passages { document } => {
            let snapshot = rebuild(&kb, &config, true)?;
            cmd_passages(&snapshot, document.as_deref());
        }
        Commands::Interactive => {
            rebuild(&kb, &config, true)?;
            cmd_interactive(&kb, &config)?;
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using defaults and environment",
            cli.config.display()
        );
        Config::load(None).context("Failed to load configuration")?
    };

    if let Some(corpus) = &cli.corpus {
        config.corpus.path = corpus.clone();
    }
    if let Some(chunk_size) = cli.chunk_size {
        config.index.chunk_size = chunk_size;
    }
    if let Some(overlap_size) = cli.overlap_size {
        config.index.overlap_size = overlap_size;
    }

    config
        .validate()
        .context("Invalid configuration after command line overrides")?;
    Ok(config)
}

fn rebuild(kb: &KnowledgeBase, config: &Config, show_progress: bool) -> Result<Arc<IndexSnapshot>> {
    if show_progress {
        eprintln!(
            "{}",
            format_step(1, 2, &format!("Loading documents from {}", config.corpus.path.display()))
        );
    }

    let loaded = DocumentLoader::new(config.corpus.clone())
        .load(&config.corpus.path, show_progress)
        .with_context(|| format!("Failed to load corpus {}", config.corpus.path.display()))?;

    info!(
        "Loaded {} documents ({:.1}% of files, {:.1} files/sec)",
        loaded.documents.len(),
        loaded.stats.success_rate(),
        loaded.stats.files_per_second()
    );

    if loaded.stats.files_failed > 0 {
        eprintln!(
            "{}",
            format_warning(&format!(
                "{} file(s) could not be loaded and were left out",
                loaded.stats.files_failed
            ))
        );
    }

    if show_progress {
        eprintln!("{}", format_step(2, 2, "Building index"));
    }
    let snapshot = kb.rebuild(&loaded.documents);

    if show_progress {
        eprintln!(
            "{}",
            format_success(&format!(
                "Indexed {} passages from {} documents",
                snapshot.len(),
                snapshot.document_count()
            ))
        );
    }
    Ok(snapshot)
}

#[allow(clippy::too_many_arguments)]
fn cmd_search(
    kb: &KnowledgeBase,
    config: &Config,
    snapshot: &IndexSnapshot,
    query: &str,
    limit: Option<usize>,
    json: bool,
    export: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let k = limit.unwrap_or(kb.query_config().top_k);
    Validator::validate_top_k(k)?;

    let results = snapshot.search(query, k, config.query.min_score);

    if let Some(dir) = export {
        let exporter = JsonExporter::new(dir)?;
        let manifest = exporter.export_results(query, snapshot.generation(), &results, pretty)?;
        eprintln!(
            "{}",
            format_success(&format!(
                "Exported {} result(s) to {}",
                manifest.total_results,
                exporter.output_dir().display()
            ))
        );
    }

    if json {
        let output = if pretty {
            serde_json::to_string_pretty(&results)?
        } else {
            serde_json::to_string(&results)?
        };
        println!("{}", output);
        return Ok(());
    }

    print_results(query, &results, config.query.preview_chars);
    Ok(())
}

fn print_results(query: &str, results: &[SearchResult], preview_chars: usize) {
    if results.is_empty() {
        println!("\nNo results found for query: \"{}\"\n", query);
        println!("Try:");
        println!("  - Using different search terms");
        println!("  - Checking that the corpus path contains documents");
        return;
    }

    println!("\nSearch Results for: \"{}\"\n", query);
    println!("Found {} result(s)\n", results.len());
    println!("{}", "=".repeat(80));

    for result in results {
        if preview_chars == 0 {
            println!("{} {}", format_score(result.score), result.citation());
        } else {
            println!("\n{}", result.format_summary(preview_chars));
        }
    }

    println!("{}", "=".repeat(80));
}

fn cmd_stats(snapshot: &IndexSnapshot, json: bool) -> Result<()> {
    let stats = snapshot.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Generation:     {}", stats.generation);
    println!("Built at:       {}", stats.built_at);
    println!("Documents:      {}", stats.documents);
    println!("Passages:       {}", stats.passages);
    println!("Distinct terms: {}", stats.distinct_terms);
    println!("Total tokens:   {}", stats.total_tokens);
    Ok(())
}

fn cmd_passages(snapshot: &IndexSnapshot, document: Option<&str>) {
    let passages: Vec<&IndexedPassage> = match document {
        Some(id) => snapshot.passages_for_document(id).collect(),
        None => snapshot.passages().iter().collect(),
    };

    if passages.is_empty() {
        println!("{}", format_info("No passages to show"));
        return;
    }

    for indexed in passages {
        let passage = &indexed.passage;
        println!(
            "{}  [{} tokens, {} terms, norm {:.4}]  {}",
            passage.id,
            passage.token_count(),
            indexed.vector.len(),
            indexed.vector.norm(),
            Validator::truncate_text(&passage.text.replace('\n', " "), 60)
        );
    }
}

fn cmd_interactive(kb: &KnowledgeBase, config: &Config) -> Result<()> {
    println!(
        "{}",
        format_info("Type a question, or :reload, :stats, :quit")
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "" => continue,
            ":quit" | ":q" => break,
            ":reload" => match rebuild(kb, config, true) {
                Ok(snapshot) => info!("Now serving generation {}", snapshot.generation()),
                Err(e) => eprintln!("{}", format_error(&format!("Reload failed: {:#}", e))),
            },
            ":stats" => cmd_stats(&kb.snapshot(), false)?,
            query => print_results(query, &kb.search(query), config.query.preview_chars),
        }
    }

    Ok(())
}
