use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anchorgram::augment::Augmenter;
use anchorgram::collection::Collection;
use anchorgram::config::{PipelineConfig, Resources};
use anchorgram::corpus::extract_corpus_file;
use anchorgram::extract::BigramExtractor;
use anchorgram::stats::BigramCounter;
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(version, about = "Anchor-text bigram extraction and phrase augmentation")]
struct Cli {
    /// JSON pipeline config; env (AG_*) is used when absent
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the stopword list path
    #[arg(long, global = true)]
    stopwords: Option<PathBuf>,
    /// Override the BINDEX path
    #[arg(long, global = true)]
    bindex: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Build BINDEX from the link annotations of an article dump
    Extract {
        #[arg(long)]
        corpus: PathBuf,
        /// Defaults to the configured BINDEX path
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Append bigram tokens to every record of a collection, write JSONL
    Augment {
        #[arg(long)]
        collection: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Bigram occurrence statistics for documents vs queries
    Stats {
        #[arg(long)]
        docs: PathBuf,
        #[arg(long)]
        queries: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print normalized tokens of the given words
    Stem { words: Vec<String> },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let cfg = load_config(&cli)?;

    match cli.cmd {
        Cmd::Extract { corpus, out } => run_extract(&cfg, corpus, out)?,
        Cmd::Augment { collection, out } => run_augment(&cfg, collection, out)?,
        Cmd::Stats {
            docs,
            queries,
            json,
        } => run_stats(&cfg, docs, queries, json)?,
        Cmd::Stem { words } => {
            let res = Resources::load_stopwords(&cfg);
            let tokens = res.normalizer().tokens(&words.join(" "));
            println!("{}", tokens.join(" "));
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> anyhow::Result<PipelineConfig> {
    let mut cfg = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::from_env(),
    };
    if let Some(p) = &cli.stopwords {
        cfg.stopwords_path = p.clone();
    }
    if let Some(p) = &cli.bindex {
        cfg.bindex_path = p.clone();
    }
    Ok(cfg)
}

fn run_extract(cfg: &PipelineConfig, corpus: PathBuf, out: Option<PathBuf>) -> anyhow::Result<()> {
    let res = Resources::load_stopwords(cfg);
    let extractor = BigramExtractor::new(res.normalizer());
    let found = extract_corpus_file(&extractor, &corpus)?;

    let out = out.unwrap_or_else(|| cfg.bindex_path.clone());
    found
        .bigrams
        .save(&out)
        .with_context(|| format!("write bindex {}", out.display()))?;
    println!(
        "{} articles, {} bigrams -> {}",
        found.articles,
        found.bigrams.len(),
        out.display()
    );
    Ok(())
}

fn run_augment(cfg: &PipelineConfig, collection: PathBuf, out: PathBuf) -> anyhow::Result<()> {
    let res = Resources::load(cfg);
    let records = Collection::new(&collection).load()?;
    let augmented = Augmenter::from_resources(&res).augment_all(&records);

    let f = File::create(&out).with_context(|| format!("create {}", out.display()))?;
    let mut w = BufWriter::new(f);
    for rec in &augmented {
        serde_json::to_writer(&mut w, rec)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    eprintln!("augmented {} records -> {}", augmented.len(), out.display());
    Ok(())
}

fn run_stats(cfg: &PipelineConfig, docs: PathBuf, queries: PathBuf, json: bool) -> anyhow::Result<()> {
    let res = Resources::load(cfg);
    let docs = Collection::new(&docs).load()?;
    let queries = Collection::new(&queries).load()?;

    let mut counter = BigramCounter::new(Augmenter::from_resources(&res));
    counter.observe_documents(&docs);
    counter.observe_queries(&queries);
    let s = counter.report();

    if json {
        println!("{}", serde_json::to_string_pretty(&s)?);
    } else {
        println!("1. Total bigrams in documents = {}", s.bigrams_in_documents);
        println!("2. Unique bigrams in documents = {}", s.unique_in_documents);
        println!("3. Total bigrams in queries = {}", s.bigrams_in_queries);
        println!("4. Unique bigrams in queries = {}", s.unique_in_queries);
        println!("5. Common bigrams = {}", s.common);
        println!("6. Document frequency per bigram:");
        for (bigram, df) in &s.document_frequency {
            println!("   {bigram} {df}");
        }
    }
    Ok(())
}
