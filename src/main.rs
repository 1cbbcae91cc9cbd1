//! wordcloud: fetch an article, count words, render a cloud.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use wordcloud::config::Config;
use wordcloud::fetch::HttpFetcher;
use wordcloud::logging;
use wordcloud::pipeline;
use wordcloud::render::CloudRenderer;
use wordcloud::tokenize::TokenizerKind;

#[derive(Parser)]
#[command(name = "wordcloud")]
#[command(about = "Fetch an article, count its words and render a word cloud")]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by commands that fetch and count.
#[derive(Args)]
struct SourceArgs {
    /// TOML config file.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Article URL.
    #[arg(long, short)]
    url: Option<String>,

    /// CSS selector of the main content region.
    #[arg(long)]
    selector: Option<String>,

    /// Stop-word file, one word per line.
    #[arg(long)]
    stop_words: Option<PathBuf>,

    /// Tokenizer used to split the article text.
    #[arg(long, value_enum)]
    tokenizer: Option<TokenizerKind>,
}

impl SourceArgs {
    /// Config file (or defaults) with command-line overrides applied.
    fn resolve(&self) -> anyhow::Result<Config> {
        let mut config = Config::load_or_default(self.config.as_deref())?;
        if let Some(url) = &self.url {
            config.source.url = url.clone();
        }
        if let Some(selector) = &self.selector {
            config.source.selector = selector.clone();
        }
        if let Some(path) = &self.stop_words {
            config.text.stop_words_path = Some(path.clone());
        }
        if let Some(kind) = self.tokenizer {
            config.text.tokenizer = kind;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the article and write the word cloud image.
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output PNG path.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Fetch the article and print the most frequent words.
    Count {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of words to print.
        #[arg(long, short = 'n', default_value_t = 20)]
        top: usize,

        /// Also save the full ranked list as JSON.
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Write the default configuration file.
    InitConfig {
        /// Destination path.
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli.command) {
        tracing::error!("{err:?}");
        eprintln!("wordcloud error: {err:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Generate { source, output } => run_generate(&source, output),
        Command::Count { source, top, json } => run_count(&source, top, json),
        Command::InitConfig { path } => {
            Config::write_default(&path)?;
            println!("Default config written to {}", path.display());
            println!("cloud.font_path is unset; a system font is looked up at render time.");
            Ok(())
        }
    }
}

fn run_generate(source: &SourceArgs, output: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = source.resolve()?;
    if let Some(path) = output {
        config.output.path = path;
    }
    let fetcher = HttpFetcher::new(&config.source)?;
    let tokenizer = config.text.tokenizer.build();

    let report = pipeline::run(&config, &fetcher, tokenizer.as_ref(), &CloudRenderer)
        .with_context(|| format!("word cloud for {} failed", config.source.url))?;

    println!("Scraped text length: {}", report.text_len);
    println!("Number of words after processing: {}", report.word_count);
    println!(
        "Word cloud generated successfully as '{}'.",
        report.output.display()
    );
    Ok(())
}

fn run_count(source: &SourceArgs, top: usize, json: Option<PathBuf>) -> anyhow::Result<()> {
    let config = source.resolve()?;
    let fetcher = HttpFetcher::new(&config.source)?;
    let tokenizer = config.text.tokenizer.build();

    let (text_len, frequencies) =
        pipeline::fetch_and_count(&config, &fetcher, tokenizer.as_ref())?;

    println!("Scraped text length: {}", text_len);
    println!("Number of words after processing: {}", frequencies.total());
    for (rank, wf) in frequencies.top(top).iter().enumerate() {
        println!("{:>4}. {:<24} {}", rank + 1, wf.word, wf.count);
    }
    if let Some(path) = json {
        frequencies.save_json(&path)?;
        println!("Frequencies saved to {:?}", path);
    }
    Ok(())
}
