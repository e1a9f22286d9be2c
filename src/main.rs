//! The `grail` binary: startup orchestration and the interactive loop.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use grail::cli::output::Output;
use grail::cli::{init, Cli, Commands};
use grail::llm::{CompletionClient, OllamaClient};
use grail::rag::{compose_prompt, RagSession, SessionOptions};
use grail::types::{AppError, Result, RetrievedChunk};
use grail::utils::config::{GrailConfig, SourceKind};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match run(cli, &output).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "grail=debug,grail_vector=debug"
    } else {
        "grail=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let mut config = GrailConfig::load(&cli.config)?;
    apply_cli_overrides(&mut config, &cli);

    // Subcommands that do not need a built session
    let question_mode = match cli.command {
        Some(Commands::Init { path, force }) => return init::run(&path, force, output),
        Some(Commands::Config { validate }) => return show_config(&config, validate, output),
        Some(Commands::Ask { question, json }) => Some((question, json)),
        None => None,
    };

    config.validate()?;

    // Startup: any failure here is fatal; the process must not enter the
    // query loop with zero or inconsistent data.
    output.banner();

    let source = config.source_provider()?.create_source();
    output.step(1, 3, &format!("Loading documents from {}", source.describe()));
    let docs = source.list().await?;
    if docs.is_empty() {
        return Err(AppError::Source(format!(
            "no documents found in {}",
            source.describe()
        )));
    }

    output.step(
        2,
        3,
        &format!(
            "Indexing {} document(s) with {}",
            docs.len(),
            config.ollama.embed_model
        ),
    );

    let timeout = Duration::from_secs(config.ollama.request_timeout_secs);
    let embedder = Arc::new(OllamaClient::new(
        &config.ollama.url,
        config.ollama.embed_model.clone(),
        timeout,
    ));
    let completer = OllamaClient::new(&config.ollama.url, config.ollama.chat_model.clone(), timeout);

    let options = SessionOptions {
        chunk_size: config.rag.chunk_size,
        embed_concurrency: config.rag.embed_concurrency,
        cache: config.rag.cache.clone(),
    };
    let session = RagSession::build(docs, embedder, options).await?;

    output.step(
        3,
        3,
        &format!(
            "Ready: {} chunks indexed, embedding dimension {}",
            session.chunk_count(),
            session.dimensions()
        ),
    );

    match question_mode {
        Some((question, json)) => ask_once(&session, &completer, &config, &question, json).await,
        None => interactive_loop(&session, &completer, &config, output).await,
    }
}

fn apply_cli_overrides(config: &mut GrailConfig, cli: &Cli) {
    if let Some(url) = &cli.ollama_url {
        config.ollama.url = url.clone();
    }
    if let Some(size) = cli.chunk_size {
        config.rag.chunk_size = size;
    }
    if let Some(top_k) = cli.top_k {
        config.rag.top_k = top_k;
    }
    if let Some(dir) = &cli.docs_dir {
        config.source.kind = SourceKind::Dir;
        config.source.dir = Some(dir.clone());
    }
    if let Some(url) = &cli.docs_url {
        config.source.kind = SourceKind::Url;
        config.source.url = Some(url.clone());
    }
}

fn show_config(config: &GrailConfig, validate: bool, output: &Output) -> Result<()> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| AppError::Internal(format!("cannot render config: {}", e)))?;
    println!("{rendered}");

    if validate {
        config.validate()?;
        output.success("Configuration is valid");
    }
    Ok(())
}

/// Answer one question: retrieve, compose the grounding prompt, generate.
///
/// Returns the retrieved chunks so callers can display them.
async fn answer(
    session: &RagSession,
    completer: &OllamaClient,
    config: &GrailConfig,
    question: &str,
) -> Result<Vec<RetrievedChunk>> {
    let retrieved = session.retrieve(question, config.rag.top_k).await?;
    let prompt = compose_prompt(question, &retrieved);

    if config.ollama.stream {
        let mut stream = completer.complete_stream(&prompt).await?;
        while let Some(fragment) = stream.next().await {
            print!("{}", fragment?);
            std::io::stdout().flush()?;
        }
        println!();
    } else {
        println!("{}", completer.complete(&prompt).await?);
    }

    Ok(retrieved)
}

async fn ask_once(
    session: &RagSession,
    completer: &OllamaClient,
    config: &GrailConfig,
    question: &str,
    json: bool,
) -> Result<()> {
    let retrieved = answer(session, completer, config, question).await?;

    if json {
        let rendered = serde_json::to_string_pretty(&retrieved)
            .map_err(|e| AppError::Internal(format!("cannot render sources: {}", e)))?;
        println!("{rendered}");
    }
    Ok(())
}

async fn interactive_loop(
    session: &RagSession,
    completer: &OllamaClient,
    config: &GrailConfig,
    output: &Output,
) -> Result<()> {
    output.info("Ask a question about your documents ('quit' or 'exit' to leave)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        output.prompt();
        // EOF (e.g. piped input exhausted) exits as gracefully as 'quit'
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if matches!(question.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }

        // A failed query must not take the loop down with it
        if let Err(e) = answer(session, completer, config, question).await {
            output.error(&e.to_string());
        }
    }

    output.info("Goodbye");
    Ok(())
}
