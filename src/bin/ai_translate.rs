//! ai-translate - translate text through an OpenAI-compatible endpoint
//!
//! Usage:
//!   ai-translate [--config <file>] [--from <code>] [--to <code>] [--detect <code>]
//!                [--stream | --no-stream] <text | ->

use ai_translator::{TranslateRequest, TranslatorBuilder};
use anyhow::{bail, Context, Result};
use std::io::{Read, Write};

struct Args {
    config: Option<String>,
    from: String,
    to: String,
    detect: Option<String>,
    stream: Option<bool>,
    text: String,
}

fn print_usage() {
    println!(
        r#"ai-translate - translate text through an OpenAI-compatible chat endpoint

USAGE:
    ai-translate [OPTIONS] <TEXT | ->

OPTIONS:
    --config <file>     YAML or JSON translator config
    --from <code>       Source language code (default: auto)
    --to <code>         Target language code (default: en)
    --detect <code>     Detected source language code
    --stream            Stream partial translations to stderr
    --no-stream         Force a single buffered request
    -h, --help          Show this help message
    -V, --version       Show version information

ENVIRONMENT:
    AI_TRANSLATE_API_KEY        API key (overrides config)
    AI_TRANSLATE_REQUEST_PATH   Endpoint URL (overrides config)
    AI_TRANSLATE_MODEL          Model name (overrides config)
    AI_TRANSLATE_TIMEOUT_SECS   Buffered request timeout
    RUST_LOG                    Log filter (e.g. ai_translator=debug)"#
    );
}

fn parse_args(raw: &[String]) -> Result<Option<Args>> {
    let mut args = Args {
        config: None,
        from: "auto".to_string(),
        to: "en".to_string(),
        detect: None,
        stream: None,
        text: String::new(),
    };
    let mut positional = Vec::new();
    let mut iter = raw.iter();

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{name} requires a value"))
        };
        match arg.as_str() {
            "--config" => args.config = Some(value("--config")?),
            "--from" => args.from = value("--from")?,
            "--to" => args.to = value("--to")?,
            "--detect" => args.detect = Some(value("--detect")?),
            "--stream" => args.stream = Some(true),
            "--no-stream" => args.stream = Some(false),
            "-h" | "--help" => {
                print_usage();
                return Ok(None);
            }
            "-V" | "--version" => {
                println!("ai-translate {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            other if other.starts_with("--") => bail!("unknown option: {other}"),
            other => positional.push(other.to_string()),
        }
    }

    args.text = match positional.as_slice() {
        [] => bail!("missing text to translate"),
        [dash] if dash == "-" => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read text from stdin")?;
            buf
        }
        words => words.join(" "),
    };

    Ok(Some(args))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = parse_args(&raw)? else {
        return Ok(());
    };

    let mut builder = TranslatorBuilder::new().env_overrides(true);
    if let Some(path) = &args.config {
        builder = builder
            .config_path(path)
            .with_context(|| format!("load config {path}"))?;
    }
    if let Some(stream) = args.stream {
        builder = builder.use_stream(stream);
    }
    let translator = builder.build().context("build translator")?;

    let mut request = TranslateRequest::new(args.text.trim(), &args.from, &args.to);
    if let Some(detect) = args.detect.as_deref() {
        request = request.with_detect(detect);
    }

    let text = if translator.config().use_stream {
        let mut stderr = std::io::stderr();
        let mut show = |partial: &str| {
            let _ = write!(stderr, "\r\x1b[2K{}", partial.replace('\n', " "));
            let _ = stderr.flush();
        };
        let text = translator.translate(&request, Some(&mut show)).await?;
        eprintln!();
        text
    } else {
        translator.translate(&request, None).await?
    };

    println!("{text}");
    Ok(())
}
