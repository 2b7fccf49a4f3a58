//! Resolve a translation path from the command line.
//!
//! Usage:
//!   translation-registry <path> [args...]              # active (default) language
//!   translation-registry --lang fr <path> [args...]    # one specific language, uncached
//!   translation-registry --all <path> [args...]        # every language, via language switches
//!   translation-registry --report ...                  # also print registry metrics as JSON
//!
//! Required environment variables:
//! - TRANSLATIONS_FILE
//!
//! Optional:
//! - DEFAULT_LANGUAGE (defaults to the first language in the file)
//! - STRICT_LANGUAGE_SWITCH (defaults to false)

use anyhow::{bail, Context, Result};
use tracing::info;
use translation_registry::config::Config;
use translation_registry::i18n::{Arg, TranslationContext, TranslationTable};

struct Invocation {
    language: Option<String>,
    all: bool,
    report: bool,
    path: String,
    args: Vec<Arg>,
}

fn parse_args(raw: &[String]) -> Result<Invocation> {
    let mut language = None;
    let mut all = false;
    let mut report = false;
    let mut positional = Vec::new();

    let mut iter = raw.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--lang" => {
                let value = iter.next().context("--lang requires a language id")?;
                language = Some(value.clone());
            }
            "--all" => all = true,
            "--report" => report = true,
            _ => positional.push(arg.clone()),
        }
    }

    if all && language.is_some() {
        bail!("--all and --lang cannot be combined");
    }

    let mut positional = positional.into_iter();
    let path = positional
        .next()
        .context("Usage: translation-registry [--lang <id> | --all] [--report] <path> [args...]")?;

    Ok(Invocation {
        language,
        all,
        report,
        path,
        args: positional.map(Arg::from).collect(),
    })
}

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translation_registry=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = parse_args(&args)?;

    let config = Config::from_env()?;

    info!("Loading translations from {}", config.translations_file);
    let table = TranslationTable::from_file(&config.translations_file)
        .with_context(|| format!("Failed to load {}", config.translations_file))?;

    let default_language = match config.default_language.clone() {
        Some(language) => language,
        None => table
            .first_language()
            .map(|(id, _)| id.to_string())
            .context("Translation table has no languages")?,
    };

    let registry = TranslationContext::global().install_with_options(
        default_language,
        table,
        config.registry_options(),
    )?;

    if let Some(language) = &invocation.language {
        let value = registry.translate_from_language(language, &invocation.path, &invocation.args)?;
        println!("{}", value);
    } else if invocation.all {
        let state = registry.translate(&invocation.path, &invocation.args)?;
        for language in registry.languages() {
            registry.change_language(language)?;
            println!("{}: {}", language, state);
        }
    } else {
        let state = registry.translate(&invocation.path, &invocation.args)?;
        println!("{}", state);
    }

    if invocation.report {
        let report = serde_json::to_string_pretty(&registry.metrics().report())
            .context("Failed to serialize metrics report")?;
        println!("{}", report);
    }

    Ok(())
}
