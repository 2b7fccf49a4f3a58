use anyhow::{Context, Result};
use tracing::info;
use translation_registry::config::Config;
use translation_registry::i18n::{Registry, TranslationTable};

fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("export_paths=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let flat = std::env::args().any(|arg| arg == "--flat");

    let config = Config::from_env()?;
    let table = TranslationTable::from_file(&config.translations_file)
        .with_context(|| format!("Failed to load {}", config.translations_file))?;

    // The path map only depends on the first language; the default is irrelevant here.
    let default_language = config
        .default_language
        .clone()
        .or_else(|| table.first_language().map(|(id, _)| id.to_string()))
        .unwrap_or_default();
    let registry = Registry::with_options(default_language, table, config.registry_options())?;
    let path_map = registry.path_map();

    if flat {
        for path in path_map.paths() {
            println!("{}", path);
        }
    } else {
        let json = serde_json::to_string_pretty(path_map).context("Failed to serialize path map")?;
        println!("{}", json);
    }

    info!("✓ Exported {} paths", path_map.paths().len());
    Ok(())
}
