// Keynorm CLI
// Inspect key events and check shortcut config files

use std::borrow::Cow;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use keynorm_core::config::Config;
use keynorm_core::{
    canonical_key_string, friendly_key_string_with, CodeMap, KeyEvent, ShortcutTable,
};

/// Keyboard event normalizer and shortcut config checker
#[derive(Parser, Debug)]
#[command(name = "keynorm")]
#[command(author = "keynorm contributors")]
#[command(version)]
#[command(about = "Keyboard event normalizer and shortcut config checker", long_about = None)]
struct Args {
    /// Shortcut config file (TOML, or JSON with a .json extension)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Custom code map JSON file, overrides the one in the config
    #[arg(long, value_name = "FILE")]
    code_map: Option<PathBuf>,

    /// Key event as JSON, e.g. '{"key":"z","code":"KeyZ","ctrlKey":true}'
    #[arg(short, long, value_name = "JSON")]
    event: Option<String>,

    /// Print all shortcuts with their actions
    #[arg(short, long)]
    list: bool,

    /// Validate config and exit
    #[arg(long)]
    check_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Load the config named on the command line, or the default one if present
fn load_config(args: &Args) -> anyhow::Result<Option<Config>> {
    if let Some(path) = &args.config {
        let config = Config::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        return Ok(Some(config));
    }

    match Config::default_path() {
        Some(path) if path.exists() => {
            log::debug!("Using default config {}", path.display());
            let config = Config::from_path(&path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            Ok(Some(config))
        }
        _ => {
            log::debug!("No config file found");
            Ok(None)
        }
    }
}

fn resolve_code_map(args: &Args, config: Option<&Config>) -> anyhow::Result<Cow<'static, CodeMap>> {
    if let Some(path) = &args.code_map {
        let map = CodeMap::from_path(path)
            .with_context(|| format!("failed to load code map {}", path.display()))?;
        return Ok(Cow::Owned(map));
    }
    match config {
        Some(config) => Ok(config.code_map()?),
        None => Ok(Cow::Borrowed(CodeMap::builtin())),
    }
}

fn print_table(table: &ShortcutTable, code_map: &CodeMap) {
    let entries = table.help_entries_with(code_map);
    let width = entries.iter().map(|(f, _)| f.chars().count()).max().unwrap_or(0);
    for (friendly, action) in entries {
        println!("  {:<width$}  {}", friendly, action, width = width);
    }
}

fn describe_event(json: &str, code_map: &CodeMap, table: Option<&ShortcutTable>) -> anyhow::Result<()> {
    let event: KeyEvent = serde_json::from_str(json).context("invalid key event JSON")?;

    println!("modifier:  {}", event.is_modifier_key());
    println!("canonical: {}", canonical_key_string(&event));
    println!("friendly:  {}", friendly_key_string_with(&event, code_map));
    if let Some(table) = table {
        match table.lookup(&event) {
            Some(action) => println!("action:    {}", action),
            None => println!("action:    (none)"),
        }
    }
    Ok(())
}

/// Validate the whole config, including its code map, and return the shortcut count
fn check_config(args: &Args, config: Option<&Config>) -> anyhow::Result<usize> {
    let Some(config) = config else {
        bail!("no configuration found; pass --config");
    };
    let table = config.to_table()?;
    resolve_code_map(args, Some(config))?;
    Ok(table.len())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;

    if args.check_config {
        let count = check_config(&args, config.as_ref())?;
        println!("Configuration is valid ({} shortcuts)", count);
        return Ok(());
    }

    let table = config.as_ref().map(Config::to_table).transpose()?;

    let code_map = resolve_code_map(&args, config.as_ref())?;

    if args.list {
        let Some(table) = table.as_ref() else {
            bail!("no configuration found; pass --config");
        };
        print_table(table, &code_map);
    }

    if let Some(json) = &args.event {
        describe_event(json, &code_map, table.as_ref())?;
    }

    if !args.list && args.event.is_none() {
        eprintln!("Nothing to do: pass --event, --list or --check-config (see --help)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["keynorm", "--config", "/tmp/shortcuts.toml"]);

        assert_eq!(args.config, Some(PathBuf::from("/tmp/shortcuts.toml")));
        assert!(args.code_map.is_none());
        assert!(args.event.is_none());
        assert!(!args.list);
        assert!(!args.check_config);
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_with_options() {
        let args = Args::parse_from([
            "keynorm",
            "--code-map",
            "/tmp/layout.json",
            "--event",
            r#"{"key":"z","code":"KeyZ","ctrlKey":true}"#,
            "--list",
            "--verbose",
        ]);

        assert_eq!(args.code_map, Some(PathBuf::from("/tmp/layout.json")));
        assert!(args.event.is_some());
        assert!(args.list);
        assert!(args.verbose);
    }

    #[test]
    fn test_describe_event_rejects_bad_json() {
        assert!(describe_event("{not json", CodeMap::builtin(), None).is_err());
        assert!(describe_event(r#"{"key":"a"}"#, CodeMap::builtin(), None).is_err());
    }

    #[test]
    fn test_check_config_counts_shortcuts() {
        let args = Args::parse_from(["keynorm", "--check-config"]);
        let config = Config::from_toml("[shortcuts]\ntop = [{ key = \"g\" }, { key = \"Home\" }]\n").unwrap();
        assert_eq!(check_config(&args, Some(&config)).unwrap(), 2);
        assert!(check_config(&args, None).is_err());
    }

    #[test]
    fn test_check_config_loads_code_map() {
        let dir = tempfile::TempDir::new().unwrap();
        let config_path = dir.path().join("shortcuts.toml");
        std::fs::write(&config_path, "[general]\ncode_map = \"missing.json\"\n").unwrap();
        let config = Config::from_path(&config_path).unwrap();

        let args = Args::parse_from(["keynorm", "--check-config"]);
        assert!(check_config(&args, Some(&config)).is_err());

        // A broken --code-map override is reported too
        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        let valid = Config::from_toml("").unwrap();
        let args = Args::parse_from([
            "keynorm",
            "--check-config",
            "--code-map",
            broken.to_str().unwrap(),
        ]);
        assert!(check_config(&args, Some(&valid)).is_err());
    }

    #[test]
    fn test_describe_event_with_table() {
        let config = Config::from_toml("[shortcuts]\ntop = { key = \"g\" }\n").unwrap();
        let table = config.to_table().unwrap();
        assert!(describe_event(r#"{"key":"g","code":"KeyG"}"#, CodeMap::builtin(), Some(&table)).is_ok());
    }
}
