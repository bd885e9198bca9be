//! `lexi`: a small synchronous CLI host for the lexer/folder engine.
//!
//! Loads a file into a `MemoryDocument`, looks a lexer up by name in the
//! process-wide registry, drives `Lex`/`Fold` over it, and prints style
//! runs and fold levels. Optionally re-enters `Lex` at a caller-chosen
//! offset to demonstrate that resumption reproduces the same styling as a
//! whole-file pass, the way a host integrating an incremental lexer would.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use lexi_doc::{Document, MemoryDocument};
use lexi_engine::{catalog_with, driver, Lexer};
use std::path::PathBuf;
use std::sync::Once;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "lexi", version, about = "Incremental multi-language lexer/folder engine CLI")]
struct Args {
    /// Source file to lex.
    pub path: PathBuf,

    /// Lexer name to use (overrides `default_lexer` from the config file).
    #[arg(long = "lexer")]
    pub lexer: Option<String>,

    /// Optional configuration file path (overrides discovery of `lexi.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Re-lex starting at this byte offset after the initial whole-file
    /// pass, to exercise resumption from a mid-document boundary.
    #[arg(long = "resume-at")]
    pub resume_at: Option<usize>,

    /// Print each line's packed fold-level word (level, HEADER, WHITE).
    #[arg(long = "dump-fold", default_value_t = false)]
    pub dump_fold: bool,

    /// Print each line's raw line-state word.
    #[arg(long = "dump-line-state", default_value_t = false)]
    pub dump_line_state: bool,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = std::path::Path::new(".");
    let file_appender = tracing_appender::rolling::never(log_dir, "lexi.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn registry() -> &'static lexi_engine::LexerRegistry {
    catalog_with(|registry| {
        lexi_cpp::register(registry);
        lexi_lua::register(registry);
    })
}

fn apply_config_overrides(lexer: &mut dyn Lexer, name: &str, config: &config::CliConfig) {
    let Some(overrides) = config.lexer.get(name) else {
        return;
    };
    for (key, value) in overrides {
        let applied = lexer.property_set(key, value);
        info!(target: "config", lexer = name, property = %key, value = %value, applied, "property_override_applied");
    }
}

fn run() -> Result<()> {
    let _guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let config = config::load_from(args.config.clone())
        .context("failed to load lexi.toml configuration")?;

    let lexer_name = args
        .lexer
        .clone()
        .or_else(|| config.default_lexer.clone())
        .context("no lexer specified: pass --lexer or set default_lexer in lexi.toml")?;

    let registry = registry();
    let mut lexer = registry
        .create_by_name(&lexer_name)
        .with_context(|| format!("unknown lexer '{lexer_name}' (known: {:?})", registry.names().collect::<Vec<_>>()))?;

    apply_config_overrides(lexer.as_mut(), &lexer_name, &config);

    let bytes = std::fs::read(&args.path)
        .with_context(|| format!("failed to read '{}'", args.path.display()))?;
    info!(target: "io", path = %args.path.display(), size_bytes = bytes.len(), lexer = %lexer_name, "file_loaded");

    let mut doc = MemoryDocument::from_bytes(bytes);
    let len = doc.len();
    lexer.lex(&mut doc, 0, len, 0);
    lexer.fold(&mut doc, 0, len, 0);

    if let Some((start, end)) = doc.take_pending_relex() {
        warn!(target: "engine", start, end, "lexer_requested_relex_after_initial_pass");
        let init_style = driver::init_style_at(&doc, start);
        lexer.lex(&mut doc, start, doc.len().saturating_sub(start), init_style);
        lexer.fold(&mut doc, 0, doc.len(), 0);
    }

    if let Some(offset) = args.resume_at {
        let before = doc.styles().to_vec();
        let init_style = driver::init_style_at(&doc, offset);
        info!(target: "engine", offset, init_style, "resuming_lex_at_offset");
        lexer.lex(&mut doc, offset, doc.len().saturating_sub(offset), init_style);
        let matches = doc.styles()[offset..] == before[offset..];
        info!(target: "engine", offset, reproduced = matches, "resume_comparison");
        if !matches {
            warn!(target: "engine", offset, "resumed_styling_diverged_from_whole_file_pass");
        }
    }

    print_style_runs(&doc);
    if args.dump_fold {
        print_fold_levels(&doc);
    }
    if args.dump_line_state {
        print_line_states(&doc);
    }

    info!(target: "runtime", "shutdown");
    Ok(())
}

fn print_style_runs(doc: &MemoryDocument) {
    let styles = doc.styles();
    if styles.is_empty() {
        return;
    }
    let mut run_start = 0usize;
    let mut run_style = styles[0];
    for (i, &style) in styles.iter().enumerate().skip(1) {
        if style != run_style {
            println!("{run_start}..{i}: style={run_style}");
            run_start = i;
            run_style = style;
        }
    }
    println!("{run_start}..{}: style={run_style}", styles.len());
}

fn print_fold_levels(doc: &MemoryDocument) {
    for line in 0..doc.line_count() {
        let word = doc.get_level(line);
        println!(
            "line {line}: level={} header={} white={}",
            lexi_state::level_of(word),
            lexi_state::is_header(word),
            lexi_state::is_white(word)
        );
    }
}

fn print_line_states(doc: &MemoryDocument) {
    for line in 0..doc.line_count() {
        println!("line {line}: line_state=0x{:08x}", doc.get_line_state(line));
    }
}

fn main() -> Result<()> {
    run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_lexer_name_is_not_in_the_registry() {
        let registry = registry();
        assert!(registry.create_by_name("not-a-real-lexer").is_none());
        assert!(registry.create_by_name("cpp").is_some());
        assert!(registry.create_by_name("lua").is_some());
    }

    #[test]
    fn applying_an_override_flips_the_option() {
        let registry = registry();
        let mut lexer = registry.create_by_name("cpp").unwrap();
        let mut config = config::CliConfig::default();
        let mut overrides = std::collections::HashMap::new();
        overrides.insert("fold.comment".to_string(), "1".to_string());
        config.lexer.insert("cpp".to_string(), overrides);
        apply_config_overrides(lexer.as_mut(), "cpp", &config);
        assert_eq!(lexer.property_get("fold.comment").as_deref(), Some("1"));
    }

    #[test]
    fn style_runs_print_without_panicking_on_empty_document() {
        let doc = MemoryDocument::from_str("");
        print_style_runs(&doc);
    }
}
