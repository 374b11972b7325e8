use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::io::{stdin, stdout, Write};
use std::path::{Path, PathBuf};
use stroke_core::core::types::StrokeCategory;
use stroke_core::persistence::{discard_cache, load_cache, save_cache};
use stroke_core::settings::{DisplayField, Settings};
use stroke_core::{kanjidic, kanjivg, LookupEngine, QueryReport, Session};
use tracing::{info, warn};

const STROKE_SOURCE: &str = "kanjivg.xml";
const READING_SOURCE: &str = "kanjidic2.xml";
const CACHE_FILE: &str = "stroke_trie.json";
const SETTINGS_FILE: &str = "settings.json";
const APP_DIR: &str = "kanji-stroke-ime";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Data directory with the XML sources; defaults to ./database like
    // the packaged layout.
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("database"));

    let settings = Settings::load(&settings_path()).context("loading settings")?;
    let mut engine = load_or_build(&data_dir)?;
    attach_readings(&mut engine, &data_dir);

    println!(
        "Stroke lookup ready: {} glyphs indexed.",
        engine.glyph_count()
    );
    println!("Digits 1-5 enter strokes, '-' goes back one, '0' restarts, 'q' quits.");

    let mut session = Session::new(&engine, settings.lookahead);
    loop {
        print!("> ");
        stdout().flush()?;
        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "q" => break,
            "0" => {
                session.reset();
                continue;
            }
            _ => {
                for c in line.chars() {
                    if let Some(category) = StrokeCategory::from_digit(c) {
                        session.enter_digit(category);
                    } else if c == '-' {
                        session.backtrack();
                    }
                }
            }
        }
        print_report(&session.report(), &engine, &settings);
    }
    Ok(())
}

fn load_or_build(data_dir: &Path) -> Result<LookupEngine> {
    let cache = cache_path();
    match load_cache(&cache) {
        Ok(trie) => {
            info!(path = %cache.display(), "restored stroke index from cache");
            Ok(LookupEngine::from_trie(trie))
        }
        Err(e) => {
            info!(cause = %e, "cache unusable, rebuilding from source");
            discard_cache(&cache);

            let source = data_dir.join(STROKE_SOURCE);
            let xml = std::fs::read_to_string(&source)
                .with_context(|| format!("reading {}", source.display()))?;
            let records = kanjivg::parse_document(&xml).context("parsing stroke source")?;
            let (engine, errors) = LookupEngine::build_index(records);
            if !errors.is_empty() {
                warn!(count = errors.len(), "some glyphs were skipped during the build");
            }
            if let Err(e) = save_cache(engine.trie(), &cache) {
                warn!(cause = %e, "could not write stroke index cache");
            }
            Ok(engine)
        }
    }
}

fn attach_readings(engine: &mut LookupEngine, data_dir: &Path) {
    let source = data_dir.join(READING_SOURCE);
    let xml = match std::fs::read_to_string(&source) {
        Ok(xml) => xml,
        Err(_) => {
            info!(path = %source.display(), "no reading source, showing bare glyphs");
            return;
        }
    };
    match kanjidic::parse_document(&xml) {
        Ok(readings) => engine.attach_readings(readings),
        Err(e) => warn!(cause = %e, "reading source unusable, showing bare glyphs"),
    }
}

fn print_report(report: &QueryReport, engine: &LookupEngine, settings: &Settings) {
    match report {
        QueryReport::AtRoot => {}
        QueryReport::NoMatch { prefix } => {
            println!(
                "{}: {} Enter 0 to start over or - to go back once.",
                prefix.clone().bold(),
                "No match.".red()
            );
        }
        QueryReport::Matches { prefix, exact, candidates } => {
            let glyphs = exact.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ");
            println!("{}: {}", prefix.clone().bold(), glyphs.green());
            for &glyph in candidates {
                println!("  {}{}", glyph, describe(glyph, prefix.len(), engine, settings));
            }
        }
    }
}

/// Formats the configured display fields for one candidate glyph.
fn describe(glyph: char, prefix_len: usize, engine: &LookupEngine, settings: &Settings) -> String {
    let Some(meta) = engine.metadata(glyph) else {
        return String::new();
    };
    let mut parts = Vec::new();
    for field in &settings.display {
        match field {
            DisplayField::OnReading if !meta.on_readings.is_empty() => {
                parts.push(meta.on_readings.join("、"));
            }
            DisplayField::KunReading if !meta.kun_readings.is_empty() => {
                parts.push(meta.kun_readings.join("、"));
            }
            DisplayField::Meaning if !meta.meanings.is_empty() => {
                parts.push(meta.meanings.join(", "));
            }
            DisplayField::RemainingStrokes => {
                let total = meta.canonical.len();
                parts.push(format!("+{}", total.saturating_sub(prefix_len)));
            }
            _ => {}
        }
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("  {}", parts.join(" · ").dark_grey())
    }
}

fn cache_path() -> PathBuf {
    let mut path = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path.push(CACHE_FILE);
    path
}

fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path.push(SETTINGS_FILE);
    path
}
