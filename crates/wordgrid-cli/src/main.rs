mod autoplay;
mod config;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use wordgrid_core::{parse_definitions, parse_word_list, Game, Lexicon};

use crate::config::Config;

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wordgrid=info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(?config, "Starting autoplay");

    run(&config)
}

fn run(config: &Config) -> anyhow::Result<()> {
    let lexicon = Arc::new(load_lexicon(config)?);
    let seed = config.seed.unwrap_or_else(rand::random);

    let saved = read_save(&config.save_path)?;
    let (mut game, restored) = Game::restore_or_new(lexicon, saved.as_deref(), seed);
    println!(
        "{} with {} chunk(s), seed {}",
        if restored { "Resumed world" } else { "New world" },
        game.normal_session().world().len(),
        seed
    );

    let found = autoplay::play_turns(&mut game, config.turns);
    let score = game.normal_session().score();
    println!(
        "Found {} word(s) this run; {} in total, averaging {} letters",
        found.len(),
        score.found_words,
        score.average_display()
    );

    if config.speed_round {
        if let Some(summary) = autoplay::play_speed_round(&mut game, 0.0) {
            println!("{}", summary.feedback.text);
            println!(
                "Speed totals: {} overall, best round {}",
                summary.totals.total, summary.totals.best
            );
        }
    }

    let saved_at = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let json = game.to_json(saved_at)?;
    fs::write(&config.save_path, &json)
        .with_context(|| format!("failed to write save file {}", config.save_path.display()))?;

    // Read the save back the way the next run will.
    let (reloaded, ok) = Game::restore_or_new(game.lexicon().clone(), Some(&json), seed);
    anyhow::ensure!(ok, "written save file could not be restored");

    let report = serde_json::json!({
        "savePath": config.save_path.display().to_string(),
        "savedAt": chrono::Utc::now().to_rfc3339(),
        "chunks": reloaded.normal_session().world().len(),
        "foundWordsCount": reloaded.normal_session().score().found_words,
        "totalSpeedScore": reloaded.speed_totals().total,
    });
    println!("{}", report);
    Ok(())
}

fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {} {}", what, path.display()))
}

fn load_lexicon(config: &Config) -> anyhow::Result<Lexicon> {
    let placement = config
        .placement_dict
        .as_deref()
        .map(|path| read_text(path, "placement dictionary"))
        .transpose()?
        .map(|text| parse_word_list(&text));
    let validation = config
        .validation_dict
        .as_deref()
        .map(|path| read_text(path, "validation dictionary"))
        .transpose()?
        .map(|text| parse_word_list(&text));

    let lexicon = Lexicon::new(placement, validation);
    match config.definitions.as_deref() {
        Some(path) => {
            let definitions = parse_definitions(&read_text(path, "definitions")?)
                .with_context(|| format!("invalid definitions in {}", path.display()))?;
            Ok(lexicon.with_definitions(definitions))
        }
        None => Ok(lexicon),
    }
}

fn read_save(path: &Path) -> anyhow::Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    read_text(path, "save file").map(Some)
}
