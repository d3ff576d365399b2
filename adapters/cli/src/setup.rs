//! Resolves command-line options into game rules and a board.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use gridwalk_core::RulesConfig;
use gridwalk_system_generation::{GenerationConfig, Generator};
use gridwalk_world::Board;
use tracing::info;

use crate::GameArgs;

/// Loads rules from a JSON file, falling back to the defaults.
pub(crate) fn load_rules(path: Option<&Path>) -> Result<RulesConfig> {
    let Some(path) = path else {
        return Ok(RulesConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("read rules file {}", path.display()))?;
    parse_rules(&text).with_context(|| format!("load rules file {}", path.display()))
}

/// Loads the board named on the command line or generates one.
pub(crate) fn load_board(args: &GameArgs, rules: &RulesConfig) -> Result<Board> {
    if let Some(path) = &args.board {
        let layout = fs::read_to_string(path)
            .with_context(|| format!("read board file {}", path.display()))?;
        return Board::from_ascii(&layout)
            .with_context(|| format!("parse board file {}", path.display()));
    }

    let config = generation_config(args)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(
        seed,
        width = config.width(),
        height = config.height(),
        solvable = args.solvable,
        "generating board"
    );

    let generator = Generator::new(config);
    let board = if args.solvable {
        generator.generate_solvable(seed, rules, args.attempts)
    } else {
        generator.generate(seed)
    };
    board.with_context(|| format!("generate board for seed {seed}"))
}

fn parse_rules(text: &str) -> Result<RulesConfig> {
    let rules: RulesConfig = serde_json::from_str(text).context("rules are not valid JSON")?;
    rules.validate()?;
    Ok(rules)
}

fn generation_config(args: &GameArgs) -> Result<GenerationConfig> {
    let config = match &args.generation {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read generation file {}", path.display()))?;
            serde_json::from_str::<GenerationConfig>(&text)
                .with_context(|| format!("parse generation file {}", path.display()))?
        }
        None => GenerationConfig::default(),
    };

    Ok(config.with_dimensions(
        args.width.unwrap_or(config.width()),
        args.height.unwrap_or(config.height()),
    ))
}
