//! Interactive play loop and output formatting.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use gridwalk_core::{Direction, GameId, GameSnapshot, GameStatus, MoveResolution};
use gridwalk_store::{GameStore, StoreError};
use serde_json::json;

/// Output encoding selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Format {
    Text,
    Json,
}

/// Plays game `id` with commands read line by line from `input`.
///
/// Direction tokens are submitted as moves; `path`, `show` and `quit` are
/// handled locally. The loop ends once the game finishes or input runs out.
pub(crate) fn run<R, W>(
    store: &GameStore,
    id: GameId,
    input: R,
    mut output: W,
    format: Format,
) -> Result<GameStatus>
where
    R: BufRead,
    W: Write,
{
    write_snapshot(&mut output, &store.snapshot(id)?, format)?;

    for line in input.lines() {
        let line = line.context("read command")?;
        match line.trim() {
            "" => continue,
            "quit" => break,
            "show" => write_snapshot(&mut output, &store.snapshot(id)?, format)?,
            "path" => {
                let route = store.winning_path(id)?;
                write_route(&mut output, route.as_deref(), format)?;
            }
            token => match store.submit_move(id, token) {
                Ok(resolution) => {
                    write_resolution(&mut output, &resolution, format)?;
                    if resolution.is_terminal() {
                        break;
                    }
                }
                Err(StoreError::InvalidDirection(error)) => {
                    write_error(&mut output, &error.to_string(), format)?;
                }
                Err(error) => return Err(error.into()),
            },
        }
    }

    output.flush().context("flush output")?;
    Ok(store.snapshot(id)?.status)
}

pub(crate) fn write_snapshot<W: Write>(
    output: &mut W,
    snapshot: &GameSnapshot,
    format: Format,
) -> Result<()> {
    match format {
        Format::Text => write!(output, "{}", render(snapshot)),
        Format::Json => writeln!(output, "{}", serde_json::to_string(snapshot)?),
    }
    .context("write snapshot")
}

pub(crate) fn write_route<W: Write>(
    output: &mut W,
    route: Option<&[Direction]>,
    format: Format,
) -> Result<()> {
    match (format, route) {
        (Format::Json, route) => writeln!(
            output,
            "{}",
            json!({ "solvable": route.is_some(), "path": route })
        ),
        (Format::Text, None) => writeln!(output, "no winning path"),
        (Format::Text, Some(route)) => {
            let steps: Vec<&str> = route.iter().map(|direction| direction.as_str()).collect();
            writeln!(
                output,
                "winning path ({} moves): {}",
                route.len(),
                steps.join(" ")
            )
        }
    }
    .context("write route")
}

fn write_resolution<W: Write>(
    output: &mut W,
    resolution: &MoveResolution,
    format: Format,
) -> Result<()> {
    match format {
        Format::Text => writeln!(
            output,
            "{} [position {}, moves {}, health {}]",
            resolution, resolution.position, resolution.moves_remaining, resolution.health
        ),
        Format::Json => writeln!(output, "{}", serde_json::to_string(resolution)?),
    }
    .context("write resolution")
}

fn write_error<W: Write>(output: &mut W, message: &str, format: Format) -> Result<()> {
    match format {
        Format::Text => writeln!(output, "{message}"),
        Format::Json => writeln!(output, "{}", json!({ "error": message })),
    }
    .context("write error")
}

/// Board rows with the player drawn as `@`, followed by a status line.
fn render(snapshot: &GameSnapshot) -> String {
    let mut text = String::new();
    for (row, tiles) in snapshot.board.iter().enumerate() {
        for (column, tile) in tiles.iter().enumerate() {
            let here = usize::try_from(snapshot.position.row()).ok() == Some(row)
                && usize::try_from(snapshot.position.column()).ok() == Some(column);
            text.push(if here { '@' } else { tile.glyph() });
        }
        text.push('\n');
    }
    text.push_str(&format!(
        "position {} | end {} | moves {} | health {} | {}\n",
        snapshot.position, snapshot.end, snapshot.moves_remaining, snapshot.health, snapshot.status
    ));
    text
}
