//! CSV roster and portal loaders.
//!
//! # Roster format
//!
//! One row per agent, in scheduling order.  `speed` and `length` may be left
//! empty for the defaults (10 and 6); `keys` is ignored for autopilots.
//!
//! ```csv
//! controller,x,y,heading,speed,length,keys
//! human,0,10,right,10,6,arrows
//! human,0,20,right,,,wasd
//! auto,0,30,right,,,
//! ```
//!
//! **`keys`** field:
//!
//! | Value     | Meaning                                           |
//! |-----------|---------------------------------------------------|
//! | *empty*   | Arrow keys                                        |
//! | `arrows`  | Arrow keys (curses codes 259/260/258/261)         |
//! | `wasd`    | `w` `a` `s` `d`                                   |
//! | *4 chars* | Up, left, down and right keys in that order       |
//!
//! # Portal format
//!
//! ```csv
//! from_x,from_y,to_x,to_y
//! -1,5,30,20
//! 60,5,0,5
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use snake_agent::{AgentSpec, DEFAULT_LENGTH, DEFAULT_SPEED, HumanController, Keymap};
use snake_core::{Direction, Position};

use crate::{SimError, SimResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RosterRecord {
    controller: String,
    x: i32,
    y: i32,
    heading: String,
    speed: Option<u64>,
    length: Option<usize>,
    keys: Option<String>,
}

#[derive(Deserialize)]
struct PortalRecord {
    from_x: i32,
    from_y: i32,
    to_x: i32,
    to_y: i32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a roster from a CSV file.
pub fn load_roster_csv(path: &Path) -> SimResult<Vec<AgentSpec>> {
    let file = std::fs::File::open(path)?;
    load_roster_reader(file)
}

/// Like [`load_roster_csv`] but accepts any `Read` source.
pub fn load_roster_reader<R: Read>(reader: R) -> SimResult<Vec<AgentSpec>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut roster = Vec::new();

    for (row, result) in csv_reader.deserialize::<RosterRecord>().enumerate() {
        let r = result.map_err(|e| SimError::Parse(e.to_string()))?;
        let start = Position::new(r.x, r.y);
        let heading = parse_heading(&r.heading).map_err(|e| at_row(row, e))?;
        let spec = match r.controller.trim().to_ascii_lowercase().as_str() {
            "auto" => AgentSpec::auto(start, heading),
            "human" => {
                let keys = r.keys.as_deref().unwrap_or("");
                let keymap = parse_keymap(keys).map_err(|e| at_row(row, e))?;
                AgentSpec::human(start, heading, HumanController::new(keymap))
            }
            other => return Err(at_row(row, format!("unknown controller '{other}'"))),
        };
        roster.push(
            spec.with_speed(r.speed.unwrap_or(DEFAULT_SPEED))
                .with_length(r.length.unwrap_or(DEFAULT_LENGTH)),
        );
    }

    Ok(roster)
}

/// Load portal pairs from a CSV file.
pub fn load_portals_csv(path: &Path) -> SimResult<Vec<(Position, Position)>> {
    let file = std::fs::File::open(path)?;
    load_portals_reader(file)
}

/// Like [`load_portals_csv`] but accepts any `Read` source.
pub fn load_portals_reader<R: Read>(reader: R) -> SimResult<Vec<(Position, Position)>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<PortalRecord>()
        .map(|result| {
            let r = result.map_err(|e| SimError::Parse(e.to_string()))?;
            Ok((Position::new(r.from_x, r.from_y), Position::new(r.to_x, r.to_y)))
        })
        .collect()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn at_row(row: usize, msg: String) -> SimError {
    // +2: one for the header, one for 1-based numbering.
    SimError::Parse(format!("line {}: {msg}", row + 2))
}

fn parse_heading(s: &str) -> Result<Direction, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "up" => Ok(Direction::Up),
        "down" => Ok(Direction::Down),
        "left" => Ok(Direction::Left),
        "right" => Ok(Direction::Right),
        other => Err(format!("unknown heading '{other}'")),
    }
}

fn parse_keymap(s: &str) -> Result<Keymap, String> {
    let s = s.trim();
    match s.to_ascii_lowercase().as_str() {
        "" | "arrows" => return Ok(Keymap::default()),
        "wasd" => return Ok(Keymap::wasd()),
        _ => {}
    }
    let chars: Vec<char> = s.chars().collect();
    match chars.as_slice() {
        &[up, left, down, right] => Ok(Keymap::chars(up, left, down, right)),
        _ => Err(format!("keys '{s}' must be 'arrows', 'wasd' or four characters")),
    }
}
