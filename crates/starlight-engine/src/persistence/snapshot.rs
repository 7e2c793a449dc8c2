use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::progression::{GameState, MessageSource, Phase};

/// Snapshot schema version written into every payload.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Why a stored payload was not restored.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("snapshot version {found} is not supported (expected {expected})")]
    Version { found: u32, expected: u32 },
    #[error("snapshot does not fit the catalog: {0}")]
    Inconsistent(String),
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    state: &'a GameState,
}

/// Peeks at the version before committing to the state layout.
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotOwned {
    #[allow(dead_code)]
    version: u32,
    state: GameState,
}

/// Serialize a state into a versioned payload.
pub fn encode(state: &GameState) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SnapshotRef { version: SNAPSHOT_VERSION, state })
}

/// Parse and validate a payload against the catalog it will be played with.
pub fn decode(catalog: &Catalog, payload: &str) -> Result<GameState, SnapshotError> {
    let probe: VersionProbe = serde_json::from_str(payload)?;
    if probe.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::Version { found: probe.version, expected: SNAPSHOT_VERSION });
    }
    let snapshot: SnapshotOwned = serde_json::from_str(payload)?;
    check(catalog, &snapshot.state)?;
    Ok(snapshot.state)
}

fn inconsistent(reason: impl Into<String>) -> SnapshotError {
    SnapshotError::Inconsistent(reason.into())
}

/// Reject states the engine could never have produced for this catalog.
fn check(catalog: &Catalog, state: &GameState) -> Result<(), SnapshotError> {
    let len = catalog.len();
    if state.completed_letters.len() != len {
        return Err(inconsistent(format!(
            "{} completion flags for {} letters",
            state.completed_letters.len(),
            len
        )));
    }
    if state.letter_index > len {
        return Err(inconsistent(format!("letter {} past the end ({len})", state.letter_index)));
    }

    match state.phase {
        Phase::Intro | Phase::Playing => {
            if state.letter_index >= len {
                return Err(inconsistent("no active letter while playing"));
            }
            let prefix_done = state
                .completed_letters
                .iter()
                .enumerate()
                .all(|(i, &done)| done == (i < state.letter_index));
            if !prefix_done {
                return Err(inconsistent("completion flags disagree with the active letter"));
            }
            let stars = catalog.stars_in(state.letter_index);
            if state.star_index >= stars {
                return Err(inconsistent(format!(
                    "star {} of a {stars}-star letter",
                    state.star_index
                )));
            }
            if let Some(wrong) = state.wrong_tap {
                if wrong.star_index >= stars {
                    return Err(inconsistent("wrong-tap marker outside the active letter"));
                }
            }
        }
        Phase::Finale | Phase::FreeRoam => {
            if !state.all_completed() || state.letter_index != len || state.star_index != 0 {
                return Err(inconsistent("finished phase with unfinished letters"));
            }
            if state.phase == Phase::Finale && state.message.is_none() {
                return Err(inconsistent("finale without an open card"));
            }
        }
    }

    if let Some(message) = &state.message {
        match &message.source {
            MessageSource::Letter { letter_index, key } => {
                if catalog.message_key(*letter_index).as_deref() != Some(key.as_str()) {
                    return Err(inconsistent(format!("unknown message '{key}'")));
                }
            }
            MessageSource::Finale => {
                if catalog.finale_note().is_none() {
                    return Err(inconsistent("finale note is not defined"));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;
    use crate::progression::{OpenMessage, WrongTap};

    fn playing() -> GameState {
        GameState::replayed(3, "hint")
    }

    #[test]
    fn round_trip_playing_state() {
        let catalog = fixtures::apa();
        let mut state = playing();
        state.letter_index = 1;
        state.star_index = 2;
        state.completed_letters[0] = true;
        state.wrong_tap = Some(WrongTap { star_index: 4 });
        state.message = Some(OpenMessage {
            source: MessageSource::Letter { letter_index: 0, key: "A1".to_string() },
            text: "first a".to_string(),
        });
        let payload = encode(&state).unwrap();
        assert_eq!(decode(&catalog, &payload).unwrap(), state);
    }

    #[test]
    fn payload_carries_version() {
        let payload = encode(&playing()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["version"], SNAPSHOT_VERSION);
        assert_eq!(value["state"]["phase"], "playing");
    }

    #[test]
    fn reject_garbage() {
        let catalog = fixtures::apa();
        assert!(matches!(decode(&catalog, "{not json"), Err(SnapshotError::Malformed(_))));
        assert!(matches!(decode(&catalog, "{}"), Err(SnapshotError::Malformed(_))));
    }

    #[test]
    fn reject_other_versions() {
        let catalog = fixtures::apa();
        let payload = encode(&playing()).unwrap().replace("\"version\":1", "\"version\":7");
        assert!(matches!(
            decode(&catalog, &payload),
            Err(SnapshotError::Version { found: 7, expected: 1 })
        ));
    }

    #[test]
    fn reject_unknown_fields() {
        let catalog = fixtures::apa();
        let payload = encode(&playing())
            .unwrap()
            .replace("\"phase\":", "\"aCount\":1,\"phase\":");
        assert!(matches!(decode(&catalog, &payload), Err(SnapshotError::Malformed(_))));
    }

    #[test]
    fn reject_star_past_glyph() {
        let catalog = fixtures::apa();
        let mut state = playing();
        state.star_index = 5; // "A" has five stars
        let payload = encode(&state).unwrap();
        assert!(matches!(decode(&catalog, &payload), Err(SnapshotError::Inconsistent(_))));
    }

    #[test]
    fn reject_wrong_letter_count() {
        let catalog = fixtures::na();
        let payload = encode(&playing()).unwrap();
        assert!(matches!(decode(&catalog, &payload), Err(SnapshotError::Inconsistent(_))));
    }

    #[test]
    fn reject_finished_phase_with_gaps() {
        let catalog = fixtures::apa();
        let mut state = playing();
        state.phase = Phase::FreeRoam;
        state.letter_index = 3;
        let payload = encode(&state).unwrap();
        assert!(matches!(decode(&catalog, &payload), Err(SnapshotError::Inconsistent(_))));
    }

    #[test]
    fn accept_free_roam() {
        let catalog = fixtures::apa();
        let mut state = playing();
        state.phase = Phase::FreeRoam;
        state.letter_index = 3;
        state.completed_letters = vec![true; 3];
        let payload = encode(&state).unwrap();
        assert_eq!(decode(&catalog, &payload).unwrap(), state);
    }

    #[test]
    fn reject_mismatched_message_key() {
        let catalog = fixtures::apa();
        let mut state = playing();
        state.message = Some(OpenMessage {
            source: MessageSource::Letter { letter_index: 1, key: "A2".to_string() },
            text: "?".to_string(),
        });
        let payload = encode(&state).unwrap();
        assert!(matches!(decode(&catalog, &payload), Err(SnapshotError::Inconsistent(_))));
    }
}
