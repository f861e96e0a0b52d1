//! Encounter file loading and normalization.
//!
//! The engine wants encounter-relative millisecond timestamps and a sorted
//! stream; log exports don't always come that way. Events in the input file
//! carry either `t` (relative ms) or `at` (absolute wall-clock time); this
//! layer converts the absolute form against the encounter start, assigns
//! log indexes, and sorts; the engine trusts the result.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;

use vantage_core::{
    AbilityRef, ActorId, EncounterInput, EncounterMetadata, Event, EventKind, EventTime,
};

use crate::CliError;

#[derive(Debug, Deserialize)]
struct RawEncounter {
    metadata: EncounterMetadata,
    /// Wall-clock encounter start; required only when events use `at`.
    /// Defaults to the first event's `at`.
    #[serde(default)]
    start_time: Option<NaiveDateTime>,
    events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    /// Encounter-relative milliseconds.
    #[serde(default)]
    t: Option<i64>,
    /// Absolute wall-clock timestamp.
    #[serde(default)]
    at: Option<NaiveDateTime>,
    kind: EventKind,
    #[serde(default)]
    source: Option<ActorId>,
    #[serde(default)]
    target: Option<ActorId>,
    #[serde(default)]
    ability: Option<AbilityRef>,
    #[serde(default)]
    amount: i64,
    #[serde(default)]
    absorbed: i64,
    #[serde(default)]
    overheal: i64,
    #[serde(default)]
    resource_change: i64,
    #[serde(default)]
    waste: i64,
    #[serde(default)]
    stacks: Option<u32>,
}

pub fn load_encounter(path: &Path) -> Result<EncounterInput, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    let raw: RawEncounter = serde_json::from_str(&text)
        .map_err(|err| CliError::Parse { path: path.to_path_buf(), message: err.to_string() })?;
    normalize(raw)
}

fn normalize(raw: RawEncounter) -> Result<EncounterInput, CliError> {
    let start = raw.start_time.or_else(|| raw.events.iter().find_map(|e| e.at));

    let mut events = Vec::with_capacity(raw.events.len());
    for (index, raw_event) in raw.events.into_iter().enumerate() {
        let timestamp = match (raw_event.t, raw_event.at) {
            (Some(millis), _) => EventTime::from_millis(millis),
            (None, Some(at)) => {
                let Some(start) = start else {
                    return Err(CliError::Input(format!(
                        "event {index} uses an absolute timestamp but no encounter start is known"
                    )));
                };
                EventTime::from_millis(at.signed_duration_since(start).num_milliseconds())
            }
            (None, None) => {
                return Err(CliError::Input(format!(
                    "event {index} carries neither `t` nor `at`"
                )));
            }
        };
        events.push(Event {
            timestamp,
            index: index as u64,
            kind: raw_event.kind,
            source: raw_event.source,
            target: raw_event.target,
            ability: raw_event.ability,
            amount: raw_event.amount,
            absorbed: raw_event.absorbed,
            overheal: raw_event.overheal,
            resource_change: raw_event.resource_change,
            waste: raw_event.waste,
            stacks: raw_event.stacks,
        });
    }

    // The engine trusts its input sort; this layer owns that contract.
    events.sort_by_key(|e| (e.timestamp, e.index));

    Ok(EncounterInput { metadata: raw.metadata, events })
}
