//! WASM bindings for ceres-run — the bridge a browser page drives.
//!
//! The page renders whatever `frame()` returns and forwards button presses
//! by action identifier. Snapshots stay inside an in-memory slot table; the
//! page moves them to and from `localStorage` with `export_snapshot` and
//! `import_snapshot`.

use wasm_bindgen::prelude::*;

use ceres_run::core::engine::{Frame, MissionEngine};
use ceres_run::core::store::MemoryStore;
use ceres_run::core::transition::Effects;
use ceres_run::schema::action::Action;
use ceres_run::schema::log::LogEntry;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct LogLine {
    who: &'static str,
    msg: String,
    kind: &'static str,
}

#[derive(serde::Serialize)]
struct TurnOutput {
    lines: Vec<LogLine>,
    /// Scene identifiers passed through, in order.
    path: Vec<&'static str>,
    frame: Frame,
}

#[derive(serde::Serialize)]
struct PersistOutput {
    ok: bool,
    message: String,
    lines: Vec<LogLine>,
    frame: Frame,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------
fn log_line(entry: &LogEntry) -> LogLine {
    LogLine {
        who: entry.speaker.name(),
        msg: entry.text.clone(),
        kind: entry.speaker.kind(),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// MissionDemo — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct MissionDemo {
    engine: MissionEngine,
    store: MemoryStore,
}

impl Default for MissionDemo {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl MissionDemo {
    /// Start a fresh session at the briefing.
    #[wasm_bindgen(constructor)]
    pub fn new() -> MissionDemo {
        MissionDemo {
            engine: MissionEngine::default(),
            store: MemoryStore::new(),
        }
    }

    /// Return the current render frame as JSON.
    ///
    /// Shape: `{ state, meters, scene, choices, modal }`.
    pub fn frame(&self) -> Result<String, JsError> {
        to_json(&self.engine.frame())
    }

    /// Return every log line of the session as a JSON array of
    /// `{ who, msg, kind }`.
    pub fn transcript(&self) -> Result<String, JsError> {
        let lines: Vec<LogLine> = self.engine.transcript().iter().map(log_line).collect();
        to_json(&lines)
    }

    /// Apply the action with the given identifier, e.g. `"recon"`.
    ///
    /// Returns `{ lines, path, frame }` as JSON. Unknown or unavailable
    /// actions are reported as errors and change nothing.
    pub fn act(&mut self, action_id: &str) -> Result<String, JsError> {
        let effects = self
            .engine
            .dispatch_id(action_id)
            .map_err(|e| JsError::new(&format!("Action rejected: {e}")))?;
        self.turn_output(&effects)
    }

    /// Start over from the briefing. Returns the same shape as `act`.
    pub fn reset(&mut self) -> Result<String, JsError> {
        let effects = self.engine.reset();
        self.turn_output(&effects)
    }

    /// Save into the session's slot. Never throws for storage problems;
    /// the outcome is in `{ ok, message }`.
    pub fn save(&mut self) -> Result<String, JsError> {
        let result = self.engine.save(&mut self.store);
        self.persist_output(result.map_err(|e| e.to_string()))
    }

    /// Load from the session's slot. Same reporting as `save`.
    pub fn load(&mut self) -> Result<String, JsError> {
        let result = self.engine.load(&self.store);
        self.persist_output(result.map_err(|e| e.to_string()))
    }

    /// The raw snapshot payload in the session's slot, if any.
    pub fn export_snapshot(&self) -> Option<String> {
        self.store
            .get(self.engine.save_slot())
            .map(str::to_string)
    }

    /// Put a payload (e.g. read back from `localStorage`) into the slot and
    /// load it.
    pub fn import_snapshot(&mut self, payload: &str) -> Result<String, JsError> {
        let slot = self.engine.save_slot().to_string();
        self.store.seed(&slot, payload);
        self.load()
    }

    /// Return JSON array of every action identifier.
    pub fn actions() -> String {
        let ids: Vec<&str> = Action::ALL.iter().map(Action::id).collect();
        serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
    }
}

// Private helpers
impl MissionDemo {
    fn turn_output(&self, effects: &Effects) -> Result<String, JsError> {
        to_json(&TurnOutput {
            lines: effects.lines.iter().map(log_line).collect(),
            path: effects.path.iter().map(|s| s.id()).collect(),
            frame: self.engine.frame(),
        })
    }

    fn persist_output(&self, result: Result<(), String>) -> Result<String, JsError> {
        let (ok, message) = match result {
            Ok(()) => (true, "ok".to_string()),
            Err(message) => (false, message),
        };
        let lines = self
            .engine
            .transcript()
            .last()
            .map(log_line)
            .into_iter()
            .collect();
        to_json(&PersistOutput {
            ok,
            message,
            lines,
            frame: self.engine.frame(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(out: Result<String, JsError>) -> serde_json::Value {
        match out {
            Ok(text) => serde_json::from_str(&text).unwrap(),
            Err(_) => panic!("bridge call failed"),
        }
    }

    #[test]
    fn act_returns_lines_and_frame() {
        let mut demo = MissionDemo::new();
        let value = json(demo.act("head_to_ceres"));
        assert_eq!(value["path"][0], "CERES_ARRIVE");
        assert_eq!(value["frame"]["state"]["scene"], "CERES_ARRIVE");
        assert_eq!(value["frame"]["choices"]["choices"][1]["action"], "recon");
        assert_eq!(value["lines"][0]["kind"], "ai");
    }

    #[test]
    fn save_then_import_roundtrip() {
        let mut demo = MissionDemo::new();
        json(demo.act("deliver_water"));
        let saved = json(demo.save());
        assert_eq!(saved["ok"], true);

        let payload = demo.export_snapshot().unwrap();
        let mut other = MissionDemo::new();
        let loaded = json(other.import_snapshot(&payload));
        assert_eq!(loaded["ok"], true);
        assert_eq!(loaded["frame"]["state"]["fuelThirds"], 2);
        assert_eq!(loaded["frame"]["scene"]["title"], "Loaded State");
    }

    #[test]
    fn load_without_save_reports_instead_of_throwing() {
        let mut demo = MissionDemo::new();
        let out = json(demo.load());
        assert_eq!(out["ok"], false);
        assert_eq!(out["lines"][0]["msg"], "No save found.");
    }

    #[test]
    fn action_ids_listed() {
        let ids: Vec<String> = serde_json::from_str(&MissionDemo::actions()).unwrap();
        assert_eq!(ids.len(), 12);
        assert!(ids.contains(&"give_up_module".to_string()));
    }
}
