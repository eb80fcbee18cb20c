/// The mission engine: owns the session state and applies player actions.
///
/// The presentation layer calls `dispatch` with the chosen action, then
/// redraws from `frame()`. Save and load go through a `SnapshotStore`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::content::{self, ChoiceSet, ModalPayload, SceneDescriptor};
use crate::core::store::{
    self, LoadFailure, PersistenceError, SnapshotStore, DEFAULT_SLOT,
};
use crate::core::transition::{self, Effects, TransitionError};
use crate::schema::action::{Action, ParseActionError};
use crate::schema::log::LogEntry;
use crate::schema::scene::Scene;
use crate::schema::state::{GameState, MeterPanel};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    UnknownAction(#[from] ParseActionError),
    #[error("action `{action}` is not available in scene {scene}")]
    ActionUnavailable { scene: Scene, action: Action },
}

impl From<TransitionError> for EngineError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::Unavailable { scene, action } => {
                Self::ActionUnavailable { scene, action }
            }
        }
    }
}

/// Everything the presentation layer needs to redraw after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub state: GameState,
    pub meters: MeterPanel,
    pub scene: SceneDescriptor,
    pub choices: ChoiceSet,
    pub modal: Option<ModalPayload>,
}

/// The top-level mission engine. Built via `MissionEngine::builder()`.
#[derive(Debug, Clone)]
pub struct MissionEngine {
    state: GameState,
    transcript: Vec<LogEntry>,
    slot: String,
    /// A snapshot was just loaded and is waiting for `Start`.
    restored: bool,
    modal_open: bool,
}

/// Builder for constructing a `MissionEngine`.
pub struct MissionEngineBuilder {
    slot: String,
    /// Directly provided starting state (for tests and tools).
    state: Option<GameState>,
}

impl Default for MissionEngine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MissionEngine {
    pub fn builder() -> MissionEngineBuilder {
        MissionEngineBuilder {
            slot: DEFAULT_SLOT.to_string(),
            state: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Every log line since the last reset or load, oldest first.
    pub fn transcript(&self) -> &[LogEntry] {
        &self.transcript
    }

    pub fn save_slot(&self) -> &str {
        &self.slot
    }

    pub fn is_restored(&self) -> bool {
        self.restored
    }

    pub fn scene(&self) -> SceneDescriptor {
        if self.restored {
            content::restored_scene()
        } else {
            content::describe(self.state.scene)
        }
    }

    pub fn choices(&self) -> ChoiceSet {
        if self.restored {
            content::restored_choices()
        } else {
            content::choices(self.state.scene)
        }
    }

    /// The ending dialog, while it is open.
    pub fn modal(&self) -> Option<ModalPayload> {
        if self.modal_open {
            content::modal(self.state.scene)
        } else {
            None
        }
    }

    pub fn frame(&self) -> Frame {
        Frame {
            state: self.state.clone(),
            meters: self.state.meters(),
            scene: self.scene(),
            choices: self.choices(),
            modal: self.modal(),
        }
    }

    /// Resolve an action identifier and dispatch it.
    pub fn dispatch_id(&mut self, id: &str) -> Result<Effects, EngineError> {
        let action: Action = id.parse()?;
        self.dispatch(action)
    }

    /// Apply a player action and return what it produced.
    ///
    /// `Reset` is accepted everywhere. `Dismiss` needs an open ending
    /// dialog, `Start` needs a freshly loaded snapshot, and story actions
    /// need the current scene to offer them.
    pub fn dispatch(&mut self, action: Action) -> Result<Effects, EngineError> {
        debug!(scene = %self.state.scene, %action, restored = self.restored, "dispatch");

        let effects = match action {
            Action::Reset => return Ok(self.reset()),
            Action::Dismiss if self.modal_open => {
                self.modal_open = false;
                Effects::default()
            }
            Action::Start if self.restored => {
                self.restored = false;
                self.transcript.clear();
                self.state.reopen();
                let mut fx = Effects::default();
                transition::enter_intro(&mut self.state, &mut fx);
                fx
            }
            _ if self.restored => {
                return Err(EngineError::ActionUnavailable {
                    scene: self.state.scene,
                    action,
                })
            }
            _ => {
                let next = transition::apply(&self.state, action)?;
                self.state = next.state;
                next.effects
            }
        };

        if let Some(ending) = effects.ending() {
            info!(scene = %ending, ending = %self.state.ending, "mission ended");
            self.modal_open = true;
        }
        self.transcript.extend(effects.lines.iter().cloned());
        Ok(effects)
    }

    /// Throw the session away and start over from the briefing.
    pub fn reset(&mut self) -> Effects {
        debug!("reset");
        self.state = GameState::initial();
        self.transcript.clear();
        self.restored = false;
        self.modal_open = false;

        let mut fx = Effects::default();
        transition::enter_intro(&mut self.state, &mut fx);
        self.transcript.extend(fx.lines.iter().cloned());
        fx
    }

    /// Write the current state to the configured slot.
    ///
    /// The outcome is also written to the transcript as a single line.
    pub fn save<S: SnapshotStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<(), PersistenceError> {
        let result = store::encode(&self.state)
            .map_err(|e| {
                PersistenceError::SaveUnavailable(
                    std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()).into(),
                )
            })
            .and_then(|payload| {
                store
                    .write(&self.slot, &payload)
                    .map_err(PersistenceError::SaveUnavailable)
            });

        match &result {
            Ok(()) => {
                info!(slot = %self.slot, "snapshot saved");
                self.transcript.push(LogEntry::ai("Saved."));
            }
            Err(e) => {
                warn!(slot = %self.slot, error = %e, "save failed");
                self.transcript.push(LogEntry::ai("Save failed."));
            }
        }
        result
    }

    /// Replace the current state with the saved snapshot.
    ///
    /// On success the transcript is cleared and the engine waits for
    /// `Start`. On failure the state is left exactly as it was.
    pub fn load<S: SnapshotStore + ?Sized>(&mut self, store: &S) -> Result<(), PersistenceError> {
        match self.read_snapshot(store) {
            Ok(state) => {
                info!(slot = %self.slot, scene = %state.scene, "snapshot loaded");
                self.state = state;
                self.transcript.clear();
                self.transcript.push(LogEntry::ai("Loaded."));
                self.restored = true;
                self.modal_open = false;
                Ok(())
            }
            Err(failure) => {
                warn!(slot = %self.slot, error = %failure, "load failed");
                let line = match failure {
                    LoadFailure::Missing { .. } => "No save found.",
                    LoadFailure::Unreadable(_) | LoadFailure::Corrupt(_) => "Load failed.",
                };
                self.transcript.push(LogEntry::ai(line));
                Err(failure.into())
            }
        }
    }

    fn read_snapshot<S: SnapshotStore + ?Sized>(&self, store: &S) -> Result<GameState, LoadFailure> {
        let payload = store
            .read(&self.slot)
            .map_err(LoadFailure::Unreadable)?
            .ok_or_else(|| LoadFailure::Missing {
                slot: self.slot.clone(),
            })?;
        Ok(store::decode(&payload)?)
    }
}

impl MissionEngineBuilder {
    pub fn save_slot(mut self, slot: &str) -> Self {
        self.slot = slot.to_string();
        self
    }

    /// Start from a given state instead of the briefing.
    pub fn with_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn build(self) -> MissionEngine {
        let mut engine = MissionEngine {
            state: GameState::initial(),
            transcript: Vec::new(),
            slot: self.slot,
            restored: false,
            modal_open: false,
        };

        match self.state {
            Some(state) => {
                engine.modal_open = state.scene.is_terminal();
                engine.state = state;
            }
            None => {
                engine.reset();
            }
        }
        engine
    }
}
