/// The mission's transition table.
///
/// Every story action is a pure function from the current `GameState` to the
/// next one, plus the narrative lines and scenes it produced. Nothing here
/// touches the transcript, the store or the presentation layer.

use thiserror::Error;

use crate::core::content;
use crate::schema::action::Action;
use crate::schema::log::{LogEntry, Speaker};
use crate::schema::scene::Scene;
use crate::schema::state::{Ending, GameState};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("action `{action}` is not offered in scene {scene}")]
    Unavailable { scene: Scene, action: Action },
}

/// Side effects of one transition, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    pub lines: Vec<LogEntry>,
    /// Every scene entered, transient ones included. The last entry is
    /// where the player now waits.
    pub path: Vec<Scene>,
}

impl Effects {
    pub fn say(&mut self, speaker: Speaker, text: &str) {
        self.lines.push(LogEntry::new(speaker, text));
    }

    fn enter(&mut self, state: &mut GameState, scene: Scene) {
        state.scene = scene;
        self.path.push(scene);
    }

    /// The ending reached by this transition, if any.
    pub fn ending(&self) -> Option<Scene> {
        self.path.last().copied().filter(Scene::is_terminal)
    }
}

/// A state and the effects that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: GameState,
    pub effects: Effects,
}

/// What a Ceres branch brings back to Earth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cargo {
    pub water: bool,
    pub gold: bool,
}

/// Fire a story action from `state`.
///
/// Only the actions the current scene offers are accepted; `Start`, `Reset`
/// and `Dismiss` belong to the engine and are never offered here.
pub fn apply(state: &GameState, action: Action) -> Result<Transition, TransitionError> {
    if state.scene.is_terminal() || !content::choices(state.scene).offers(action) {
        return Err(TransitionError::Unavailable {
            scene: state.scene,
            action,
        });
    }

    let mut next = state.clone();
    let mut fx = Effects::default();

    match action {
        Action::DeliverWater => deliver_water(&mut next, &mut fx),
        Action::AttendSummit => enter_summit(&mut next, &mut fx),
        Action::HeadToCeres => enter_ceres(&mut next, &mut fx),
        Action::PatchMore => patch_more(&mut next, &mut fx),
        Action::GiveUpModule => give_up_module(&mut next, &mut fx),
        Action::RefuseButHelp => refuse_but_help(&mut next, &mut fx),
        Action::ExtractFast => extract_fast(&mut next, &mut fx),
        Action::Recon => recon(&mut next, &mut fx),
        Action::TurnBack => return_to_earth(&mut next, Cargo::default(), &mut fx),
        Action::Start | Action::Reset | Action::Dismiss => {
            return Err(TransitionError::Unavailable {
                scene: state.scene,
                action,
            })
        }
    }

    Ok(Transition {
        state: next,
        effects: fx,
    })
}

/// Enter the briefing. Resources are left as they are.
pub fn enter_intro(state: &mut GameState, fx: &mut Effects) {
    fx.enter(state, Scene::Intro);
    fx.say(Speaker::Ai, "Welcome aboard Charity Water One.");
    fx.say(
        Speaker::Captain,
        "Earth is holding at 3/5… but Mars is at zero.",
    );
    fx.say(
        Speaker::ScienceOfficer,
        "Captain: short-term relief is not the same as long-term resilience.",
    );
}

/// Landing, water hand-off and the time it takes.
fn mars_aid(state: &mut GameState) {
    state.spend_fuel(1);
    state.add_time(1);
    state.add_mars_water(1);
}

fn deliver_water(state: &mut GameState, fx: &mut Effects) {
    fx.enter(state, Scene::MarsDeliver);
    fx.say(Speaker::Captain, "Deliver water. Keep the ship moving.");
    mars_aid(state);
    fx.say(
        Speaker::Ai,
        "Mars receives emergency water (+1). Fuel spent (-1/3).",
    );
    fx.say(
        Speaker::ScienceOfficer,
        "We helped. Now we need leverage. Ceres is leverage.",
    );
}

fn patch_more(state: &mut GameState, fx: &mut Effects) {
    fx.enter(state, Scene::MarsPatchMore);
    fx.say(Speaker::Captain, "One more patch. Quick fixes.");
    mars_aid(state);
    fx.say(Speaker::Ai, "Mars improves again (+1). Fuel drops further.");
}

fn enter_summit(state: &mut GameState, fx: &mut Effects) {
    fx.enter(state, Scene::MarsSummit);
    fx.say(
        Speaker::MarsCouncil,
        "Captain rini, land. We need a permanent plan.",
    );
    fx.say(
        Speaker::MarsCouncil,
        "If you truly care… leave your purifier module here.",
    );
    fx.say(
        Speaker::ScienceOfficer,
        "Captain. That’s a trap wrapped in applause.",
    );
}

fn give_up_module(state: &mut GameState, fx: &mut Effects) {
    fx.enter(state, Scene::MarsGiveModule);
    state.ground_ship();
    fx.say(
        Speaker::Captain,
        "We’ll leave the module. Mars needs it now.",
    );
    state.add_mars_water(2);
    state.add_time(2);
    conclude(state, Ending::Grounded, fx);
}

fn refuse_but_help(state: &mut GameState, fx: &mut Effects) {
    fx.enter(state, Scene::MarsRefuseHelp);
    fx.say(
        Speaker::Captain,
        "We’re not dismantling the ship. We’ll provide temporary aid.",
    );
    mars_aid(state);
    fx.say(
        Speaker::MarsCouncil,
        "You are choosing to leave us vulnerable.",
    );
    fx.say(
        Speaker::ScienceOfficer,
        "We are choosing to keep the bridge alive.",
    );
}

fn enter_ceres(state: &mut GameState, fx: &mut Effects) {
    fx.enter(state, Scene::CeresArrive);
    fx.say(
        Speaker::Ai,
        "Arrival: Ceres. Ice detected. Mineral anomalies possible.",
    );
    fx.say(
        Speaker::ScienceOfficer,
        "Captain: recon costs time, not much fuel.",
    );
}

fn extract_fast(state: &mut GameState, fx: &mut Effects) {
    fx.enter(state, Scene::CeresFast);
    fx.say(Speaker::Captain, "Land. Extract. Keep it simple.");
    state.spend_fuel(1);
    state.add_time(1);
    fx.say(Speaker::Ai, "Basic water load secured. No recon performed.");
    return_to_earth(
        state,
        Cargo {
            water: true,
            gold: false,
        },
        fx,
    );
}

fn recon(state: &mut GameState, fx: &mut Effects) {
    fx.enter(state, Scene::CeresRecon);
    fx.say(Speaker::Captain, "Run recon. Slow is smooth.");
    state.add_time(2);
    state.gold_found = true;
    fx.say(
        Speaker::Ai,
        "Recon complete: ice mapped. Fuel route identified. Gold signature confirmed.",
    );
    // Operating the sweep costs a third; the mapped fuel route pays it back.
    state.spend_fuel(1);
    state.refuel(1);
    return_to_earth(
        state,
        Cargo {
            water: true,
            gold: true,
        },
        fx,
    );
}

/// Fly home with `cargo` and decide how the run ends.
///
/// The rules are checked in priority order: a grounded ship always ends on
/// Mars, a gold run with fuel to spare wins outright, water alone gets
/// stuck, and anything else simply completes.
pub fn return_to_earth(state: &mut GameState, cargo: Cargo, fx: &mut Effects) {
    fx.enter(state, Scene::EarthReturn);
    fx.say(Speaker::Ai, "Return burn executed. Earth approach.");
    state.spend_fuel(1);
    state.add_time(1);

    if cargo.water {
        state.add_earth_water(2);
        fx.say(Speaker::Ai, "Water delivered to Earth. Condition rises.");
    } else {
        fx.say(Speaker::Ai, "No water delivered this run.");
    }

    if cargo.gold {
        fx.say(
            Speaker::Ai,
            "Gold delivered: funding unlocked for 10 purification systems.",
        );
        state.add_mars_water(2);
    }

    let ending = if !state.ship_mobile {
        Ending::Grounded
    } else if state.gold_found && state.fuel_thirds >= 2 {
        Ending::StrategicVictory
    } else if cargo.water && !cargo.gold {
        Ending::StuckNoFunding
    } else {
        Ending::MissionComplete
    };
    conclude(state, ending, fx);
}

fn conclude(state: &mut GameState, ending: Ending, fx: &mut Effects) {
    state.finish(ending);
    fx.path.push(state.scene);
}
