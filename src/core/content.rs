/// Scene content — the text, art and choice buttons the presentation layer
/// draws for each scene.

use serde::{Deserialize, Serialize};

use crate::schema::action::Action;
use crate::schema::scene::Scene;

/// Styling hint for a choice button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Secondary,
    Warn,
    Good,
    Danger,
}

/// Title, art label and hint line for the scene header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub title: String,
    pub art: String,
    pub hint: String,
}

impl SceneDescriptor {
    fn new(title: &str, art: &str, hint: &str) -> Self {
        Self {
            title: title.to_string(),
            art: art.to_string(),
            hint: hint.to_string(),
        }
    }
}

/// A single actionable button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub style: ButtonStyle,
    pub action: Action,
}

impl Choice {
    fn new(label: &str, style: ButtonStyle, action: Action) -> Self {
        Self {
            label: label.to_string(),
            style,
            action,
        }
    }
}

/// The ordered buttons offered under a heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSet {
    pub title: String,
    pub choices: Vec<Choice>,
}

impl ChoiceSet {
    fn new(title: &str, choices: Vec<Choice>) -> Self {
        Self {
            title: title.to_string(),
            choices,
        }
    }

    pub fn offers(&self, action: Action) -> bool {
        self.choices.iter().any(|c| c.action == action)
    }

    pub fn actions(&self) -> Vec<Action> {
        self.choices.iter().map(|c| c.action).collect()
    }
}

/// The payload shown in a dialog when an ending is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalPayload {
    pub title: String,
    /// Body paragraphs, in order.
    pub body: Vec<String>,
    pub actions: Vec<Choice>,
}

pub fn describe(scene: Scene) -> SceneDescriptor {
    use Scene::*;
    match scene {
        Intro => SceneDescriptor::new(
            "Moon Orbit — Phase 2 Briefing",
            "🌕",
            "Mars is pressure. Ceres is leverage.",
        ),
        MarsDeliver => SceneDescriptor::new(
            "Mars — Emergency Delivery",
            "🟥",
            "Band-aid help. Fuel cost is real.",
        ),
        MarsPatchMore => SceneDescriptor::new(
            "Mars — Patchwork Trap",
            "🧰",
            "Every extra patch costs future missions.",
        ),
        MarsSummit => SceneDescriptor::new(
            "Mars — Tea Time Summit",
            "🫖",
            "They want your purifier module.",
        ),
        MarsGiveModule => SceneDescriptor::new(
            "Mars — Module Removed",
            "🧩",
            "You saved Mars today. You lost the bridge.",
        ),
        MarsRefuseHelp => SceneDescriptor::new(
            "Mars — Temporary Aid Only",
            "🚰",
            "Help without surrender.",
        ),
        CeresArrive => SceneDescriptor::new(
            "Ceres — Asteroid Belt Node",
            "🪨",
            "Fuel vs Time. Extraction vs Recon.",
        ),
        CeresFast => SceneDescriptor::new(
            "Ceres — Fast Extraction",
            "🧊",
            "You get water. You miss the multiplier.",
        ),
        CeresRecon => SceneDescriptor::new(
            "Ceres — Recon Sweep",
            "🛰️",
            "Patience unlocks the hidden prize.",
        ),
        EarthReturn => {
            SceneDescriptor::new("Earth — Return Burn", "🌍", "The system changes here.")
        }
        StrategicVictory => SceneDescriptor::new(
            "Finish Line Unlocked",
            "🏁",
            "Next: Titan — Sophia awaits.",
        ),
        SpencerContinues => SceneDescriptor::new(
            "Mars Trap Ending",
            "🧩",
            "Applause can be a trap. Mobility is the bridge.",
        ),
        StuckNoFunding => SceneDescriptor::new(
            "Short-Term Win, Long-Term Stuck",
            "🌍",
            "Water solves today. Funding scales tomorrow.",
        ),
        MissionComplete => SceneDescriptor::new(
            "Mission Complete",
            "🌍",
            "Try for the Strategic Victory: Recon + Gold + Fuel ≥ 2/3.",
        ),
    }
}

/// Choices offered while the player sits in `scene`. Transient scenes offer
/// nothing.
pub fn choices(scene: Scene) -> ChoiceSet {
    use ButtonStyle::*;
    use Scene::*;
    match scene {
        Intro => ChoiceSet::new(
            "Mars decision (3 options)",
            vec![
                Choice::new(
                    "🚰 Deliver emergency water to Mars (no summit)",
                    Secondary,
                    Action::DeliverWater,
                ),
                Choice::new(
                    "🫖 Attend the Mars summit (Tea Time)",
                    Warn,
                    Action::AttendSummit,
                ),
                Choice::new("🚀 Skip Mars → Go straight to Ceres", Good, Action::HeadToCeres),
            ],
        ),
        MarsDeliver => ChoiceSet::new(
            "Next move",
            vec![
                Choice::new("🚀 Proceed to Ceres", Good, Action::HeadToCeres),
                Choice::new("🫖 Go to the summit anyway", Warn, Action::AttendSummit),
                Choice::new("🔧 Stay and patch more (costs fuel)", Danger, Action::PatchMore),
            ],
        ),
        MarsPatchMore => ChoiceSet::new(
            "Leave or get stuck",
            vec![
                Choice::new("🚀 Leave now → Ceres", Good, Action::HeadToCeres),
                Choice::new("🫖 Summit pressure increases", Warn, Action::AttendSummit),
                Choice::new("🛑 Keep helping (not recommended)", Danger, Action::PatchMore),
            ],
        ),
        MarsSummit => ChoiceSet::new(
            "Summit decision (3 options)",
            vec![
                Choice::new(
                    "🧩 Give up the purifier module (ship grounded)",
                    Danger,
                    Action::GiveUpModule,
                ),
                Choice::new(
                    "🛠 Refuse module, give a small water boost, then leave",
                    Secondary,
                    Action::RefuseButHelp,
                ),
                Choice::new(
                    "🚀 Refuse and depart immediately to Ceres",
                    Good,
                    Action::HeadToCeres,
                ),
            ],
        ),
        MarsRefuseHelp => ChoiceSet::new(
            "Proceed",
            vec![
                Choice::new("🚀 Continue to Ceres", Good, Action::HeadToCeres),
                Choice::new(
                    "🫖 Let the summit continue (pressure rises)",
                    Warn,
                    Action::AttendSummit,
                ),
                Choice::new("🔧 Patch more (fuel cost)", Danger, Action::PatchMore),
            ],
        ),
        CeresArrive => ChoiceSet::new(
            "Ceres decision (3 options)",
            vec![
                Choice::new(
                    "🧊 Land & extract water fast (costs fuel)",
                    Secondary,
                    Action::ExtractFast,
                ),
                Choice::new(
                    "🛰 Recon first (costs time, unlocks gold)",
                    Good,
                    Action::Recon,
                ),
                Choice::new("↩️ Turn back now (no extraction)", Danger, Action::TurnBack),
            ],
        ),
        StrategicVictory => ChoiceSet::new(
            "End of Phase 2",
            vec![Choice::new(
                "Reset and try a different strategy",
                Secondary,
                Action::Reset,
            )],
        ),
        SpencerContinues | StuckNoFunding | MissionComplete => ChoiceSet::new(
            "End of Phase 2",
            vec![Choice::new("Reset and try again", Secondary, Action::Reset)],
        ),
        MarsGiveModule | CeresFast | CeresRecon | EarthReturn => ChoiceSet::new("", Vec::new()),
    }
}

/// Header shown after a snapshot has been loaded.
pub fn restored_scene() -> SceneDescriptor {
    SceneDescriptor::new("Loaded State", "🌕", "Meters restored. Start again.")
}

pub fn restored_choices() -> ChoiceSet {
    ChoiceSet::new(
        "Restart Phase 2",
        vec![Choice::new("Start", ButtonStyle::Good, Action::Start)],
    )
}

/// The ending dialog for a terminal scene, or `None` for any other scene.
pub fn modal(scene: Scene) -> Option<ModalPayload> {
    let close = Choice::new("Close", ButtonStyle::Secondary, Action::Dismiss);
    let (title, body, reset) = match scene {
        Scene::StrategicVictory => (
            "🏁 Finish Line Unlocked",
            vec![
                "🏁 STRATEGIC VICTORY",
                "Earth is now 5/5 and stable. Mars is funded, fueled, and supported in perpetuity.",
                "Gold funded 10 purification systems and new ships. People on Earth can chase their own comets now.",
                "Charity Water One doesn’t stay for applause. It leaves.",
                "🏁🏁🏁",
                "Next: Titan — Sophia awaits.",
            ],
            Choice::new("Reset (play again)", ButtonStyle::Secondary, Action::Reset),
        ),
        Scene::SpencerContinues => (
            "Mars Trap Ending",
            vec![
                "ENDING: You saved Mars today… but grounded the ship.",
                "The purifier module stays on Mars. Charity Water One becomes infrastructure.",
                "Carrot: Spencer continues the mission without you. He reaches Titan. You never do.",
                "Lesson: applause can be a trap. Mobility is the bridge.",
            ],
            Choice::new("Try again", ButtonStyle::Secondary, Action::Reset),
        ),
        Scene::StuckNoFunding => (
            "Short-Term Win, Long-Term Stuck",
            vec![
                "ENDING: Mission success… but expansion fails.",
                "You delivered water. Everyone feels relief.",
                "But you skipped recon, so you missed the gold funding. Without money, you can't buy new purification systems on Earth.",
                "And when you got stuck anyway, the purifier ends up used on Mars no matter what. You could have brought 10 systems back.",
                "Lesson: water solves today. funding scales tomorrow.",
            ],
            Choice::new("Try again (do recon)", ButtonStyle::Good, Action::Reset),
        ),
        Scene::MissionComplete => (
            "Mission Complete",
            vec![
                "Mission Complete",
                "You finished the run.",
                "Try for the Strategic Victory: Recon + Gold + Fuel ≥ 2/3.",
            ],
            Choice::new("Play again", ButtonStyle::Secondary, Action::Reset),
        ),
        _ => return None,
    };

    Some(ModalPayload {
        title: title.to_string(),
        body: body.into_iter().map(str::to_string).collect(),
        actions: vec![reset, close],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scene_has_a_header() {
        for scene in Scene::ALL {
            let header = describe(scene);
            assert!(!header.title.is_empty(), "{scene} has no title");
            assert!(!header.art.is_empty(), "{scene} has no art");
        }
    }

    #[test]
    fn waiting_scenes_offer_two_or_three_choices() {
        for scene in Scene::ALL {
            let set = choices(scene);
            if scene.is_transient() {
                assert!(set.choices.is_empty(), "{scene} should offer nothing");
            } else if scene.is_terminal() {
                assert_eq!(set.actions(), vec![Action::Reset]);
            } else {
                assert!(
                    (2..=3).contains(&set.choices.len()),
                    "{scene} offers {} choices",
                    set.choices.len()
                );
            }
        }
    }

    #[test]
    fn intro_choice_order() {
        assert_eq!(
            choices(Scene::Intro).actions(),
            vec![
                Action::DeliverWater,
                Action::AttendSummit,
                Action::HeadToCeres
            ]
        );
    }

    #[test]
    fn modal_only_for_endings() {
        for scene in Scene::ALL {
            assert_eq!(modal(scene).is_some(), scene.is_terminal(), "{scene}");
        }
    }

    #[test]
    fn modal_offers_reset_and_dismiss() {
        let payload = modal(Scene::StuckNoFunding).unwrap();
        let actions: Vec<Action> = payload.actions.iter().map(|c| c.action).collect();
        assert_eq!(actions, vec![Action::Reset, Action::Dismiss]);
        assert_eq!(payload.actions[0].label, "Try again (do recon)");
        assert_eq!(payload.actions[0].style, ButtonStyle::Good);
    }

    #[test]
    fn restored_view_offers_only_start() {
        assert_eq!(restored_choices().actions(), vec![Action::Start]);
        assert_eq!(restored_scene().title, "Loaded State");
    }
}
