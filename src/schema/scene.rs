use serde::{Deserialize, Serialize};
use std::fmt;

/// A node in the mission's narrative graph.
///
/// Transient scenes (`MarsGiveModule`, `CeresFast`, `CeresRecon`,
/// `EarthReturn`) are passed through within a single action and never wait
/// for input. The last four variants are endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scene {
    Intro,
    MarsDeliver,
    MarsPatchMore,
    MarsSummit,
    MarsGiveModule,
    MarsRefuseHelp,
    CeresArrive,
    CeresFast,
    CeresRecon,
    EarthReturn,
    StrategicVictory,
    SpencerContinues,
    StuckNoFunding,
    MissionComplete,
}

impl Scene {
    pub const ALL: [Scene; 14] = [
        Self::Intro,
        Self::MarsDeliver,
        Self::MarsPatchMore,
        Self::MarsSummit,
        Self::MarsGiveModule,
        Self::MarsRefuseHelp,
        Self::CeresArrive,
        Self::CeresFast,
        Self::CeresRecon,
        Self::EarthReturn,
        Self::StrategicVictory,
        Self::SpencerContinues,
        Self::StuckNoFunding,
        Self::MissionComplete,
    ];

    /// Identifier used in snapshots and across the WASM boundary.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Intro => "INTRO",
            Self::MarsDeliver => "MARS_DELIVER",
            Self::MarsPatchMore => "MARS_PATCH_MORE",
            Self::MarsSummit => "MARS_SUMMIT",
            Self::MarsGiveModule => "MARS_GIVE_MODULE",
            Self::MarsRefuseHelp => "MARS_REFUSE_HELP",
            Self::CeresArrive => "CERES_ARRIVE",
            Self::CeresFast => "CERES_FAST",
            Self::CeresRecon => "CERES_RECON",
            Self::EarthReturn => "EARTH_RETURN",
            Self::StrategicVictory => "STRATEGIC_VICTORY",
            Self::SpencerContinues => "SPENCER_CONTINUES",
            Self::StuckNoFunding => "STUCK_NO_FUNDING",
            Self::MissionComplete => "MISSION_COMPLETE",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::StrategicVictory
                | Self::SpencerContinues
                | Self::StuckNoFunding
                | Self::MissionComplete
        )
    }

    /// Scenes the engine only passes through inside a single action.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::MarsGiveModule | Self::CeresFast | Self::CeresRecon | Self::EarthReturn
        )
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_serialized_names() {
        for scene in Scene::ALL {
            let text = ron::to_string(&scene).unwrap();
            assert_eq!(text, scene.id());
        }
    }

    #[test]
    fn terminal_and_transient_are_disjoint() {
        let terminal = Scene::ALL.iter().filter(|s| s.is_terminal()).count();
        let transient = Scene::ALL.iter().filter(|s| s.is_transient()).count();
        assert_eq!(terminal, 4);
        assert_eq!(transient, 4);
        assert!(Scene::ALL
            .iter()
            .all(|s| !(s.is_terminal() && s.is_transient())));
        assert!(!Scene::Intro.is_terminal());
    }
}
