use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A player-selectable choice.
///
/// Choices that behave identically share one action, whatever scene offers
/// them; the per-scene label lives with the scene content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    DeliverWater,
    AttendSummit,
    HeadToCeres,
    PatchMore,
    GiveUpModule,
    RefuseButHelp,
    ExtractFast,
    Recon,
    TurnBack,
    /// Replay a restored snapshot from the briefing.
    Start,
    Reset,
    /// Close an ending's modal.
    Dismiss,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown action identifier: {0:?}")]
pub struct ParseActionError(pub String);

impl Action {
    pub const ALL: [Action; 12] = [
        Self::DeliverWater,
        Self::AttendSummit,
        Self::HeadToCeres,
        Self::PatchMore,
        Self::GiveUpModule,
        Self::RefuseButHelp,
        Self::ExtractFast,
        Self::Recon,
        Self::TurnBack,
        Self::Start,
        Self::Reset,
        Self::Dismiss,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::DeliverWater => "deliver_water",
            Self::AttendSummit => "attend_summit",
            Self::HeadToCeres => "head_to_ceres",
            Self::PatchMore => "patch_more",
            Self::GiveUpModule => "give_up_module",
            Self::RefuseButHelp => "refuse_but_help",
            Self::ExtractFast => "extract_fast",
            Self::Recon => "recon",
            Self::TurnBack => "turn_back",
            Self::Start => "start",
            Self::Reset => "reset",
            Self::Dismiss => "dismiss",
        }
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|action| action.id() == wanted)
            .ok_or_else(|| ParseActionError(s.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
