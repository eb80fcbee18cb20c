use serde::{Deserialize, Serialize};

use super::scene::Scene;

/// Upper bound of the fuel meter, in thirds of a tank.
pub const FUEL_MAX: u8 = 3;
/// Upper bound of both water meters.
pub const WATER_MAX: u8 = 5;
/// Upper bound of the mission clock.
pub const TIME_MAX: u8 = 10;

/// Ending label carried by a run that has not finished yet.
pub const IN_PROGRESS: &str = "In progress";

/// The four ways a run can finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ending {
    /// The purifier module stayed on Mars and the ship cannot leave.
    Grounded,
    /// Recon found gold and enough fuel is left to push on to Titan.
    StrategicVictory,
    /// Water reached Earth, but without gold there is no funding.
    StuckNoFunding,
    /// Any other finished run.
    MissionComplete,
}

impl Ending {
    /// The outcome label stored in [`GameState::ending`].
    pub fn label(&self) -> &'static str {
        match self {
            Self::Grounded => "Grounded on Mars",
            Self::StrategicVictory => "Strategic Victory (Titan unlocked)",
            Self::StuckNoFunding => "Short-term success, long-term stuck",
            Self::MissionComplete => "Mission complete",
        }
    }

    /// The terminal scene this ending lands on.
    pub fn scene(&self) -> Scene {
        match self {
            Self::Grounded => Scene::SpencerContinues,
            Self::StrategicVictory => Scene::StrategicVictory,
            Self::StuckNoFunding => Scene::StuckNoFunding,
            Self::MissionComplete => Scene::MissionComplete,
        }
    }
}

/// The single mutable record of a play session.
///
/// Field names serialize in camelCase so a snapshot keeps the same shape
/// across the WASM boundary and on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub scene: Scene,
    pub ship_mobile: bool,
    pub fuel_thirds: u8,
    pub earth_water: u8,
    pub mars_water: u8,
    pub time: u8,
    pub gold_found: bool,
    pub ending: String,
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

impl GameState {
    /// The fixed snapshot every session starts from.
    pub fn initial() -> Self {
        Self {
            scene: Scene::Intro,
            ship_mobile: true,
            fuel_thirds: FUEL_MAX,
            earth_water: 3,
            mars_water: 0,
            time: 0,
            gold_found: false,
            ending: IN_PROGRESS.to_string(),
        }
    }

    pub fn spend_fuel(&mut self, thirds: i16) {
        self.fuel_thirds = clamp_add(self.fuel_thirds, -thirds, FUEL_MAX);
    }

    pub fn refuel(&mut self, thirds: i16) {
        self.fuel_thirds = clamp_add(self.fuel_thirds, thirds, FUEL_MAX);
    }

    pub fn add_time(&mut self, units: i16) {
        self.time = clamp_add(self.time, units, TIME_MAX);
    }

    pub fn add_earth_water(&mut self, units: i16) {
        self.earth_water = clamp_add(self.earth_water, units, WATER_MAX);
    }

    pub fn add_mars_water(&mut self, units: i16) {
        self.mars_water = clamp_add(self.mars_water, units, WATER_MAX);
    }

    /// Leave the purifier module behind. There is no way back.
    pub fn ground_ship(&mut self) {
        self.ship_mobile = false;
    }

    /// True once an ending label has been written.
    pub fn is_finished(&self) -> bool {
        self.ending != IN_PROGRESS
    }

    /// Record the run's outcome. A finished run keeps its first ending.
    pub fn finish(&mut self, ending: Ending) -> bool {
        if self.is_finished() {
            return false;
        }
        self.ending = ending.label().to_string();
        self.scene = ending.scene();
        true
    }

    /// Reopen a finished run, used when a restored snapshot is replayed.
    pub fn reopen(&mut self) {
        self.ending = IN_PROGRESS.to_string();
    }

    /// Meter and status readouts in display order.
    pub fn meters(&self) -> MeterPanel {
        MeterPanel {
            meters: vec![
                MeterReading::fraction("Fuel", self.fuel_thirds, FUEL_MAX),
                MeterReading::fraction("Earth water", self.earth_water, WATER_MAX),
                MeterReading::fraction("Mars water", self.mars_water, WATER_MAX),
                MeterReading::fraction("Time", self.time, TIME_MAX),
                MeterReading {
                    label: "Gold".to_string(),
                    text: if self.gold_found { "Found" } else { "Hidden" }.to_string(),
                    percent: if self.gold_found { 100 } else { 0 },
                },
            ],
            ship: if self.ship_mobile {
                "Ship: Mobile".to_string()
            } else {
                "Ship: Grounded (module left on Mars)".to_string()
            },
            outcome: format!("Outcome: {}", self.ending),
        }
    }
}

/// Add a signed delta to a meter, saturating at `0` and `max`.
pub fn clamp_add(value: u8, delta: i16, max: u8) -> u8 {
    let next = i16::from(value).saturating_add(delta);
    // Always within 0..=max, so the narrowing cast is lossless.
    next.clamp(0, i16::from(max)) as u8
}

/// One meter bar as the presentation layer draws it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterReading {
    pub label: String,
    pub text: String,
    /// Fill level, 0..=100.
    pub percent: u8,
}

impl MeterReading {
    fn fraction(label: &str, value: u8, max: u8) -> Self {
        let shown = value.min(max);
        Self {
            label: label.to_string(),
            text: format!("{value}/{max}"),
            percent: (u16::from(shown) * 100 / u16::from(max)) as u8,
        }
    }
}

/// All meters plus the ship and outcome status pills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterPanel {
    pub meters: Vec<MeterReading>,
    pub ship: String,
    pub outcome: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_snapshot() {
        let state = GameState::initial();
        assert_eq!(state.scene, Scene::Intro);
        assert!(state.ship_mobile);
        assert_eq!(state.fuel_thirds, 3);
        assert_eq!(state.earth_water, 3);
        assert_eq!(state.mars_water, 0);
        assert_eq!(state.time, 0);
        assert!(!state.gold_found);
        assert_eq!(state.ending, "In progress");
        assert_eq!(GameState::default(), state);
    }

    #[test]
    fn clamp_add_saturates_both_ends() {
        assert_eq!(clamp_add(0, -1, 3), 0);
        assert_eq!(clamp_add(3, 1, 3), 3);
        assert_eq!(clamp_add(2, 1, 3), 3);
        assert_eq!(clamp_add(5, -2, 5), 3);
        assert_eq!(clamp_add(9, i16::MIN, 10), 0);
        assert_eq!(clamp_add(9, i16::MAX, 10), 10);
    }

    #[test]
    fn meters_never_leave_their_ranges() {
        let mut state = GameState::initial();
        for _ in 0..6 {
            state.spend_fuel(1);
            state.add_time(3);
            state.add_earth_water(2);
            state.add_mars_water(2);
        }
        assert_eq!(state.fuel_thirds, 0);
        assert_eq!(state.time, TIME_MAX);
        assert_eq!(state.earth_water, WATER_MAX);
        assert_eq!(state.mars_water, WATER_MAX);

        state.refuel(10);
        assert_eq!(state.fuel_thirds, FUEL_MAX);
    }

    #[test]
    fn finish_keeps_first_ending() {
        let mut state = GameState::initial();
        assert!(!state.is_finished());
        assert!(state.finish(Ending::StuckNoFunding));
        assert_eq!(state.scene, Scene::StuckNoFunding);

        assert!(!state.finish(Ending::MissionComplete));
        assert_eq!(state.ending, "Short-term success, long-term stuck");
        assert_eq!(state.scene, Scene::StuckNoFunding);
    }

    #[test]
    fn ending_labels_and_scenes() {
        assert_eq!(Ending::Grounded.label(), "Grounded on Mars");
        assert_eq!(Ending::Grounded.scene(), Scene::SpencerContinues);
        assert_eq!(
            Ending::StrategicVictory.label(),
            "Strategic Victory (Titan unlocked)"
        );
        assert_eq!(Ending::MissionComplete.scene(), Scene::MissionComplete);
    }

    #[test]
    fn meter_panel_readouts() {
        let mut state = GameState::initial();
        state.spend_fuel(1);
        state.gold_found = true;
        state.ground_ship();

        let panel = state.meters();
        assert_eq!(panel.meters[0].text, "2/3");
        assert_eq!(panel.meters[0].percent, 66);
        assert_eq!(panel.meters[1].text, "3/5");
        assert_eq!(panel.meters[1].percent, 60);
        assert_eq!(panel.meters[3].text, "0/10");
        assert_eq!(panel.meters[4].text, "Found");
        assert_eq!(panel.meters[4].percent, 100);
        assert_eq!(panel.ship, "Ship: Grounded (module left on Mars)");
        assert_eq!(panel.outcome, "Outcome: In progress");
    }

    #[test]
    fn snapshot_uses_camel_case_fields() {
        let text = ron::to_string(&GameState::initial()).unwrap();
        assert!(text.contains("shipMobile"), "got: {text}");
        assert!(text.contains("fuelThirds"));
        assert!(text.contains("INTRO"));
    }
}
