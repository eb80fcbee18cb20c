/// Property tests — random action sequences never break the state invariants.

use ceres_run::core::engine::MissionEngine;
use ceres_run::schema::action::Action;
use ceres_run::schema::state::{GameState, FUEL_MAX, TIME_MAX, WATER_MAX};
use proptest::prelude::*;

fn any_action() -> impl Strategy<Value = Action> {
    proptest::sample::select(Action::ALL.to_vec())
}

fn assert_in_range(state: &GameState) {
    assert!(state.fuel_thirds <= FUEL_MAX, "fuel {}", state.fuel_thirds);
    assert!(state.earth_water <= WATER_MAX, "earth {}", state.earth_water);
    assert!(state.mars_water <= WATER_MAX, "mars {}", state.mars_water);
    assert!(state.time <= TIME_MAX, "time {}", state.time);
}

proptest! {
    #[test]
    fn meters_stay_in_range(actions in prop::collection::vec(any_action(), 0..60)) {
        let mut engine = MissionEngine::default();
        for action in actions {
            let _ = engine.dispatch(action);
            assert_in_range(engine.state());
        }
    }

    #[test]
    fn ship_never_becomes_mobile_again(actions in prop::collection::vec(any_action(), 0..60)) {
        let mut engine = MissionEngine::default();
        let mut grounded = false;
        for action in actions {
            let _ = engine.dispatch(action);
            if action == Action::Reset {
                grounded = false;
            }
            if grounded {
                prop_assert!(!engine.state().ship_mobile);
            }
            grounded = !engine.state().ship_mobile;
        }
    }

    #[test]
    fn ending_is_fixed_once_reached(actions in prop::collection::vec(any_action(), 0..60)) {
        let mut engine = MissionEngine::default();
        let mut ending: Option<String> = None;
        for action in actions {
            let _ = engine.dispatch(action);
            if action == Action::Reset {
                ending = None;
            }
            let current = engine.state().ending.clone();
            if let Some(fixed) = &ending {
                prop_assert_eq!(fixed, &current);
            } else if engine.state().is_finished() {
                ending = Some(current);
            }
        }
    }

    #[test]
    fn reset_always_restores_the_initial_snapshot(
        actions in prop::collection::vec(any_action(), 0..40)
    ) {
        let mut engine = MissionEngine::default();
        for action in actions {
            let _ = engine.dispatch(action);
        }
        engine.dispatch(Action::Reset).unwrap();
        prop_assert_eq!(engine.state(), &GameState::initial());
        prop_assert!(engine.modal().is_none());
        let fresh = MissionEngine::default();
        prop_assert_eq!(engine.transcript(), fresh.transcript());
    }

    #[test]
    fn rejected_actions_change_nothing(actions in prop::collection::vec(any_action(), 0..40)) {
        let mut engine = MissionEngine::default();
        for action in actions {
            let before = engine.state().clone();
            let lines = engine.transcript().len();
            if engine.dispatch(action).is_err() {
                prop_assert_eq!(engine.state(), &before);
                prop_assert_eq!(engine.transcript().len(), lines);
            }
        }
    }
}
