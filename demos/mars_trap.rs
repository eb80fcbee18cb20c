/// Mars Trap — the summit path where the purifier module is handed over.
///
/// Run with: cargo run --example mars_trap

use ceres_run::core::engine::MissionEngine;
use ceres_run::schema::action::Action;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    let mut engine = MissionEngine::default();

    println!("========================================");
    println!("   CHARITY WATER ONE — THE MARS TRAP");
    println!("========================================");
    println!();

    let route = [
        Action::DeliverWater,
        Action::AttendSummit,
        Action::GiveUpModule,
    ];

    for action in route {
        let scene = engine.scene();
        let label = engine
            .choices()
            .choices
            .into_iter()
            .find(|c| c.action == action)
            .map(|c| c.label)
            .unwrap_or_else(|| action.to_string());
        println!("{} {}  →  {}", scene.art, scene.title, label);

        let effects = engine
            .dispatch(action)
            .expect("action should be offered on this route");
        for line in &effects.lines {
            println!("    [{}] {}", line.speaker.name(), line.text);
        }
        println!();
    }

    let state = engine.state();
    println!("Ship mobile: {}", state.ship_mobile);
    println!("Mars water:  {}/5", state.mars_water);
    println!("Outcome:     {}", state.ending);

    if let Some(modal) = engine.modal() {
        println!();
        println!("== {} ==", modal.title);
        for paragraph in &modal.body {
            println!("{paragraph}");
        }
    }

    // Closing the dialog leaves only the reset choice.
    engine
        .dispatch(Action::Dismiss)
        .expect("ending dialog should be open");
    let remaining: Vec<String> = engine
        .choices()
        .choices
        .into_iter()
        .map(|c| c.label)
        .collect();
    println!();
    println!("Remaining choices: {}", remaining.join(", "));
}
