/// Strategic Victory — skips Mars, runs recon at Ceres, and saves the result.
///
/// Run with: cargo run --example strategic_victory
/// Set RUST_LOG=ceres_run=debug to see every dispatched action.

use ceres_run::core::engine::{Frame, MissionEngine};
use ceres_run::core::store::FileStore;
use ceres_run::schema::action::Action;
use ceres_run::schema::log::LogEntry;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    let mut engine = MissionEngine::default();

    println!("========================================");
    println!("   CHARITY WATER ONE — PHASE 2");
    println!("   Route: Moon → Ceres (recon) → Earth");
    println!("========================================");
    println!();

    print_lines(engine.transcript());
    print_frame(&engine.frame());

    for action in [Action::HeadToCeres, Action::Recon] {
        println!(">>> {action}");
        let effects = engine
            .dispatch(action)
            .expect("action should be offered on this route");
        print_lines(&effects.lines);
        print_frame(&engine.frame());
    }

    let save_dir = std::env::temp_dir().join("ceres-run-demo");
    let mut store = FileStore::new(&save_dir);
    match engine.save(&mut store) {
        Ok(()) => println!("Snapshot written to {}", store.slot_path(engine.save_slot()).display()),
        Err(e) => println!("Could not save: {e}"),
    }
}

fn print_lines(lines: &[LogEntry]) {
    for line in lines {
        println!("  [{}] {}", line.speaker.name(), line.text);
    }
    println!();
}

fn print_frame(frame: &Frame) {
    println!("--- {} {} ---", frame.scene.art, frame.scene.title);
    println!("    {}", frame.scene.hint);
    for meter in &frame.meters.meters {
        println!("    {:<12} {:>6}", meter.label, meter.text);
    }
    println!("    {}", frame.meters.ship);
    println!("    {}", frame.meters.outcome);

    if let Some(modal) = &frame.modal {
        println!();
        println!("    == {} ==", modal.title);
        for paragraph in &modal.body {
            println!("    {paragraph}");
        }
    }

    if !frame.choices.choices.is_empty() {
        println!("  {}:", frame.choices.title);
        for choice in &frame.choices.choices {
            println!("    - {} ({})", choice.label, choice.action);
        }
    }
    println!();
}
