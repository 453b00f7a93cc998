use pick_engine::{EngineMode, SelectionEngine};

use super::render::{format_bulk, format_selection};

/// Apply bulk text to a fresh field and print the resulting selection.
pub fn bulk_cmd(mode: EngineMode, raw: &str) {
    let mut engine = SelectionEngine::new("bulk", mode);
    match engine.on_bulk_input(raw) {
        Some(report) => println!("{}", format_bulk(&report)),
        None => println!("bulk entry is disabled in {mode:?} mode"),
    }
    println!("{}", format_selection(engine.selection()));
}
