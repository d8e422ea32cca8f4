//! Keypad session demo
//!
//! Drives the calculator through the mock page and prints the display after
//! each key, including an error that clears itself.
//!
//! Run with: RUST_LOG=desk_calculator=debug cargo run --example keypad_session

use desk_calculator::config::EngineConfig;
use desk_calculator::engine::ManualClock;
use desk_calculator::logging;
use desk_calculator::wasm::WasmDriver;

fn show(driver: &WasmDriver<ManualClock>, label: &str) {
    println!(
        "{label:>10} │ {:>16} │ {:<16}",
        driver.result_text(),
        driver.calculation_text()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("desk_calculator=info");

    let clock = ManualClock::new();
    let mut driver = WasmDriver::with_clock(EngineConfig::default(), clock.clone())?;

    println!("{:>10} │ {:>16} │ {:<16}", "key", "result", "calculation");
    println!("{}", "─".repeat(48));
    show(&driver, "");

    for key in [
        "1", "2", "3", "4", "*", "+", "-", "5", "6", "Enter", "_", "M", "%",
    ] {
        driver.press_key(key);
        show(&driver, key);
    }

    for id in ["btn-ms", "btn-clear", "btn-mr", "btn-divide", "btn-0", "btn-equals"] {
        driver.click(id);
        show(&driver, id);
    }

    clock.advance_ms(1000);
    if driver.poll() {
        show(&driver, "(1s later)");
    }

    println!("\nHistory:");
    for line in driver.history_items() {
        println!("  {line}");
    }
    Ok(())
}
