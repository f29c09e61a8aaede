//! rVisitlog main entrypoint.

use rvisitlog::run;
use rvisitlog::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
