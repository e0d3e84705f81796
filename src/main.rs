//! healthtwin main entrypoint.

use healthtwin::run;
use healthtwin::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
