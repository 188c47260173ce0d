#![forbid(unsafe_code)]

use incremental_life::{log_error, run, Config};

fn main() {
    if let Err(err) = run(Config::default()) {
        log_error("run", err);
        std::process::exit(1);
    }
}
