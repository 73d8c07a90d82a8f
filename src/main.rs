//! polierlog main entrypoint.

use polierlog::run;
use polierlog::ui::messages::report_error;

fn main() {
    if let Err(e) = run() {
        report_error(&e);
        std::process::exit(1);
    }
}
