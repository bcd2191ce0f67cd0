//! Counts button clicks on a label, with the window described by
//! `counter-layout.toml` in the working directory.

use std::process::ExitCode;

use click_tutorials::context::LAYOUT_PATH;
use click_tutorials::cushy_frontend;

fn main() -> ExitCode {
    click_tutorials::initialize_tracing();
    cushy_frontend::run_counter(LAYOUT_PATH).into()
}
