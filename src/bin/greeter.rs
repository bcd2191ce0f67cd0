//! A window with one button that says "It worked!" once pressed.

use std::process::ExitCode;

use click_tutorials::cushy_frontend;

fn main() -> ExitCode {
    click_tutorials::initialize_tracing();
    cushy_frontend::run_greeter().into()
}
