use std::env;
use std::process;

use holonet::cli;

fn main() {
    cli::init_tracing();
    let args: Vec<String> = env::args().collect();
    process::exit(cli::run_with_args(&args));
}
