use std::process;

fn main() {
    process::exit(simplot::cli::run());
}
