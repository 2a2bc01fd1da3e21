use std::process;

fn main() {
    peseta::init();

    if let Err(err) = peseta::cli::run_cli() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
