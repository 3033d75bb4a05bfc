use std::process::exit;

fn main() {
    if let Err(e) = uchart::cli::run() {
        eprintln!("{e}");
        exit(e.exit_code());
    }
}
