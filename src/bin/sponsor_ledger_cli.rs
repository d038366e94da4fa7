use sponsor_ledger::cli::{output::print_error, run_cli};

fn main() {
    if let Err(err) = run_cli() {
        print_error(err);
        std::process::exit(1);
    }
}
