use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match switchboardd::run_service() {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(io::stdout().lock(), "{error}");
            ExitCode::FAILURE
        }
    }
}
