use std::process::ExitCode;

use tagver::ui::output;

fn main() -> ExitCode {
    match tagver::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
