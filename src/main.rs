use std::process::ExitCode;

use lv_cli::ui::output;

fn main() -> ExitCode {
    match lv_cli::cli::run() {
        Ok(code) => code,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
