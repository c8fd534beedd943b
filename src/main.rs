use std::process::ExitCode;

fn main() -> ExitCode {
    match model_refresh::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}
