use std::process::ExitCode;

fn main() -> ExitCode {
    match jarvis_core::run(std::env::args_os().collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("jarvis: {err:#}");
            ExitCode::FAILURE
        }
    }
}
