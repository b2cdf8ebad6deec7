use std::process::ExitCode;

fn main() -> ExitCode {
    bottler_cli::run()
}
