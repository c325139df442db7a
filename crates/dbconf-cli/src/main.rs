use std::process::ExitCode;

fn main() -> ExitCode {
    dbconf_cli::run()
}
