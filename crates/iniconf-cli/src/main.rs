use std::process::ExitCode;

fn main() -> ExitCode {
    iniconf_cli::run()
}
