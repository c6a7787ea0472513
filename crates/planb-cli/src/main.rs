use clap::Parser;
use planb_cli::{Cli, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Piping into `head` must not panic on a closed stdout.
    #[cfg(unix)]
    reset_sigpipe();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
