use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    randseq::logging::init_logging();

    let stdout = io::stdout();
    let stderr = io::stderr();
    randseq::run(std::env::args_os(), &mut stdout.lock(), &mut stderr.lock())
}
