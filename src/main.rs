use std::io;
use std::process::ExitCode;

use clap::Parser;
use mergu::cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();

    if args.log {
        if let Err(err) =
            simple_logging::log_to_file(mergu::LOG_FILE_NAME, log::LevelFilter::Debug)
        {
            eprintln!("mergu: {}", mergu::Error::OpenLogFile(err));
            return ExitCode::from(2);
        }
    }

    let mut out = io::BufWriter::new(io::stdout().lock());
    match mergu::run(&args, &mut out) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(err) => {
            eprintln!("mergu: {}", err);
            ExitCode::from(2)
        }
    }
}
