use std::process::ExitCode;

use gl_smoke::{logging, run_suite};
use gl_smoke_glow::HeadlessContext;
use gl_smoke_glow::cli::{Command, USAGE, parse_args};

fn main() -> ExitCode {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{}\n\n{}", err, USAGE);
            return ExitCode::from(2);
        }
    };

    match &options.log_filter {
        Some(filter) => logging::init_tracing_with_filter(filter),
        None => logging::init_tracing(),
    }

    let context = match HeadlessContext::create(&options.context) {
        Ok(context) => context,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(2);
        }
    };

    let report = run_suite(&context.api(), &options.suite_options());
    println!("{}", report);
    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
