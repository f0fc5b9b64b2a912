use sim_lib::cpu::SimPolicy;
use sim_lib::error::{SimulatorError, SimulatorResult};
use sim_lib::run_wrapper;
use std::env;
use std::process;

const USAGE: &str = "usage: sim <steps> <cycles> <image-file> [-v] [-h]";

fn parse_count(name: &'static str, text: &str) -> SimulatorResult<u64> {
    let value: i64 = text
        .parse()
        .map_err(|_| SimulatorError::CountParseError(name, text.to_string()))?;
    if value < 0 {
        return Err(SimulatorError::NegativeCountError(name, value));
    }
    Ok(value as u64)
}

fn run() -> SimulatorResult<()> {
    let mut args = env::args().skip(1);

    let steps_arg = args
        .next()
        .ok_or_else(|| SimulatorError::UsageError("missing <steps>".to_string()))?;
    let cycles_arg = args
        .next()
        .ok_or_else(|| SimulatorError::UsageError("missing <cycles>".to_string()))?;
    let image_file = args
        .next()
        .ok_or_else(|| SimulatorError::UsageError("missing <image-file>".to_string()))?;

    let steps = parse_count("<steps>", &steps_arg)?;
    let cycles = parse_count("<cycles>", &cycles_arg)?;

    let mut policy = SimPolicy::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" => policy.verbose = true,
            "-h" => policy.history = true,
            _ => {
                return Err(SimulatorError::UsageError(format!(
                    "unknown parameter: {}",
                    arg
                )))
            }
        }
    }

    let report = run_wrapper::run(&image_file, steps, cycles, policy)?;

    println!(
        "equivalent: {} reference steps and {} pipeline cycles ({} bubbles) reach the same state",
        report.steps, report.cycles, report.bubbles
    );

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{}", error);
        if let SimulatorError::UsageError(_) = error {
            eprintln!("{}", USAGE);
        }
        process::exit(error.exit_code());
    }
}
