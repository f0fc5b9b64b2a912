use std::process;

use sim_lib::cpu::SimPolicy;
use sim_lib::error::SimulatorResult;
use sim_lib::run_wrapper::run;

fn main() {
    if let Err(e) = run_eval() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_eval() -> SimulatorResult<()> {
    let output_path = "eval/suite_eval.csv".to_string();
    let mut writer = csv::Writer::from_path(&output_path).map_err(|e| {
        sim_lib::error::SimulatorError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to create CSV file '{}': {}", output_path, e),
        ))
    })?;

    writer
        .write_record(["Program", "Steps", "Cycles", "Bubbles", "Result"])
        .map_err(|e| {
            sim_lib::error::SimulatorError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to write header to CSV: {}", e),
            ))
        })?;

    // Step and cycle counts are sized so every program has fully retired
    let programs = vec![
        ("add-forward", 12u64, 12u64),
        ("immediates", 10, 10),
        ("stack", 12, 12),
        ("jump-padded", 10, 13),
        ("bubble", 11, 12),
    ];

    for (program, steps, cycles) in programs {
        let image_path = format!("progs/{}.txt", program);
        eprintln!("Running program: {}", image_path);

        match run(&image_path, steps, cycles, SimPolicy::default()) {
            Ok(report) => {
                writer
                    .write_record([
                        program,
                        &report.steps.to_string(),
                        &report.cycles.to_string(),
                        &report.bubbles.to_string(),
                        "equivalent",
                    ])
                    .map_err(|e| {
                        sim_lib::error::SimulatorError::IoError(
                            std::io::Error::new(
                                std::io::ErrorKind::Other,
                                format!("Failed to write record to CSV: {}", e),
                            ),
                        )
                    })?;
            }
            Err(e) => {
                eprintln!(
                    "Warning: Failed to run program '{}': {}",
                    program, e
                );
                writer
                    .write_record([program, "-", "-", "-", "Error"])
                    .map_err(|e| {
                        sim_lib::error::SimulatorError::IoError(
                            std::io::Error::new(
                                std::io::ErrorKind::Other,
                                format!("Failed to write record to CSV: {}", e),
                            ),
                        )
                    })?;
            }
        }
    }

    Ok(())
}
