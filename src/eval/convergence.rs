use sim_lib::cpu::MachineState;
use sim_lib::cpu::SimPolicy;
use sim_lib::equivalence::divergence_count;
use sim_lib::loader;
use sim_lib::pipelined;
use sim_lib::reference;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let param_tokens: Vec<String> = std::env::args().collect();
    let image_path =
        param_tokens.get(1).ok_or("You should specify a memory image file")?;
    let max_cycles: u64 = match param_tokens.get(2) {
        Some(text) => text.parse()?,
        None => 40,
    };

    let image = loader::load_image(image_path)?;

    // Plot one line series per lag between the two models
    // For a fixed lag, vary the number of pipeline cycles
    // Performance metric: number of divergent state cells
    let lags = vec![0u64, 1, 2, 3];

    let mut data: Vec<Vec<(u64, usize)>> = vec![vec![]; lags.len()];
    let mut y_max: usize = 0;
    for (i, lag) in lags.iter().enumerate() {
        for cycles in 0..=max_cycles {
            let steps = cycles.saturating_sub(*lag);

            let mut ref_machine = MachineState::make(SimPolicy::default());
            image.apply(&mut ref_machine);
            let mut pipe_machine = ref_machine.clone();

            reference::run(&mut ref_machine, steps);
            pipelined::run(&mut pipe_machine, cycles);

            let count = divergence_count(&ref_machine, &pipe_machine);
            data[i].push((cycles, count));
            y_max = y_max.max(count);
        }
    }

    // Plot the data
    use plotters::prelude::*;

    let image_base_name = String::from(image_path.split('/').last().unwrap());
    let plot_title = format!("Convergence: {}", image_base_name);
    let output_path = format!("eval/convergence_{}.svg", image_base_name);

    let root = SVGBackend::new(output_path.as_str(), (800, 600)).into_drawing_area();
    root.fill(&WHITE).unwrap();

    let mut ctx = ChartBuilder::on(&root)
        .caption(plot_title.as_str(), ("sans-serif", 40).into_font())
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0..max_cycles as i32, 0..(y_max as i32 + 1))
        .unwrap();
    ctx.configure_mesh()
        .x_desc("Pipeline cycles")
        .y_desc("Divergent cells")
        .draw()
        .unwrap();

    for (i, lag) in lags.iter().enumerate() {
        let series = data[i].iter().map(|(x, y)| (*x as i32, *y as i32));
        let label = format!("Steps = cycles - {}", lag);
        let color = Palette99::pick(i).to_rgba();
        ctx.draw_series(LineSeries::new(series, color))
            .unwrap()
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color)
            });
    }

    ctx.configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .unwrap();

    Ok(())
}
