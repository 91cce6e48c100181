//! Renders every step of the walkthrough to PNG and prints its readouts.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use dca_viz::api::{
    ChartConfig, HeadlessNavigation, LineChart, ManualTickScheduler, VisualizationController,
};
use dca_viz::core::Viewport;
use dca_viz::render::CairoRenderer;
use tracing::info;

const DEFAULT_OUTPUT_ROOT: &str = "target/dca_steps";
const DEFAULT_WIDTH: u32 = 960;
const DEFAULT_HEIGHT: u32 = 600;
const LOG_DIRECTIVES: &str = "warn,dca_viz=info,render_dca_steps=info";

struct CliArgs {
    output_root: PathBuf,
    write_json: bool,
}

fn main() {
    let _ = dca_viz::telemetry::init_tracing_with_fallback(LOG_DIRECTIVES);
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    fs::create_dir_all(&args.output_root).map_err(|err| {
        format!(
            "failed to create output directory `{}`: {err}",
            args.output_root.display()
        )
    })?;

    let viewport = Viewport::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    let renderer =
        CairoRenderer::new(DEFAULT_WIDTH as i32, DEFAULT_HEIGHT as i32).map_err(|e| e.to_string())?;
    let chart =
        LineChart::new(renderer, ChartConfig::dca_default(), viewport).map_err(|e| e.to_string())?;
    let mut controller = VisualizationController::new(
        chart,
        HeadlessNavigation::default(),
        ManualTickScheduler::default(),
    )
    .map_err(|e| e.to_string())?;

    loop {
        let index = controller.state().current_step_index();
        let readouts = controller.readouts();
        info!(
            step = %readouts.step_title,
            point = %readouts.current_point,
            value = %readouts.current_value,
            subgradient = %readouts.subgradient,
            "{}",
            readouts.step_description
        );

        let png_path = args.output_root.join(format!("step_{}.png", index + 1));
        let file = File::create(&png_path)
            .map_err(|err| format!("failed to create `{}`: {err}", png_path.display()))?;
        controller
            .chart()
            .renderer()
            .write_png(&mut BufWriter::new(file))
            .map_err(|e| e.to_string())?;

        if args.write_json {
            let json_path = args.output_root.join(format!("step_{}.json", index + 1));
            let json = controller
                .snapshot()
                .to_json_contract_v1_pretty()
                .map_err(|e| e.to_string())?;
            fs::write(&json_path, json)
                .map_err(|err| format!("failed to write `{}`: {err}", json_path.display()))?;
        }

        if !controller.go_next().map_err(|e| e.to_string())?.is_applied() {
            break;
        }
    }

    println!(
        "wrote {} steps to {}",
        controller.steps().len(),
        args.output_root.display()
    );
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut output_root = PathBuf::from(DEFAULT_OUTPUT_ROOT);
    let mut write_json = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output-root" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output-root".to_owned())?;
                output_root = PathBuf::from(value);
            }
            "--json" => write_json = true,
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs {
        output_root,
        write_json,
    })
}

fn usage_message() -> String {
    format!(
        "usage: render_dca_steps [--output-root <dir>] [--json]\n\n\
         --output-root <dir>  where PNGs are written (default: {DEFAULT_OUTPUT_ROOT})\n\
         --json               also write a snapshot JSON per step"
    )
}
