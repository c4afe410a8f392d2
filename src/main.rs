use std::env;
use std::path::Path;

mod assembly;
mod datatypes;
mod error;
mod mesher;
mod motion;
mod newmark;
mod post_processor;
mod solver;

use error::ShearwaveError;

fn run(input_file: &str, output_root: &str) -> Result<(), ShearwaveError> {
    let (material, sim, mesh) = mesher::run(input_file)?;

    let histories = solver::run(&material, &sim, &mesh)?;

    let data_dir = post_processor::run(&histories, &material, &sim, output_root)?;

    let plotter_path = Path::new("scripts/plot.py");
    if plotter_path.exists() {
        post_processor::pyplot(&data_dir, plotter_path)?;
    } else {
        println!(
            "warning: plotter script {} not found, skipping plot",
            plotter_path.display()
        );
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        println!("usage: shearwave <input_json> <output_dir>");
        std::process::exit(1);
    }

    if let Err(err) = run(args[1].as_str(), args[2].as_str()) {
        println!("fatal: {}", err);
        std::process::exit(1);
    }
}
