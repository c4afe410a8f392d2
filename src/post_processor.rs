use std::io::Write;
use std::path::{Path, PathBuf};

use nalgebra::DMatrix;

use crate::{
    datatypes::{MaterialParams, SimParams},
    error::ShearwaveError,
    solver::Histories,
};

/// Serializes a history matrix to a delimited text file: one row per node,
/// space-delimited, fixed-point with 12 decimal digits.
///
/// # Arguments
/// * `history` - The `num_nodes x (steps + 1)` history matrix
/// * `path` - The output file path
pub fn save_history(history: &DMatrix<f64>, path: &Path) -> Result<(), ShearwaveError> {
    let mut file = match std::fs::File::create(path) {
        Ok(f) => f,
        Err(err) => {
            return Err(ShearwaveError::PostProcessor(format!(
                "Failed to create {}: {err}",
                path.display()
            )))
        }
    };

    for row in history.row_iter() {
        let line: Vec<String> = row.iter().map(|x| format!("{:.12}", x)).collect();
        if let Err(err) = writeln!(file, "{}", line.join(" ")) {
            return Err(ShearwaveError::PostProcessor(format!(
                "Failed to write {}: {err}",
                path.display()
            )));
        }
    }

    Ok(())
}

/// Parses a history matrix back from the delimited text format
///
/// # Arguments
/// * `path` - The file to read
///
/// # Returns
/// The parsed matrix
#[allow(unused)]
pub fn load_history(path: &Path) -> Result<DMatrix<f64>, ShearwaveError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(err) => {
            return Err(ShearwaveError::PostProcessor(format!(
                "Failed to read {}: {err}",
                path.display()
            )))
        }
    };

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for line in contents.lines() {
        if line.is_empty() {
            continue;
        }

        let mut row: Vec<f64> = Vec::new();
        for token in line.split_whitespace() {
            match token.parse() {
                Ok(v) => row.push(v),
                Err(err) => {
                    return Err(ShearwaveError::PostProcessor(format!(
                        "Non-float value {token:?} in {}: {err}",
                        path.display()
                    )))
                }
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ShearwaveError::PostProcessor(format!(
            "No data rows in {}",
            path.display()
        )));
    }

    let ncols = rows[0].len();
    if rows.iter().any(|r| r.len() != ncols) {
        return Err(ShearwaveError::PostProcessor(format!(
            "Ragged rows in {}",
            path.display()
        )));
    }

    Ok(DMatrix::from_fn(rows.len(), ncols, |i, j| rows[i][j]))
}

/// Dumps the input mappings as human-readable `key: value` text, one file
/// per mapping
fn save_params(
    material: &MaterialParams,
    sim: &SimParams,
    dir: &Path,
) -> Result<(), ShearwaveError> {
    let params_dump = format!(
        "vs: {}\nrho: {}\nvs_rock: {}\nrho_rock: {}\n",
        material.vs, material.rho, material.vs_rock, material.rho_rock
    );
    let sim_dump = format!(
        "name: {}\nrigid: {}\namplitude: {}\nrate: {}\nheight: {}\n\
         element_height: {}\nelement_width: {}\nelement_length: {}\nprint_matrices: {}\n",
        sim.name,
        sim.rigid,
        sim.amplitude,
        sim.rate,
        sim.height,
        sim.elem_height,
        sim.elem_width,
        sim.elem_length,
        sim.print_matrices
    );

    for (fname, dump) in [("saveParams.txt", params_dump), ("saveSim.txt", sim_dump)] {
        let path = dir.join(fname);
        if let Err(err) = std::fs::write(&path, dump) {
            return Err(ShearwaveError::PostProcessor(format!(
                "Failed to write {}: {err}",
                path.display()
            )));
        }
    }

    Ok(())
}

/// Writes the simulation results under `output_root/<sim.name>/`. Refuses
/// to touch an existing save location so prior results are never
/// overwritten.
///
/// # Arguments
/// * `histories` - The solved kinematic histories
/// * `material` - The material parameters
/// * `sim` - The simulation settings
/// * `output_root` - The root output directory
///
/// # Returns
/// The directory the results were written into
pub fn run(
    histories: &Histories,
    material: &MaterialParams,
    sim: &SimParams,
    output_root: &str,
) -> Result<PathBuf, ShearwaveError> {
    let data_dir = Path::new(output_root).join(&sim.name);

    if data_dir.exists() {
        return Err(ShearwaveError::PostProcessor(format!(
            "data save location {} already exists",
            data_dir.display()
        )));
    }

    if let Err(err) = std::fs::create_dir_all(&data_dir) {
        return Err(ShearwaveError::PostProcessor(format!(
            "Failed to create {}: {err}",
            data_dir.display()
        )));
    }

    save_params(material, sim, &data_dir)?;

    save_history(&histories.disp, &data_dir.join("dispData.txt"))?;
    save_history(&histories.vel, &data_dir.join("velData.txt"))?;
    save_history(&histories.acc, &data_dir.join("accData.txt"))?;

    println!("info: wrote output to {}", data_dir.display());

    Ok(data_dir)
}

/// Dispatches the matplotlib plotting script on the saved results
///
/// # Arguments
/// * `data_dir` - The directory holding the saved histories
/// * `plotter_path` - The path to the plotting script
pub fn pyplot(data_dir: &Path, plotter_path: &Path) -> Result<(), ShearwaveError> {
    println!("info: plotting in python...");

    match std::process::Command::new("python")
        .arg(plotter_path)
        .arg(data_dir)
        .output()
    {
        Ok(_out) => Ok(()),
        Err(err) => Err(ShearwaveError::PostProcessor(format!(
            "Failed to run plotter script: {err}"
        ))),
    }
}
