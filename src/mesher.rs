use json::JsonValue;

use crate::{
    datatypes::{MaterialParams, Mesh, SimParams},
    error::ShearwaveError,
};

/// Parses the input json into a JsonValue object
///
/// # Arguments
/// * `input_file` - The path to the input file
///
/// # Returns
/// A JsonValue object
fn load_input_file(input_file: &str) -> Result<JsonValue, ShearwaveError> {
    let file_string = match std::fs::read_to_string(input_file) {
        Ok(f) => f,
        Err(_err) => {
            return Err(ShearwaveError::Input(format!(
                "Unable to open input file {}",
                input_file
            )))
        }
    };

    let input_file_json = match json::parse(&file_string) {
        Ok(f) => f,
        Err(err) => {
            return Err(ShearwaveError::Input(format!(
                "Error in input file json: {err}"
            )))
        }
    };

    if !input_file_json.has_key("material") {
        return Err(ShearwaveError::Input(
            "Input json missing material section".to_string(),
        ));
    }
    if !input_file_json.has_key("simulation") {
        return Err(ShearwaveError::Input(
            "Input json missing simulation section".to_string(),
        ));
    }

    Ok(input_file_json)
}

/// Reads a required float field out of a json section
fn require_f64(section: &JsonValue, section_name: &str, key: &str) -> Result<f64, ShearwaveError> {
    match section[key].as_f64() {
        Some(v) => Ok(v),
        None => Err(ShearwaveError::Input(format!(
            "Input json missing {key} field in {section_name} section"
        ))),
    }
}

/// Parses material parameters from the input json
///
/// # Arguments
/// * `input_json` - The input file as a JsonValue object
///
/// # Returns
/// A MaterialParams instance
fn parse_material_params(input_json: &JsonValue) -> Result<MaterialParams, ShearwaveError> {
    let material = &input_json["material"];

    let params = MaterialParams {
        vs: require_f64(material, "material", "vs")?,
        rho: require_f64(material, "material", "rho")?,
        vs_rock: require_f64(material, "material", "vs_rock")?,
        rho_rock: require_f64(material, "material", "rho_rock")?,
    };

    for (name, value) in [
        ("vs", params.vs),
        ("rho", params.rho),
        ("vs_rock", params.vs_rock),
        ("rho_rock", params.rho_rock),
    ] {
        if value <= 0.0 {
            return Err(ShearwaveError::Input(format!(
                "Material parameter {name} must be positive, got {value}"
            )));
        }
    }

    Ok(params)
}

/// Parses simulation settings from the input json. Element dimensions
/// default to 1.0 and the print flag defaults to false.
///
/// # Arguments
/// * `input_json` - The input file as a JsonValue object
///
/// # Returns
/// A SimParams instance
fn parse_sim_params(input_json: &JsonValue) -> Result<SimParams, ShearwaveError> {
    let sim = &input_json["simulation"];

    let name = match sim["name"].as_str() {
        Some(n) => n.to_string(),
        None => {
            return Err(ShearwaveError::Input(
                "Input json missing name field in simulation section".to_string(),
            ))
        }
    };

    let rigid = match sim["rigid"].as_bool() {
        Some(r) => r,
        None => {
            return Err(ShearwaveError::Input(
                "Input json missing rigid field in simulation section".to_string(),
            ))
        }
    };

    let params = SimParams {
        name,
        rigid,
        amplitude: require_f64(sim, "simulation", "amplitude")?,
        rate: require_f64(sim, "simulation", "rate")?,
        height: require_f64(sim, "simulation", "height")?,
        elem_height: sim["element_height"].as_f64().unwrap_or(1.0),
        elem_width: sim["element_width"].as_f64().unwrap_or(1.0),
        elem_length: sim["element_length"].as_f64().unwrap_or(1.0),
        print_matrices: sim["print_matrices"].as_bool().unwrap_or(false),
    };

    for (name, value) in [
        ("rate", params.rate),
        ("height", params.height),
        ("element_height", params.elem_height),
        ("element_width", params.elem_width),
        ("element_length", params.elem_length),
    ] {
        if value <= 0.0 {
            return Err(ShearwaveError::Input(format!(
                "Simulation setting {name} must be positive, got {value}"
            )));
        }
    }

    Ok(params)
}

/// Builds the 1D mesh from the simulation settings. The total height must
/// be an exact multiple of the element height.
///
/// # Arguments
/// * `sim` - The parsed simulation settings
///
/// # Returns
/// A Mesh instance
pub fn build_mesh(sim: &SimParams) -> Result<Mesh, ShearwaveError> {
    let ratio = sim.height / sim.elem_height;
    if ratio.fract() != 0.0 {
        return Err(ShearwaveError::Mesher(format!(
            "total height {} is not an exact multiple of element height {}",
            sim.height, sim.elem_height
        )));
    }

    let num_elements = ratio as usize;
    let mesh = Mesh {
        num_elements,
        num_nodes: num_elements + 1,
        elem_height: sim.elem_height,
        area: sim.elem_width * sim.elem_length,
    };

    println!(
        "info: meshed {}m column into {} elements ({} nodes)",
        sim.height, mesh.num_elements, mesh.num_nodes
    );

    Ok(mesh)
}

/// Runs the mesher: loads the input file and builds the 1D mesh
///
/// # Arguments
/// * `input_file` - The path to the input json file
///
/// # Returns
/// A tuple of the material parameters, the simulation settings, and the
/// mesh, in that order
pub fn run(input_file: &str) -> Result<(MaterialParams, SimParams, Mesh), ShearwaveError> {
    let input_file_json = load_input_file(input_file)?;

    let material = parse_material_params(&input_file_json)?;
    let sim = parse_sim_params(&input_file_json)?;
    let mesh = build_mesh(&sim)?;

    Ok((material, sim, mesh))
}
