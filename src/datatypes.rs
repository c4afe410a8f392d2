/// Material parameters for the soil column and the underlying half-space
#[derive(Debug)]
pub struct MaterialParams {
    /// Shear wave velocity of the column [m/s]
    pub vs: f64,
    /// Mass density of the column [kg/m3]
    pub rho: f64,
    /// Shear wave velocity of the underlying rock [m/s]
    pub vs_rock: f64,
    /// Mass density of the underlying rock [kg/m3]
    pub rho_rock: f64,
}

/// Simulation settings parsed from the input file
#[derive(Debug)]
pub struct SimParams {
    /// Name of the output subdirectory
    pub name: String,
    /// True to close the base with a rigid boundary instead of a
    /// compliant (visco-elastic) one
    pub rigid: bool,
    /// Amplitude of the imposed velocity pulse
    pub amplitude: f64,
    /// Rate of the imposed velocity pulse; period is 2*pi/rate
    pub rate: f64,
    /// Height of the total bar [m]
    pub height: f64,
    /// Height of a single element [m]
    pub elem_height: f64,
    /// Width of a single element [m]
    pub elem_width: f64,
    /// Length of a single element [m]
    pub elem_length: f64,
    /// True to dump the assembled operators to the terminal
    pub print_matrices: bool,
}

/// 1D mesh of equal-height elements. Node 0 is the free surface, node
/// `num_nodes - 1` is the base.
#[derive(Debug)]
pub struct Mesh {
    pub num_elements: usize,
    pub num_nodes: usize,
    /// Height of a single element [m]
    pub elem_height: f64,
    /// Cross sectional area of an element [m2]
    pub area: f64,
}
