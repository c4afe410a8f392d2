use nalgebra::{DMatrix, DVector};

/// Scale factor applied to the base forcing. 1.0 corresponds to the
/// "upward propagating wave" convention; the "outcropping wave" convention
/// would use a different factor.
const INCIDENT_WAVE_FACTOR: f64 = 1.0;

/// A named dense global operator (mass, stiffness, or damping)
pub struct Operator {
    pub name: &'static str,
    pub matrix: DMatrix<f64>,
}

impl Operator {
    /// Prints the operator name and contents to the terminal
    pub fn print(&self) {
        println!("\n{:^70}", self.name);
        println!("{}", "-".repeat(70));
        println!("{}", self.matrix);
    }
}

/// Assembles the lumped global mass matrix. Each element contributes half
/// of its mass to each of its two end nodes.
///
/// # Arguments
/// * `num_nodes` - Number of nodes in the mesh
/// * `rho` - Mass density of the column [kg/m3]
/// * `elem_height` - Height of a single element [m]
/// * `area` - Cross sectional area of an element [m2]
///
/// # Returns
/// The mass Operator
pub fn assemble_mass(num_nodes: usize, rho: f64, elem_height: f64, area: f64) -> Operator {
    assert!(num_nodes >= 2, "mesh must have at least two nodes");

    let elem_mass = rho * elem_height * area;
    let mut matrix = DMatrix::zeros(num_nodes, num_nodes);

    for i in 0..num_nodes - 1 {
        matrix[(i, i)] += 0.5 * elem_mass;
        matrix[(i + 1, i + 1)] += 0.5 * elem_mass;
    }

    Operator {
        name: "Mass Matrix",
        matrix,
    }
}

/// Assembles the global stiffness matrix from the standard 1D bar kernel
/// `g * [[1, -1], [-1, 1]]`, where `g = G * area / elem_height` and the
/// shear modulus is `G = vs^2 * rho`.
///
/// # Arguments
/// * `num_nodes` - Number of nodes in the mesh
/// * `vs` - Shear wave velocity of the column [m/s]
/// * `rho` - Mass density of the column [kg/m3]
/// * `area` - Cross sectional area of an element [m2]
/// * `elem_height` - Height of a single element [m]
///
/// # Returns
/// The stiffness Operator
pub fn assemble_stiffness(
    num_nodes: usize,
    vs: f64,
    rho: f64,
    area: f64,
    elem_height: f64,
) -> Operator {
    assert!(num_nodes >= 2, "mesh must have at least two nodes");

    let shear_modulus = vs * vs * rho;
    let g = shear_modulus * area / elem_height;
    let mut matrix = DMatrix::zeros(num_nodes, num_nodes);

    for i in 0..num_nodes - 1 {
        matrix[(i, i)] += g;
        matrix[(i, i + 1)] -= g;
        matrix[(i + 1, i)] -= g;
        matrix[(i + 1, i + 1)] += g;
    }

    Operator {
        name: "Stiffness Matrix",
        matrix,
    }
}

/// Assembles the global damping matrix: a single radiation dashpot at the
/// base node approximating energy radiating into the underlying half-space.
///
/// # Arguments
/// * `num_nodes` - Number of nodes in the mesh
/// * `vs_rock` - Shear wave velocity of the underlying rock [m/s]
/// * `rho_rock` - Mass density of the underlying rock [kg/m3]
/// * `area` - Cross sectional area of an element [m2]
///
/// # Returns
/// The damping Operator
pub fn assemble_damping(num_nodes: usize, vs_rock: f64, rho_rock: f64, area: f64) -> Operator {
    assert!(num_nodes >= 2, "mesh must have at least two nodes");

    let c = vs_rock * rho_rock * area;
    let mut matrix = DMatrix::zeros(num_nodes, num_nodes);
    matrix[(num_nodes - 1, num_nodes - 1)] += c;

    Operator {
        name: "Damping Matrix",
        matrix,
    }
}

/// Force vector representing the incident wave loading at the base node.
/// This is the one entity re-mutated across the simulation: `update` is
/// called once per step with the imposed base velocity.
pub struct ForceVector {
    scale: f64,
    pub vector: DVector<f64>,
}

impl ForceVector {
    /// Builds the force vector, zero except at the base node
    ///
    /// # Arguments
    /// * `num_nodes` - Number of nodes in the mesh
    /// * `vs_rock` - Shear wave velocity of the underlying rock [m/s]
    /// * `rho_rock` - Mass density of the underlying rock [kg/m3]
    /// * `area` - Cross sectional area of an element [m2]
    pub fn new(num_nodes: usize, vs_rock: f64, rho_rock: f64, area: f64) -> ForceVector {
        assert!(num_nodes >= 2, "mesh must have at least two nodes");

        let scale = INCIDENT_WAVE_FACTOR * vs_rock * rho_rock * area;
        let mut vector = DVector::zeros(num_nodes);
        vector[num_nodes - 1] = scale;

        ForceVector { scale, vector }
    }

    /// Overwrites the base entry with `scale * vel`
    ///
    /// # Arguments
    /// * `vel` - Imposed base velocity
    pub fn update(&mut self, vel: f64) {
        let last = self.vector.nrows() - 1;
        self.vector[last] = self.scale * vel;
    }

    /// Prints the vector contents to the terminal
    pub fn print(&self) {
        println!("\n{:^70}", "Force Vector");
        println!("{}", "-".repeat(70));
        println!("{}", self.vector);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mass_is_conserved_by_lumping() {
        let num_nodes = 6;
        let rho = 1700.0;
        let elem_height = 0.5;
        let area = 2.0;

        let mass = assemble_mass(num_nodes, rho, elem_height, area);
        let elem_mass = rho * elem_height * area;

        assert_eq!(mass.matrix.sum(), (num_nodes - 1) as f64 * elem_mass);
    }

    #[test]
    fn mass_diagonal_three_nodes() {
        // 2 elements, h=1, area=1, rho=1000 => element mass 1000
        let mass = assemble_mass(3, 1000.0, 1.0, 1.0);

        assert_eq!(mass.matrix[(0, 0)], 500.0);
        assert_eq!(mass.matrix[(1, 1)], 1000.0);
        assert_eq!(mass.matrix[(2, 2)], 500.0);
        assert_eq!(mass.matrix.sum(), 2000.0);
    }

    #[test]
    fn stiffness_three_nodes() {
        // g = vs^2 * rho * area / h = 100^2 * 1000 * 1 / 1 = 1e7
        let stiffness = assemble_stiffness(3, 100.0, 1000.0, 1.0, 1.0);
        let g = 1.0e7;

        let expected = DMatrix::from_row_slice(
            3,
            3,
            &[g, -g, 0.0, -g, 2.0 * g, -g, 0.0, -g, g],
        );
        assert_eq!(stiffness.matrix, expected);
    }

    #[test]
    fn stiffness_is_symmetric_and_singular() {
        let stiffness = assemble_stiffness(8, 250.0, 1800.0, 1.5, 2.0);

        assert_eq!(stiffness.matrix, stiffness.matrix.transpose());

        // Each row sums to zero: rigid-body translation costs no strain
        // energy, so the unconstrained bar stiffness is singular.
        for row in stiffness.matrix.row_iter() {
            assert!(row.sum().abs() < 1e-9);
        }
        assert!(stiffness.matrix.clone().lu().solve(&DVector::from_element(8, 1.0)).is_none());
    }

    #[test]
    fn damping_has_a_single_base_entry() {
        let damping = assemble_damping(5, 100.0, 1000.0, 1.0);

        let nonzero: Vec<(usize, usize)> = (0..5)
            .flat_map(|i| (0..5).map(move |j| (i, j)))
            .filter(|&(i, j)| damping.matrix[(i, j)] != 0.0)
            .collect();

        assert_eq!(nonzero, vec![(4, 4)]);
        assert_eq!(damping.matrix[(4, 4)], 100_000.0);
    }

    #[test]
    fn force_vector_scales_base_entry() {
        let mut force = ForceVector::new(4, 100.0, 1000.0, 1.0);

        assert_eq!(force.vector[3], 100_000.0);
        assert_eq!(force.vector[0], 0.0);

        force.update(0.25);
        assert_eq!(force.vector[3], 25_000.0);

        force.update(0.0);
        assert_eq!(force.vector[3], 0.0);
    }
}
