use indicatif::ProgressBar;
use nalgebra::{DMatrix, DVector};

use crate::{
    assembly::{assemble_damping, assemble_mass, assemble_stiffness, ForceVector},
    datatypes::{MaterialParams, Mesh, SimParams},
    error::ShearwaveError,
    motion::Motion,
    newmark::{BaseCondition, Newmark},
};

/// Simulation horizon [s]
pub const TF: f64 = 2.5;
/// Time step [s]
pub const DT: f64 = 1.0e-4;
/// Newmark beta; zero selects the explicit form
pub const BETA: f64 = 0.0;
/// Newmark gamma
pub const GAMMA: f64 = 0.5;

/// Per-node kinematic histories, `num_nodes x (steps + 1)`. Column 0 is
/// the zero initial condition.
pub struct Histories {
    pub disp: DMatrix<f64>,
    pub vel: DMatrix<f64>,
    pub acc: DMatrix<f64>,
}

/// Runs the time-stepping simulation: assembles the global operators,
/// selects the Newmark variant from the boundary-condition flag, and
/// iterates the integrator across the full horizon.
///
/// # Arguments
/// * `material` - The material parameters
/// * `sim` - The simulation settings
/// * `mesh` - The 1D mesh
///
/// # Returns
/// The displacement, velocity, and acceleration histories
pub fn run(
    material: &MaterialParams,
    sim: &SimParams,
    mesh: &Mesh,
) -> Result<Histories, ShearwaveError> {
    println!("info: assembling global operators...");

    let mass = assemble_mass(mesh.num_nodes, material.rho, mesh.elem_height, mesh.area);
    let stiffness = assemble_stiffness(
        mesh.num_nodes,
        material.vs,
        material.rho,
        mesh.area,
        mesh.elem_height,
    );
    let damping = assemble_damping(
        mesh.num_nodes,
        material.vs_rock,
        material.rho_rock,
        mesh.area,
    );

    let force = ForceVector::new(
        mesh.num_nodes,
        material.vs_rock,
        material.rho_rock,
        mesh.area,
    );

    if sim.print_matrices {
        mass.print();
        stiffness.print();
        damping.print();
        force.print();
    }

    let base = if sim.rigid {
        BaseCondition::Rigid
    } else {
        BaseCondition::Compliant
    };

    let motion = Motion::new(sim.amplitude, sim.rate);

    let mut integrator = Newmark::new(
        BETA,
        GAMMA,
        DT,
        sim.rate,
        base,
        mass.matrix,
        stiffness.matrix,
        damping.matrix,
        force,
    );

    println!(
        "info: explicit newmark integrator ({}): beta = {}, gamma = {}, dt = {}",
        base.label(),
        integrator.beta,
        integrator.gamma,
        integrator.dt
    );

    let steps = (TF / DT).round() as usize;

    let mut histories = Histories {
        disp: DMatrix::zeros(mesh.num_nodes, steps + 1),
        vel: DMatrix::zeros(mesh.num_nodes, steps + 1),
        acc: DMatrix::zeros(mesh.num_nodes, steps + 1),
    };

    let mut u: DVector<f64> = DVector::zeros(mesh.num_nodes);
    let mut v: DVector<f64> = DVector::zeros(mesh.num_nodes);
    let mut a: DVector<f64> = DVector::zeros(mesh.num_nodes);

    println!("info: stepping {} steps to t = {}...", steps, TF);
    let bar = ProgressBar::new(steps as u64);

    for s in 0..steps {
        bar.inc(1);

        let t = s as f64 * DT;
        let v_hat = motion.v(t);
        let a_hat = motion.a(t);

        let (u_next, v_next, a_next) = match integrator.solve(&u, &v, &a, v_hat, a_hat) {
            Ok(state) => state,
            Err(ShearwaveError::Solver(msg)) => {
                return Err(ShearwaveError::Solver(format!(
                    "solve failed at step {s}: {msg}"
                )))
            }
            Err(err) => return Err(err),
        };

        histories.disp.set_column(s + 1, &u_next);
        histories.vel.set_column(s + 1, &v_next);
        histories.acc.set_column(s + 1, &a_next);

        u = u_next;
        v = v_next;
        a = a_next;
    }
    bar.finish_with_message("info: simulation complete\n");
    println!("info: stepped to t = {:.4}", integrator.time());

    Ok(histories)
}
