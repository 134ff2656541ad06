extern crate nalgebra as na;

use approx::assert_relative_eq;
use surfem::{
  assemble,
  dof::{BoundaryCondition, DofMap},
  equation::Equation,
  solver::FemSolver,
  surface::{gen, Surface},
};

/// A smooth-ish interior bump for initial data, zero on the boundary.
fn seed_interior(surface: &mut Surface) {
  let on_boundary = surface.on_boundary().to_vec();
  for (ivertex, value) in surface.values_mut().iter_mut().enumerate() {
    if !on_boundary[ivertex] {
      *value = 0.5 + 0.4 * (ivertex as f32 * 0.7).sin();
    }
  }
}

#[test]
fn heat_with_zero_conductivity_is_identity() {
  let mut surface = gen::grid_sheet(6);
  let mut solver = FemSolver::new(Equation::Heat, BoundaryCondition::Dirichlet);
  solver.params.heat.conductivity = 0.0;
  solver.init(&surface);

  seed_interior(&mut surface);
  let before = surface.values().to_vec();

  solver.advance_time(&mut surface);

  for (a, b) in before.iter().zip(surface.values()) {
    assert_relative_eq!(*a, *b, epsilon = 1e-4);
  }
}

#[test]
fn advection_diffusion_with_zero_velocity_matches_heat() {
  let mut heat_surface = gen::grid_sheet(6);
  let mut advdiff_surface = heat_surface.clone();

  let mut heat = FemSolver::new(Equation::Heat, BoundaryCondition::Dirichlet);
  heat.params.heat.time_step = 0.01;
  heat.params.heat.conductivity = 0.05;
  heat.init(&heat_surface);

  let mut advdiff = FemSolver::new(Equation::AdvectionDiffusion, BoundaryCondition::Dirichlet);
  advdiff.params.advection_diffusion.time_step = 0.01;
  advdiff.params.advection_diffusion.diffusivity = 0.05;
  advdiff.params.advection_diffusion.velocity = na::Vector3::zeros();
  advdiff.init(&advdiff_surface);

  seed_interior(&mut heat_surface);
  seed_interior(&mut advdiff_surface);

  heat.advance_time(&mut heat_surface);
  advdiff.advance_time(&mut advdiff_surface);

  for (a, b) in heat_surface.values().iter().zip(advdiff_surface.values()) {
    assert_relative_eq!(*a, *b, epsilon = 1e-4);
  }
}

#[test]
fn reaction_diffusion_with_zero_coefficients_is_identity() {
  let mut surface = gen::sphere(2);
  let mut solver = FemSolver::new(Equation::ReactionDiffusion, BoundaryCondition::Neumann);
  solver.params.reaction_diffusion.diffusion_u = 0.0;
  solver.params.reaction_diffusion.diffusion_v = 0.0;
  solver.params.reaction_diffusion.feed_rate = 0.0;
  solver.params.reaction_diffusion.kill_rate = 0.0;
  solver.init(&surface);

  for (ivertex, value) in surface.values_mut().iter_mut().enumerate() {
    *value = 0.25 + 0.1 * (ivertex as f32 * 1.3).cos();
  }
  let before = surface.values().to_vec();

  // u is zero after init, so the u*v^2 coupling vanishes and both species
  // must pass through the step unchanged.
  solver.advance_time(&mut surface);

  for (a, b) in before.iter().zip(surface.values()) {
    assert_relative_eq!(*a, *b, epsilon = 1e-4);
  }
}

#[test]
fn instability_predicate_thresholds_at_1e4() {
  let mut surface = gen::grid_sheet(4);
  let mut solver = FemSolver::new(Equation::Heat, BoundaryCondition::Dirichlet);
  solver.params.heat.conductivity = 0.0;
  solver.init(&surface);

  // Zero state is stable.
  assert!(!solver.has_numerical_instability());

  // Bounded state stays stable.
  seed_interior(&mut surface);
  solver.advance_time(&mut surface);
  assert!(!solver.has_numerical_instability());

  // A single oversized entry trips the scan (conductivity 0 keeps the step
  // from smearing it away).
  let interior = (0..surface.vertex_count())
    .find(|&iv| !surface.on_boundary()[iv])
    .unwrap();
  surface.set_value(interior, 2e4);
  solver.advance_time(&mut surface);
  assert!(solver.has_numerical_instability());

  solver.clear_values();
  assert!(!solver.has_numerical_instability());

  // The scan is by magnitude, so a large negative entry trips it too.
  surface.clear_values();
  surface.set_value(interior, -2e4);
  solver.advance_time(&mut surface);
  assert!(solver.has_numerical_instability());
}

#[test]
fn wave_on_sheet_decays_and_stays_bounded() {
  let mut surface = gen::grid_sheet(6);
  let mut solver = FemSolver::new(Equation::Wave, BoundaryCondition::Dirichlet);
  solver.init(&surface);
  assert!(solver.ndofs() > 0);

  let interior = (0..surface.vertex_count())
    .find(|&iv| !surface.on_boundary()[iv])
    .unwrap();
  surface.set_value(interior, 1.0);

  // The first step pulls the peak toward the fixed-zero boundary: the
  // velocity solve sees only the -c^2 K u term, so the displacement must
  // drop without overshooting.
  solver.advance_time(&mut surface);
  let peak = surface.values()[interior];
  assert!(peak > 0.0 && peak < 1.0);

  // The implicit scheme is dissipative, so the oscillation never exceeds
  // the initial amplitude.
  for _ in 0..49 {
    solver.advance_time(&mut surface);
    assert!(!solver.has_numerical_instability());
  }
  assert!(surface.values().iter().all(|v| v.is_finite()));
  assert!(surface.values().iter().all(|v| v.abs() <= 1.0 + 1e-4));
}

#[test]
fn all_boundary_triangle_has_no_dofs_and_steps_safely() {
  let vertices = vec![
    na::Point3::new(0.0, 0.0, 0.0),
    na::Point3::new(1.0, 0.0, 0.0),
    na::Point3::new(0.0, 1.0, 0.0),
  ];
  let mut surface = Surface::new(vertices, vec![[0, 1, 2]]).unwrap();
  assert_eq!(surface.boundary_vertex_count(), 3);

  for equation in [
    Equation::Heat,
    Equation::Wave,
    Equation::AdvectionDiffusion,
    Equation::ReactionDiffusion,
  ] {
    let mut solver = FemSolver::new(equation, BoundaryCondition::Dirichlet);
    solver.init(&surface);
    assert_eq!(solver.ndofs(), 0);

    surface.values_mut().fill(1.0);
    for _ in 0..5 {
      solver.advance_time(&mut surface);
      assert!(!solver.has_numerical_instability());
    }
    assert!(surface.values().iter().all(|&v| v == 0.0));
  }
}

#[test]
fn fan_heat_step_matches_hand_solved_system() {
  let mut surface = gen::fan_disk(6);
  let mut solver = FemSolver::new(Equation::Heat, BoundaryCondition::Dirichlet);
  solver.params.heat.time_step = 0.01;
  solver.params.heat.conductivity = 0.05;
  solver.init(&surface);
  assert_eq!(solver.ndofs(), 1);

  surface.set_value(0, 1.0);
  solver.advance_time(&mut surface);

  // The single unknown obeys (m/dt + k s) u' = (m/dt) * 1.
  let dof_map = DofMap::build(surface.on_boundary(), BoundaryCondition::Dirichlet);
  let ops = assemble::assemble_operators(&surface, &dof_map, &na::Vector3::zeros());
  let m = ops.mass.triplet_iter().map(|(_, _, &v)| v).sum::<f32>();
  let s = ops.stiffness.triplet_iter().map(|(_, _, &v)| v).sum::<f32>();
  let expected = (m / 0.01) / (m / 0.01 + 0.05 * s);

  let stepped = surface.values()[0];
  assert!(stepped > 0.0 && stepped < 1.0);
  assert_relative_eq!(stepped, expected, epsilon = 1e-4);

  // Boundary ring stays pinned at zero.
  assert!(surface.values()[1..].iter().all(|&v| v == 0.0));
}

#[test]
fn equation_switch_keeps_tuned_parameters() {
  let surface = gen::grid_sheet(3);
  let mut solver = FemSolver::new(Equation::Heat, BoundaryCondition::Dirichlet);
  solver.init(&surface);

  solver.params.heat.conductivity = 0.123;
  solver.switch_equation(Equation::Wave, &surface);
  solver.switch_equation(Equation::Heat, &surface);

  assert_eq!(solver.equation(), Equation::Heat);
  assert_eq!(solver.params.heat.conductivity, 0.123);
}

#[test]
fn neumann_mode_keeps_boundary_vertices_unknown() {
  let mut surface = gen::grid_sheet(4);
  let mut solver = FemSolver::new(Equation::Heat, BoundaryCondition::Neumann);
  solver.params.heat.conductivity = 0.0;
  solver.init(&surface);
  assert_eq!(solver.ndofs(), surface.vertex_count());

  // With no fixed vertices a boundary value survives the step.
  surface.set_value(0, 0.75);
  solver.advance_time(&mut surface);
  assert_relative_eq!(surface.values()[0], 0.75, epsilon = 1e-4);
}
