use surfem::{dof::BoundaryCondition, equation::Equation, solver::FemSolver, surface::gen};

fn main() {
  tracing_subscriber::fmt::init();

  let mut surface = gen::sphere(3);
  assert!(surface.is_closed());

  let mut solver = FemSolver::new(Equation::ReactionDiffusion, BoundaryCondition::Neumann);
  solver.init(&surface);
  println!(
    "sphere: {} vertices, {} triangles, {} dofs",
    surface.vertex_count(),
    surface.triangle_count(),
    solver.ndofs()
  );

  // Seed the v species (the surface field) in a cap around the north pole;
  // the u species starts at zero inside the solver, as the interactive brush
  // workflow does.
  let vertices = surface.vertices().to_vec();
  for (ivertex, vertex) in vertices.iter().enumerate() {
    if vertex.z > 0.9 {
      surface.set_value(ivertex, 0.5);
    }
  }

  let nsteps = 500;
  for istep in 0..nsteps {
    solver.advance_time(&mut surface);

    if solver.has_numerical_instability() {
      println!("instability detected at step {istep}, resetting");
      solver.clear_values();
      surface.clear_values();
      continue;
    }

    if (istep + 1) % 100 == 0 {
      let values = surface.values();
      let min = values.iter().cloned().fold(f32::INFINITY, f32::min);
      let max = values.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
      let mean = values.iter().sum::<f32>() / values.len() as f32;
      println!(
        "step {:3}: v in [{min:.4}, {max:.4}], mean {mean:.4}",
        istep + 1
      );
    }
  }
}
