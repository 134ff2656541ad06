extern crate nalgebra as na;

use surfem::{dof::BoundaryCondition, equation::Equation, solver::FemSolver, surface::gen};

fn main() {
  tracing_subscriber::fmt::init();

  let mut surface = gen::grid_sheet(24);
  let mut solver = FemSolver::new(Equation::Heat, BoundaryCondition::Dirichlet);
  solver.init(&surface);
  println!(
    "sheet: {} vertices, {} triangles, {} dofs",
    surface.vertex_count(),
    surface.triangle_count(),
    solver.ndofs()
  );

  // Hot spot at the vertex closest to the sheet center.
  let center = na::Point3::new(0.5, 0.5, 0.0);
  let hot = (0..surface.vertex_count())
    .min_by(|&a, &b| {
      let da = (surface.vertices()[a] - center).norm();
      let db = (surface.vertices()[b] - center).norm();
      da.total_cmp(&db)
    })
    .unwrap();
  surface.set_value(hot, 1.0);

  let nsteps = 200;
  for istep in 0..nsteps {
    solver.advance_time(&mut surface);

    if solver.has_numerical_instability() {
      println!("instability detected at step {istep}, resetting");
      solver.clear_values();
      surface.clear_values();
      surface.set_value(hot, 1.0);
      continue;
    }

    if (istep + 1) % 20 == 0 {
      let max = surface.values().iter().cloned().fold(0.0f32, f32::max);
      println!("step {:3}: peak temperature {max:.5}", istep + 1);
    }
  }
}
