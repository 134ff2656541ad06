//! Semi-implicit time integration of the assembled FEM operators.

use crate::{
  assemble::{self, Operators},
  cg::{self, CgConfig},
  dof::{BoundaryCondition, DofMap},
  equation::{Equation, EquationParams},
  surface::Surface,
};

/// Any state entry beyond this magnitude counts as numerical divergence.
const INSTABILITY_THRESHOLD: f32 = 1e4;

/// The FEM time integrator.
///
/// Owns the dof map, the sparse operators, the parameter records and the
/// state vectors; borrows the surface per call. Each `advance_time` gathers
/// the surface field into dof space, advances one step of the active
/// equation and scatters the result back, zeroing fixed vertices.
///
/// After any geometry mutation `init` must be re-run in full; there is no
/// incremental update path.
pub struct FemSolver {
  equation: Equation,
  boundary_condition: BoundaryCondition,
  pub params: EquationParams,
  pub cg_config: CgConfig,

  dof_map: DofMap,
  operators: Operators,
  u: na::DVector<f32>,
  v: na::DVector<f32>,
}

impl FemSolver {
  /// An empty solver with no dofs; `init` makes it operational.
  pub fn new(equation: Equation, boundary_condition: BoundaryCondition) -> Self {
    Self {
      equation,
      boundary_condition,
      params: EquationParams::default(),
      cg_config: CgConfig::default(),
      dof_map: DofMap::default(),
      operators: Operators::empty(),
      u: na::DVector::zeros(0),
      v: na::DVector::zeros(0),
    }
  }

  pub fn equation(&self) -> Equation {
    self.equation
  }
  pub fn boundary_condition(&self) -> BoundaryCondition {
    self.boundary_condition
  }
  pub fn ndofs(&self) -> usize {
    self.dof_map.ndofs()
  }

  /// Full (re)initialization: dof renumbering, operator assembly, zeroed
  /// state.
  pub fn init(&mut self, surface: &Surface) {
    self.dof_map = DofMap::build(surface.on_boundary(), self.boundary_condition);
    self.reassemble(surface);
    self.clear_values();
  }

  /// Rebuilds all operators at the current dof map, picking up the current
  /// advection velocity. Call after editing
  /// `params.advection_diffusion.velocity`.
  pub fn reassemble(&mut self, surface: &Surface) {
    self.operators = assemble::assemble_operators(
      surface,
      &self.dof_map,
      &self.params.advection_diffusion.velocity,
    );
  }

  /// Switches the active update rule. Conservatively reassembles so no
  /// operator can go stale.
  pub fn switch_equation(&mut self, equation: Equation, surface: &Surface) {
    self.equation = equation;
    self.reassemble(surface);
  }

  /// Changes the boundary-condition policy, which invalidates the dof map,
  /// the operators and the state.
  pub fn set_boundary_condition(&mut self, bc: BoundaryCondition, surface: &Surface) {
    self.boundary_condition = bc;
    self.init(surface);
  }

  /// Re-zeroes the state vectors at the current dof count without touching
  /// the operators. Also the mandated caller response to a detected
  /// instability.
  pub fn clear_values(&mut self) {
    self.u = na::DVector::zeros(self.dof_map.ndofs());
    self.v = na::DVector::zeros(self.dof_map.ndofs());
  }

  /// True iff any entry of an active state vector has magnitude beyond the
  /// fixed threshold. Plain O(N) scan, no norm or residual involved. The
  /// solver never auto-resets; the caller decides.
  pub fn has_numerical_instability(&self) -> bool {
    self
      .u
      .iter()
      .chain(self.v.iter())
      .any(|x| x.abs() > INSTABILITY_THRESHOLD)
  }

  /// Advances one time step of the active equation. With zero dofs every
  /// branch degenerates to scattering zeros onto the surface.
  pub fn advance_time(&mut self, surface: &mut Surface) {
    debug_assert_eq!(surface.vertex_count(), self.dof_map.nvertices());
    debug_assert_eq!(self.u.len(), self.dof_map.ndofs());
    debug_assert_eq!(self.v.len(), self.dof_map.ndofs());

    match self.equation {
      Equation::Heat => self.step_heat(surface),
      Equation::Wave => self.step_wave(surface),
      Equation::AdvectionDiffusion => self.step_advection_diffusion(surface),
      Equation::ReactionDiffusion => self.step_reaction_diffusion(surface),
    }
  }

  /// Implicit Euler: `(M/dt + k K) u' = (M/dt) u`.
  fn step_heat(&mut self, surface: &mut Surface) {
    let params = self.params.heat;

    self.u = self.gather(surface);

    let mass_dt = &self.operators.mass * params.time_step.recip();
    let lhs = &mass_dt + &(&self.operators.stiffness * params.conductivity);
    let rhs = &mass_dt * &self.u;

    self.u = cg::solve_cg(&lhs, &rhs, &self.cg_config);
    self.scatter(surface);
  }

  /// Velocity update `(M/dt + c^2 dt K) v' = (M/dt) v - c^2 K u`, then
  /// `u' = u + dt v'`.
  fn step_wave(&mut self, surface: &mut Surface) {
    let params = self.params.wave;
    let c2 = params.wave_speed * params.wave_speed;

    self.u = self.gather(surface);

    let mass_dt = &self.operators.mass * params.time_step.recip();
    let lhs = &mass_dt + &(&self.operators.stiffness * (c2 * params.time_step));
    let rhs = &mass_dt * &self.v - (&self.operators.stiffness * &self.u) * c2;

    self.v = cg::solve_cg(&lhs, &rhs, &self.cg_config);
    self.u += &self.v * params.time_step;
    self.scatter(surface);
  }

  /// `(M/dt + c K - A) u' = (M/dt) u`. The advection part makes the system
  /// mildly non-symmetric; it is solved with CG regardless, relying on
  /// diffusion dominating (see DESIGN.md).
  fn step_advection_diffusion(&mut self, surface: &mut Surface) {
    let params = self.params.advection_diffusion;

    self.u = self.gather(surface);

    let mass_dt = &self.operators.mass * params.time_step.recip();
    let diffusion = &mass_dt + &(&self.operators.stiffness * params.diffusivity);
    let lhs = &diffusion - &self.operators.advection;
    let rhs = &mass_dt * &self.u;

    self.u = cg::solve_cg(&lhs, &rhs, &self.cg_config);
    self.scatter(surface);
  }

  /// Gray-Scott IMEX step: diffusion implicit, reaction terms explicit at
  /// the old `u`, `v`. The surface field carries the `v` species; `u` lives
  /// only in the solver state.
  fn step_reaction_diffusion(&mut self, surface: &mut Surface) {
    let params = self.params.reaction_diffusion;

    self.v = self.gather(surface);

    let mass_dt = &self.operators.mass * params.time_step.recip();
    let reaction = self.u.component_mul(&self.v.component_mul(&self.v));
    let ones = na::DVector::from_element(self.dof_map.ndofs(), 1.0f32);

    let lhs_u = &mass_dt + &(&self.operators.stiffness * params.diffusion_u);
    let rhs_u = &mass_dt * &self.u - &reaction + (ones - &self.u) * params.feed_rate;

    let lhs_v = &mass_dt + &(&self.operators.stiffness * params.diffusion_v);
    let rhs_v =
      &mass_dt * &self.v + &reaction - &self.v * (params.feed_rate + params.kill_rate);

    self.u = cg::solve_cg(&lhs_u, &rhs_u, &self.cg_config);
    self.v = cg::solve_cg(&lhs_v, &rhs_v, &self.cg_config);
    self.scatter_vector(&self.v, surface);
  }

  /// Pulls the surface field into a dof-space vector; fixed vertices
  /// contribute nothing.
  fn gather(&self, surface: &Surface) -> na::DVector<f32> {
    let mut vector = na::DVector::zeros(self.dof_map.ndofs());
    for (ivertex, dof) in self.dof_map.iter() {
      if let Some(dof) = dof {
        vector[dof] = surface.values()[ivertex];
      }
    }
    vector
  }

  fn scatter(&self, surface: &mut Surface) {
    self.scatter_vector(&self.u, surface);
  }

  /// Writes a dof-space vector back onto the surface, zeroing every fixed
  /// vertex.
  fn scatter_vector(&self, vector: &na::DVector<f32>, surface: &mut Surface) {
    debug_assert_eq!(vector.len(), self.dof_map.ndofs());
    for (ivertex, dof) in self.dof_map.iter() {
      surface.values_mut()[ivertex] = match dof {
        Some(dof) => vector[dof],
        None => 0.0,
      };
    }
  }
}
