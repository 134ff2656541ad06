//! Conjugate gradient solver for the per-step symmetric systems.
//!
//! Best effort by contract: when the iteration cap is hit the current
//! iterate is returned as-is and the caller's instability check is the
//! backstop.

/// Iteration cap and relative residual tolerance. Bounded so a single step
/// can never stall the interactive loop on ill-conditioned systems.
#[derive(Debug, Clone)]
pub struct CgConfig {
  pub max_iterations: usize,
  pub tolerance: f32,
}

impl Default for CgConfig {
  fn default() -> Self {
    Self {
      max_iterations: 1000,
      tolerance: 1e-6,
    }
  }
}

/// Solves `matrix * x = rhs` from a zero initial guess.
///
/// Only correct for symmetric positive-definite matrices. An empty or
/// (near-)zero right-hand side short-circuits to the zero vector.
pub fn solve_cg(
  matrix: &nas::CsrMatrix<f32>,
  rhs: &na::DVector<f32>,
  config: &CgConfig,
) -> na::DVector<f32> {
  debug_assert_eq!(matrix.nrows(), rhs.len());

  let n = rhs.len();
  let mut x = na::DVector::zeros(n);
  if n == 0 {
    return x;
  }

  let rhs_norm = rhs.norm();
  if rhs_norm <= f32::MIN_POSITIVE {
    return x;
  }

  let mut residual = rhs.clone();
  let mut direction = residual.clone();
  let mut rho = residual.dot(&residual);

  for _ in 0..config.max_iterations {
    let ap = matrix * &direction;
    let curvature = direction.dot(&ap);
    if curvature.abs() <= f32::MIN_POSITIVE {
      tracing::warn!(
        "cg search direction broke down (curvature {:.3e}, relative residual {:.3e})",
        curvature,
        residual.norm() / rhs_norm,
      );
      return x;
    }

    let alpha = rho / curvature;
    x.axpy(alpha, &direction, 1.0);
    residual.axpy(-alpha, &ap, 1.0);

    let rho_next = residual.dot(&residual);
    if rho_next.sqrt() <= config.tolerance * rhs_norm {
      return x;
    }

    let beta = rho_next / rho;
    direction.axpy(1.0, &residual, beta);
    rho = rho_next;
  }

  tracing::warn!(
    "cg hit the iteration cap ({} iterations, relative residual {:.3e})",
    config.max_iterations,
    residual.norm() / rhs_norm,
  );
  x
}
