//! Global assembly of the sparse FEM operators.

use crate::{dof::DofMap, operators::TriangleGeometry, surface::Surface};

use itertools::Itertools;

/// The assembled `N x N` operators of the active discretization.
///
/// Stiffness and mass are symmetric; advection is generally not. All three
/// must be rebuilt from scratch whenever the geometry, the boundary flags,
/// the boundary-condition policy or the advection velocity change.
pub struct Operators {
  pub stiffness: nas::CsrMatrix<f32>,
  pub mass: nas::CsrMatrix<f32>,
  pub advection: nas::CsrMatrix<f32>,
}

impl Operators {
  pub fn empty() -> Self {
    Self {
      stiffness: nas::CsrMatrix::zeros(0, 0),
      mass: nas::CsrMatrix::zeros(0, 0),
      advection: nas::CsrMatrix::zeros(0, 0),
    }
  }
}

#[derive(Clone, Copy)]
enum EntryFilter {
  /// Both endpoints map to a dof under the active boundary-condition mode.
  Unknown,
  /// Both endpoints are interior vertices, regardless of the active mode.
  Interior,
}

/// Assembles stiffness, mass and advection in one sweep each. Idempotent;
/// safe to re-run from scratch at any time.
pub fn assemble_operators(
  surface: &Surface,
  dof_map: &DofMap,
  advection_velocity: &na::Vector3<f32>,
) -> Operators {
  let stiffness = assemble_matrix(surface, dof_map, EntryFilter::Unknown, |geo| {
    geo.stiffness_elmat()
  });
  let mass = assemble_matrix(surface, dof_map, EntryFilter::Unknown, |geo| geo.mass_elmat());
  // The advection operator keeps the interior-pair filter in both modes.
  let advection = assemble_matrix(surface, dof_map, EntryFilter::Interior, |geo| {
    geo.advection_elmat(advection_velocity)
  });

  tracing::debug!(
    "assembled operators: ndofs={} nnz(stiffness)={} nnz(mass)={} nnz(advection)={}",
    dof_map.ndofs(),
    stiffness.nnz(),
    mass.nnz(),
    advection.nnz(),
  );

  Operators {
    stiffness,
    mass,
    advection,
  }
}

fn assemble_matrix<F>(
  surface: &Surface,
  dof_map: &DofMap,
  filter: EntryFilter,
  elmat: F,
) -> nas::CsrMatrix<f32>
where
  F: Fn(&TriangleGeometry) -> na::Matrix3<f32>,
{
  let ndofs = dof_map.ndofs();
  let vertices = surface.vertices();
  let on_boundary = surface.on_boundary();

  let mut triplets: Vec<(usize, usize, f32)> = Vec::new();
  for &ivertices in surface.triangles() {
    let [ia, ib, ic] = ivertices;
    let Some(geo) = TriangleGeometry::new(&vertices[ia], &vertices[ib], &vertices[ic]) else {
      continue;
    };
    let elmat = elmat(&geo);

    for (ilocal, &iglobal) in ivertices.iter().enumerate() {
      for (jlocal, &jglobal) in ivertices.iter().enumerate() {
        let admitted = match filter {
          EntryFilter::Unknown => true,
          EntryFilter::Interior => !on_boundary[iglobal] && !on_boundary[jglobal],
        };
        let (Some(i), Some(j)) = (dof_map.dof_of(iglobal), dof_map.dof_of(jglobal)) else {
          continue;
        };

        let val = elmat[(ilocal, jlocal)];
        if admitted && val != 0.0 {
          triplets.push((i, j, val));
        }
      }
    }
  }

  let (rows, cols, values): (Vec<_>, Vec<_>, Vec<_>) = triplets.into_iter().multiunzip();
  let coo = nas::CooMatrix::try_from_triplets(ndofs, ndofs, rows, cols, values).unwrap();
  nas::CsrMatrix::from(&coo)
}
