//! Per-triangle element matrices for the P1 Galerkin discretization.

/// The constant gradients of the reference-triangle barycentric coordinate
/// functions, embedded in 3D.
pub fn ref_gradients() -> [na::Vector3<f32>; 3] {
  [
    na::Vector3::new(-1.0, -1.0, 0.0),
    na::Vector3::new(1.0, 0.0, 0.0),
    na::Vector3::new(0.0, 1.0, 0.0),
  ]
}

/// Local geometry of one (possibly non-planar-embedded, locally flat)
/// triangle, with the physical P1 basis gradients tangent to it.
///
/// The gradients come from inverting and transposing the 3x3 matrix of edge
/// vectors augmented with the unit normal and applying it to the reference
/// gradients. This generalizes the planar 2D P1 gradient formula to
/// triangles embedded in 3D.
pub struct TriangleGeometry {
  gradients: [na::Vector3<f32>; 3],
  normal: na::Vector3<f32>,
  jacobian: f32,
  area: f32,
}

impl TriangleGeometry {
  /// Returns `None` for degenerate (zero-area or numerically singular)
  /// triangles, which assembly skips.
  pub fn new(a: &na::Point3<f32>, b: &na::Point3<f32>, c: &na::Point3<f32>) -> Option<Self> {
    let edge_ab = b - a;
    let edge_ac = c - a;
    let cross = edge_ab.cross(&edge_ac);

    let jacobian = cross.norm();
    if jacobian <= f32::EPSILON {
      return None;
    }
    let normal = cross / jacobian;
    let area = 0.5 * jacobian;

    let transform = na::Matrix3::from_columns(&[edge_ab, edge_ac, normal]);
    let transform_invt = transform.try_inverse()?.transpose();
    let gradients = ref_gradients().map(|g| transform_invt * g);

    Some(Self {
      gradients,
      normal,
      jacobian,
      area,
    })
  }

  /// `area * (grad phi_i . grad phi_j)`, symmetric positive semi-definite.
  pub fn stiffness_elmat(&self) -> na::Matrix3<f32> {
    let mut elmat = na::Matrix3::zeros();
    for i in 0..3 {
      for j in 0..3 {
        elmat[(i, j)] = self.area * self.gradients[i].dot(&self.gradients[j]);
      }
    }
    elmat
  }

  /// Closed-form P1 mass matrix `jacobian/24 * [[2,1,1],[1,2,1],[1,1,2]]`.
  pub fn mass_elmat(&self) -> na::Matrix3<f32> {
    let v = self.jacobian / 24.0;
    let mut elmat = na::Matrix3::from_element(v);
    elmat.fill_diagonal(2.0 * v);
    elmat
  }

  /// `jacobian/6 * (v_t . grad phi_j)` with the velocity projected onto the
  /// tangent plane and re-normalized. Column-dependent only, deliberately
  /// not symmetrized. A zero or purely normal velocity yields the zero
  /// matrix.
  pub fn advection_elmat(&self, velocity: &na::Vector3<f32>) -> na::Matrix3<f32> {
    let tangent = velocity - velocity.dot(&self.normal) * self.normal;
    let tangent_norm = tangent.norm();
    if tangent_norm <= f32::EPSILON {
      return na::Matrix3::zeros();
    }
    let tangent = tangent / tangent_norm;

    let mut elmat = na::Matrix3::zeros();
    for j in 0..3 {
      let val = self.jacobian / 6.0 * tangent.dot(&self.gradients[j]);
      for i in 0..3 {
        elmat[(i, j)] = val;
      }
    }
    elmat
  }
}
