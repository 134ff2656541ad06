pub mod gen;

use crate::VertexIdx;

use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
  #[error("triangle {triangle} references vertex {vertex}, but surface has only {nvertices} vertices")]
  VertexOutOfBounds {
    triangle: usize,
    vertex: VertexIdx,
    nvertices: usize,
  },
}

/// A triangulated 2-manifold surface embedded in 3D space, carrying one
/// scalar field value per vertex.
///
/// The field buffer is the single channel shared with whoever visualizes or
/// perturbs the simulation. The solver writes it during a step; any other
/// writer must run between steps.
#[derive(Debug, Clone)]
pub struct Surface {
  vertices: Vec<na::Point3<f32>>,
  triangles: Vec<[VertexIdx; 3]>,
  on_boundary: Vec<bool>,
  values: Vec<f32>,
}

impl Surface {
  /// Validates triangle indices and derives boundary flags.
  pub fn new(
    vertices: Vec<na::Point3<f32>>,
    triangles: Vec<[VertexIdx; 3]>,
  ) -> Result<Self, SurfaceError> {
    for (itriangle, triangle) in triangles.iter().enumerate() {
      for &ivertex in triangle {
        if ivertex >= vertices.len() {
          return Err(SurfaceError::VertexOutOfBounds {
            triangle: itriangle,
            vertex: ivertex,
            nvertices: vertices.len(),
          });
        }
      }
    }

    let on_boundary = derive_boundary_flags(vertices.len(), &triangles);
    let values = vec![0.0; vertices.len()];
    Ok(Self {
      vertices,
      triangles,
      on_boundary,
      values,
    })
  }

  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }
  pub fn triangle_count(&self) -> usize {
    self.triangles.len()
  }
  pub fn vertices(&self) -> &[na::Point3<f32>] {
    &self.vertices
  }
  pub fn triangles(&self) -> &[[VertexIdx; 3]] {
    &self.triangles
  }
  pub fn on_boundary(&self) -> &[bool] {
    &self.on_boundary
  }

  pub fn boundary_vertex_count(&self) -> usize {
    self.on_boundary.iter().filter(|&&b| b).count()
  }
  pub fn is_closed(&self) -> bool {
    self.boundary_vertex_count() == 0
  }

  pub fn values(&self) -> &[f32] {
    &self.values
  }
  pub fn values_mut(&mut self) -> &mut [f32] {
    &mut self.values
  }
  pub fn set_value(&mut self, ivertex: VertexIdx, value: f32) {
    self.values[ivertex] = value;
  }
  pub fn clear_values(&mut self) {
    self.values.fill(0.0);
  }

  pub fn total_area(&self) -> f32 {
    self
      .triangles
      .iter()
      .map(|&[ia, ib, ic]| {
        let a = self.vertices[ia];
        let edge_ab = self.vertices[ib] - a;
        let edge_ac = self.vertices[ic] - a;
        0.5 * edge_ab.cross(&edge_ac).norm()
      })
      .sum()
  }
}

/// A vertex lies on the boundary iff it touches an edge used by exactly one
/// triangle.
fn derive_boundary_flags(nvertices: usize, triangles: &[[VertexIdx; 3]]) -> Vec<bool> {
  let mut edge_counts: HashMap<(VertexIdx, VertexIdx), usize> = HashMap::new();
  for triangle in triangles {
    for k in 0..3 {
      let a = triangle[k];
      let b = triangle[(k + 1) % 3];
      let edge = if a < b { (a, b) } else { (b, a) };
      *edge_counts.entry(edge).or_insert(0) += 1;
    }
  }

  let mut on_boundary = vec![false; nvertices];
  for ((a, b), count) in edge_counts {
    if count == 1 {
      on_boundary[a] = true;
      on_boundary[b] = true;
    }
  }
  on_boundary
}
