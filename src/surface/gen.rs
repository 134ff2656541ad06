//! Generated test/demo surfaces, standing in for the interactive
//! triangulation and mesh import of the full application.

use super::Surface;
use crate::VertexIdx;

use std::{collections::HashMap, f32::consts::TAU};

/// Disk triangulated as a fan: one interior vertex at the origin surrounded
/// by `nring >= 3` boundary vertices on the unit circle.
pub fn fan_disk(nring: usize) -> Surface {
  assert!(nring >= 3);

  let mut vertices = vec![na::Point3::origin()];
  for i in 0..nring {
    let angle = TAU * i as f32 / nring as f32;
    vertices.push(na::Point3::new(angle.cos(), angle.sin(), 0.0));
  }

  let triangles = (0..nring)
    .map(|i| [0, 1 + i, 1 + (i + 1) % nring])
    .collect();

  Surface::new(vertices, triangles).unwrap()
}

/// Unit square sheet in the z=0 plane, `nsquares` grid cells per side, each
/// cell split into two triangles.
pub fn grid_sheet(nsquares: usize) -> Surface {
  assert!(nsquares >= 1);
  let nvertices_per_side = nsquares + 1;

  let mut vertices = Vec::with_capacity(nvertices_per_side * nvertices_per_side);
  for yvertex in 0..nvertices_per_side {
    for xvertex in 0..nvertices_per_side {
      let x = xvertex as f32 / nsquares as f32;
      let y = yvertex as f32 / nsquares as f32;
      vertices.push(na::Point3::new(x, y, 0.0));
    }
  }

  let ivertex = |x: usize, y: usize| x + nvertices_per_side * y;

  let mut triangles = Vec::with_capacity(2 * nsquares * nsquares);
  for ycell in 0..nsquares {
    for xcell in 0..nsquares {
      let v00 = ivertex(xcell, ycell);
      let v10 = ivertex(xcell + 1, ycell);
      let v01 = ivertex(xcell, ycell + 1);
      let v11 = ivertex(xcell + 1, ycell + 1);
      triangles.push([v00, v10, v11]);
      triangles.push([v00, v11, v01]);
    }
  }

  Surface::new(vertices, triangles).unwrap()
}

/// Geodesic sphere from subdividing an icosahedron. Closed surface, so no
/// vertex is on the boundary.
pub fn sphere(nsubdivisions: usize) -> Surface {
  let phi = (1.0 + 5.0f32.sqrt()) / 2.0;

  #[rustfmt::skip]
  let mut vertices: Vec<na::Vector3<f32>> = vec![
    na::Vector3::new(-1.0,  phi,  0.0),
    na::Vector3::new( 1.0,  phi,  0.0),
    na::Vector3::new(-1.0, -phi,  0.0),
    na::Vector3::new( 1.0, -phi,  0.0),
    na::Vector3::new( 0.0, -1.0,  phi),
    na::Vector3::new( 0.0,  1.0,  phi),
    na::Vector3::new( 0.0, -1.0, -phi),
    na::Vector3::new( 0.0,  1.0, -phi),
    na::Vector3::new( phi,  0.0, -1.0),
    na::Vector3::new( phi,  0.0,  1.0),
    na::Vector3::new(-phi,  0.0, -1.0),
    na::Vector3::new(-phi,  0.0,  1.0),
  ];
  for v in &mut vertices {
    v.normalize_mut();
  }

  #[rustfmt::skip]
  let mut triangles: Vec<[VertexIdx; 3]> = vec![
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
  ];

  for _ in 0..nsubdivisions {
    let mut midpoints = HashMap::new();
    let mut subdivided = Vec::with_capacity(4 * triangles.len());
    for [v0, v1, v2] in triangles {
      let v01 = edge_midpoint(v0, v1, &mut vertices, &mut midpoints);
      let v12 = edge_midpoint(v1, v2, &mut vertices, &mut midpoints);
      let v20 = edge_midpoint(v2, v0, &mut vertices, &mut midpoints);
      subdivided.extend([
        [v0, v01, v20],
        [v1, v12, v01],
        [v2, v20, v12],
        [v01, v12, v20],
      ]);
    }
    triangles = subdivided;
  }

  let vertices = vertices.into_iter().map(na::Point3::from).collect();
  Surface::new(vertices, triangles).unwrap()
}

fn edge_midpoint(
  v0: VertexIdx,
  v1: VertexIdx,
  vertices: &mut Vec<na::Vector3<f32>>,
  midpoints: &mut HashMap<(VertexIdx, VertexIdx), VertexIdx>,
) -> VertexIdx {
  let edge = if v0 < v1 { (v0, v1) } else { (v1, v0) };
  if let Some(&midpoint) = midpoints.get(&edge) {
    return midpoint;
  }

  let midpoint = ((vertices[v0] + vertices[v1]) / 2.0).normalize();
  vertices.push(midpoint);
  let index = vertices.len() - 1;
  midpoints.insert(edge, index);
  index
}
