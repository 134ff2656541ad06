use crate::{DofIdx, VertexIdx};

/// How the field behaves at boundary vertices.
///
/// Dirichlet fixes boundary values to zero and removes them from the unknown
/// set. Neumann keeps every vertex unknown, imposing zero flux implicitly by
/// omitting boundary terms from assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryCondition {
  #[default]
  Dirichlet,
  Neumann,
}

/// Renumbering of mesh vertices into degrees of freedom.
///
/// Unknown vertices get sequential dof ids in ascending vertex order; fixed
/// vertices map to `None`. The non-`None` entries always form a contiguous
/// bijection onto `0..ndofs`.
#[derive(Debug, Clone, Default)]
pub struct DofMap {
  index_of: Vec<Option<DofIdx>>,
  ndofs: usize,
}

impl DofMap {
  pub fn build(on_boundary: &[bool], bc: BoundaryCondition) -> Self {
    let mut ndofs = 0;
    let index_of = on_boundary
      .iter()
      .map(|&on_boundary| {
        let fixed = bc == BoundaryCondition::Dirichlet && on_boundary;
        (!fixed).then(|| {
          let dof = ndofs;
          ndofs += 1;
          dof
        })
      })
      .collect();

    Self { index_of, ndofs }
  }

  pub fn ndofs(&self) -> usize {
    self.ndofs
  }
  pub fn nvertices(&self) -> usize {
    self.index_of.len()
  }
  pub fn dof_of(&self, ivertex: VertexIdx) -> Option<DofIdx> {
    self.index_of[ivertex]
  }
  pub fn iter(&self) -> impl Iterator<Item = (VertexIdx, Option<DofIdx>)> + '_ {
    self.index_of.iter().copied().enumerate()
  }
}
