extern crate nalgebra as na;
extern crate nalgebra_sparse as nas;

pub mod assemble;
pub mod cg;
pub mod dof;
pub mod equation;
pub mod operators;
pub mod solver;
pub mod surface;

pub type VertexIdx = usize;
pub type DofIdx = usize;
