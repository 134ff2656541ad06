//! The supported equations and their parameter records.
//!
//! One record per equation; all records live side by side so tuning one
//! equation survives switching to another.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Equation {
  Heat,
  #[default]
  Wave,
  AdvectionDiffusion,
  ReactionDiffusion,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatParams {
  pub time_step: f32,
  pub conductivity: f32,
}
impl Default for HeatParams {
  fn default() -> Self {
    Self {
      time_step: 0.01,
      conductivity: 0.05,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
  pub time_step: f32,
  pub wave_speed: f32,
}
impl Default for WaveParams {
  fn default() -> Self {
    Self {
      time_step: 0.05,
      wave_speed: 0.05,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvectionDiffusionParams {
  pub time_step: f32,
  pub diffusivity: f32,
  pub velocity: na::Vector3<f32>,
}
impl Default for AdvectionDiffusionParams {
  fn default() -> Self {
    Self {
      time_step: 0.001,
      diffusivity: 0.25,
      velocity: na::Vector3::new(1.0, 0.0, 0.0),
    }
  }
}

/// Gray-Scott coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionDiffusionParams {
  pub time_step: f32,
  pub diffusion_u: f32,
  pub diffusion_v: f32,
  pub feed_rate: f32,
  pub kill_rate: f32,
}
impl Default for ReactionDiffusionParams {
  fn default() -> Self {
    Self {
      time_step: 0.001,
      diffusion_u: 0.08,
      diffusion_v: 0.04,
      feed_rate: 0.035,
      kill_rate: 0.06,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EquationParams {
  pub heat: HeatParams,
  pub wave: WaveParams,
  pub advection_diffusion: AdvectionDiffusionParams,
  pub reaction_diffusion: ReactionDiffusionParams,
}
