//! # Reservoir and Completion Equations
//!
//! All closed-form correlations used by the calculation engine live here,
//! as plain `f64` functions. Keeping them in one place makes them easy to
//! check against the literature and to document (see [`registry`]).
//!
//! ## Modules
//!
//! - [`inflow`] - Radial inflow, Hawkins skin, linear pressure drop, flow efficiency
//! - [`productivity`] - Productivity/injectivity indices and Vogel IPR
//! - [`perforation`] - Karakas-Tariq perforation skin and phasing coefficients
//! - [`registry`] - Equation metadata and tracking for documentation
//!
//! ## Units
//!
//! Oilfield units throughout: bbl/day, md, ft, cp, psi. No conversion is
//! performed; callers supply consistent inputs.

pub mod inflow;
pub mod perforation;
pub mod productivity;
pub mod registry;

pub use inflow::{
    drainage_log,
    flow_efficiency,
    hawkins_skin,
    linear_pressure_drop,
    linear_pressure_drop_denominator,
    radial_flow_denominator,
    radial_flow_numerator,
};

pub use productivity::{
    bubble_point_rate,
    injectivity_index,
    productivity_index,
    vogel_correction,
    vogel_rate,
};

pub use perforation::{
    crushed_zone_correction,
    Phasing,
    PhasingCoefficients,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
