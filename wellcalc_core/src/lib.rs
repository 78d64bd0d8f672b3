//! # wellcalc_core - Well Completion Calculation Engine
//!
//! `wellcalc_core` evaluates the closed-form reservoir-engineering
//! correlations used while designing a well completion: radial inflow,
//! near-wellbore skin, pressure drop, flow efficiency, productivity and
//! injectivity indices, the Vogel inflow-performance curve below the bubble
//! point, and a phasing-dependent perforation skin model.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Each calculation is a pure function of its parameters
//! - **JSON-First**: Parameters, results and errors implement Serialize/Deserialize
//! - **Rich Errors**: Zero divisors and out-of-domain values are reported, never clamped
//! - **Auditable**: Every formula is listed in [`equations::registry`]
//!
//! ## Quick Start
//!
//! ```rust
//! use wellcalc_core::calculations::reservoir::{ReservoirCalculator, WellParameters};
//!
//! let params = WellParameters::new(50.0, 30.0, 3000.0, 2500.0, 2.0, 1.2, 1000.0, 0.5)
//!     .with_damaged_zone(3.0, 10.0);
//! let calc = ReservoirCalculator::new(params);
//!
//! let qo = calc.inflow_rate().unwrap();
//! let qs = calc.inflow_rate_with_skin().unwrap();
//! assert!(qs < qo); // damaged zone restricts flow
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Reservoir, IPR and perforation calculations
//! - [`equations`] - The underlying formulas and their metadata
//! - [`registry`] - Named result records and ranking
//! - [`input`] - Raw text input parsing
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod input;
pub mod registry;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    CalculationKind, InflowResult, IprCurve, IprPoint, PerforationParameters,
    PerforationSkinResult, ProductivityResult, ReservoirCalculator, WellParameters,
};
pub use equations::Phasing;
pub use errors::{CalcError, CalcResult};
pub use input::{parse_field, RawFields};
pub use registry::{CalculationRecord, RankedRecord, RankingMetric, RecordPayload, WellRegistry};
