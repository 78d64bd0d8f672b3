//! # Equation Registry
//!
//! Central registry of every correlation used by the engine. Each equation
//! carries metadata (formula, reference, variables with oilfield units,
//! assumptions) so results can be audited against the literature.
//!
//! ## Usage
//!
//! ```rust
//! use wellcalc_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record_for_well(Equation::RadialInflowRate, "Undamaged rate", "W-1");
//!
//! let meta = Equation::RadialInflowRate.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! assert_eq!(tracker.unique_equations(), vec![Equation::RadialInflowRate]);
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Literature source of an equation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// Ahmed, Reservoir Engineering Handbook
    Ahmed { edition: u8, chapter: u8 },
    /// Hawkins (1956), A Note on the Skin Effect
    Hawkins1956,
    /// Vogel (1968), Inflow Performance Relationships for Solution-Gas Drive Wells
    Vogel1968,
    /// Karakas & Tariq (1991), Semianalytical Productivity Models for Perforated Completions
    KarakasTariq1991,
    /// Darcy's law in linear form
    Darcy,
}

impl CodeReference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Ahmed { edition, chapter } => {
                format!("Ahmed, Reservoir Engineering Handbook {}ed, Ch. {}", edition, chapter)
            }
            CodeReference::Hawkins1956 => "Hawkins (1956), JPT 8(12)".to_string(),
            CodeReference::Vogel1968 => "Vogel (1968), JPT 20(1)".to_string(),
            CodeReference::KarakasTariq1991 => "Karakas & Tariq (1991), SPE Production Engineering".to_string(),
            CodeReference::Darcy => "Darcy's Law (linear flow)".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::Ahmed { .. } => "Ahmed",
            CodeReference::Hawkins1956 => "Hawkins",
            CodeReference::Vogel1968 => "Vogel",
            CodeReference::KarakasTariq1991 => "Karakas-Tariq",
            CodeReference::Darcy => "Darcy",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in generated documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Radial inflow and pressure drop
    RadialFlow,
    /// Near-wellbore damage and flow efficiency
    NearWellboreDamage,
    /// Productivity and injectivity indices
    Deliverability,
    /// Vogel inflow performance below the bubble point
    BelowBubblePoint,
    /// Dimensionless perforation geometry groups
    PerforationGeometry,
    /// Perforation skin components and totals
    PerforationSkin,
}

impl EquationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::RadialFlow => "Radial Flow",
            EquationCategory::NearWellboreDamage => "Near-Wellbore Damage",
            EquationCategory::Deliverability => "Deliverability",
            EquationCategory::BelowBubblePoint => "Below Bubble Point",
            EquationCategory::PerforationGeometry => "Perforation Geometry",
            EquationCategory::PerforationSkin => "Perforation Skin",
        }
    }

    /// Sort order for generated documentation (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::RadialFlow => 1,
            EquationCategory::NearWellboreDamage => 2,
            EquationCategory::Deliverability => 3,
            EquationCategory::BelowBubblePoint => 4,
            EquationCategory::PerforationGeometry => 5,
            EquationCategory::PerforationSkin => 6,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// What the equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Literature reference
    pub reference: CodeReference,
    pub variables: Vec<Variable>,
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All correlations used by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Radial flow
    // -------------------------------------------------------------------------
    /// qo = 0.00708 ko h (pr - pw) / (uo Bo ln(0.472 re/rw))
    RadialInflowRate,
    /// qo with skin added to the drainage logarithm
    RadialInflowRateWithSkin,
    /// ΔP = qo Bo uo L / (0.00127 A ko)
    LinearPressureDrop,

    // -------------------------------------------------------------------------
    // Damage
    // -------------------------------------------------------------------------
    /// S = (ko/kd - 1) ln(rd/rw)
    HawkinsSkinFactor,
    /// FE = ln(0.472 re/rw) / (ln(0.472 re/rw) + S)
    FlowEfficiency,

    // -------------------------------------------------------------------------
    // Deliverability
    // -------------------------------------------------------------------------
    /// IP = q1 / (Pe - pwf)
    ProductivityIndex,
    /// II = q1 / (pwf - Pe)
    InjectivityIndex,

    // -------------------------------------------------------------------------
    // Below bubble point
    // -------------------------------------------------------------------------
    /// qsat = IP (Pe - psat)
    BubblePointRate,
    /// qc = qsat psat / (1.8 (Pe - psat))
    VogelCorrection,
    /// qmax = qsat + qc
    MaximumRate,
    /// q(pwf) Vogel curve
    VogelInflowCurve,

    // -------------------------------------------------------------------------
    // Perforation
    // -------------------------------------------------------------------------
    /// ΔPperf = 3000 / k^n
    PerforationPressureCoefficient,
    /// hD = (h/lp) sqrt(kh/kv)
    DimensionlessHeight,
    /// rpD = (rp/2h)(1 + sqrt(kv/kh))
    DimensionlessPerforationRadius,
    /// rwD = rw / (lp + rw)
    DimensionlessWellboreRadius,
    /// Sh = ln(4 rw / lp)
    HoleSkin,
    /// Swb = C1 exp(C2 rwD)
    WellboreSkin,
    /// Sv = 10^a hD^(b-1) rpD^b
    VerticalSkin,
    /// Sp = Sh + Swb + Sv
    TotalPerforationSkin,
    /// Sx step function of rd/(rw + lp)
    CrushedZoneCorrection,
    /// Sdp = Sp + Sx
    DesignSkin,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::RadialInflowRate => EquationMetadata {
                name: "Radial Inflow Rate",
                description: "Steady-state radial Darcy oil rate into an undamaged vertical well",
                formula_plain: "qo = 0.00708 ko h (pr - pw) / (uo Bo ln(0.472 re/rw))",
                reference: CodeReference::Ahmed { edition: 4, chapter: 6 },
                variables: vec![
                    Variable::new("qo", "Oil rate", "bbl/day"),
                    Variable::new("ko", "Formation permeability", "md"),
                    Variable::new("h", "Net pay thickness", "ft"),
                    Variable::new("pr", "Average reservoir pressure", "psi"),
                    Variable::new("pw", "Flowing bottomhole pressure", "psi"),
                    Variable::new("uo", "Oil viscosity", "cp"),
                    Variable::new("Bo", "Oil formation-volume factor", "bbl/STB"),
                    Variable::new("re", "Drainage radius", "ft"),
                    Variable::new("rw", "Wellbore radius", "ft"),
                ],
                assumptions: vec!["Single-phase incompressible oil", "Homogeneous isotropic formation"],
                category: EquationCategory::RadialFlow,
                source_module: "equations/inflow.rs",
                source_function: "radial_flow_numerator",
            },

            Equation::RadialInflowRateWithSkin => EquationMetadata {
                name: "Radial Inflow Rate with Skin",
                description: "Radial oil rate with the skin factor added to the drainage logarithm",
                formula_plain: "qo = 0.00708 ko h (pr - pw) / (uo Bo (ln(0.472 re/rw) + S))",
                reference: CodeReference::Ahmed { edition: 4, chapter: 6 },
                variables: vec![
                    Variable::new("qo", "Oil rate", "bbl/day"),
                    Variable::new("S", "Skin factor", "-"),
                ],
                assumptions: vec!["Skin concentrated in a thin zone at the wellbore"],
                category: EquationCategory::RadialFlow,
                source_module: "equations/inflow.rs",
                source_function: "radial_flow_denominator",
            },

            Equation::LinearPressureDrop => EquationMetadata {
                name: "Linear Pressure Drop",
                description: "Pressure drop across a completion section carrying the radial inflow rate",
                formula_plain: "dP = qo Bo uo L / (0.00127 A ko)",
                reference: CodeReference::Darcy,
                variables: vec![
                    Variable::new("dP", "Pressure drop", "psi"),
                    Variable::new("L", "Section length", "ft"),
                    Variable::new("A", "Cross-sectional area", "ft^2"),
                ],
                assumptions: vec!["Linear laminar flow", "qo is the undamaged radial rate"],
                category: EquationCategory::RadialFlow,
                source_module: "equations/inflow.rs",
                source_function: "linear_pressure_drop",
            },

            Equation::HawkinsSkinFactor => EquationMetadata {
                name: "Hawkins Skin Factor",
                description: "Additional dimensionless resistance of a permeability-altered annulus",
                formula_plain: "S = (ko/kd - 1) ln(rd/rw)",
                reference: CodeReference::Hawkins1956,
                variables: vec![
                    Variable::new("S", "Skin factor", "-"),
                    Variable::new("kd", "Damaged-zone permeability", "md"),
                    Variable::new("rd", "Damaged-zone radius", "ft"),
                ],
                assumptions: vec!["Cylindrical damaged zone of uniform permeability", "rd > rw"],
                category: EquationCategory::NearWellboreDamage,
                source_module: "equations/inflow.rs",
                source_function: "hawkins_skin",
            },

            Equation::FlowEfficiency => EquationMetadata {
                name: "Flow Efficiency",
                description: "Fraction of undamaged productivity actually realised",
                formula_plain: "FE = ln(0.472 re/rw) / (ln(0.472 re/rw) + S)",
                reference: CodeReference::Ahmed { edition: 4, chapter: 6 },
                variables: vec![Variable::new("FE", "Flow efficiency", "-")],
                assumptions: vec!["FE = 1 for an undamaged well"],
                category: EquationCategory::NearWellboreDamage,
                source_module: "equations/inflow.rs",
                source_function: "flow_efficiency",
            },

            Equation::ProductivityIndex => EquationMetadata {
                name: "Productivity Index",
                description: "Production rate per unit drawdown at the test point",
                formula_plain: "IP = q1 / (Pe - pwf)",
                reference: CodeReference::Ahmed { edition: 4, chapter: 7 },
                variables: vec![
                    Variable::new("IP", "Productivity index", "bbl/day/psi"),
                    Variable::new("q1", "Test rate", "bbl/day"),
                    Variable::new("Pe", "External pressure at test", "psi"),
                    Variable::new("pwf", "Flowing bottomhole pressure at test", "psi"),
                ],
                assumptions: vec!["Linear inflow above the bubble point"],
                category: EquationCategory::Deliverability,
                source_module: "equations/productivity.rs",
                source_function: "productivity_index",
            },

            Equation::InjectivityIndex => EquationMetadata {
                name: "Injectivity Index",
                description: "Injection rate per unit pressure excess at the test point",
                formula_plain: "II = q1 / (pwf - Pe)",
                reference: CodeReference::Ahmed { edition: 4, chapter: 7 },
                variables: vec![Variable::new("II", "Injectivity index", "bbl/day/psi")],
                assumptions: vec!["Same magnitude as IP, positive when pwf > Pe"],
                category: EquationCategory::Deliverability,
                source_module: "equations/productivity.rs",
                source_function: "injectivity_index",
            },

            Equation::BubblePointRate => EquationMetadata {
                name: "Bubble-Point Rate",
                description: "Rate at the saturation pressure extrapolated linearly from the test point",
                formula_plain: "qsat = IP (Pe - psat)",
                reference: CodeReference::Vogel1968,
                variables: vec![
                    Variable::new("qsat", "Rate at bubble point", "bbl/day"),
                    Variable::new("psat", "Bubble-point pressure", "psi"),
                ],
                assumptions: vec!["Test point above the bubble point"],
                category: EquationCategory::BelowBubblePoint,
                source_module: "equations/productivity.rs",
                source_function: "bubble_point_rate",
            },

            Equation::VogelCorrection => EquationMetadata {
                name: "Vogel Correction Rate",
                description: "Additional rate available below the bubble point",
                formula_plain: "qc = qsat psat / (1.8 (Pe - psat))",
                reference: CodeReference::Vogel1968,
                variables: vec![Variable::new("qc", "Vogel correction rate", "bbl/day")],
                assumptions: vec!["Solution-gas drive below psat"],
                category: EquationCategory::BelowBubblePoint,
                source_module: "equations/productivity.rs",
                source_function: "vogel_correction",
            },

            Equation::MaximumRate => EquationMetadata {
                name: "Maximum Rate",
                description: "Absolute open-flow potential combining linear and Vogel contributions",
                formula_plain: "qmax = qsat + qc",
                reference: CodeReference::Vogel1968,
                variables: vec![Variable::new("qmax", "Absolute open flow", "bbl/day")],
                assumptions: vec![],
                category: EquationCategory::BelowBubblePoint,
                source_module: "calculations/reservoir.rs",
                source_function: "qmax",
            },

            Equation::VogelInflowCurve => EquationMetadata {
                name: "Vogel Inflow Curve",
                description: "Rate at a flowing pressure below the bubble point",
                formula_plain: "q = qc (1.8 Pe/psat - 0.8 - 0.2 (pwf/psat) - 0.8 (pwf/psat)^2)",
                reference: CodeReference::Vogel1968,
                variables: vec![Variable::new("pwf", "Sample flowing pressure", "psi")],
                assumptions: vec!["pwf <= psat"],
                category: EquationCategory::BelowBubblePoint,
                source_module: "equations/productivity.rs",
                source_function: "vogel_rate",
            },

            Equation::PerforationPressureCoefficient => EquationMetadata {
                name: "Perforation Pressure Coefficient",
                description: "Phasing-dependent perforation pressure-drop coefficient",
                formula_plain: "dPperf = 3000 / k^n (n = 0.37 at 0 deg, 0.40 at 180 deg)",
                reference: CodeReference::KarakasTariq1991,
                variables: vec![Variable::new("k", "Formation permeability", "md")],
                assumptions: vec!["Phasing is 0 or 180 degrees"],
                category: EquationCategory::PerforationGeometry,
                source_module: "equations/perforation.rs",
                source_function: "pressure_drop_coefficient",
            },

            Equation::DimensionlessHeight => EquationMetadata {
                name: "Dimensionless Height",
                description: "Interval height scaled by tunnel length and anisotropy",
                formula_plain: "hD = (h/lp) sqrt(kh/kv)",
                reference: CodeReference::KarakasTariq1991,
                variables: vec![
                    Variable::new("h", "Perforated interval height", "ft"),
                    Variable::new("lp", "Perforation length", "ft"),
                    Variable::new("kh", "Horizontal permeability", "md"),
                    Variable::new("kv", "Vertical permeability", "md"),
                ],
                assumptions: vec!["kh = kv = 1 when anisotropy is not supplied"],
                category: EquationCategory::PerforationGeometry,
                source_module: "equations/perforation.rs",
                source_function: "dimensionless_height",
            },

            Equation::DimensionlessPerforationRadius => EquationMetadata {
                name: "Dimensionless Perforation Radius",
                description: "Perforation radius scaled by interval height",
                formula_plain: "rpD = (rp / 2h) (1 + sqrt(kv/kh))",
                reference: CodeReference::KarakasTariq1991,
                variables: vec![Variable::new("rp", "Perforation radius", "ft")],
                assumptions: vec!["rpD > 0"],
                category: EquationCategory::PerforationGeometry,
                source_module: "equations/perforation.rs",
                source_function: "dimensionless_perforation_radius",
            },

            Equation::DimensionlessWellboreRadius => EquationMetadata {
                name: "Dimensionless Wellbore Radius",
                description: "Wellbore radius relative to wellbore plus tunnel",
                formula_plain: "rwD = rw / (lp + rw)",
                reference: CodeReference::KarakasTariq1991,
                variables: vec![Variable::new("rw", "Wellbore radius", "ft")],
                assumptions: vec![],
                category: EquationCategory::PerforationGeometry,
                source_module: "equations/perforation.rs",
                source_function: "dimensionless_wellbore_radius",
            },

            Equation::HoleSkin => EquationMetadata {
                name: "Hole Skin",
                description: "Geometric skin of the perforation pattern",
                formula_plain: "Sh = ln(4 rw / lp)",
                reference: CodeReference::KarakasTariq1991,
                variables: vec![Variable::new("Sh", "Hole skin", "-")],
                assumptions: vec![],
                category: EquationCategory::PerforationSkin,
                source_module: "equations/perforation.rs",
                source_function: "hole_skin",
            },

            Equation::WellboreSkin => EquationMetadata {
                name: "Wellbore Skin",
                description: "Wellbore effect on flow into the perforations",
                formula_plain: "Swb = C1 exp(C2 rwD)",
                reference: CodeReference::KarakasTariq1991,
                variables: vec![
                    Variable::new("C1", "Phasing coefficient", "-"),
                    Variable::new("C2", "Phasing coefficient", "-"),
                ],
                assumptions: vec!["Coefficients selected by phasing"],
                category: EquationCategory::PerforationSkin,
                source_module: "equations/perforation.rs",
                source_function: "wellbore_skin",
            },

            Equation::VerticalSkin => EquationMetadata {
                name: "Vertical Convergence Skin",
                description: "Skin from vertical convergence of flow towards the perforations",
                formula_plain: "Sv = 10^a hD^(b-1) rpD^b, a = a1 ln(rpD) + a2, b = b1 rpD + b2",
                reference: CodeReference::KarakasTariq1991,
                variables: vec![
                    Variable::new("a", "Convergence exponent", "-"),
                    Variable::new("b", "Convergence exponent", "-"),
                ],
                assumptions: vec!["Coefficients selected by phasing"],
                category: EquationCategory::PerforationSkin,
                source_module: "equations/perforation.rs",
                source_function: "vertical_skin",
            },

            Equation::TotalPerforationSkin => EquationMetadata {
                name: "Total Perforation Skin",
                description: "Sum of hole, wellbore and vertical convergence skins",
                formula_plain: "Sp = Sh + Swb + Sv",
                reference: CodeReference::KarakasTariq1991,
                variables: vec![Variable::new("Sp", "Perforation skin", "-")],
                assumptions: vec![],
                category: EquationCategory::PerforationSkin,
                source_module: "calculations/perforation.rs",
                source_function: "calculate",
            },

            Equation::CrushedZoneCorrection => EquationMetadata {
                name: "Crushed-Zone Correction",
                description: "Step correction for the crushed zone around the tunnel",
                formula_plain: "Sx = 0 (>= 18), -0.001 ([2,18)), -0.002 ([1.5,2)), -0.0024 (< 1.5) of rd/(rw + lp)",
                reference: CodeReference::KarakasTariq1991,
                variables: vec![Variable::new("rd", "Crushed-zone radius", "ft")],
                assumptions: vec!["Band boundaries are half-open; ties go to the higher band"],
                category: EquationCategory::PerforationSkin,
                source_module: "equations/perforation.rs",
                source_function: "crushed_zone_correction",
            },

            Equation::DesignSkin => EquationMetadata {
                name: "Design Skin",
                description: "Final perforation design skin used for ranking",
                formula_plain: "Sdp = Sp + Sx",
                reference: CodeReference::KarakasTariq1991,
                variables: vec![Variable::new("Sdp", "Design skin", "-")],
                assumptions: vec!["Designs are displayed in descending Sdp order"],
                category: EquationCategory::PerforationSkin,
                source_module: "calculations/perforation.rs",
                source_function: "calculate",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories in documentation order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![
            RadialFlow,
            NearWellboreDamage,
            Deliverability,
            BelowBubblePoint,
            PerforationGeometry,
            PerforationSkin,
        ];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::RadialInflowRate,
    Equation::RadialInflowRateWithSkin,
    Equation::LinearPressureDrop,
    Equation::HawkinsSkinFactor,
    Equation::FlowEfficiency,
    Equation::ProductivityIndex,
    Equation::InjectivityIndex,
    Equation::BubblePointRate,
    Equation::VogelCorrection,
    Equation::MaximumRate,
    Equation::VogelInflowCurve,
    Equation::PerforationPressureCoefficient,
    Equation::DimensionlessHeight,
    Equation::DimensionlessPerforationRadius,
    Equation::DimensionlessWellboreRadius,
    Equation::HoleSkin,
    Equation::WellboreSkin,
    Equation::VerticalSkin,
    Equation::TotalPerforationSkin,
    Equation::CrushedZoneCorrection,
    Equation::DesignSkin,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being used in a calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationUsage {
    pub equation: Equation,
    /// Where/why it was used (e.g., "Undamaged rate")
    pub context: String,
    /// Well the equation was applied to, if any
    pub well_name: Option<String>,
}

impl EquationUsage {
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            well_name: None,
        }
    }

    pub fn for_well(equation: Equation, context: impl Into<String>, well: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            well_name: Some(well.into()),
        }
    }
}

/// Collector for equation usage across a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Record equation usage for a specific well
    pub fn record_for_well(&mut self, equation: Equation, context: impl Into<String>, well: impl Into<String>) {
        self.usages.push(EquationUsage::for_well(equation, context, well));
    }

    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Unique equations used, in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group unique equations by category
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    pub fn merge(&mut self, other: EquationTracker) {
        self.usages.extend(other.usages);
    }
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md reference document.
///
/// # Example
///
/// ```rust
/// use wellcalc_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("WellCalc Equations Reference"));
/// assert!(markdown.contains("Perforation Skin"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(r#"# WellCalc Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every correlation used by WellCalc, with its formula,
literature reference, source location and assumptions.

## Unit System

| Quantity | Unit |
|----------|------|
| Rate | bbl/day |
| Permeability | md |
| Length, radius | ft |
| Area | ft^2 |
| Viscosity | cp |
| Pressure | psi |

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol, var.description, var.units
                    ));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}
