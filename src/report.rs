use planar_truss::Displacement;
use std::fmt::Write;

/// Solved response of a single member, labelled for the report.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberResult {
    /// Human-readable member label.
    pub name: &'static str,
    /// Axial force in newtons, tension positive.
    pub axial_force: f64,
    /// Axial stress in pascals.
    pub stress: f64,
}

/// Summary of the results from the triangular truss analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveSummary {
    /// Vertical load applied at the apex in newtons.
    pub applied_load: f64,
    /// Displacement of the apex joint.
    pub apex_displacement: Displacement,
    /// Per-member axial response.
    pub members: Vec<MemberResult>,
}

/// Render a textual summary of the triangular truss analysis.
///
/// The formatted report walks through the key numbers so the output can be
/// cross-checked against hand calculations for a symmetric triangular truss.
#[must_use]
pub fn render_summary(summary: &SolveSummary) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Triangular truss analysis (apex load = {:.1} N)",
        summary.applied_load
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Displacement at apex: ux = {:+.3e} m, uy = {:+.3e} m",
        summary.apex_displacement.x, summary.apex_displacement.y
    )
    .expect("writing to string cannot fail");

    for member in &summary.members {
        let state = if member.axial_force >= 0.0 {
            "tension"
        } else {
            "compression"
        };
        writeln!(
            &mut output,
            "Member {}: axial force = {:+.1} N ({state}), stress = {:+.3e} Pa",
            member.name, member.axial_force, member.stress
        )
        .expect("writing to string cannot fail");
    }

    output
}
