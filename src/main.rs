mod report;

use planar_truss::{force, point, CrossSection, Fixity, Material, Truss};
use report::{render_summary, MemberResult, SolveSummary};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Build the bare truss geometry before we think about loads or materials:
    // a simply supported triangle with a pin on the left, a roller on the
    // right and a free apex.
    let mut truss = Truss::new();
    let left = truss.add_joint(point(0.0, 0.0), Fixity::Pin);
    let right = truss.add_joint(point(4.0, 0.0), Fixity::Roller);
    let apex = truss.add_joint(point(2.0, 1.5), Fixity::Free);

    // All three members share a solid steel rod section. The cross-section
    // and material providers validate their values up front, so a bad area or
    // modulus never reaches the solver.
    let section = CrossSection::Rod { radius: 0.05 }.validated()?;
    let steel = Material::new(200.0e9)?.with_yield_strength(250.0e6);

    let members = [
        ("left-apex", truss.add_member(left, apex, section, steel)?),
        ("right-apex", truss.add_member(right, apex, section, steel)?),
        ("left-right", truss.add_member(left, right, section, steel)?),
    ];

    // Pull the apex straight down and run the direct stiffness analysis.
    let applied_load = -10_000.0;
    truss.set_load(apex, force(0.0, applied_load))?;
    truss.evaluate()?;

    let apex_displacement = truss
        .joint_displacement(apex)
        .expect("displacement computed during evaluation");
    let member_results = members
        .iter()
        .map(|&(name, member)| MemberResult {
            name,
            axial_force: truss
                .member_axial_force(member)
                .expect("axial force computed during evaluation"),
            stress: truss
                .member_stress(member)
                .expect("stress computed during evaluation"),
        })
        .collect();

    // Render a human-friendly report and print it for the CLI user.
    let summary = SolveSummary {
        applied_load,
        apex_displacement,
        members: member_results,
    };
    print!("{}", render_summary(&summary));

    Ok(())
}
