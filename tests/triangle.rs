#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use nalgebra::DVector;
use petgraph::graph::{EdgeIndex, NodeIndex};
use planar_truss::{force, point, AnalysisError, CrossSection, Fixity, Material, Truss};

const SPAN: f64 = 4.0;
const HEIGHT: f64 = 1.5;
const AREA: f64 = 0.002;
const ELASTIC_MODULUS: f64 = 200.0e9;
const APEX_LOAD: f64 = -10_000.0;

#[derive(Debug, Clone, Copy)]
struct TriangleGeometry {
    left: NodeIndex,
    right: NodeIndex,
    apex: NodeIndex,
    left_diagonal: EdgeIndex,
    right_diagonal: EdgeIndex,
    chord: EdgeIndex,
}

/// A simply supported triangle: pin on the left, roller on the right, free
/// apex above midspan. All members share one section and material.
fn build_triangle_truss() -> (Truss, TriangleGeometry) {
    let mut truss = Truss::new();
    let left = truss.add_joint(point(0.0, 0.0), Fixity::Pin);
    let right = truss.add_joint(point(SPAN, 0.0), Fixity::Roller);
    let apex = truss.add_joint(point(SPAN / 2.0, HEIGHT), Fixity::Free);

    let section = CrossSection::Custom { area: AREA };
    let material = Material::new(ELASTIC_MODULUS).expect("positive modulus accepted");
    let left_diagonal = truss
        .add_member(left, apex, section, material)
        .expect("member accepted");
    let right_diagonal = truss
        .add_member(right, apex, section, material)
        .expect("member accepted");
    let chord = truss
        .add_member(left, right, section, material)
        .expect("member accepted");

    (
        truss,
        TriangleGeometry {
            left,
            right,
            apex,
            left_diagonal,
            right_diagonal,
            chord,
        },
    )
}

#[test]
fn vertical_apex_load_produces_symmetric_member_forces() {
    let (mut truss, geometry) = build_triangle_truss();
    truss
        .set_load(geometry.apex, force(0.0, APEX_LOAD))
        .expect("load applied");

    truss.evaluate().expect("triangle analysis succeeds");

    // Statics by the method of joints: each support reacts with half the
    // load, the diagonals carry (P/2)/sin(theta) in compression, and the
    // bottom chord balances their horizontal pull in tension.
    let diagonal_length = (SPAN * SPAN / 4.0 + HEIGHT * HEIGHT).sqrt();
    let sin_theta = HEIGHT / diagonal_length;
    let cos_theta = (SPAN / 2.0) / diagonal_length;
    let expected_diagonal = APEX_LOAD.abs() / 2.0 / sin_theta;
    let expected_chord = APEX_LOAD.abs() / 2.0 * cos_theta / sin_theta;

    let left_force = truss
        .member_axial_force(geometry.left_diagonal)
        .expect("force available");
    let right_force = truss
        .member_axial_force(geometry.right_diagonal)
        .expect("force available");
    let chord_force = truss
        .member_axial_force(geometry.chord)
        .expect("force available");

    assert_relative_eq!(left_force, -expected_diagonal, epsilon = 1.0e-6);
    assert_relative_eq!(right_force, -expected_diagonal, epsilon = 1.0e-6);
    assert_relative_eq!(left_force, right_force, epsilon = 1.0e-9);
    assert_relative_eq!(chord_force, expected_chord, epsilon = 1.0e-6);

    // The pin holds the left support while the roller slides right by the
    // chord elongation; equal diagonal forces put the apex exactly halfway,
    // and it sinks by a finite amount.
    let chord_elongation = expected_chord * SPAN / (AREA * ELASTIC_MODULUS);
    let apex_displacement = truss
        .joint_displacement(geometry.apex)
        .expect("displacement available");
    assert_relative_eq!(
        apex_displacement.x,
        chord_elongation / 2.0,
        epsilon = 1.0e-10
    );
    assert!(apex_displacement.y < 0.0);
    assert!(apex_displacement.y.is_finite());

    // The roller slides horizontally but is held vertically.
    let roller_displacement = truss
        .joint_displacement(geometry.right)
        .expect("displacement available");
    assert_relative_eq!(roller_displacement.x, chord_elongation, epsilon = 1.0e-10);
    assert_relative_eq!(roller_displacement.y, 0.0, epsilon = 1.0e-15);
}

#[test]
fn zero_load_stays_in_equilibrium() {
    let (mut truss, geometry) = build_triangle_truss();

    let loading = DVector::zeros(truss.dof_count());
    let displacements = truss
        .direct_stiffness(&loading)
        .expect("triangle analysis succeeds");

    assert_relative_eq!(displacements.norm(), 0.0, epsilon = 1.0e-15);
    for member in [
        geometry.left_diagonal,
        geometry.right_diagonal,
        geometry.chord,
    ] {
        let axial_force = truss.member_axial_force(member).expect("force available");
        assert_relative_eq!(axial_force, 0.0, epsilon = 1.0e-12);
    }
}

#[test]
fn member_orientation_does_not_change_the_physics() {
    let build = |reverse: bool| {
        let mut truss = Truss::new();
        let left = truss.add_joint(point(0.0, 0.0), Fixity::Pin);
        let right = truss.add_joint(point(SPAN, 0.0), Fixity::Roller);
        let apex = truss.add_joint(point(SPAN / 2.0, HEIGHT), Fixity::Free);

        let section = CrossSection::Custom { area: AREA };
        let material = Material::new(ELASTIC_MODULUS).expect("positive modulus accepted");
        let left_diagonal = if reverse {
            truss.add_member(apex, left, section, material)
        } else {
            truss.add_member(left, apex, section, material)
        }
        .expect("member accepted");
        truss
            .add_member(right, apex, section, material)
            .expect("member accepted");
        truss
            .add_member(left, right, section, material)
            .expect("member accepted");
        truss
            .set_load(apex, force(0.0, APEX_LOAD))
            .expect("load applied");
        truss.evaluate().expect("triangle analysis succeeds");
        truss
            .member_axial_force(left_diagonal)
            .expect("force available")
    };

    let forward = build(false);
    let reversed = build(true);
    assert_relative_eq!(forward, reversed, epsilon = 1.0e-9);
}

#[test]
fn global_displacement_vector_matches_joint_accessors() {
    let (mut truss, geometry) = build_triangle_truss();
    truss
        .set_load(geometry.apex, force(1_000.0, APEX_LOAD))
        .expect("load applied");

    let loading = truss.load_vector();
    let displacements = truss
        .direct_stiffness(&loading)
        .expect("triangle analysis succeeds");

    for (ordinal, joint) in [geometry.left, geometry.right, geometry.apex]
        .into_iter()
        .enumerate()
    {
        let stored = truss.joint_displacement(joint).expect("displacement available");
        assert_relative_eq!(stored.x, displacements[2 * ordinal], epsilon = 1.0e-15);
        assert_relative_eq!(stored.y, displacements[2 * ordinal + 1], epsilon = 1.0e-15);
    }
}

#[test]
fn batch_load_cases_scale_linearly() {
    let (mut truss, geometry) = build_triangle_truss();

    let mut unit_loading = DVector::zeros(truss.dof_count());
    unit_loading[2 * geometry.apex.index() + 1] = -1_000.0;
    let unit_displacements = truss
        .direct_stiffness(&unit_loading)
        .expect("triangle analysis succeeds");

    let doubled_displacements = truss
        .direct_stiffness(&(2.0 * &unit_loading))
        .expect("triangle analysis succeeds");

    // Linear analysis: doubling the load doubles every displacement, and the
    // second solve overwrote the stored member forces.
    assert_relative_eq!(
        doubled_displacements,
        2.0 * &unit_displacements,
        epsilon = 1.0e-15
    );
    let chord_force = truss
        .member_axial_force(geometry.chord)
        .expect("force available");
    let unit_chord_force = {
        truss
            .direct_stiffness(&unit_loading)
            .expect("triangle analysis succeeds");
        truss
            .member_axial_force(geometry.chord)
            .expect("force available")
    };
    assert_relative_eq!(chord_force, 2.0 * unit_chord_force, epsilon = 1.0e-9);
}

#[test]
fn removing_the_roller_makes_the_truss_unstable() {
    let mut truss = Truss::new();
    let left = truss.add_joint(point(0.0, 0.0), Fixity::Pin);
    // Free instead of a roller: one restrained degree of freedom too few.
    let right = truss.add_joint(point(SPAN, 0.0), Fixity::Free);
    let apex = truss.add_joint(point(SPAN / 2.0, HEIGHT), Fixity::Free);

    let section = CrossSection::Custom { area: AREA };
    let material = Material::new(ELASTIC_MODULUS).expect("positive modulus accepted");
    truss
        .add_member(left, apex, section, material)
        .expect("member accepted");
    truss
        .add_member(right, apex, section, material)
        .expect("member accepted");
    truss
        .add_member(left, right, section, material)
        .expect("member accepted");

    assert!(!truss.is_stable());
    let error = truss.evaluate().expect_err("unstable truss rejected");
    assert_eq!(
        error,
        AnalysisError::Unstable {
            joints: 3,
            members: 3,
            restrained: 2
        }
    );
}
