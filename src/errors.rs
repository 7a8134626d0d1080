//! Error types produced while editing or analysing trusses.

use petgraph::graph::{EdgeIndex, NodeIndex};
use thiserror::Error;

/// Error returned when a fixity label cannot be resolved.
///
/// Only the labels `"free"`, `"pin"`, `"roller"` and `"yroller"` are
/// recognised; a joint built from any other label cannot participate in
/// degree-of-freedom assembly.
///
/// # Examples
///
/// ```
/// use planar_truss::{Fixity, InvalidFixityError};
///
/// let error = "clamped".parse::<Fixity>().expect_err("unknown label rejected");
/// assert_eq!(error, InvalidFixityError("clamped".to_string()));
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unrecognised fixity label {0:?}; expected free, pin, roller or yroller")]
pub struct InvalidFixityError(pub String);

/// Error returned when a material or cross-section property is not physically
/// meaningful.
///
/// The variants describe the reason the supplied value is rejected so callers
/// can present actionable feedback to users.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum PropertyError {
    /// Returned when the cross-sectional area is zero or negative.
    #[error("area must be positive (received {area})")]
    NonPositiveArea {
        /// Rejected cross-sectional area in square metres.
        area: f64,
    },
    /// Returned when the elastic modulus is zero or negative.
    #[error("elastic modulus must be positive (received {elastic_modulus})")]
    NonPositiveElasticModulus {
        /// Rejected elastic modulus in pascals.
        elastic_modulus: f64,
    },
    /// Returned when a rod radius is zero or negative.
    #[error("rod radius must be positive (received {radius})")]
    NonPositiveRodRadius {
        /// Rejected radius in metres.
        radius: f64,
    },
    /// Returned when a tube wall does not fit inside its outer radius.
    #[error(
        "tube thickness must lie in (0, outer radius] \
         (received outer radius {outer_radius}, thickness {thickness})"
    )]
    InvalidTubeWall {
        /// Outer radius of the rejected tube in metres.
        outer_radius: f64,
        /// Rejected wall thickness in metres.
        thickness: f64,
    },
    /// Returned when a rectangle side is zero or negative.
    #[error("rectangle sides must be positive (received {width} x {height})")]
    NonPositiveRectangleSide {
        /// Rejected width in metres.
        width: f64,
        /// Rejected height in metres.
        height: f64,
    },
}

/// Error returned when editing a [`Truss`](crate::Truss) with invalid input.
///
/// Attempting to mutate the structure with a joint or member that is not part
/// of the current graph returns a descriptive variant so callers can decide
/// how to recover.
#[derive(Debug, Error, PartialEq)]
pub enum TrussEditError {
    /// Returned when a joint cannot be found in the truss.
    #[error("joint {0:?} does not exist in this truss")]
    UnknownJoint(NodeIndex),
    /// Returned when a member cannot be found in the truss.
    #[error("member {0:?} does not exist in this truss")]
    UnknownMember(EdgeIndex),
    /// Returned when a member would connect two coincident joints.
    #[error("joints {start:?} and {end:?} are coincident; members must have positive length")]
    ZeroLengthMember {
        /// Joint at the start of the rejected member.
        start: NodeIndex,
        /// Joint at the end of the rejected member.
        end: NodeIndex,
    },
    /// Returned when a joint cost is negative.
    #[error("joint {joint:?} cost must be non-negative (received {cost})")]
    NegativeJointCost {
        /// Identifier of the affected joint.
        joint: NodeIndex,
        /// Rejected cost value.
        cost: f64,
    },
    /// Returned when the supplied member properties are invalid.
    #[error("{0}")]
    InvalidMemberProperties(#[from] PropertyError),
}

/// Error returned when a truss analysis fails.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when the structure is statically or kinematically unstable.
    #[error(
        "structure is unstable: {members} members and {restrained} restrained \
         degrees of freedom cannot constrain {joints} joints"
    )]
    Unstable {
        /// Number of joints in the structure.
        joints: usize,
        /// Number of members in the structure.
        members: usize,
        /// Number of restrained degrees of freedom.
        restrained: usize,
    },
    /// Returned when a member spans zero distance at solve time.
    #[error("member {0:?} has zero length")]
    ZeroLengthMember(EdgeIndex),
    /// Returned when the reduced stiffness matrix cannot be inverted.
    #[error("stiffness matrix is singular; check supports and connectivity")]
    SingularStiffness,
    /// Returned when the loading vector does not match the structure's
    /// degree-of-freedom count.
    #[error("loading vector has {actual} entries but the structure has {expected} degrees of freedom")]
    LoadingSizeMismatch {
        /// Degree-of-freedom count of the structure.
        expected: usize,
        /// Length of the supplied loading vector.
        actual: usize,
    },
}
