//! Axial element matrices for the direct stiffness method.

use nalgebra::{Matrix2, Matrix2x4, Matrix4, Vector2, Vector4};

use crate::geometry::Point;
use crate::properties::{CrossSection, Material};

/// Stiffness view of one axial member at its current geometry.
///
/// The element is rebuilt from the endpoint positions every time it is
/// needed, so the derived quantities always reflect the current joint
/// locations rather than a snapshot taken when the member was created.
///
/// Degree-of-freedom ordering is `[start x, start y, end x, end y]` for every
/// 4-entry quantity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxialElement {
    start: Point,
    end: Point,
    area: f64,
    elastic_modulus: f64,
}

impl AxialElement {
    /// Build the element for a member between `start` and `end`.
    ///
    /// Returns `None` when the endpoints coincide, since a zero-length member
    /// has no direction and would poison the stiffness matrix with NaNs.
    #[must_use]
    pub fn new(
        start: Point,
        end: Point,
        section: &CrossSection,
        material: &Material,
    ) -> Option<Self> {
        let element = Self {
            start,
            end,
            area: section.area(),
            elastic_modulus: material.elastic_modulus(),
        };
        (element.length() > 0.0).then_some(element)
    }

    /// Member length in metres.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end.to_vector() - self.start.to_vector()).norm()
    }

    /// Unit direction cosines `(l, m)` from start to end.
    #[must_use]
    pub fn direction(&self) -> Vector2<f64> {
        (self.end.to_vector() - self.start.to_vector()) / self.length()
    }

    /// Axial stiffness per unit displacement, `A·E / L`, in newtons per metre.
    #[must_use]
    pub fn axial_stiffness(&self) -> f64 {
        self.area * self.elastic_modulus / self.length()
    }

    /// Local stiffness matrix `k` relating the two end displacements along
    /// the member axis:
    ///
    /// ```text
    /// k = (A·E / L) · |  1  -1 |
    ///                 | -1   1 |
    /// ```
    #[must_use]
    pub fn local_stiffness(&self) -> Matrix2<f64> {
        self.axial_stiffness() * Matrix2::new(1.0, -1.0, -1.0, 1.0)
    }

    /// Transformation matrix `T` projecting the four global end displacements
    /// onto the member axis:
    ///
    /// ```text
    /// T = | l  m  0  0 |
    ///     | 0  0  l  m |
    /// ```
    #[must_use]
    pub fn transformation(&self) -> Matrix2x4<f64> {
        let direction = self.direction();
        let (l, m) = (direction.x, direction.y);
        Matrix2x4::new(l, m, 0.0, 0.0, 0.0, 0.0, l, m)
    }

    /// Global element stiffness `Tᵀ·k·T`, ready to accumulate into the global
    /// matrix at the member's four degree-of-freedom indices.
    #[must_use]
    pub fn global_stiffness(&self) -> Matrix4<f64> {
        let transformation = self.transformation();
        transformation.transpose() * self.local_stiffness() * transformation
    }

    /// Recover the axial force from the member's global end displacements.
    ///
    /// `displacements` holds the global displacement sub-vector at the
    /// member's degree-of-freedom indices. Positive values denote tension;
    /// the result does not depend on which endpoint was designated the start.
    #[must_use]
    pub fn axial_force(&self, displacements: &Vector4<f64>) -> f64 {
        let local = self.transformation() * displacements;
        // Second row of k·u: (A·E/L)·(u_end − u_start) along the member axis.
        (self.local_stiffness() * local).y
    }
}
