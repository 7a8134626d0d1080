//! Material and cross-section properties for truss members.

use std::f64::consts::PI;

use crate::errors::PropertyError;

/// Linear-elastic material for an axial member.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Elastic modulus in pascals.
    elastic_modulus: f64,
    /// Optional yield strength in pascals, used for factor-of-safety
    /// reporting.
    yield_strength: Option<f64>,
}

impl Material {
    /// Create a material from an elastic modulus in pascals.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NonPositiveElasticModulus`] when
    /// `elastic_modulus` is not strictly positive.
    ///
    /// # Examples
    /// ```
    /// use planar_truss::Material;
    ///
    /// let steel = Material::new(200.0e9).expect("positive modulus accepted");
    /// assert_eq!(steel.elastic_modulus(), 200.0e9);
    /// ```
    pub fn new(elastic_modulus: f64) -> Result<Self, PropertyError> {
        if elastic_modulus <= 0.0 {
            return Err(PropertyError::NonPositiveElasticModulus { elastic_modulus });
        }
        Ok(Self {
            elastic_modulus,
            yield_strength: None,
        })
    }

    /// Attach a yield strength in pascals, enabling factor-of-safety output.
    #[must_use]
    pub const fn with_yield_strength(mut self, yield_strength: f64) -> Self {
        self.yield_strength = Some(yield_strength);
        self
    }

    /// Elastic modulus in pascals.
    #[must_use]
    pub const fn elastic_modulus(&self) -> f64 {
        self.elastic_modulus
    }

    /// Yield strength in pascals, when one has been assigned.
    #[must_use]
    pub const fn yield_strength(&self) -> Option<f64> {
        self.yield_strength
    }
}

/// Cross-sectional shape of an axial member.
///
/// Only the area matters for axial stiffness, so each shape reduces to a
/// single number via [`CrossSection::area`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrossSection {
    /// Solid circular rod.
    Rod {
        /// Outer radius in metres.
        radius: f64,
    },
    /// Hollow circular tube.
    Tube {
        /// Outer radius in metres.
        outer_radius: f64,
        /// Wall thickness in metres.
        thickness: f64,
    },
    /// Solid rectangular bar.
    Rectangle {
        /// Width in metres.
        width: f64,
        /// Height in metres.
        height: f64,
    },
    /// Arbitrary section described directly by its area.
    Custom {
        /// Cross-sectional area in square metres.
        area: f64,
    },
}

impl CrossSection {
    /// Cross-sectional area in square metres.
    #[must_use]
    pub fn area(&self) -> f64 {
        match *self {
            Self::Rod { radius } => PI * radius * radius,
            Self::Tube {
                outer_radius,
                thickness,
            } => {
                let inner_radius = outer_radius - thickness;
                PI * (outer_radius * outer_radius - inner_radius * inner_radius)
            }
            Self::Rectangle { width, height } => width * height,
            Self::Custom { area } => area,
        }
    }

    /// Check that the shape is geometrically meaningful and encloses a
    /// positive area.
    ///
    /// Dimensions are checked individually, not just the derived area: a
    /// tube wall thicker than its radius or a rectangle with two negative
    /// sides can square away into a positive area while describing an
    /// impossible shape.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NonPositiveRodRadius`],
    /// [`PropertyError::InvalidTubeWall`] or
    /// [`PropertyError::NonPositiveRectangleSide`] when a dimension is out of
    /// range, and [`PropertyError::NonPositiveArea`] when the derived area is
    /// zero or negative.
    pub fn validated(self) -> Result<Self, PropertyError> {
        match self {
            Self::Rod { radius } if radius <= 0.0 => {
                return Err(PropertyError::NonPositiveRodRadius { radius });
            }
            Self::Tube {
                outer_radius,
                thickness,
            } if thickness <= 0.0 || thickness > outer_radius => {
                return Err(PropertyError::InvalidTubeWall {
                    outer_radius,
                    thickness,
                });
            }
            Self::Rectangle { width, height } if width <= 0.0 || height <= 0.0 => {
                return Err(PropertyError::NonPositiveRectangleSide { width, height });
            }
            _ => {}
        }
        let area = self.area();
        if area <= 0.0 {
            return Err(PropertyError::NonPositiveArea { area });
        }
        Ok(self)
    }
}
