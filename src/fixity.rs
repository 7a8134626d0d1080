//! Boundary-condition fixities for truss joints.

use std::fmt;
use std::str::FromStr;

use crate::errors::InvalidFixityError;

/// Boundary condition applied to a joint.
///
/// Each fixity determines which of the joint's two translational degrees of
/// freedom are free to displace. The pairing is x-before-y, matching the
/// global degree-of-freedom numbering used throughout the crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Fixity {
    /// Both degrees of freedom free.
    #[default]
    Free,
    /// Both degrees of freedom restrained.
    Pin,
    /// Free along x, restrained along y.
    Roller,
    /// Restrained along x, free along y.
    YRoller,
}

impl Fixity {
    /// Indicator flags for the x and y degrees of freedom: `1.0` when the
    /// direction is free to displace and `0.0` when it is restrained.
    ///
    /// The flags are a pure function of the fixity and cannot be set
    /// independently.
    ///
    /// # Examples
    /// ```
    /// use planar_truss::Fixity;
    ///
    /// assert_eq!(Fixity::Roller.free_flags(), [1.0, 0.0]);
    /// ```
    #[must_use]
    pub const fn free_flags(self) -> [f64; 2] {
        match self {
            Self::Free => [1.0, 1.0],
            Self::Pin => [0.0, 0.0],
            Self::Roller => [1.0, 0.0],
            Self::YRoller => [0.0, 1.0],
        }
    }

    /// Whether the degree of freedom along `axis` (0 = x, 1 = y) is free.
    #[must_use]
    pub fn is_free(self, axis: usize) -> bool {
        match axis {
            0 => matches!(self, Self::Free | Self::Roller),
            _ => matches!(self, Self::Free | Self::YRoller),
        }
    }

    /// Number of restrained degrees of freedom contributed by this fixity.
    #[must_use]
    pub const fn restrained_count(self) -> usize {
        match self {
            Self::Free => 0,
            Self::Pin => 2,
            Self::Roller | Self::YRoller => 1,
        }
    }

    /// Canonical lowercase label for this fixity.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pin => "pin",
            Self::Roller => "roller",
            Self::YRoller => "yroller",
        }
    }
}

impl fmt::Display for Fixity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Fixity {
    type Err = InvalidFixityError;

    /// Resolve a fixity label.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFixityError`] for any label outside the fixed set
    /// `{"free", "pin", "roller", "yroller"}`.
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "free" => Ok(Self::Free),
            "pin" => Ok(Self::Pin),
            "roller" => Ok(Self::Roller),
            "yroller" => Ok(Self::YRoller),
            other => Err(InvalidFixityError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_follow_the_fixity_table() {
        assert_eq!(Fixity::Free.free_flags(), [1.0, 1.0]);
        assert_eq!(Fixity::Pin.free_flags(), [0.0, 0.0]);
        assert_eq!(Fixity::Roller.free_flags(), [1.0, 0.0]);
        assert_eq!(Fixity::YRoller.free_flags(), [0.0, 1.0]);
    }

    #[test]
    fn labels_roundtrip_through_parsing() {
        for fixity in [Fixity::Free, Fixity::Pin, Fixity::Roller, Fixity::YRoller] {
            let parsed: Fixity = fixity.label().parse().expect("canonical label parses");
            assert_eq!(parsed, fixity);
        }
    }

    #[test]
    fn unknown_labels_are_rejected() {
        let error = "clamped".parse::<Fixity>().expect_err("unknown label rejected");
        assert_eq!(error, InvalidFixityError("clamped".to_string()));

        // Labels are case-sensitive, matching the fixed enumeration.
        assert!("Pin".parse::<Fixity>().is_err());
    }

    #[test]
    fn restrained_counts_complement_free_flags() {
        for fixity in [Fixity::Free, Fixity::Pin, Fixity::Roller, Fixity::YRoller] {
            let free: f64 = fixity.free_flags().iter().sum();
            assert_eq!(fixity.restrained_count(), 2 - free as usize);
        }
    }
}
