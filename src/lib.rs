#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod element;
mod errors;
mod fixity;
mod geometry;
mod properties;
mod truss;

pub use element::AxialElement;
pub use errors::{
    AnalysisError, InvalidFixityError, PropertyError, TrussEditError,
};
pub use fixity::Fixity;
pub use geometry::{displacement, force, point, Displacement, Force, Point};
pub use properties::{CrossSection, Material};
pub use truss::Truss;
