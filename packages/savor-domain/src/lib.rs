pub mod descriptor;
pub mod geo;
pub mod poi;
pub mod ranking;

pub use geo::{Coordinates, SearchRegion};
pub use poi::Poi;
pub use ranking::ScoredPoi;
