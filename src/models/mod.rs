pub mod track;
pub mod component;
pub mod record;
pub mod outcome;

pub use track::*;
pub use component::*;
pub use record::*;
pub use outcome::*;
