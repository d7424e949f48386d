pub mod error;
pub mod reader;
pub mod rows;

pub use error::LoadError;
pub use reader::{DatasetReader, read_pois, read_visits};
pub use rows::{PoiRow, VisitRow};
