pub mod compose;
pub mod data;
pub mod derived;
pub mod error;
pub mod index;
pub mod model;
pub mod selection;
pub mod session;
pub mod settings;
pub mod style;

pub use compose::{BaseLayer, ComposedView, RenderPayload, compose};
pub use data::Dataset;
pub use derived::{DerivedView, compute, compute_with};
pub use error::{ConfigError, DataLoadError};
pub use index::PoiIndex;
pub use model::{GeoPoint, PoiId, PointOfInterest, VisitorOriginRecord};
pub use selection::{ClickPayload, Selection, SelectionController, SelectionState};
pub use session::Session;
pub use settings::Settings;
pub use style::MarkerStyle;
