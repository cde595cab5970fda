//! Provider-agnostic domain types and static catalogs.

pub mod animal;
pub mod model;
pub mod perspective;
pub mod settings;
pub mod simulation;

pub use animal::{Animal, ANIMALS};
pub use model::{ModelKind, ModelOption, IMAGE_MODELS, TEXT_MODELS};
pub use perspective::{ImageData, ImageState, PerspectiveDetails, VisionDetails, VisionPerspective};
pub use settings::AppSettings;
pub use simulation::{Side, SimulationResult};
