pub mod classifier;
pub mod measurement;
pub mod planet_type;
pub mod texture;

pub use classifier::{classify, Classification, Classifier, ClassifierConfig, PlanetProfile};
pub use measurement::ExoplanetMeasurement;
pub use planet_type::PlanetType;
