pub mod animation;
pub mod config;
pub mod deploy;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod routes;
pub mod scene;
pub mod scroll;
pub mod section;
pub mod shape;

pub use config::{AppConfig, EasingType, ScrollConfig, SequenceConfig};
pub use deploy::{Deployer, Deployment, HttpDeployer};
pub use error::{Error, Result};
pub use routes::Route;
pub use scene::{ElementId, Property, Scene, Stage};
pub use section::{FeatureSection, FeatureSequencer, SectionHandles};
