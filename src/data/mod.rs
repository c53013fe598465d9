pub mod error;
pub mod extract;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod overrides;
pub mod query;
pub mod service;
pub mod validate;

pub use error::DataError;
pub use loader::{BaseDataset, DataPaths, DEFAULT_CONFIG_NAME, DEFAULT_DATA_DIR};
pub use model::{
    Experience, Profession, ProfessionOverrides, ServerConfig, ServerSettings, Skill, SkillPatch,
    Species,
};
pub use overrides::{apply_overrides, MergePolicy, OverrideReport};
pub use service::DataService;
