pub mod builder;
pub mod engine;
pub mod grammar;
pub mod selector;
pub mod tokenizer;

pub use crate::domain::model::{
    ConfigNode, DependencyRecord, Goal, InjectionOutcome, ItemSpec, ModuleRecord, PropertyMap,
};
pub use crate::domain::ports::{BuildProject, InjectionPipeline, Profile, Storage};
pub use crate::utils::error::Result;
