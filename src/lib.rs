pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::{
    dependency_pipeline::DependencyPipeline, ear_module_pipeline::EarModulePipeline,
    sequence::GoalSequence,
};
pub use config::{cli::LocalStorage, project_config::ProjectConfig};
pub use core::engine::{GoalRunner, InjectionEngine};
pub use domain::project::{ProjectModel, ProjectProfile};
pub use utils::error::{InjectError, Result};
