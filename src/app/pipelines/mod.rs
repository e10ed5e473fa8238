pub mod dependency_pipeline;
pub mod ear_module_pipeline;
pub mod sequence;
