mod cycle_stage;
mod tag_pipeline;

pub use cycle_stage::CycleStage;
pub use tag_pipeline::TagPipeline;
