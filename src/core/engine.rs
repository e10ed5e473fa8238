use crate::core::selector::{select, validate_prefix};
use crate::core::tokenizer::tokenize;
use crate::domain::model::{Goal, InjectionOutcome};
use crate::domain::ports::{BuildProject, InjectionPipeline};
use crate::utils::error::{Result, SkipReason};

/// 以物件形式執行任一 goal，供 [`GoalSequence`](crate::app::pipelines::sequence::GoalSequence) 使用
pub trait GoalRunner {
    fn goal(&self) -> Goal;
    fn run(&self, project: &mut dyn BuildProject) -> Result<InjectionOutcome>;
}

pub struct InjectionEngine<P: InjectionPipeline> {
    pipeline: P,
}

impl<P: InjectionPipeline> InjectionEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    #[cfg(test)]
    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// 單次線性執行：prefix 檢查、profile 檢查、目標檢查、解析、一次寫入
    pub fn run(&self, project: &mut dyn BuildProject) -> Result<InjectionOutcome> {
        let goal = self.pipeline.goal();
        tracing::info!("Injecting profile {}", goal.describe());
        tracing::debug!("prefix = {:?}", self.pipeline.prefix());

        let prefix = match validate_prefix(self.pipeline.prefix()) {
            Ok(prefix) => prefix,
            Err(e) => {
                tracing::error!("{}", SkipReason::MissingPrefix);
                tracing::debug!("prefix check: {}", e);
                return Ok(InjectionOutcome::Skipped(SkipReason::MissingPrefix));
            }
        };

        // Extract
        let selected = {
            let profiles = project.active_profiles();
            if profiles.is_empty() {
                tracing::warn!("{}", SkipReason::NoActiveProfiles);
                return Ok(InjectionOutcome::Skipped(SkipReason::NoActiveProfiles));
            }
            tracing::debug!("{} active profile(s)", profiles.len());

            if let Err(reason) = self.pipeline.check_target(&*project) {
                tracing::error!("{}", reason);
                return Ok(InjectionOutcome::Skipped(reason));
            }

            select(&profiles, prefix)?
        };

        // Transform
        let mut batch = Vec::new();
        let mut skipped = 0;
        for property in &selected {
            for spec in tokenize(&property.value) {
                tracing::debug!("{} specification = {}", goal, spec);
                match self.pipeline.transform(&spec) {
                    Ok(item) => batch.push((spec, item)),
                    Err(skip) => {
                        tracing::error!("{}", skip);
                        skipped += 1;
                    }
                }
            }
        }
        tracing::debug!("{} item(s) to inject, {} skipped", batch.len(), skipped);

        // Load
        match self.pipeline.load(project, batch) {
            Ok(injected) => Ok(InjectionOutcome::Injected { injected, skipped }),
            Err(reason) => {
                tracing::error!("{}", reason);
                Ok(InjectionOutcome::Skipped(reason))
            }
        }
    }
}

impl<P: InjectionPipeline> GoalRunner for InjectionEngine<P> {
    fn goal(&self) -> Goal {
        self.pipeline.goal()
    }

    fn run(&self, project: &mut dyn BuildProject) -> Result<InjectionOutcome> {
        InjectionEngine::run(self, project)
    }
}
