use crate::core::grammar::parse_dependency;
use crate::domain::model::{DependencyRecord, Goal, ItemSpec};
use crate::domain::ports::{BuildProject, InjectionPipeline};
use crate::utils::error::{ParseSkip, SkipReason};

/// goal `inject`：把 profile 屬性轉成依賴並加入專案的依賴清單
#[derive(Debug, Clone)]
pub struct DependencyPipeline {
    prefix: Option<String>,
}

impl DependencyPipeline {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }
}

impl InjectionPipeline for DependencyPipeline {
    type Item = DependencyRecord;

    fn goal(&self) -> Goal {
        Goal::Inject
    }

    fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    fn transform(&self, spec: &ItemSpec) -> Result<DependencyRecord, ParseSkip> {
        Ok(parse_dependency(spec))
    }

    fn load(
        &self,
        project: &mut dyn BuildProject,
        batch: Vec<(ItemSpec, DependencyRecord)>,
    ) -> Result<usize, SkipReason> {
        let dependencies: Vec<DependencyRecord> = batch.into_iter().map(|(_, dep)| dep).collect();
        let count = dependencies.len();
        tracing::debug!("injected dependencies = {:?}", dependencies);

        let target = project.dependencies_mut();
        let start = target.len();
        target.extend(dependencies);

        for dep in &target[start..] {
            tracing::info!("* {}", dep);
        }

        Ok(count)
    }
}
