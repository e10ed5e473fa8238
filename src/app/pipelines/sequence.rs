use crate::app::pipelines::dependency_pipeline::DependencyPipeline;
use crate::app::pipelines::ear_module_pipeline::EarModulePipeline;
use crate::core::engine::{GoalRunner, InjectionEngine};
use crate::domain::model::{Goal, InjectionOutcome};
use crate::domain::ports::BuildProject;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// 單一 goal 的執行結果
#[derive(Debug, Clone)]
pub struct GoalResult {
    pub goal: Goal,
    pub outcome: InjectionOutcome,
    pub duration: Duration,
}

/// Goal 序列，依序對同一個專案執行多個 goal
pub struct GoalSequence {
    runners: Vec<Box<dyn GoalRunner>>,
}

impl GoalSequence {
    pub fn new() -> Self {
        Self {
            runners: Vec::new(),
        }
    }

    pub fn add_goal(&mut self, runner: Box<dyn GoalRunner>) {
        self.runners.push(runner);
    }

    /// 依 goal 建立對應的注入引擎並加入序列
    pub fn with_goal(mut self, goal: Goal, prefix: Option<String>) -> Self {
        let runner: Box<dyn GoalRunner> = match goal {
            Goal::Inject => Box::new(InjectionEngine::new(DependencyPipeline::new(prefix))),
            Goal::InjectEarModule => Box::new(InjectionEngine::new(EarModulePipeline::new(prefix))),
        };
        self.add_goal(runner);
        self
    }

    pub fn goals(&self) -> Vec<Goal> {
        self.runners.iter().map(|r| r.goal()).collect()
    }

    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }

    /// 執行所有 goal；致命錯誤會中止後續 goal，已寫入的結果保留
    pub fn execute_all(&self, project: &mut dyn BuildProject) -> Result<Vec<GoalResult>> {
        let mut results = Vec::new();

        for runner in &self.runners {
            let start_time = Instant::now();

            match runner.run(project) {
                Ok(outcome) => {
                    let result = GoalResult {
                        goal: runner.goal(),
                        outcome,
                        duration: start_time.elapsed(),
                    };

                    match &result.outcome {
                        InjectionOutcome::Injected { injected, skipped } => tracing::info!(
                            "✅ Goal executed: {} (injected: {}, skipped: {}, duration: {:?})",
                            result.goal,
                            injected,
                            skipped,
                            result.duration
                        ),
                        InjectionOutcome::Skipped(reason) => {
                            tracing::info!("⏭️ Goal skipped: {} ({})", result.goal, reason)
                        }
                    }

                    results.push(result);
                }
                Err(e) => {
                    tracing::error!("❌ Goal execution failed: {}: {}", runner.goal(), e);
                    return Err(e);
                }
            }
        }

        Ok(results)
    }

    /// 獲取執行摘要
    pub fn get_execution_summary(results: &[GoalResult]) -> HashMap<String, serde_json::Value> {
        let mut summary = HashMap::new();

        let total_injected: usize = results.iter().map(|r| r.outcome.injected()).sum();
        let total_skipped_specs: usize = results
            .iter()
            .map(|r| match r.outcome {
                InjectionOutcome::Injected { skipped, .. } => skipped,
                InjectionOutcome::Skipped(_) => 0,
            })
            .sum();
        let total_duration: Duration = results.iter().map(|r| r.duration).sum();

        summary.insert("total_goals".to_string(), serde_json::Value::Number(results.len().into()));
        summary.insert("total_injected".to_string(), serde_json::Value::Number(total_injected.into()));
        summary.insert(
            "total_skipped_specs".to_string(),
            serde_json::Value::Number(total_skipped_specs.into()),
        );
        summary.insert(
            "total_duration_ms".to_string(),
            serde_json::Value::Number((total_duration.as_millis() as u64).into()),
        );

        let executed: Vec<serde_json::Value> = results
            .iter()
            .filter(|r| matches!(r.outcome, InjectionOutcome::Injected { .. }))
            .map(|r| serde_json::Value::String(r.goal.to_string()))
            .collect();
        summary.insert("executed_goals".to_string(), serde_json::Value::Array(executed));

        let skipped: serde_json::Map<String, serde_json::Value> = results
            .iter()
            .filter_map(|r| match &r.outcome {
                InjectionOutcome::Skipped(reason) => Some((
                    r.goal.to_string(),
                    serde_json::Value::String(reason.to_string()),
                )),
                InjectionOutcome::Injected { .. } => None,
            })
            .collect();
        summary.insert("skipped_goals".to_string(), serde_json::Value::Object(skipped));

        summary
    }
}

impl Default for GoalSequence {
    fn default() -> Self {
        Self::new()
    }
}
