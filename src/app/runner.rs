use crate::app::pipelines::ear_module_pipeline::{EAR_PLUGIN_ARTIFACT_ID, EAR_PLUGIN_GROUP_ID};
use crate::app::pipelines::sequence::{GoalResult, GoalSequence};
use crate::domain::ports::Storage;
use crate::domain::project::ProjectModel;
use crate::utils::error::Result;

pub const PROJECT_OUTPUT: &str = "project.json";
pub const EAR_CONFIGURATION_OUTPUT: &str = "ear-configuration.xml";

/// 一次執行的結果：更新後的專案、各 goal 結果與寫出的檔案
#[derive(Debug, Clone)]
pub struct RunReport {
    pub project: ProjectModel,
    pub results: Vec<GoalResult>,
    pub written: Vec<String>,
}

/// 執行 goal 序列並寫出結果；`output` 為 `None` 時只執行不寫檔 (dry run)
pub async fn run_goals<S: Storage>(
    sequence: &GoalSequence,
    mut project: ProjectModel,
    output: Option<&S>,
) -> Result<RunReport> {
    tracing::info!("🚀 Running {} goal(s) on {}", sequence.len(), project.artifact_id);

    let results = sequence.execute_all(&mut project)?;

    let written = match output {
        Some(storage) => write_outputs(storage, &project).await?,
        None => {
            tracing::info!("🔍 Dry run, nothing written");
            Vec::new()
        }
    };

    Ok(RunReport {
        project,
        results,
        written,
    })
}

/// 寫出 `project.json`；有 EAR 設定樹時再寫出 `ear-configuration.xml`
pub async fn write_outputs<S: Storage>(storage: &S, project: &ProjectModel) -> Result<Vec<String>> {
    let mut written = Vec::new();

    let json = serde_json::to_vec_pretty(project)?;
    storage.write_file(PROJECT_OUTPUT, &json).await?;
    tracing::info!("📁 Output saved: {}", PROJECT_OUTPUT);
    written.push(PROJECT_OUTPUT.to_string());

    if let Some(configuration) =
        project.plugin_configuration(EAR_PLUGIN_GROUP_ID, EAR_PLUGIN_ARTIFACT_ID)
    {
        storage
            .write_file(EAR_CONFIGURATION_OUTPUT, configuration.to_string().as_bytes())
            .await?;
        tracing::info!("📁 Output saved: {}", EAR_CONFIGURATION_OUTPUT);
        written.push(EAR_CONFIGURATION_OUTPUT.to_string());
    }

    Ok(written)
}
