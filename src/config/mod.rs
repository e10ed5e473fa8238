pub mod cli;
pub mod project_config;
pub mod xml;

#[cfg(feature = "cli")]
use crate::config::project_config::ProjectConfig;
#[cfg(feature = "cli")]
use crate::domain::model::Goal;
#[cfg(feature = "cli")]
use crate::utils::error::{InjectError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_one_of, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "profile-inject")]
#[command(about = "Inject dependencies and EAR modules defined in profile properties")]
pub struct CliConfig {
    /// Path to the TOML project file
    #[arg(short, long, default_value = "project.toml")]
    pub project: String,

    /// Goal to run (inject, inject-ear-module); repeatable
    #[arg(short, long = "goal")]
    pub goals: Vec<String>,

    /// Property prefix, overrides the prefix of every goal
    #[arg(long)]
    pub prefix: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Show what would be injected without writing anything
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列指定的 goal 優先，否則使用專案檔的設定
    pub fn resolve_goals(&self, project: &ProjectConfig) -> Result<Vec<Goal>> {
        let goals = if self.goals.is_empty() {
            project.goals()?
        } else {
            self.goals
                .iter()
                .map(|name| {
                    name.parse::<Goal>()
                        .map_err(|reason| InjectError::InvalidConfigValueError {
                            field: "goal".to_string(),
                            value: name.clone(),
                            reason,
                        })
                })
                .collect::<Result<Vec<_>>>()?
        };

        if goals.is_empty() {
            return Err(InjectError::MissingConfigError {
                field: "inject.goals".to_string(),
            });
        }
        Ok(goals)
    }

    /// `--prefix` 會覆蓋專案檔中各 goal 的前綴
    pub fn resolve_prefix(&self, project: &ProjectConfig, goal: Goal) -> Option<String> {
        self.prefix
            .clone()
            .or_else(|| project.prefix_for(goal).map(str::to_string))
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("project", &self.project)?;
        validate_path("output_path", &self.output_path)?;
        for goal in &self.goals {
            validate_one_of("goal", goal, &Goal::ALL)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    const PROJECT: &str = r#"
[project]
group_id = "g"
artifact_id = "a"
version = "1"

[inject]
goals = ["inject-ear-module"]
dependency_prefix = "dep."
ear_module_prefix = "ear."
"#;

    #[test]
    fn test_cli_goals_override_project_goals() {
        let project = ProjectConfig::from_toml_str(PROJECT).unwrap();

        let cli = CliConfig::parse_from(["profile-inject"]);
        assert_eq!(cli.resolve_goals(&project).unwrap(), vec![Goal::InjectEarModule]);

        let cli = CliConfig::parse_from(["profile-inject", "--goal", "inject"]);
        assert!(cli.validate().is_ok());
        assert_eq!(cli.resolve_goals(&project).unwrap(), vec![Goal::Inject]);
    }

    #[test]
    fn test_prefix_override() {
        let project = ProjectConfig::from_toml_str(PROJECT).unwrap();

        let cli = CliConfig::parse_from(["profile-inject"]);
        assert_eq!(cli.resolve_prefix(&project, Goal::Inject).as_deref(), Some("dep."));

        let cli = CliConfig::parse_from(["profile-inject", "--prefix", "custom."]);
        assert_eq!(
            cli.resolve_prefix(&project, Goal::InjectEarModule).as_deref(),
            Some("custom.")
        );
    }

    #[test]
    fn test_unknown_goal_fails_validation() {
        let cli = CliConfig::parse_from(["profile-inject", "-g", "inject", "-g", "deploy"]);
        assert!(cli.validate().is_err());

        let project = ProjectConfig::from_toml_str(PROJECT).unwrap();
        assert!(matches!(
            cli.resolve_goals(&project),
            Err(InjectError::InvalidConfigValueError { value, .. }) if value == "deploy"
        ));
    }

    #[test]
    fn test_no_goals_anywhere() {
        let project = ProjectConfig::from_toml_str(
            "[project]\ngroup_id = \"g\"\nartifact_id = \"a\"\nversion = \"1\"\n",
        )
        .unwrap();
        let cli = CliConfig::parse_from(["profile-inject"]);
        assert!(matches!(
            cli.resolve_goals(&project),
            Err(InjectError::MissingConfigError { .. })
        ));
    }
}
