use clap::Parser;
use profile_inject::app::runner::run_goals;
use profile_inject::core::Storage;
use profile_inject::utils::error::{ErrorSeverity, InjectError};
use profile_inject::utils::{logger, validation::Validate};
use profile_inject::{CliConfig, GoalSequence, LocalStorage, ProjectConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting profile-inject CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let project_config = match load_project(&config).await {
        Ok(project_config) => project_config,
        Err(e) => {
            tracing::error!("❌ Failed to load project {}: {}", config.project, e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    match run(&config, &project_config).await {
        Ok(()) => {
            tracing::info!("✅ Injection completed successfully!");
            println!("✅ Injection completed successfully!");
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Injection failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn load_project(config: &CliConfig) -> profile_inject::Result<ProjectConfig> {
    tracing::info!("📄 Loading project: {}", config.project);

    let storage = LocalStorage::new(".".to_string());
    let bytes = storage.read_file(&config.project).await?;
    let content = String::from_utf8(bytes).map_err(|e| InjectError::ConfigError {
        message: format!("Project file is not valid UTF-8: {}", e),
    })?;

    let project_config = ProjectConfig::from_toml_str(&content)?;
    project_config.validate()?;
    Ok(project_config)
}

async fn run(config: &CliConfig, project_config: &ProjectConfig) -> profile_inject::Result<()> {
    let goals = config.resolve_goals(project_config)?;
    let project = project_config.to_model()?;

    let sequence = goals.iter().fold(GoalSequence::new(), |sequence, goal| {
        sequence.with_goal(*goal, config.resolve_prefix(project_config, *goal))
    });

    let storage = LocalStorage::new(config.output_path.clone());
    let report = run_goals(&sequence, project, (!config.dry_run).then_some(&storage)).await?;

    let summary = GoalSequence::get_execution_summary(&report.results);
    tracing::info!("📊 Execution summary:");
    for (key, value) in &summary {
        tracing::info!("  {}: {}", key, value);
    }

    if config.dry_run {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    for file in &report.written {
        println!("📁 Output saved to: {}/{}", storage.base_path(), file);
    }

    Ok(())
}
