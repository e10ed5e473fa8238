use crate::config::xml::parse_configuration;
use crate::domain::model::{DependencyRecord, Goal, Plugin, PluginConfiguration, PropertyMap};
use crate::domain::project::{ProjectModel, ProjectProfile};
use crate::utils::error::{InjectError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_unique, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub project: ProjectInfo,
    pub inject: Option<InjectConfig>,
    #[serde(default)]
    pub profiles: Vec<ProfileConfig>,
    #[serde(default)]
    pub dependencies: Vec<DependencyConfig>,
    #[serde(default)]
    pub build_plugins: Vec<PluginConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InjectConfig {
    pub goals: Option<Vec<String>>,
    pub dependency_prefix: Option<String>,
    pub ear_module_prefix: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub id: String,
    pub active: Option<bool>,
    pub properties: Option<toml::Table>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyConfig {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub r#type: Option<String>,
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    /// 外掛設定的 XML 文字
    pub configuration: Option<String>,
}

impl ProjectConfig {
    /// 從 TOML 檔案載入專案
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InjectError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析專案
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut table: toml::Table = toml::from_str(content).map_err(Self::parse_error)?;

        // 解析後才替換環境變數，替換結果只會落在字串值內
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InjectError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;
        for (_, value) in table.iter_mut() {
            Self::substitute_env_vars(&re, value);
        }

        toml::Value::Table(table)
            .try_into()
            .map_err(Self::parse_error)
    }

    fn parse_error(e: toml::de::Error) -> InjectError {
        InjectError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        }
    }

    /// 替換字串值中的環境變數 (例如 ${RELEASE_VERSION})，未定義的變數保持原樣
    fn substitute_env_vars(re: &Regex, value: &mut toml::Value) {
        match value {
            toml::Value::String(text) => {
                let replaced = re
                    .replace_all(text, |caps: &regex::Captures| {
                        let var_name = &caps[1];
                        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
                    })
                    .into_owned();
                *text = replaced;
            }
            toml::Value::Array(items) => {
                for item in items {
                    Self::substitute_env_vars(re, item);
                }
            }
            toml::Value::Table(table) => {
                for (_, item) in table.iter_mut() {
                    Self::substitute_env_vars(re, item);
                }
            }
            _ => {}
        }
    }

    /// 驗證專案設定
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("project.group_id", &self.project.group_id)?;
        validate_non_empty_string("project.artifact_id", &self.project.artifact_id)?;
        validate_non_empty_string("project.version", &self.project.version)?;

        for profile in &self.profiles {
            validate_non_empty_string("profiles.id", &profile.id)?;
        }
        validate_unique("profiles.id", self.profiles.iter().map(|p| p.id.as_str()))?;

        if let Some(goals) = self.inject.as_ref().and_then(|i| i.goals.as_ref()) {
            for goal in goals {
                validate_one_of("inject.goals", goal, &Goal::ALL)?;
            }
        }

        for plugin in &self.build_plugins {
            validate_non_empty_string("build_plugins.group_id", &plugin.group_id)?;
            validate_non_empty_string("build_plugins.artifact_id", &plugin.artifact_id)?;
        }

        Ok(())
    }

    /// 專案檔中列出的 goal
    pub fn goals(&self) -> Result<Vec<Goal>> {
        let names = self
            .inject
            .as_ref()
            .and_then(|i| i.goals.clone())
            .unwrap_or_default();

        names
            .iter()
            .map(|name| {
                name.parse::<Goal>().map_err(|reason| InjectError::InvalidConfigValueError {
                    field: "inject.goals".to_string(),
                    value: name.clone(),
                    reason,
                })
            })
            .collect()
    }

    /// 取得 goal 對應的屬性前綴
    pub fn prefix_for(&self, goal: Goal) -> Option<&str> {
        let inject = self.inject.as_ref()?;
        match goal {
            Goal::Inject => inject.dependency_prefix.as_deref(),
            Goal::InjectEarModule => inject.ear_module_prefix.as_deref(),
        }
    }

    /// 建立建置模型
    pub fn to_model(&self) -> Result<ProjectModel> {
        let mut model = ProjectModel::new(
            self.project.group_id.clone(),
            self.project.artifact_id.clone(),
            self.project.version.clone(),
        );

        for profile in &self.profiles {
            model.profiles.push(profile.to_profile()?);
        }

        model.dependencies = self
            .dependencies
            .iter()
            .map(|d| DependencyRecord {
                group_id: d.group_id.clone(),
                artifact_id: d.artifact_id.clone(),
                version: d.version.clone(),
                r#type: d.r#type.clone(),
                scope: d.scope.clone(),
            })
            .collect();

        model.build_plugins = self.build_plugins.iter().map(PluginConfig::to_plugin).collect();

        Ok(model)
    }
}

impl ProfileConfig {
    fn to_profile(&self) -> Result<ProjectProfile> {
        let mut properties = PropertyMap::new();

        for (key, value) in self.properties.iter().flatten() {
            match value.as_str() {
                Some(text) => properties.insert(key.clone(), text),
                None => {
                    return Err(InjectError::InvalidConfigValueError {
                        field: format!("profiles.{}.properties.{}", self.id, key),
                        value: value.to_string(),
                        reason: "Profile properties must be strings".to_string(),
                    })
                }
            }
        }

        Ok(ProjectProfile {
            id: self.id.clone(),
            active: self.active.unwrap_or(true),
            properties,
        })
    }
}

impl PluginConfig {
    fn to_plugin(&self) -> Plugin {
        let configuration = self.configuration.as_ref().map(|xml| {
            match parse_configuration(xml) {
                Ok(tree) => PluginConfiguration::Tree(tree),
                Err(e) => {
                    tracing::warn!(
                        "Configuration of {}:{} is not a configuration tree: {}",
                        self.group_id,
                        self.artifact_id,
                        e
                    );
                    PluginConfiguration::Raw(xml.clone())
                }
            }
        });

        Plugin {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            version: self.version.clone(),
            configuration,
        }
    }
}

impl Validate for ProjectConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ConfigNode;
    use crate::domain::ports::BuildProject;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[project]
group_id = "com.example"
artifact_id = "shop-ear"
version = "1.0.0"

[inject]
goals = ["inject", "inject-ear-module"]
dependency_prefix = "dep."
ear_module_prefix = "ear."

[[profiles]]
id = "dev"

[profiles.properties]
"dep.web" = "com.example:shop-web:1.0.0:war"
"ear.web" = "com.example:shop-web:web:/shop"
"build.name" = "dev"

[[profiles]]
id = "prod"
active = false

[[dependencies]]
group_id = "com.example"
artifact_id = "shop-core"
version = "1.0.0"
type = "ejb"

[[build_plugins]]
group_id = "org.apache.maven.plugins"
artifact_id = "maven-ear-plugin"
version = "3.3.0"
configuration = "<configuration><version>8</version><modules/></configuration>"
"#;

    #[test]
    fn test_parse_basic_project() {
        let config = ProjectConfig::from_toml_str(BASIC).unwrap();
        assert!(config.validate().is_ok());

        assert_eq!(config.project.artifact_id, "shop-ear");
        assert_eq!(config.goals().unwrap(), vec![Goal::Inject, Goal::InjectEarModule]);
        assert_eq!(config.prefix_for(Goal::Inject), Some("dep."));
        assert_eq!(config.prefix_for(Goal::InjectEarModule), Some("ear."));
    }

    #[test]
    fn test_model_keeps_property_order() {
        let model = ProjectConfig::from_toml_str(BASIC).unwrap().to_model().unwrap();

        let keys: Vec<&str> = model.profiles[0].properties.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["dep.web", "ear.web", "build.name"]);
        assert_eq!(model.active_profiles().len(), 1);
        assert_eq!(model.dependencies[0].r#type.as_deref(), Some("ejb"));

        let mut expected = ConfigNode::new("configuration");
        expected.add_child(ConfigNode::with_value("version", "8"));
        expected.add_child(ConfigNode::new("modules"));
        assert_eq!(
            model.build_plugins[0].configuration,
            Some(PluginConfiguration::Tree(expected))
        );
    }

    #[test]
    fn test_non_xml_configuration_is_kept_raw() {
        let content = r#"
[project]
group_id = "g"
artifact_id = "a"
version = "1"

[[build_plugins]]
group_id = "org.apache.maven.plugins"
artifact_id = "maven-ear-plugin"
configuration = "not xml"
"#;
        let model = ProjectConfig::from_toml_str(content).unwrap().to_model().unwrap();
        assert_eq!(
            model.build_plugins[0].configuration,
            Some(PluginConfiguration::Raw("not xml".to_string()))
        );
    }

    #[test]
    fn test_non_string_property_is_rejected() {
        let content = r#"
[project]
group_id = "g"
artifact_id = "a"
version = "1"

[[profiles]]
id = "dev"

[profiles.properties]
"dep.count" = 3
"#;
        let err = ProjectConfig::from_toml_str(content).unwrap().to_model().unwrap_err();
        assert!(matches!(err, InjectError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_validation_rejects_unknown_goal_and_duplicate_profiles() {
        let unknown_goal = BASIC.replace("\"inject-ear-module\"]", "\"deploy\"]");
        let config = ProjectConfig::from_toml_str(&unknown_goal).unwrap();
        assert!(config.validate().is_err());
        assert!(config.goals().is_err());

        let duplicate = BASIC.replace("id = \"prod\"", "id = \"dev\"");
        let config = ProjectConfig::from_toml_str(&duplicate).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PROFILE_INJECT_TEST_VERSION", "2.5.0");

        let content = r#"
[project]
group_id = "g"
artifact_id = "a"
version = "${PROFILE_INJECT_TEST_VERSION}"

[[profiles]]
id = "dev"

[profiles.properties]
"dep.x" = "g:x:${PROFILE_INJECT_TEST_VERSION} g:y:${PROFILE_INJECT_UNDEFINED}"
"#;

        let model = ProjectConfig::from_toml_str(content).unwrap().to_model().unwrap();
        assert_eq!(model.version, "2.5.0");
        assert_eq!(
            model.profiles[0].properties.get("dep.x"),
            Some("g:x:2.5.0 g:y:${PROFILE_INJECT_UNDEFINED}")
        );

        std::env::remove_var("PROFILE_INJECT_TEST_VERSION");
    }

    #[test]
    fn test_env_value_stays_inside_its_string() {
        std::env::set_var(
            "PROFILE_INJECT_TEST_QUOTED",
            "1.0\"\n\"dep.extra\" = \"other:other:6.6.6",
        );

        let content = r#"
[project]
group_id = "g"
artifact_id = "a"
version = "1"

[[profiles]]
id = "dev"

[profiles.properties]
"dep.a" = "g:a:${PROFILE_INJECT_TEST_QUOTED}"
"#;

        let model = ProjectConfig::from_toml_str(content).unwrap().to_model().unwrap();
        let properties: Vec<(&str, &str)> = model.profiles[0].properties.iter().collect();
        assert_eq!(
            properties,
            vec![("dep.a", "g:a:1.0\"\n\"dep.extra\" = \"other:other:6.6.6")]
        );

        std::env::remove_var("PROFILE_INJECT_TEST_QUOTED");
    }

    #[test]
    fn test_invalid_toml() {
        let err = ProjectConfig::from_toml_str("[project").unwrap_err();
        assert!(matches!(err, InjectError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = ProjectConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.profiles.len(), 2);
    }
}
