use crate::domain::model::{DependencyRecord, Plugin, PluginConfiguration, PropertyMap};
use crate::domain::ports::{BuildProject, Profile};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectProfile {
    pub id: String,
    pub active: bool,
    pub properties: PropertyMap,
}

impl ProjectProfile {
    pub fn new(id: impl Into<String>, properties: PropertyMap) -> Self {
        Self {
            id: id.into(),
            active: true,
            properties,
        }
    }
}

impl Profile for ProjectProfile {
    fn id(&self) -> &str {
        &self.id
    }

    fn properties(&self) -> Result<&PropertyMap> {
        Ok(&self.properties)
    }
}

/// 從專案檔載入的建置模型
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectModel {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub profiles: Vec<ProjectProfile>,
    pub dependencies: Vec<DependencyRecord>,
    pub build_plugins: Vec<Plugin>,
}

impl ProjectModel {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            profiles: Vec::new(),
            dependencies: Vec::new(),
            build_plugins: Vec::new(),
        }
    }

    pub fn with_profile(mut self, profile: ProjectProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    pub fn with_plugin(mut self, plugin: Plugin) -> Self {
        self.build_plugins.push(plugin);
        self
    }

    pub fn find_plugin(&self, group_id: &str, artifact_id: &str) -> Option<&Plugin> {
        self.build_plugins
            .iter()
            .find(|p| p.is(group_id, artifact_id))
    }

    /// 取得外掛的設定樹（只限已解析成樹的設定）
    pub fn plugin_configuration(
        &self,
        group_id: &str,
        artifact_id: &str,
    ) -> Option<&crate::domain::model::ConfigNode> {
        match self.find_plugin(group_id, artifact_id)?.configuration.as_ref()? {
            PluginConfiguration::Tree(node) => Some(node),
            PluginConfiguration::Raw(_) => None,
        }
    }
}

impl BuildProject for ProjectModel {
    fn active_profiles(&self) -> Vec<&dyn Profile> {
        self.profiles
            .iter()
            .filter(|p| p.active)
            .map(|p| p as &dyn Profile)
            .collect()
    }

    fn dependencies_mut(&mut self) -> &mut Vec<DependencyRecord> {
        &mut self.dependencies
    }

    fn build_plugins(&self) -> &[Plugin] {
        &self.build_plugins
    }

    fn build_plugins_mut(&mut self) -> &mut [Plugin] {
        &mut self.build_plugins
    }
}
