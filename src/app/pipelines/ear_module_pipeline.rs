use crate::core::builder::build_module_node;
use crate::core::grammar::parse_module;
use crate::domain::model::{ConfigNode, Goal, ItemSpec, Plugin, PluginConfiguration};
use crate::domain::ports::{BuildProject, InjectionPipeline};
use crate::utils::error::{ParseSkip, SkipReason};

pub const EAR_PLUGIN_GROUP_ID: &str = "org.apache.maven.plugins";
pub const EAR_PLUGIN_ARTIFACT_ID: &str = "maven-ear-plugin";
pub const MODULES_NODE: &str = "modules";

/// goal `inject-ear-module`：把 profile 屬性轉成 EAR 模組設定節點
#[derive(Debug, Clone)]
pub struct EarModulePipeline {
    prefix: Option<String>,
}

impl EarModulePipeline {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }
}

fn plugin_not_found() -> SkipReason {
    SkipReason::PluginNotFound {
        group_id: EAR_PLUGIN_GROUP_ID.to_string(),
        artifact_id: EAR_PLUGIN_ARTIFACT_ID.to_string(),
    }
}

fn is_ear_plugin(plugin: &Plugin) -> bool {
    tracing::debug!("plugin = {}:{}", plugin.group_id, plugin.artifact_id);
    plugin.is(EAR_PLUGIN_GROUP_ID, EAR_PLUGIN_ARTIFACT_ID)
}

fn unsupported(reason: &str) -> SkipReason {
    SkipReason::UnsupportedConfiguration {
        reason: reason.to_string(),
    }
}

fn configuration_shape_error(configuration: Option<&PluginConfiguration>) -> SkipReason {
    match configuration {
        Some(PluginConfiguration::Tree(_)) => unsupported("no <modules> element in configuration"),
        Some(PluginConfiguration::Raw(_)) => unsupported("configuration is not a configuration tree"),
        None => unsupported("plugin has no configuration"),
    }
}

/// 取得 EAR 外掛設定中的 `modules` 節點
fn modules_node(plugin: &Plugin) -> Result<&ConfigNode, SkipReason> {
    if let Some(PluginConfiguration::Tree(config)) = &plugin.configuration {
        if let Some(modules) = config.child(MODULES_NODE) {
            return Ok(modules);
        }
    }
    Err(configuration_shape_error(plugin.configuration.as_ref()))
}

fn modules_node_mut(plugin: &mut Plugin) -> Result<&mut ConfigNode, SkipReason> {
    let error = configuration_shape_error(plugin.configuration.as_ref());
    match plugin.configuration.as_mut() {
        Some(PluginConfiguration::Tree(config)) => config.child_mut(MODULES_NODE).ok_or(error),
        _ => Err(error),
    }
}

impl InjectionPipeline for EarModulePipeline {
    type Item = ConfigNode;

    fn goal(&self) -> Goal {
        Goal::InjectEarModule
    }

    fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    fn check_target(&self, project: &dyn BuildProject) -> Result<(), SkipReason> {
        let plugin = project
            .build_plugins()
            .iter()
            .find(|p| is_ear_plugin(p))
            .ok_or_else(plugin_not_found)?;

        let modules = modules_node(plugin).inspect_err(|_| {
            tracing::debug!("configuration = {:?}", plugin.configuration);
        })?;
        tracing::debug!("{} module(s) already configured", modules.children.len());
        Ok(())
    }

    fn transform(&self, spec: &ItemSpec) -> Result<ConfigNode, ParseSkip> {
        let module = parse_module(spec)?;
        build_module_node(spec, &module)
    }

    fn load(
        &self,
        project: &mut dyn BuildProject,
        batch: Vec<(ItemSpec, ConfigNode)>,
    ) -> Result<usize, SkipReason> {
        let plugin = project
            .build_plugins_mut()
            .iter_mut()
            .find(|p| is_ear_plugin(p))
            .ok_or_else(plugin_not_found)?;
        let modules = modules_node_mut(plugin)?;

        tracing::debug!(
            "injected modules = {:?}",
            batch.iter().map(|(_, node)| node.to_string()).collect::<Vec<_>>()
        );

        let count = batch.len();
        for (spec, node) in batch {
            modules.add_child(node);
            tracing::info!("* {}", spec);
        }

        Ok(count)
    }
}
