use crate::utils::error::SkipReason;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 有序的屬性表，保留插入順序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(String, String)>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 相同 key 覆寫原值，但保留原本的位置
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PropertyMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// 被前綴選中的一筆 profile 屬性
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedProperty {
    pub key: String,
    pub value: String,
}

/// 單一構件描述，例如 `g:a:1.0:jar:compile`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec(String);

impl ItemSpec {
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl DependencyRecord {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: Some(group_id.into()),
            artifact_id: Some(artifact_id.into()),
            ..Self::default()
        }
    }
}

fn or_null(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("null")
}

impl fmt::Display for DependencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dependency {{groupId={}, artifactId={}, version={}, type={}}}",
            or_null(&self.group_id),
            or_null(&self.artifact_id),
            or_null(&self.version),
            or_null(&self.r#type),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    pub module_type: String,
    pub group_id: String,
    pub artifact_id: String,
    pub context_root: Option<String>,
}

impl ModuleRecord {
    /// 設定節點名稱：`web` 與 `webModule` 都對應到 `webModule`
    pub fn element_name(&self) -> String {
        if self.module_type.ends_with("Module") {
            self.module_type.clone()
        } else {
            format!("{}Module", self.module_type)
        }
    }
}

/// 外掛設定樹的節點
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ConfigNode>,
}

impl ConfigNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            children: Vec::new(),
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    pub fn child(&self, name: &str) -> Option<&ConfigNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut ConfigNode> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    pub fn add_child(&mut self, child: ConfigNode) {
        self.children.push(child);
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

fn escape_xml(text: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for c in text.chars() {
        match c {
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '&' => f.write_str("&amp;")?,
            '"' => f.write_str("&quot;")?,
            _ => write!(f, "{}", c)?,
        }
    }
    Ok(())
}

impl fmt::Display for ConfigNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_none() && self.children.is_empty() {
            return write!(f, "<{}/>", self.name);
        }
        write!(f, "<{}>", self.name)?;
        if let Some(value) = &self.value {
            escape_xml(value, f)?;
        }
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PluginConfiguration {
    Tree(ConfigNode),
    /// 無法解析成設定樹的原始內容
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<PluginConfiguration>,
}

impl Plugin {
    pub fn is(&self, group_id: &str, artifact_id: &str) -> bool {
        self.group_id == group_id && self.artifact_id == artifact_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Goal {
    Inject,
    InjectEarModule,
}

impl Goal {
    pub const ALL: [&'static str; 2] = ["inject", "inject-ear-module"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Inject => "inject",
            Goal::InjectEarModule => "inject-ear-module",
        }
    }

    /// 日誌用的描述
    pub fn describe(&self) -> &'static str {
        match self {
            Goal::Inject => "dependencies",
            Goal::InjectEarModule => "EAR modules",
        }
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inject" => Ok(Goal::Inject),
            "inject-ear-module" => Ok(Goal::InjectEarModule),
            other => Err(format!("unknown goal '{}'", other)),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionOutcome {
    Injected { injected: usize, skipped: usize },
    Skipped(SkipReason),
}

impl InjectionOutcome {
    pub fn injected(&self) -> usize {
        match self {
            InjectionOutcome::Injected { injected, .. } => *injected,
            InjectionOutcome::Skipped(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_map_keeps_insertion_order() {
        let mut map = PropertyMap::new();
        map.insert("z", "1");
        map.insert("a", "2");
        map.insert("z", "3");

        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(map.get("z"), Some("3"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_dependency_display() {
        let mut dep = DependencyRecord::new("g", "a");
        dep.version = Some("1.0".to_string());
        assert_eq!(
            dep.to_string(),
            "Dependency {groupId=g, artifactId=a, version=1.0, type=null}"
        );
    }

    #[test]
    fn test_module_element_name() {
        let mut module = ModuleRecord {
            module_type: "web".to_string(),
            group_id: "g".to_string(),
            artifact_id: "a".to_string(),
            context_root: None,
        };
        assert_eq!(module.element_name(), "webModule");

        module.module_type = "webModule".to_string();
        assert_eq!(module.element_name(), "webModule");
    }

    #[test]
    fn test_config_node_renders_xml() {
        let mut node = ConfigNode::new("webModule");
        node.add_child(ConfigNode::with_value("groupId", "g"));
        node.add_child(ConfigNode::with_value("contextRoot", "/a&b"));
        node.add_child(ConfigNode::new("empty"));

        assert_eq!(
            node.to_string(),
            "<webModule><groupId>g</groupId><contextRoot>/a&amp;b</contextRoot><empty/></webModule>"
        );
        assert_eq!(node.child("groupId").and_then(|c| c.value()), Some("g"));
        assert_eq!(node.child("empty").map(|c| c.to_string()).as_deref(), Some("<empty/>"));
    }

    #[test]
    fn test_goal_round_trip_names() {
        for name in Goal::ALL {
            let goal: Goal = name.parse().unwrap();
            assert_eq!(goal.as_str(), name);
        }
        assert!("deploy".parse::<Goal>().is_err());
    }
}
