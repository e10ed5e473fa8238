use crate::domain::model::{ConfigNode, ItemSpec, ModuleRecord};
use crate::utils::error::ParseSkip;
use crate::utils::validation::is_valid_element_name;

/// 建立 `<xxxModule>` 節點，子節點固定為 groupId、artifactId、contextRoot
pub fn build_module_node(spec: &ItemSpec, module: &ModuleRecord) -> Result<ConfigNode, ParseSkip> {
    if module.module_type == "Module" {
        return Err(ParseSkip::MalformedModule {
            spec: spec.to_string(),
            reason: "module type has no name before the Module suffix".to_string(),
        });
    }

    let name = module.element_name();
    if !is_valid_element_name(&name) {
        return Err(ParseSkip::MalformedModule {
            spec: spec.to_string(),
            reason: format!("'{}' is not a valid element name", name),
        });
    }

    let mut node = ConfigNode::new(name);
    node.add_child(ConfigNode::with_value("groupId", &module.group_id));
    node.add_child(ConfigNode::with_value("artifactId", &module.artifact_id));
    if let Some(context_root) = &module.context_root {
        node.add_child(ConfigNode::with_value("contextRoot", context_root));
    }

    tracing::debug!("module config = {}", node);
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grammar::parse_module;

    fn build(spec: &str) -> Result<ConfigNode, ParseSkip> {
        let spec = ItemSpec::new(spec);
        let module = parse_module(&spec)?;
        build_module_node(&spec, &module)
    }

    #[test]
    fn test_web_module_node() {
        let node = build("g:a:webModule:/app").unwrap();

        assert_eq!(node.name, "webModule");
        let children: Vec<(&str, Option<&str>)> = node
            .children
            .iter()
            .map(|c| (c.name.as_str(), c.value()))
            .collect();
        assert_eq!(
            children,
            vec![
                ("groupId", Some("g")),
                ("artifactId", Some("a")),
                ("contextRoot", Some("/app")),
            ]
        );
    }

    #[test]
    fn test_short_type_gets_module_suffix() {
        let node = build("g:a:ejb").unwrap();
        assert_eq!(node.name, "ejbModule");
        assert!(node.child("contextRoot").is_none());
        assert_eq!(node.children.len(), 2);
    }

    #[test]
    fn test_values_are_not_markup() {
        let node = build("g:a<b>:web:/x&y").unwrap();
        assert_eq!(node.child("artifactId").and_then(|c| c.value()), Some("a<b>"));
        assert_eq!(
            node.to_string(),
            "<webModule><groupId>g</groupId><artifactId>a&lt;b&gt;</artifactId><contextRoot>/x&amp;y</contextRoot></webModule>"
        );
    }

    #[test]
    fn test_invalid_element_name_fails_closed() {
        let err = build("g:a:9web").unwrap_err();
        assert!(matches!(err, ParseSkip::MalformedModule { .. }));

        let err = build("g:a:we<b").unwrap_err();
        assert!(matches!(err, ParseSkip::MalformedModule { .. }));
    }

    #[test]
    fn test_bare_module_type_is_skipped() {
        let err = build("g:a:Module:/app").unwrap_err();
        assert!(matches!(err, ParseSkip::MalformedModule { .. }));

        assert_eq!(build("g:a:ejbModule").unwrap().name, "ejbModule");
    }
}
