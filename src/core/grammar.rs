//! Positional field grammars for item specs.
//!
//! * dependency: `groupId[:artifactId[:version[:type[:scope]]]]`
//! * EAR module: `groupId:artifactId:moduleType[:contextRoot]`
//!
//! Positions are strictly positional: a shorter spec leaves the later fields
//! unset and extra positions are dropped.

use crate::core::tokenizer::fields;
use crate::domain::model::{DependencyRecord, ItemSpec, ModuleRecord};
use crate::utils::error::ParseSkip;

/// 永遠成功；缺少的欄位保持 `None`
pub fn parse_dependency(spec: &ItemSpec) -> DependencyRecord {
    let mut dep = DependencyRecord::default();

    for (i, field) in fields(spec).enumerate() {
        let field = Some(field.to_string());
        match i {
            0 => dep.group_id = field,
            1 => dep.artifact_id = field,
            2 => dep.version = field,
            3 => dep.r#type = field,
            4 => dep.scope = field,
            _ => {}
        }
    }

    tracing::debug!("dependency instance = {:?}", dep);
    dep
}

/// moduleType 與 contextRoot 是兩個獨立位置，contextRoot 可省略
pub fn parse_module(spec: &ItemSpec) -> Result<ModuleRecord, ParseSkip> {
    let mut group_id = None;
    let mut artifact_id = None;
    let mut module_type = None;
    let mut context_root = None;

    for (i, field) in fields(spec).enumerate() {
        match i {
            0 => group_id = Some(field),
            1 => artifact_id = Some(field),
            2 => module_type = Some(field),
            3 => context_root = Some(field),
            _ => {}
        }
    }

    match (group_id, artifact_id, module_type) {
        (Some(group_id), Some(artifact_id), Some(module_type)) => Ok(ModuleRecord {
            module_type: module_type.to_string(),
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            context_root: context_root.map(str::to_string),
        }),
        _ => Err(ParseSkip::MissingModuleType {
            spec: spec.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(spec: &str) -> DependencyRecord {
        parse_dependency(&ItemSpec::new(spec))
    }

    fn module(spec: &str) -> Result<ModuleRecord, ParseSkip> {
        parse_module(&ItemSpec::new(spec))
    }

    #[test]
    fn test_full_dependency_spec() {
        let parsed = dep("g:a:1.0:jar:compile");
        assert_eq!(
            parsed,
            DependencyRecord {
                group_id: Some("g".to_string()),
                artifact_id: Some("a".to_string()),
                version: Some("1.0".to_string()),
                r#type: Some("jar".to_string()),
                scope: Some("compile".to_string()),
            }
        );
    }

    #[test]
    fn test_short_dependency_spec_leaves_fields_unset() {
        assert_eq!(dep("g:a"), DependencyRecord::new("g", "a"));

        let only_group = dep("g");
        assert_eq!(only_group.group_id.as_deref(), Some("g"));
        assert!(only_group.artifact_id.is_none());
    }

    #[test]
    fn test_extra_dependency_fields_are_dropped() {
        let parsed = dep("g:a:1.0:jar:test:classifier:more");
        assert_eq!(parsed.scope.as_deref(), Some("test"));
    }

    #[test]
    fn test_empty_dependency_positions_cannot_be_skipped() {
        let parsed = dep("g::1.0");
        assert_eq!(parsed.artifact_id.as_deref(), Some("1.0"));
        assert!(parsed.version.is_none());
    }

    #[test]
    fn test_module_with_context_root() {
        let parsed = module("g:a:web:/app").unwrap();
        assert_eq!(parsed.module_type, "web");
        assert_eq!(parsed.group_id, "g");
        assert_eq!(parsed.artifact_id, "a");
        assert_eq!(parsed.context_root.as_deref(), Some("/app"));
    }

    #[test]
    fn test_module_context_root_is_optional() {
        let parsed = module("g:a:ejb").unwrap();
        assert_eq!(parsed.module_type, "ejb");
        assert!(parsed.context_root.is_none());
    }

    #[test]
    fn test_module_extra_fields_are_dropped() {
        let parsed = module("g:a:web:/app:ignored").unwrap();
        assert_eq!(parsed.context_root.as_deref(), Some("/app"));
    }

    #[test]
    fn test_module_without_type_is_skipped() {
        assert_eq!(
            module("g:a"),
            Err(ParseSkip::MissingModuleType {
                spec: "g:a".to_string()
            })
        );
        assert!(module("g").is_err());
        assert!(module("g:a::").is_err());
    }
}
