use crate::domain::model::SelectedProperty;
use crate::domain::ports::Profile;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_required_field};

/// 前綴必須存在且去除空白後非空；前綴本身不做 trim
pub fn validate_prefix(prefix: Option<&str>) -> Result<&str> {
    let prefix = *validate_required_field("prefix", &prefix)?;
    validate_non_empty_string("prefix", prefix)?;
    Ok(prefix)
}

/// 依序走訪所有 profile 的屬性，保留 key 以 `prefix` 開頭者
pub fn select(profiles: &[&dyn Profile], prefix: &str) -> Result<Vec<SelectedProperty>> {
    let mut selected = Vec::new();

    for profile in profiles {
        let properties = profile.properties()?;
        tracing::debug!(
            "{} properties of '{}' = {:?}",
            properties.len(),
            profile.id(),
            properties
        );

        for (key, value) in properties.iter() {
            tracing::debug!("property key = {}", key);

            if !key.starts_with(prefix) {
                continue;
            }

            tracing::debug!("Find matching property: {} = {}", key, value);
            selected.push(SelectedProperty {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
    }

    Ok(selected)
}
