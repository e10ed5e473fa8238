use crate::domain::model::ItemSpec;

const SPEC_SEPARATOR: char = ' ';
const FIELD_SEPARATOR: char = ':';

/// 以空白字元（只限 `' '`）切出每個構件描述，連續空白視為一個
pub fn tokenize(value: &str) -> Vec<ItemSpec> {
    value
        .split(SPEC_SEPARATOR)
        .filter(|token| !token.is_empty())
        .map(ItemSpec::new)
        .collect()
}

/// 以 `:` 切出位置欄位；空欄位直接略過，之後的欄位往前遞補
pub fn fields(spec: &ItemSpec) -> impl Iterator<Item = &str> {
    spec.as_str()
        .split(FIELD_SEPARATOR)
        .filter(|field| !field.is_empty())
}
