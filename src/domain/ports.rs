use crate::domain::model::{DependencyRecord, Goal, ItemSpec, Plugin, PropertyMap};
use crate::utils::error::{ParseSkip, Result, SkipReason};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 建置工具提供的 profile
pub trait Profile {
    fn id(&self) -> &str;

    /// 屬性存取器不可用時回傳錯誤，呼叫端視為致命錯誤
    fn properties(&self) -> Result<&PropertyMap>;
}

/// 建置工具的專案模型：讀取 profile，寫入依賴清單與外掛設定
pub trait BuildProject {
    fn active_profiles(&self) -> Vec<&dyn Profile>;
    fn dependencies_mut(&mut self) -> &mut Vec<DependencyRecord>;
    fn build_plugins(&self) -> &[Plugin];
    fn build_plugins_mut(&mut self) -> &mut [Plugin];
}

/// 一個注入 goal 的 transform / load 階段
pub trait InjectionPipeline {
    type Item;

    fn goal(&self) -> Goal;
    fn prefix(&self) -> Option<&str>;

    /// 在解析任何描述前確認注入目標存在
    fn check_target(&self, _project: &dyn BuildProject) -> std::result::Result<(), SkipReason> {
        Ok(())
    }

    fn transform(&self, spec: &ItemSpec) -> std::result::Result<Self::Item, ParseSkip>;

    /// 一次性寫入整批結果，回傳寫入筆數
    fn load(
        &self,
        project: &mut dyn BuildProject,
        batch: Vec<(ItemSpec, Self::Item)>,
    ) -> std::result::Result<usize, SkipReason>;
}
