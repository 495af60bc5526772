//! 阶段缓存抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Stage;

/// 阶段缓存 Trait
///
/// 缓存存在即为最终结果：调用方不会重新校验或与新数据合并。
/// 失效需要运维人员手动删除缓存。
///
/// 实现:
/// - `FileStageCache`: 工作目录下每个阶段一个文本文件
#[async_trait]
pub trait StageStore: Send + Sync {
    /// 读取阶段缓存
    ///
    /// # Returns
    /// * `Ok(Some(items))` - 缓存存在，按保存时的顺序返回（不去重）
    /// * `Ok(None)` - 缓存不存在
    async fn load(&self, stage: Stage) -> CoreResult<Option<Vec<String>>>;

    /// 保存阶段缓存
    ///
    /// 实现必须保证写入中断时不会留下一个被当作完整缓存的半成品文件。
    async fn save(&self, stage: Stage, items: &[String]) -> CoreResult<()>;
}
