//! 文件存储实现

mod ledger;
mod stage_cache;

pub use ledger::FileLedger;
pub use stage_cache::FileStageCache;
