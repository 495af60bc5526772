//! 工具模块

mod pacer;

pub use pacer::Pacer;
