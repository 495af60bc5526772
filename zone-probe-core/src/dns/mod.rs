//! NS 存在性分类

mod classifier;
mod resolver;

pub use classifier::{classify_outcome, DnsClassifier};
pub use resolver::{HickoryNsLookup, DEFAULT_DNS_TIMEOUT};
