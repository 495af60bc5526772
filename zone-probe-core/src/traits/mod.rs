//! Storage and network abstraction traits

mod ledger;
mod ns_lookup;
mod seed_source;
mod stage_store;

pub use ledger::OutcomeLedger;
pub use ns_lookup::NsLookup;
pub use seed_source::SeedSource;
pub use stage_store::StageStore;
