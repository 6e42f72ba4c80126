mod indexer;
mod locator;

pub use indexer::{ArtefactSearchIndexer, IndexOutcome};
pub use locator::locate_cases;
