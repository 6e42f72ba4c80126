mod filter;
mod policy;

pub use filter::filter_accessible;
pub use policy::{can_view_data, can_view_metadata, can_view_publication};
