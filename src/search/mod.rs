pub mod grouping;
pub mod listing;
pub mod pipeline;
pub mod stats;
pub mod suggestions;
