pub mod joiner;
pub mod pipeline;
pub mod regex_booster;

pub use joiner::DocumentJoiner;
pub use pipeline::{DocumentPipeline, StaticSource};
pub use regex_booster::RegexBooster;
