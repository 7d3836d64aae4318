// Settings store - boxes of named string pairs and their text format

pub mod coerce;
pub mod error;
pub mod file;
pub mod format;
pub mod pair;
pub mod section;
mod serialize;
pub mod settings;

pub use error::StoreError;
pub use format::{ReadReport, SkipReason, SkippedLine};
pub use pair::{Pair, PairValue};
pub use section::Section;
pub use settings::Settings;
