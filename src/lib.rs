pub mod analysis;
pub mod error;
pub mod parser;
pub mod processor;
pub mod segment;
pub mod serialiser;
pub mod sync;

pub use error::{Result, TranscueError};
pub use parser::{parse, parse_optional, validate_duration};
pub use segment::TimedSegment;
