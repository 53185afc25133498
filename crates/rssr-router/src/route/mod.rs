/// Route module for file-based routing
///
/// Contains the pure components for route parsing:
/// - `pattern`: segment classification and compiled patterns
/// - `parser`: file path → pattern conversion

pub mod parser;
pub mod pattern;

pub use parser::parse_file_path;
pub use pattern::{classify_pattern_segment, classify_segment, PathPattern, Segment};
