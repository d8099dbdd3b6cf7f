// ephemeris/mod.rs
//
// Date-indexed body positions: storage, date keys, and where samples come from.

pub mod date;
pub mod source;
pub mod store;
pub mod table;

pub use date::canonical_date;
pub use source::{DirectorySource, MemorySource, SampleSource};
pub use store::{EphemerisSeries, EphemerisStore, LoadCount, SeriesEntry};
pub use table::{parse_table, SampleBatch};
