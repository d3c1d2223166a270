pub mod availability;
pub mod primitives;
pub mod records;

pub use availability::AvailabilityChecker;
pub use records::{parse_candidate, RecordValidator, Validate};
