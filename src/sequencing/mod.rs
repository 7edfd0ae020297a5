pub mod notes;
pub mod sequence;

pub use notes::{KeyColor, Note, NOTES};
pub use sequence::{SequenceRequest, SEQUENCE_TONE_DURATION};
