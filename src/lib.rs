pub mod output;
pub mod transcription;
pub mod utility;
