pub mod hasher;
pub mod pdf;
pub mod scanner;

pub use pdf::{decode_transcript, read_transcript};
pub use scanner::{DocumentFormat, ScannedFile, Scanner};
