pub mod format;
pub mod matching;
pub mod sort;
