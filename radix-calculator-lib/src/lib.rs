pub mod error;
pub mod interpreter;
pub mod radix;
pub mod report;
