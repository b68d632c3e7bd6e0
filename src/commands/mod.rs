pub mod convert;
pub mod outline;
pub mod section;
pub mod summarize;
