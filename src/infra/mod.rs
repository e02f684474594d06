pub mod clock;
pub mod logging;
pub mod output;
pub mod storage;
