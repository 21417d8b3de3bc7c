mod command_result;
pub mod export;
pub mod helper;
pub mod import;
pub mod init;
pub mod scan;

pub use command_result::*;
