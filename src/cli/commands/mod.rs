pub mod analyze;
pub mod helper;
pub mod init;
pub mod lint;
pub mod tex;
