pub mod backup;
pub mod config;
pub mod init;
pub mod interactive;
pub mod list;
pub mod set;
