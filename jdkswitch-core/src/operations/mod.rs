pub mod backup;
pub mod init;
pub mod versions;

pub use backup::backup_only;
pub use init::init;
pub use versions::{list_versions, use_version};
