pub mod calculate;
pub mod formula;
pub mod init;
