pub mod init;
pub mod remap;
pub mod resolve;
