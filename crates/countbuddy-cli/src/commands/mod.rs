pub mod create_profile;
pub mod init;
pub mod play;
pub mod profiles;
pub mod serve;
