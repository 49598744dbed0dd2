// This file declares the persistence modules.

pub mod economy;
pub mod init;
