pub mod context;
pub mod persona;
pub mod respond;
pub mod theme;
pub mod transfer;
pub mod versions;
