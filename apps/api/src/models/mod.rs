pub mod quiz;
pub mod social;
pub mod user;
