pub mod hub;
pub mod protocol;
pub mod subscription;
pub mod view;
pub mod ws;
