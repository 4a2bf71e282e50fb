pub mod availability;
pub mod clock;
pub mod coordinator;
pub mod multipart;
pub mod payload;
pub mod session;
pub mod slots;
pub mod store;
pub mod transport;
