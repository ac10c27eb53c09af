pub mod json;

pub use json::Payload;
