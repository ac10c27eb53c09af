pub mod lookup;
pub mod pen;

pub use lookup::{LookupKind, LookupPayload, LookupRead};
pub use pen::{PenPayload, PenRead, PenRow};
