pub mod catalog;
pub mod pen;
pub mod refcode;

pub use catalog::CatalogService;
pub use pen::PenService;
