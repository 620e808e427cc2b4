pub mod compress;
pub mod convert;
pub mod pdf;
