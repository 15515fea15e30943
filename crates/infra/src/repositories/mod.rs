mod file;
mod impls;

pub use file::*;
pub use impls::*;
