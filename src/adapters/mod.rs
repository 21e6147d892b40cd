#[cfg(test)]
pub mod memory;
pub mod oci;

pub use oci::OciAdapter;
