pub mod aggregate;
pub mod constants;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod render;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;
