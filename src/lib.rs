//! HJKL navigation library exports for testing

pub mod core;
pub mod host;
pub mod terminal;

#[cfg(test)]
pub mod test_support;
