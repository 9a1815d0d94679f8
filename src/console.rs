#[cfg(test)]
pub mod impl_fake;
pub mod impl_terminal;
pub mod interface;
