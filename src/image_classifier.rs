pub mod impl_custom_vision;
#[cfg(test)]
pub mod impl_fake;
pub mod interface;

#[cfg(test)]
mod interface_test;
