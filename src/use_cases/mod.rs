pub mod create_profile;
pub mod normalize;
pub mod relay;

#[cfg(test)]
pub(crate) mod test_support;
