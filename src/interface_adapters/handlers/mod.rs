pub mod profiles;
pub mod upstream;
