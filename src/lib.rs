pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::{ApiResponse, AppError, ValidationFailure};
pub use frameworks::config::{ServerSettings, http_port};
pub use frameworks::server::run;
pub use interface_adapters::response::AppJson;
pub use use_cases::normalize::{Disclosure, ErrorNormalizer};
