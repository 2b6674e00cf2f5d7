pub mod normalize;
pub mod picker;
pub mod request;
pub mod response;
pub mod rulesets;
pub mod validator;

pub use crate::domain::model::{ApiRequest, HttpMethod, HttpOutcome, LogLevel, Payload};
pub use crate::domain::ports::{RequestLogger, Transport};
pub use crate::utils::error::Result;
