//! 请求对象：原始输入、规则声明、校验与授权
//!
mod error;
mod form_request;
mod incoming;
mod input;

pub use error::{AuthorizationException, RequestError, ValidationException};
pub use form_request::{DefaultRequest, FormRequest};
pub use incoming::{IncomingRequest, ValidatedRequest};
pub use input::RequestInput;
