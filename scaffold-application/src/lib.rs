//! 应用层脚手架（scaffold-application）
//!
//! 用例（`use_case`）编排领域对象完成一次业务操作，并以 `Either` 返回成功或失败；
//! 映射器（`mapper`）负责实体、持久化记录与 DTO 之间的转换。
//!
pub mod context;
pub mod dto;
pub mod error;
pub mod mapper;
pub mod use_case;

pub use use_case::{UseCase, UseCaseFailedResult, UseCaseResponse};
