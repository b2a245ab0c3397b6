//! 领域建模过程宏（scaffold-macros）
//!
//! - `#[entity]`：为具名字段结构体补齐标识与时间戳字段并实现 `Entity`，
//!   可选 `aggregate_root` 同时实现 `AggregateRoot`；
//! - `#[domain_event]`：为具名字段结构体补齐事件标识、聚合根标识与发生时间，
//!   实现 `DomainEvent` 并生成构造函数。
//!
use proc_macro::TokenStream;

mod domain_event;
mod entity;
mod utils;

/// 实体宏
///
/// ```ignore
/// #[entity(aggregate_root)]
/// #[derive(Clone, Default)]
/// struct User {
///     name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}

/// 领域事件宏
///
/// ```ignore
/// #[domain_event(name = "user.registered")]
/// struct UserRegistered {
///     email: String,
/// }
///
/// let event = UserRegistered::new(user_id, "a@b.c".into());
/// ```
#[proc_macro_attribute]
pub fn domain_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    domain_event::expand(attr, item)
}
