use super::input::RequestInput;
use crate::validation::RuleSet;
use scaffold_domain::outcome::{Either, succeed};

/// 具体请求类型声明的校验规则与授权判断
///
/// ```ignore
/// struct CreateUserRequest;
///
/// impl FormRequest for CreateUserRequest {
///     fn rules() -> RuleSet {
///         RuleSet::new().field("email", [Constraint::IsString, Constraint::IsEmail])
///     }
/// }
/// ```
pub trait FormRequest: Send + Sync + 'static {
    /// 请求体规则
    fn rules() -> RuleSet {
        RuleSet::new()
    }

    /// query 参数规则
    fn query_rules() -> RuleSet {
        RuleSet::new()
    }

    /// 返回 `fail(false)` 拒绝请求
    fn authorize(_input: &RequestInput) -> Either<bool, bool> {
        succeed(true)
    }
}

/// 无规则、默认放行的请求类型
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRequest;

impl FormRequest for DefaultRequest {}
