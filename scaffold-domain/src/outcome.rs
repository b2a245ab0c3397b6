//! 结果包装（Outcome）
//!
//! - `Either<F, S>`：二选一结果，`Failure(F)` 或 `Success(S)`，用于用例与请求校验的返回；
//! - `OperationResult<T, E>`：带一致性校验的成功/失败记录，误用（成功却携带错误、
//!   失败却缺少错误）在构造时即报错；
//! - `combine_results`：返回首个失败结果，否则返回通用成功。
//!
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 二选一结果：失败或成功，二者互斥
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Either<F, S> {
    Failure(F),
    Success(S),
}

/// 构造失败结果
pub fn fail<F, S>(value: F) -> Either<F, S> {
    Either::Failure(value)
}

/// 构造成功结果
pub fn succeed<F, S>(value: S) -> Either<F, S> {
    Either::Success(value)
}

impl<F, S> Either<F, S> {
    pub fn is_failure(&self) -> bool {
        matches!(self, Either::Failure(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Either::Success(_))
    }

    pub fn as_ref(&self) -> Either<&F, &S> {
        match self {
            Either::Failure(f) => Either::Failure(f),
            Either::Success(s) => Either::Success(s),
        }
    }

    /// 取出成功值（失败时为 None）
    pub fn success(self) -> Option<S> {
        match self {
            Either::Success(s) => Some(s),
            Either::Failure(_) => None,
        }
    }

    /// 取出失败值（成功时为 None）
    pub fn failure(self) -> Option<F> {
        match self {
            Either::Failure(f) => Some(f),
            Either::Success(_) => None,
        }
    }

    pub fn map<T>(self, op: impl FnOnce(S) -> T) -> Either<F, T> {
        match self {
            Either::Failure(f) => Either::Failure(f),
            Either::Success(s) => Either::Success(op(s)),
        }
    }

    pub fn map_failure<T>(self, op: impl FnOnce(F) -> T) -> Either<T, S> {
        match self {
            Either::Failure(f) => Either::Failure(op(f)),
            Either::Success(s) => Either::Success(s),
        }
    }

    /// 转换为标准库 `Result`，便于配合 `?` 使用
    pub fn into_result(self) -> Result<S, F> {
        match self {
            Either::Failure(f) => Err(f),
            Either::Success(s) => Ok(s),
        }
    }
}

impl<T> Either<T, T> {
    /// 两侧类型一致时直接取出载荷
    pub fn value(self) -> T {
        match self {
            Either::Failure(v) | Either::Success(v) => v,
        }
    }
}

impl<F, S> From<Result<S, F>> for Either<F, S> {
    fn from(result: Result<S, F>) -> Self {
        match result {
            Ok(s) => Either::Success(s),
            Err(f) => Either::Failure(f),
        }
    }
}

/// 结果对象被误用（编程错误）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvalidOperationError(pub String);

/// 带一致性约束的操作结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult<T, E = String> {
    success: bool,
    value: Option<T>,
    error: Option<E>,
}

impl<T, E> OperationResult<T, E> {
    /// 校验 success/error 的一致性后创建
    pub fn new(success: bool, value: Option<T>, error: Option<E>) -> Result<Self, InvalidOperationError> {
        if success && error.is_some() {
            return Err(InvalidOperationError(
                "A result cannot be successful and contain an error".to_string(),
            ));
        }
        if !success && error.is_none() {
            return Err(InvalidOperationError(
                "A failing result needs to contain an error message".to_string(),
            ));
        }

        Ok(Self {
            success,
            value,
            error,
        })
    }

    pub fn ok(value: Option<T>) -> Self {
        Self {
            success: true,
            value,
            error: None,
        }
    }

    pub fn fail(error: E) -> Self {
        Self {
            success: false,
            value: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }

    /// 读取成功值；失败结果上调用视为误用
    pub fn value(&self) -> Result<Option<&T>, InvalidOperationError> {
        if !self.success {
            return Err(InvalidOperationError(
                "Cannot get the value of a failed result. Use `error` instead.".to_string(),
            ));
        }
        Ok(self.value.as_ref())
    }

    /// 读取错误；成功结果上调用视为误用
    pub fn error(&self) -> Result<&E, InvalidOperationError> {
        match (&self.error, self.success) {
            (Some(error), false) => Ok(error),
            _ => Err(InvalidOperationError(
                "Cannot get the error of a successful result. Use `value` instead.".to_string(),
            )),
        }
    }

    pub fn into_either(self) -> Either<E, Option<T>> {
        match self.error {
            Some(error) if !self.success => Either::Failure(error),
            _ => Either::Success(self.value),
        }
    }
}

/// 返回首个失败结果（按输入顺序短路），全部成功时返回通用成功
pub fn combine_results<T, E>(
    results: impl IntoIterator<Item = OperationResult<T, E>>,
) -> OperationResult<(), E> {
    for result in results {
        if let (false, Some(error)) = (result.success, result.error) {
            return OperationResult::fail(error);
        }
    }
    OperationResult::ok(None)
}
