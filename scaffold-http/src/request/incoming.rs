//! 请求对象
//!
//! `IncomingRequest` 包装原始输入并按 `FormRequest` 声明的规则校验：
//! - 校验只执行一次，结果缓存，之后的调用直接返回缓存；
//! - 校验先于授权，校验失败优先于授权失败；
//! - 成功后转换为只读的 `ValidatedRequest`。
//!
use super::error::{AuthorizationException, RequestError, ValidationException};
use super::form_request::FormRequest;
use super::input::RequestInput;
use crate::validation::{ValidationError, extract_validated, validate};
use axum::http::HeaderMap;
use scaffold_domain::outcome::{Either, fail, succeed};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::OnceLock;

#[derive(Debug)]
struct Validation {
    errors: Vec<ValidationError>,
    body: Map<String, Value>,
    query: Map<String, Value>,
}

#[derive(Debug)]
pub struct IncomingRequest<R: FormRequest> {
    input: RequestInput,
    validation: OnceLock<Validation>,
    _request: PhantomData<fn() -> R>,
}

impl<R: FormRequest> IncomingRequest<R> {
    pub fn new(input: RequestInput) -> Self {
        Self {
            input,
            validation: OnceLock::new(),
            _request: PhantomData,
        }
    }

    pub fn input(&self) -> &RequestInput {
        &self.input
    }

    pub fn is_validated(&self) -> bool {
        self.validation.get().is_some()
    }

    /// 校验 `{..body, ..query}`，成功时返回合并后的已校验字段
    pub fn validate(&self) -> Either<Vec<ValidationError>, Map<String, Value>> {
        let validation = self.validation.get_or_init(|| self.run_validation());
        if validation.errors.is_empty() {
            succeed(merge(&validation.body, &validation.query))
        } else {
            fail(validation.errors.clone())
        }
    }

    pub fn validate_or_fail(&self) -> Result<(), ValidationException> {
        self.validate()
            .into_result()
            .map(|_| ())
            .map_err(ValidationException::new)
    }

    pub fn authorize(&self) -> Either<bool, bool> {
        R::authorize(&self.input)
    }

    pub fn authorize_or_fail(&self) -> Result<(), AuthorizationException> {
        match self.authorize() {
            Either::Success(_) => Ok(()),
            Either::Failure(_) => Err(AuthorizationException::default()),
        }
    }

    /// 先校验再授权，成功后得到只读视图
    pub fn validate_and_authorize_or_fail(self) -> Result<ValidatedRequest<R>, RequestError> {
        self.validate_or_fail()?;
        self.authorize_or_fail()?;
        Ok(self.into_validated())
    }

    /// 未经授权检查直接转换；尚未校验时先执行校验，失败时已校验字段为空
    pub fn into_validated(self) -> ValidatedRequest<R> {
        self.validation.get_or_init(|| self.run_validation());
        let (body, query) = match self.validation.into_inner() {
            Some(validation) if validation.errors.is_empty() => (validation.body, validation.query),
            _ => (Map::new(), Map::new()),
        };
        ValidatedRequest {
            input: self.input,
            validated_body: body,
            validated_query: query,
            _request: PhantomData,
        }
    }

    fn run_validation(&self) -> Validation {
        let rules = R::rules();
        let query_rules = R::query_rules();
        let errors = validate(&self.input.merged(), &rules.clone().merge(query_rules.clone()));

        if errors.is_empty() {
            Validation {
                errors,
                body: extract_validated(self.input.body(), &rules),
                query: extract_validated(self.input.query(), &query_rules),
            }
        } else {
            tracing::debug!(fields = errors.len(), "request validation failed");
            Validation {
                errors,
                body: Map::new(),
                query: Map::new(),
            }
        }
    }
}

/// 通过校验与授权后的只读请求
#[derive(Debug)]
pub struct ValidatedRequest<R: FormRequest> {
    input: RequestInput,
    validated_body: Map<String, Value>,
    validated_query: Map<String, Value>,
    _request: PhantomData<fn() -> R>,
}

impl<R: FormRequest> ValidatedRequest<R> {
    pub fn body(&self) -> &Map<String, Value> {
        self.input.body()
    }

    pub fn query(&self) -> &Map<String, Value> {
        self.input.query()
    }

    pub fn params(&self) -> &HashMap<String, String> {
        self.input.params()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.input.param(name)
    }

    pub fn headers(&self) -> &HeaderMap {
        self.input.headers()
    }

    pub fn validated(&self) -> Map<String, Value> {
        merge(&self.validated_body, &self.validated_query)
    }

    pub fn validated_body(&self) -> &Map<String, Value> {
        &self.validated_body
    }

    pub fn validated_query(&self) -> &Map<String, Value> {
        &self.validated_query
    }

    /// 把已校验字段反序列化为 DTO
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.validated()))
    }
}

fn merge(body: &Map<String, Value>, query: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = body.clone();
    merged.extend(query.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}
