//! 原始请求输入
//!
//! 把 HTTP 请求拆成校验所需的四部分：JSON 对象形式的 body、query、路径参数与请求头。
//!
use super::error::RequestError;
use axum::body::to_bytes;
use axum::extract::{FromRequestParts, Query, RawPathParams, Request};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// 请求体读取上限（2 MiB）
const BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    body: Map<String, Value>,
    query: Map<String, Value>,
    params: HashMap<String, String>,
    headers: HeaderMap,
}

impl RequestInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 axum 请求构建输入
    ///
    /// 空请求体视为 `{}`；非法 JSON 或非对象 JSON 返回 `MalformedBody`。
    /// 重复出现的 query 键会合并为字符串数组。
    pub async fn from_http(request: Request) -> Result<Self, RequestError> {
        let (mut parts, body) = request.into_parts();

        let params = RawPathParams::from_request_parts(&mut parts, &())
            .await
            .map(|raw| {
                raw.iter()
                    .map(|(key, value)| (key.to_owned(), value.to_owned()))
                    .collect()
            })
            .unwrap_or_default();

        let pairs = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();

        let bytes = to_bytes(body, BODY_LIMIT)
            .await
            .map_err(|err| RequestError::MalformedBody(err.to_string()))?;

        Ok(Self {
            body: parse_body(&bytes)?,
            query: query_map(pairs),
            params,
            headers: parts.headers,
        })
    }

    /// 以 JSON 对象设置请求体；非对象值视为空对象
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = into_object(body);
        self
    }

    pub fn with_query(mut self, query: Value) -> Self {
        self.query = into_object(query);
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn query(&self) -> &Map<String, Value> {
        &self.query
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// 读取字符串形式的请求头
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// body 与 query 合并，同名键以 query 为准
    pub fn merged(&self) -> Map<String, Value> {
        let mut merged = self.body.clone();
        merged.extend(self.query.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

fn parse_body(bytes: &[u8]) -> Result<Map<String, Value>, RequestError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(RequestError::MalformedBody(
            "request body must be a JSON object".into(),
        )),
        Err(err) => Err(RequestError::MalformedBody(err.to_string())),
    }
}

fn query_map(pairs: Vec<(String, String)>) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, value) in pairs {
        match map.get_mut(&key) {
            Some(Value::Array(values)) => values.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                map.insert(key, Value::String(value));
            }
        }
    }
    map
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
