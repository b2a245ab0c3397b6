//! 规则集解释器
//!
use super::constraint::Constraint;
use super::error::ValidationError;
use super::rule_set::{Rule, RuleSet};
use serde_json::{Map, Value};

/// 按规则集校验输入，返回所有失败字段（声明顺序）
///
/// 嵌套字段以点号路径报告，例如 `address.city`、`phones.0.number`；
/// 消息中使用叶子属性名。
pub fn validate(input: &Map<String, Value>, rules: &RuleSet) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    validate_object(None, input, rules, &mut errors);
    errors
}

/// 取出规则集中声明、且在输入中存在的顶层字段（原值拷贝）
pub fn extract_validated(input: &Map<String, Value>, rules: &RuleSet) -> Map<String, Value> {
    rules
        .fields()
        .filter_map(|name| input.get(name).map(|value| (name.to_owned(), value.clone())))
        .collect()
}

fn validate_object(
    prefix: Option<&str>,
    input: &Map<String, Value>,
    rules: &RuleSet,
    errors: &mut Vec<ValidationError>,
) {
    for (name, rule) in rules.iter() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name.to_owned(),
        };
        let value = input.get(name);

        match rule {
            Rule::Constraints(constraints) => {
                let messages = check_constraints(name, value, constraints);
                if !messages.is_empty() {
                    errors.push(ValidationError::new(path, messages));
                }
            }
            Rule::Nested(nested) => match value {
                None | Some(Value::Null) => {
                    validate_object(Some(&path), &Map::new(), nested, errors)
                }
                Some(Value::Object(object)) => validate_object(Some(&path), object, nested, errors),
                Some(_) => errors.push(ValidationError::new(
                    path,
                    vec![Constraint::IsObject.message(name)],
                )),
            },
            Rule::Each(element_rules) => match value {
                None | Some(Value::Null) => {}
                Some(Value::Array(items)) => {
                    for (index, item) in items.iter().enumerate() {
                        let item_path = format!("{path}.{index}");
                        match item {
                            Value::Object(object) => {
                                validate_object(Some(&item_path), object, element_rules, errors)
                            }
                            _ => errors.push(ValidationError::new(
                                item_path,
                                vec![Constraint::IsObject.message(&index.to_string())],
                            )),
                        }
                    }
                }
                Some(_) => errors.push(ValidationError::new(
                    path,
                    vec![Constraint::IsArray.message(name)],
                )),
            },
        }
    }
}

fn check_constraints(name: &str, value: Option<&Value>, constraints: &[Constraint]) -> Vec<String> {
    let optional = constraints
        .iter()
        .any(|c| matches!(c, Constraint::IsOptional));
    if optional && matches!(value, None | Some(Value::Null)) {
        return Vec::new();
    }

    constraints
        .iter()
        .filter(|c| !matches!(c, Constraint::IsOptional))
        .filter(|c| !c.check(value))
        .map(|c| c.message(name))
        .collect()
}
