//! 规则集（RuleSet）
//!
//! 有序的 字段 → 规则 映射，声明顺序即错误报告顺序。
//!
use super::constraint::Constraint;

/// 单个字段的规则
#[derive(Debug, Clone)]
pub enum Rule {
    /// 按声明顺序执行的约束列表
    Constraints(Vec<Constraint>),
    /// 字段本身是对象，按嵌套规则集校验
    Nested(RuleSet),
    /// 字段是数组，每个元素按规则集校验
    Each(RuleSet),
}

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    entries: Vec<(String, Rule)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<I>(self, name: impl Into<String>, constraints: I) -> Self
    where
        I: IntoIterator<Item = Constraint>,
    {
        self.insert(name, Rule::Constraints(constraints.into_iter().collect()))
    }

    pub fn nested(self, name: impl Into<String>, rules: RuleSet) -> Self {
        self.insert(name, Rule::Nested(rules))
    }

    pub fn each(self, name: impl Into<String>, rules: RuleSet) -> Self {
        self.insert(name, Rule::Each(rules))
    }

    /// 已存在的字段原位替换，新字段追加到末尾
    pub fn insert(mut self, name: impl Into<String>, rule: Rule) -> Self {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = rule,
            None => self.entries.push((name, rule)),
        }
        self
    }

    pub fn merge(self, other: RuleSet) -> Self {
        other
            .entries
            .into_iter()
            .fold(self, |acc, (name, rule)| acc.insert(name, rule))
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, rule)| rule)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.entries.iter().map(|(key, rule)| (key.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_order_is_kept() {
        let rules = RuleSet::new()
            .field("name", [Constraint::IsString])
            .field("email", [Constraint::IsEmail])
            .nested("address", RuleSet::new().field("city", [Constraint::IsString]));

        assert_eq!(rules.fields().collect::<Vec<_>>(), ["name", "email", "address"]);
        assert!(matches!(rules.get("address"), Some(Rule::Nested(_))));
        assert!(rules.get("missing").is_none());
    }

    #[test]
    fn merge_replaces_in_place_and_appends_new_keys() {
        let body = RuleSet::new()
            .field("name", [Constraint::IsString])
            .field("page", [Constraint::IsString]);
        let query = RuleSet::new()
            .field("page", [Constraint::IsInt, Constraint::Min(1.0)])
            .field("sortBy", [Constraint::IsOptional, Constraint::IsString]);

        let merged = body.merge(query);
        assert_eq!(merged.fields().collect::<Vec<_>>(), ["name", "page", "sortBy"]);
        match merged.get("page") {
            Some(Rule::Constraints(list)) => assert_eq!(list.len(), 2),
            other => panic!("unexpected rule: {other:?}"),
        }
    }
}
