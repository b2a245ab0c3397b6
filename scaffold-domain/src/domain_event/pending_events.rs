use super::domain_event_trait::DomainEvent;
use std::fmt;
use std::ops::Deref;
use std::slice::Iter;
use std::sync::Arc;
use std::vec::IntoIter;

/// 聚合根尚未发布的事件集合，按产生顺序排列，同一事件只保留一次
#[derive(Clone, Default)]
pub struct PendingEvents {
    events: Vec<Arc<dyn DomainEvent>>,
}

impl PendingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加事件；已存在同一事件时忽略并返回 false
    pub fn push(&mut self, event: Arc<dyn DomainEvent>) -> bool {
        if self.contains(event.as_ref()) {
            return false;
        }
        self.events.push(event);
        true
    }

    pub fn contains(&self, event: &dyn DomainEvent) -> bool {
        self.events.iter().any(|e| e.is_same_event(event))
    }

    /// 获取事件列表的不可变引用
    pub fn events(&self) -> &[Arc<dyn DomainEvent>] {
        &self.events
    }

    /// 取出全部事件并清空集合
    pub fn take(&mut self) -> Vec<Arc<dyn DomainEvent>> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// 迭代事件引用（不消费集合）
    pub fn iter(&self) -> Iter<'_, Arc<dyn DomainEvent>> {
        self.events.iter()
    }
}

impl fmt::Debug for PendingEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.events.iter().map(|e| e.event_name()))
            .finish()
    }
}

impl PartialEq for PendingEvents {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.is_same_event(b.as_ref()))
    }
}

impl IntoIterator for PendingEvents {
    type Item = Arc<dyn DomainEvent>;
    type IntoIter = IntoIter<Arc<dyn DomainEvent>>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a PendingEvents {
    type Item = &'a Arc<dyn DomainEvent>;
    type IntoIter = Iter<'a, Arc<dyn DomainEvent>>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl Deref for PendingEvents {
    type Target = [Arc<dyn DomainEvent>];

    fn deref(&self) -> &Self::Target {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_event::DomainEventRecord;
    use crate::identifier::UniqueId;

    #[test]
    fn push_ignores_same_event() {
        let event: Arc<dyn DomainEvent> =
            Arc::new(DomainEventRecord::new("Created", UniqueId::generate()));
        let mut pending = PendingEvents::new();

        assert!(pending.push(event.clone()));
        assert!(!pending.push(event));
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn take_drains_in_order() {
        let agg = UniqueId::generate();
        let mut pending = PendingEvents::new();
        pending.push(Arc::new(DomainEventRecord::new("A", agg.clone())));
        pending.push(Arc::new(DomainEventRecord::new("B", agg)));

        let names: Vec<_> = pending.take().iter().map(|e| e.event_name().to_string()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(pending.is_empty());
    }
}
