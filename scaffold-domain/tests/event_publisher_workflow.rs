use async_trait::async_trait;
use scaffold_domain::aggregate_root::AggregateRoot;
use scaffold_domain::domain_event::DomainEvent;
use scaffold_domain::entity::Entity;
use scaffold_domain::error::{DomainError, DomainResult};
use scaffold_domain::eventing::{
    DomainEventHandler, DomainEventPublisher, InMemoryDomainEventPublisher, publish_pending_events,
};
use scaffold_domain::identifier::UniqueId;
use scaffold_domain::value_object::CreatedAt;
use scaffold_macros::{domain_event, entity};
use std::sync::{Arc, Mutex};

#[entity(aggregate_root)]
#[derive(Clone, Default)]
struct User {
    email: String,
    active: bool,
}

#[domain_event]
struct UserRegistered {
    email: String,
}

#[domain_event(name = "user.deactivated")]
struct UserDeactivated {}

impl User {
    fn register(email: &str) -> Self {
        let mut user = User {
            email: email.to_string(),
            active: true,
            created_at: Some(CreatedAt::now()),
            ..Default::default()
        };
        let event = UserRegistered::new(user.id().clone(), user.email.clone());
        user.raise_domain_event(event);
        user
    }

    fn deactivate(&mut self) -> DomainResult<()> {
        if !self.active {
            return Err(DomainError::InvalidValue {
                reason: "user already inactive".into(),
            });
        }
        self.active = false;
        let event = UserDeactivated::new(self.id().clone());
        self.raise_domain_event(event);
        Ok(())
    }
}

// 记录收到的邮箱，模拟发送欢迎邮件
#[derive(Default)]
struct WelcomeMailer {
    sent: Mutex<Vec<String>>,
}

#[async_trait]
impl DomainEventHandler for WelcomeMailer {
    fn handler_name(&self) -> &str {
        "welcome_mailer"
    }

    async fn handle(&self, event: Arc<dyn DomainEvent>) -> anyhow::Result<()> {
        let registered = event
            .downcast_ref::<UserRegistered>()
            .ok_or_else(|| anyhow::anyhow!("unexpected event {}", event.event_name()))?;
        self.sent.lock().unwrap().push(registered.email.clone());
        Ok(())
    }
}

#[derive(Default)]
struct AuditLog {
    entries: Mutex<Vec<String>>,
}

#[async_trait]
impl DomainEventHandler for AuditLog {
    async fn handle(&self, event: Arc<dyn DomainEvent>) -> anyhow::Result<()> {
        self.entries
            .lock()
            .unwrap()
            .push(format!("{}:{}", event.event_name(), event.aggregate_root_id()));
        Ok(())
    }
}

#[tokio::test]
async fn aggregate_events_flow_to_handlers() {
    let publisher = InMemoryDomainEventPublisher::new();
    let mailer = Arc::new(WelcomeMailer::default());
    let audit = Arc::new(AuditLog::default());
    publisher.register_handler(mailer.clone(), "UserRegistered");
    publisher.register_handler(audit.clone(), "UserRegistered");
    publisher.register_handler(audit.clone(), "user.deactivated");

    let mut user = User::register("alice@example.com");
    user.deactivate().unwrap();
    assert!(user.deactivate().is_err());

    assert_eq!(publish_pending_events(&mut user, &publisher), 2);
    assert!(user.pending_events().is_empty());
    assert_eq!(publisher.aggregate_root_events(user.id()).len(), 2);

    publisher.dispatch_aggregate_root_events(user.id()).await.unwrap();

    assert_eq!(*mailer.sent.lock().unwrap(), vec!["alice@example.com".to_string()]);
    let entries = audit.entries.lock().unwrap().clone();
    assert_eq!(
        entries,
        vec![
            format!("UserRegistered:{}", user.id()),
            format!("user.deactivated:{}", user.id()),
        ]
    );
    assert!(publisher.aggregate_root_events(user.id()).is_empty());
}

#[tokio::test]
async fn handler_failure_keeps_events_for_retry() {
    let publisher = InMemoryDomainEventPublisher::new();
    // 仅登记 mailer 到注销事件：downcast 失败即返回错误
    publisher.register_handler(Arc::new(WelcomeMailer::default()), "user.deactivated");

    let mut user = User::register("bob@example.com");
    user.deactivate().unwrap();
    publish_pending_events(&mut user, &publisher);

    let err = publisher
        .dispatch_aggregate_root_event_by_name(user.id(), "user.deactivated")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EventHandler { .. }));
    assert_eq!(publisher.aggregate_root_events(user.id()).len(), 2);

    publisher.clear_aggregate_root_events(user.id());
    assert!(publisher.aggregate_root_events(user.id()).is_empty());
}

#[tokio::test]
async fn republished_event_is_not_buffered_twice() {
    let publisher = InMemoryDomainEventPublisher::new();
    let user = User::register("carol@example.com");
    let event = user.pending_events()[0].clone();
    let id: &UniqueId = user.id();

    publisher.publish(id, event.clone());
    publisher.publish(id, event);
    assert_eq!(publisher.aggregate_root_events(id).len(), 1);
}
