use scaffold_domain::domain_event::DomainEvent;
use scaffold_domain::identifier::UniqueId;
use scaffold_macros::domain_event;

#[domain_event(name = "account.closed")]
struct AccountClosed {}

fn main() {
    let event = AccountClosed::new(UniqueId::generate());
    assert_eq!(event.event_name(), "account.closed");
    let json = serde_json::to_value(&event).unwrap();
    assert!(json.get("occurred_at").is_some());
}
