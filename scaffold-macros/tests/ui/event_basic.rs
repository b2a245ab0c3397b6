use scaffold_domain::domain_event::DomainEvent;
use scaffold_domain::identifier::UniqueId;
use scaffold_macros::domain_event;

#[domain_event]
pub struct AccountOpened {
    pub owner: String,
    pub initial_balance: u64,
}

fn main() {
    let aggregate_root_id = UniqueId::generate();
    let event = AccountOpened::new(aggregate_root_id.clone(), "alice".into(), 10);
    assert_eq!(event.event_name(), "AccountOpened");
    assert_eq!(event.aggregate_root_id(), &aggregate_root_id);
    assert_eq!(event.clone(), event);
}
