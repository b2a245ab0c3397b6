use scaffold_domain::aggregate_root::AggregateRoot;
use scaffold_macros::entity;
use serde::{Deserialize, Serialize};

#[entity(aggregate_root)]
#[derive(Clone, Default, Serialize, Deserialize)]
struct Account {
    owner: String,
}

fn main() {
    let account = Account::default();
    assert!(account.pending_events().is_empty());
}
