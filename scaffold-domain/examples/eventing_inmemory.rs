//! 内存事件发布器示例：聚合根产生事件 → 移交发布器 → 分发给处理器
use scaffold_domain::aggregate_root::AggregateRoot;
use scaffold_domain::entity::Entity;
use scaffold_domain::eventing::{
    DomainEventPublisher, InMemoryDomainEventPublisher, handler_fn, publish_pending_events,
};
use scaffold_macros::{domain_event, entity};

#[entity(aggregate_root)]
#[derive(Clone, Default)]
struct Cart {
    items: Vec<String>,
}

#[domain_event(name = "cart.item_added")]
struct ItemAdded {
    item: String,
}

impl Cart {
    fn add(&mut self, item: &str) {
        self.items.push(item.to_string());
        let event = ItemAdded::new(self.id().clone(), item.to_string());
        self.raise_domain_event(event);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let publisher = InMemoryDomainEventPublisher::global();
    publisher.register_handler(
        handler_fn("printer", |event| async move {
            if let Some(added) = event.downcast_ref::<ItemAdded>() {
                println!("[{}] added {}", added.aggregate_root_id, added.item);
            }
            Ok(())
        }),
        "cart.item_added",
    );

    let mut cart = Cart::default();
    cart.add("apple");
    cart.add("pear");

    publish_pending_events(&mut cart, publisher.as_ref());
    publisher.dispatch_aggregate_root_events(cart.id()).await?;
    Ok(())
}
