use std::any::{Any, TypeId};
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;

/// Catalog-wide event bus
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Events published by the catalog engine
pub mod events {
    use super::Event;
    use crate::SortOrder;

    /// A dataset finished loading (or was reloaded)
    #[derive(Debug, Clone, PartialEq)]
    pub struct DatasetLoaded {
        pub source_name: String,
        pub row_count: usize,
        pub column_count: usize,
    }

    /// A facet value was added to or removed from the selection
    #[derive(Debug, Clone, PartialEq)]
    pub struct SelectionChanged {
        pub facet: String,
        pub value: Option<String>,
        pub selected: bool,
    }

    /// Sort column or direction changed
    #[derive(Debug, Clone, PartialEq)]
    pub struct SortChanged {
        pub column: String,
        pub order: SortOrder,
    }

    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(DatasetLoaded, SelectionChanged, SortChanged);
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = TypeId::of::<E>();
        self.handlers.lock().entry(type_id).or_default().push(handler);
    }

    /// Publish an event to every handler subscribed to its type
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = TypeId::of::<E>();
        let mut handlers = self.handlers.lock();

        if let Some(event_handlers) = handlers.get_mut(&type_id) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Adapter turning a closure into an [`EventHandler`]
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::events::{SelectionChanged, SortChanged};
    use super::*;
    use crate::SortOrder;

    #[test]
    fn test_publish_reaches_matching_subscribers() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bus.subscribe::<SelectionChanged>(handler_from_fn(move |event| {
            if let Some(e) = event.as_any().downcast_ref::<SelectionChanged>() {
                sink.lock().push(e.clone());
            }
        }));

        bus.publish(SelectionChanged {
            facet: "brand".to_string(),
            value: Some("Apple".to_string()),
            selected: true,
        });
        bus.publish(SortChanged {
            column: "height".to_string(),
            order: SortOrder::Desc,
        });

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].facet, "brand");
    }
}
