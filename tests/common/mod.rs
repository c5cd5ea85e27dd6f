use async_trait::async_trait;
use schedule_portal::{error::AppError, firebase::RemoteStore};
use serde_json::Value;

/// Store backed by a JSON tree held in memory. Paths are `/`-separated.
pub struct InMemoryStore {
    root: Value,
}

impl InMemoryStore {
    pub fn new(root: Value) -> Self {
        Self { root }
    }
}

#[async_trait]
impl RemoteStore for InMemoryStore {
    async fn get_snapshot(&self, path: &str) -> Result<Value, AppError> {
        let node = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(&self.root, |node, segment| match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            });
        Ok(node.cloned().unwrap_or(Value::Null))
    }
}
