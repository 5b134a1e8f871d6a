/// JSON encoding of stored collections
///
/// Reads never fail. A missing key, an unreadable medium or a value that is
/// not a JSON array yields an empty collection; inside a valid array, only
/// the elements that do not decode are skipped. Writes report success so the
/// caller can log, but a failed write never undoes in-memory state.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::storage::{PersistenceGateway, StorageError, StorageKey};

/// Load a JSON array stored under `key`, or an empty one
pub fn load_collection<T, G>(gateway: &G, key: StorageKey) -> Vec<T>
where
    T: DeserializeOwned,
    G: PersistenceGateway + ?Sized,
{
    let raw = match gateway.read(key.as_str()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Failed to read {}: {}", key.as_str(), e);
            return Vec::new();
        }
    };

    let elements = match serde_json::from_str::<Vec<Value>>(&raw) {
        Ok(elements) => elements,
        Err(e) => {
            warn!("Malformed data under {}, starting empty: {}", key.as_str(), e);
            return Vec::new();
        }
    };

    let total = elements.len();
    let items: Vec<T> = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value(element) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Skipping element {} of {}: {}", index, key.as_str(), e);
                None
            }
        })
        .collect();

    debug!("Loaded {} of {} item(s) from {}", items.len(), total, key.as_str());
    items
}

/// Serialize `items` as a JSON array and write it under `key`
pub fn save_collection<T, G>(gateway: &mut G, key: StorageKey, items: &[T]) -> Result<(), StorageError>
where
    T: Serialize,
    G: PersistenceGateway + ?Sized,
{
    let raw = serde_json::to_string(items)?;
    gateway.write(key.as_str(), &raw)?;
    debug!("Persisted {} item(s) to {}", items.len(), key.as_str());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryGateway;

    #[test]
    fn test_missing_key_is_empty() {
        let gateway = MemoryGateway::new();
        let items: Vec<String> = load_collection(&gateway, StorageKey::Order);
        assert!(items.is_empty());
    }

    #[test]
    fn test_malformed_json_is_empty() {
        let mut gateway = MemoryGateway::new();
        gateway.write(StorageKey::Order.as_str(), "[\"a\", ").unwrap();

        let items: Vec<String> = load_collection(&gateway, StorageKey::Order);
        assert!(items.is_empty());
    }

    #[test]
    fn test_bad_element_is_skipped_alone() {
        let mut gateway = MemoryGateway::new();
        gateway
            .write(StorageKey::Order.as_str(), r#"["a", 7, "b"]"#)
            .unwrap();

        let items: Vec<String> = load_collection(&gateway, StorageKey::Order);
        assert_eq!(items, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_save_then_load() {
        let mut gateway = MemoryGateway::new();
        let order = vec!["b".to_string(), "a".to_string()];

        save_collection(&mut gateway, StorageKey::Order, &order).unwrap();
        let loaded: Vec<String> = load_collection(&gateway, StorageKey::Order);
        assert_eq!(loaded, order);
    }

    #[test]
    fn test_rejected_write_is_reported() {
        let mut gateway = MemoryGateway::new();
        gateway.reject_writes(true);

        let result = save_collection(&mut gateway, StorageKey::Order, &["a".to_string()]);
        assert!(matches!(result, Err(StorageError::WriteRejected { .. })));
    }
}
