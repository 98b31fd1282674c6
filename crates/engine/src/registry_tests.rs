use super::*;
use cryo_core::State;

#[test]
fn insert_then_get_round_trips() {
    let mut registry = Registry::new();
    let original = PathBuf::from("/stage/a.mrc");
    registry.insert(Item::new(original.clone()));
    let handle = registry.get(&original).unwrap();
    assert_eq!(handle.lock().original(), original);
}

#[test]
fn get_on_unregistered_path_is_none() {
    let registry = Registry::new();
    assert!(registry.get(Path::new("/stage/missing.mrc")).is_none());
}

#[test]
fn get_or_create_parent_creates_once_and_reuses_after() {
    let mut registry = Registry::new();
    let key = PathBuf::from("/tmp/p/stack/frame_.mrc");
    let first = registry.get_or_create_parent(key.clone());
    assert_eq!(first.lock().state, State::Stacking);

    let second = registry.get_or_create_parent(key);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.len(), 1);
}

#[test]
fn remove_drops_registry_membership() {
    let mut registry = Registry::new();
    let original = PathBuf::from("/stage/a.mrc");
    registry.insert(Item::new(original.clone()));
    assert!(registry.remove(&original).is_some());
    assert!(registry.is_empty());
}
