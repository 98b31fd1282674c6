use super::*;

#[test]
fn set_then_get_round_trips() {
    let mut roles = RoleMap::new();
    roles.set(Role::Original, PathBuf::from("/stage/a.mrc")).unwrap();
    assert_eq!(roles.get(Role::Original), Some(Path::new("/stage/a.mrc")));
}

#[test]
fn setting_a_role_twice_is_rejected() {
    let mut roles = RoleMap::new();
    roles.set(Role::LocalStack, PathBuf::from("/tmp/p/a.mrc")).unwrap();
    let err = roles
        .set(Role::LocalStack, PathBuf::from("/tmp/p/b.mrc"))
        .unwrap_err();
    assert_eq!(err, RoleMapError::AlreadySet(Role::LocalStack));
}

#[test]
fn local_original_may_be_rebound() {
    let mut roles = RoleMap::new();
    roles
        .set(Role::LocalOriginal, PathBuf::from("/tmp/p/a.mrc"))
        .unwrap();
    roles
        .set(Role::LocalOriginal, PathBuf::from("/tmp/p/a.orig"))
        .unwrap();
    assert_eq!(roles.get(Role::LocalOriginal), Some(Path::new("/tmp/p/a.orig")));
}

#[test]
fn rebind_local_original_always_succeeds() {
    let mut roles = RoleMap::new();
    roles.rebind_local_original(PathBuf::from("/tmp/p/a.orig"));
    assert_eq!(roles.get(Role::LocalOriginal), Some(Path::new("/tmp/p/a.orig")));
}

#[test]
fn require_fails_when_unset() {
    let roles = RoleMap::new();
    assert_eq!(
        roles.require(Role::StorageFinal).unwrap_err(),
        RoleMapError::NotSet(Role::StorageFinal)
    );
}

#[test]
fn present_roles_is_a_prefix_of_the_canonical_order() {
    let mut roles = RoleMap::new();
    roles.set(Role::Original, PathBuf::from("/stage/a.mrc")).unwrap();
    roles
        .set(Role::LocalOriginal, PathBuf::from("/tmp/p/a.mrc"))
        .unwrap();
    assert_eq!(
        roles.present_roles(),
        vec![Role::Original, Role::LocalOriginal]
    );
}
