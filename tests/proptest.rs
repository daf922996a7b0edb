use proptest::prelude::*;
use uuid::Uuid;

use lattice_client::{
    AccessCheckBuilder, FullyQualifiedName, GrantBuilder, GrantType, OrganizationBuilder,
    PermissionType, Principal, PrincipalBuilder, PrincipalType, is_valid_access_check,
    is_valid_grant, is_valid_organization, is_valid_principal, is_valid_uuid,
};

/// Strategies for generating model inputs
mod strategies {
    use super::*;
    use proptest::collection::vec;
    use proptest::string::string_regex;

    pub fn uuid_strategy() -> impl Strategy<Value = Uuid> {
        any::<u128>().prop_map(Uuid::from_u128)
    }

    pub fn non_empty_string_strategy() -> impl Strategy<Value = String> {
        string_regex(r"[a-zA-Z0-9_.@-]{1,32}").unwrap()
    }

    pub fn principal_type_strategy() -> impl Strategy<Value = PrincipalType> {
        prop_oneof![
            Just(PrincipalType::App),
            Just(PrincipalType::Organization),
            Just(PrincipalType::Role),
            Just(PrincipalType::User),
        ]
    }

    pub fn principal_strategy() -> impl Strategy<Value = Principal> {
        (principal_type_strategy(), non_empty_string_strategy()).prop_map(|(t, id)| {
            PrincipalBuilder::new()
                .principal_type(t)
                .id(id)
                .unwrap()
                .build()
                .unwrap()
        })
    }

    pub fn grant_type_strategy() -> impl Strategy<Value = GrantType> {
        prop_oneof![
            Just(GrantType::Attributes),
            Just(GrantType::Automatic),
            Just(GrantType::Claim),
            Just(GrantType::EmailDomain),
            Just(GrantType::Groups),
            Just(GrantType::Manual),
            Just(GrantType::Roles),
        ]
    }

    pub fn permission_strategy() -> impl Strategy<Value = PermissionType> {
        prop_oneof![
            Just(PermissionType::Discover),
            Just(PermissionType::Link),
            Just(PermissionType::Owner),
            Just(PermissionType::Read),
            Just(PermissionType::Write),
        ]
    }

    pub fn mappings_strategy() -> impl Strategy<Value = Vec<String>> {
        vec(non_empty_string_strategy(), 0..8)
    }
}

use strategies::*;

proptest! {
    #[test]
    fn every_uuid_string_satisfies_the_lexical_check(id in uuid_strategy()) {
        prop_assert!(is_valid_uuid(&id.to_string()));
    }

    #[test]
    fn built_principals_satisfy_their_own_predicate(principal in principal_strategy()) {
        let value = serde_json::to_value(&principal).unwrap();
        prop_assert!(is_valid_principal(&value));
        prop_assert!(principal.validate().is_ok());
    }

    #[test]
    fn built_grants_satisfy_their_own_predicate(
        grant_type in grant_type_strategy(),
        mappings in mappings_strategy(),
    ) {
        let grant = GrantBuilder::new()
            .grant_type(grant_type)
            .mappings(mappings)
            .unwrap()
            .build()
            .unwrap();
        let value = serde_json::to_value(&grant).unwrap();
        prop_assert!(is_valid_grant(&value));
    }

    #[test]
    fn grant_mappings_are_deduplicated_and_stable(
        grant_type in grant_type_strategy(),
        mappings in mappings_strategy(),
    ) {
        let builder = GrantBuilder::new()
            .grant_type(grant_type)
            .mappings(mappings.clone())
            .unwrap();
        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        prop_assert_eq!(&first, &second);

        // No duplicates survive, and nothing new appears.
        let mut unique = first.mappings.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(&unique, &first.mappings);
        for mapping in &first.mappings {
            prop_assert!(mappings.contains(mapping));
        }

        // Feeding the deduplicated output back in is a fixed point.
        let again = GrantBuilder::new()
            .grant_type(grant_type)
            .mappings(first.mappings.clone())
            .unwrap()
            .build()
            .unwrap();
        prop_assert_eq!(&again.mappings, &first.mappings);
    }

    #[test]
    fn access_check_acl_key_preserves_input_order(
        ids in proptest::collection::vec(uuid_strategy(), 0..8),
        permissions in proptest::collection::vec(permission_strategy(), 0..8),
    ) {
        let keys: Vec<String> = ids.iter().map(Uuid::to_string).collect();
        let check = AccessCheckBuilder::new()
            .acl_key(&keys)
            .unwrap()
            .permissions(&permissions)
            .build()
            .unwrap();
        prop_assert_eq!(&check.acl_key, &ids);

        let value = serde_json::to_value(&check).unwrap();
        prop_assert!(is_valid_access_check(&value));
    }

    #[test]
    fn access_check_permissions_are_deduplicated(
        permissions in proptest::collection::vec(permission_strategy(), 1..16),
    ) {
        let check = AccessCheckBuilder::new()
            .permissions(&permissions)
            .build()
            .unwrap();
        let mut unique = check.permissions.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(&unique, &check.permissions);
        for permission in &permissions {
            prop_assert!(check.permissions.contains(permission));
        }
    }

    #[test]
    fn built_organizations_satisfy_their_own_predicate(
        id in uuid_strategy(),
        title in non_empty_string_strategy(),
        members in proptest::collection::vec(principal_strategy(), 0..4),
        emails in proptest::collection::vec(non_empty_string_strategy(), 0..4),
    ) {
        let org = OrganizationBuilder::new()
            .id(&id.to_string())
            .unwrap()
            .title(title)
            .unwrap()
            .members(&members)
            .unwrap()
            .emails(emails)
            .unwrap()
            .build()
            .unwrap();
        prop_assert_eq!(&org.members, &members);
        let value = serde_json::to_value(&org).unwrap();
        prop_assert!(is_valid_organization(&value));
        prop_assert!(org.validate().is_ok());
    }

    #[test]
    fn fqn_display_parses_back_to_itself(
        namespace in proptest::string::string_regex(r"[a-zA-Z0-9_]{1,16}").unwrap(),
        name in proptest::string::string_regex(r"[a-zA-Z0-9_.]{0,15}[a-zA-Z0-9_]").unwrap(),
    ) {
        let fqn = FullyQualifiedName::new(namespace, name).unwrap();
        let parsed: FullyQualifiedName = fqn.to_string().parse().unwrap();
        prop_assert_eq!(parsed, fqn);
    }
}
