//! Property-based tests for synthesized transformers
//!
//! These tests use proptest to check the copy, isolation and round-trip guarantees across randomly generated records.

use mutator::{Record, Transformer, synthesize};
use proptest::prelude::*;

#[derive(Debug, Default, Clone, PartialEq, Record)]
pub struct Account {
    #[mutate(Profile = "handle", Ledger = "owner")]
    pub username: String,
    #[mutate(Profile = "age")]
    pub age: u32,
    #[mutate(Ledger = "balance")]
    pub balance: i64,
    pub password_hash: String,
    #[mutate(Profile = "tags")]
    pub tags: Vec<String>,
    #[mutate(Profile = "nickname")]
    pub nickname: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Record)]
pub struct Profile {
    #[mutate(Account = "username")]
    pub handle: String,
    #[mutate(Account = "age")]
    pub age: u32,
    #[mutate(Account = "tags")]
    pub tags: Vec<String>,
    #[mutate(Account = "nickname")]
    pub nickname: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Record)]
pub struct Ledger {
    pub owner: String,
    pub balance: i64,
}

fn account() -> impl Strategy<Value = Account> {
    (
        "[a-z]{0,12}",
        any::<u32>(),
        any::<i64>(),
        ".{0,16}",
        prop::collection::vec("[a-z]{1,6}", 0..4),
        prop::option::of("[A-Za-z ]{0,10}"),
    )
        .prop_map(|(username, age, balance, password_hash, tags, nickname)| Account {
            username,
            age,
            balance,
            password_hash,
            tags,
            nickname,
        })
}

// =============================================================================
// Copy Properties
// =============================================================================

proptest! {
    /// Property: every annotated field arrives unchanged under its destination name
    #[test]
    fn annotated_fields_are_copied_exactly(source in account()) {
        let to_profile: Transformer<Account, Profile> = synthesize::<fn(Account) -> Profile>();
        let profile = to_profile.transform(&source);

        prop_assert_eq!(&profile.handle, &source.username);
        prop_assert_eq!(profile.age, source.age);
        prop_assert_eq!(&profile.tags, &source.tags);
        prop_assert_eq!(&profile.nickname, &source.nickname);
    }

    /// Property: unannotated source fields never influence the result
    #[test]
    fn unannotated_fields_do_not_leak(source in account(), other_hash in ".{0,16}", other_balance in any::<i64>()) {
        let to_profile = synthesize::<fn(Account) -> Profile>();
        let mut altered = source.clone();
        altered.password_hash = other_hash;
        // `balance` is annotated for Ledger only
        altered.balance = other_balance;

        prop_assert_eq!(to_profile.transform(&source), to_profile.transform(&altered));
    }

    /// Property: transforming is deterministic and leaves the source untouched
    #[test]
    fn transform_is_pure(source in account()) {
        let to_ledger = synthesize::<fn(Account) -> Ledger>();
        let before = source.clone();

        let first = to_ledger.transform(&source);
        let second = to_ledger.transform(&source);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&source, &before);
        prop_assert_eq!(first, Ledger { owner: source.username.clone(), balance: source.balance });
    }
}

// =============================================================================
// Independence and Round-Trip Properties
// =============================================================================

proptest! {
    /// Property: two destinations of one source are built independently
    #[test]
    fn destinations_are_independent(source in account()) {
        let to_profile = synthesize::<fn(Account) -> Profile>();
        let profile_alone = to_profile.transform(&source);

        let to_ledger = synthesize::<fn(Account) -> Ledger>();
        let ledger = to_ledger.transform(&source);
        let profile_after = to_profile.transform(&source);

        prop_assert_eq!(profile_alone, profile_after);
        prop_assert_eq!(ledger.owner, source.username);
    }

    /// Property: X -> Y -> X restores every field that participates in both directions
    #[test]
    fn round_trip_restores_shared_fields(source in account()) {
        let forward = synthesize::<fn(Account) -> Profile>();
        let back = synthesize::<fn(Profile) -> Account>();

        let restored = back.transform(&forward.transform(&source));

        prop_assert_eq!(&restored.username, &source.username);
        prop_assert_eq!(restored.age, source.age);
        prop_assert_eq!(&restored.tags, &source.tags);
        prop_assert_eq!(&restored.nickname, &source.nickname);
        // not part of the Profile mapping
        prop_assert_eq!(restored.balance, 0);
        prop_assert_eq!(restored.password_hash, String::new());
    }
}
