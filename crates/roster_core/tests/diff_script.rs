use std::sync::Once;

use roster_core::{apply_edits, diff, EditOp, User};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(roster_logging::initialize_for_tests);
}

fn user(id: i64, name: &str) -> User {
    User {
        id,
        name: Some(name.to_string()),
        username: None,
        email: None,
    }
}

#[test]
fn identical_sequences_produce_empty_script() {
    init_logging();
    let seq = vec![user(1, "A"), user(2, "B"), user(3, "C")];

    assert_eq!(diff(&seq, &seq), Vec::new());
}

#[test]
fn both_empty_produce_empty_script() {
    init_logging();
    assert_eq!(diff(&[], &[]), Vec::new());
}

#[test]
fn empty_old_inserts_all_in_ascending_order() {
    init_logging();
    let new = vec![user(1, "A"), user(2, "B"), user(3, "C")];

    let script = diff(&[], &new);

    assert_eq!(
        script,
        vec![
            EditOp::Insert {
                index: 0,
                user: user(1, "A"),
            },
            EditOp::Insert {
                index: 1,
                user: user(2, "B"),
            },
            EditOp::Insert {
                index: 2,
                user: user(3, "C"),
            },
        ]
    );
    assert_eq!(apply_edits(&[], &script), new);
}

#[test]
fn empty_new_removes_all_in_descending_order() {
    init_logging();
    let old = vec![user(1, "A"), user(2, "B"), user(3, "C")];

    let script = diff(&old, &[]);

    assert_eq!(
        script,
        vec![
            EditOp::Remove { index: 2 },
            EditOp::Remove { index: 1 },
            EditOp::Remove { index: 0 },
        ]
    );
    assert_eq!(apply_edits(&old, &script), Vec::new());
}

#[test]
fn removal_update_and_insert_in_one_script() {
    init_logging();
    let old = vec![user(1, "A"), user(2, "B")];
    let new = vec![user(2, "B2"), user(3, "C")];

    let script = diff(&old, &new);

    assert_eq!(
        script,
        vec![
            EditOp::Remove { index: 0 },
            EditOp::Insert {
                index: 1,
                user: user(3, "C"),
            },
            EditOp::Update {
                index: 0,
                user: user(2, "B2"),
            },
        ]
    );
    assert_eq!(apply_edits(&old, &script), new);
}

#[test]
fn moved_record_becomes_remove_insert_pair() {
    init_logging();
    let old = vec![user(1, "A"), user(2, "B"), user(3, "C")];
    let new = vec![user(3, "C"), user(1, "A"), user(2, "B")];

    let script = diff(&old, &new);

    assert_eq!(
        script,
        vec![
            EditOp::Remove { index: 2 },
            EditOp::Insert {
                index: 0,
                user: user(3, "C"),
            },
        ]
    );
    assert_eq!(apply_edits(&old, &script), new);
}

#[test]
fn update_is_reported_at_the_new_index() {
    init_logging();
    let old = vec![user(1, "A"), user(2, "B")];
    let new = vec![user(5, "X"), user(1, "A2")];

    let script = diff(&old, &new);

    assert_eq!(
        script,
        vec![
            EditOp::Remove { index: 1 },
            EditOp::Insert {
                index: 0,
                user: user(5, "X"),
            },
            EditOp::Update {
                index: 1,
                user: user(1, "A2"),
            },
        ]
    );
    assert_eq!(apply_edits(&old, &script), new);
}

#[test]
fn null_safe_content_comparison_drives_updates() {
    init_logging();
    let old = vec![User {
        id: 1,
        name: None,
        username: Some("bret".to_string()),
        email: None,
    }];
    let new = vec![User {
        id: 1,
        name: Some("Bret".to_string()),
        username: Some("bret".to_string()),
        email: None,
    }];

    let script = diff(&old, &new);

    assert_eq!(
        script,
        vec![EditOp::Update {
            index: 0,
            user: new[0].clone(),
        }]
    );
    assert_eq!(apply_edits(&old, &script), new);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "duplicate ids")]
fn duplicate_ids_are_rejected_in_debug_builds() {
    init_logging();
    let old = vec![user(1, "A"), user(1, "B")];
    let _ = diff(&old, &[]);
}

/// Small deterministic generator so the property below needs no extra
/// dependency.
fn next_rand(seed: &mut u64) -> u64 {
    *seed = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *seed >> 33
}

fn random_sequence(seed: &mut u64) -> Vec<User> {
    // Overlapping id pools across calls so removals, insertions, updates,
    // and moves all occur.
    let mut ids: Vec<i64> = (0..16).collect();
    for i in (1..ids.len()).rev() {
        let j = (next_rand(seed) as usize) % (i + 1);
        ids.swap(i, j);
    }
    let len = (next_rand(seed) as usize) % (ids.len() + 1);
    ids.truncate(len);
    ids.into_iter()
        .map(|id| user(id, &format!("u{id}-v{}", next_rand(seed) % 3)))
        .collect()
}

#[test]
fn applying_a_script_always_reconstructs_the_new_sequence() {
    init_logging();
    let mut seed = 0x5eed_cafe_u64;

    for _ in 0..200 {
        let old = random_sequence(&mut seed);
        let new = random_sequence(&mut seed);

        let script = diff(&old, &new);
        assert_eq!(apply_edits(&old, &script), new, "old={old:?} new={new:?}");
    }
}
