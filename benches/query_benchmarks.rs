//! Benchmarks for note listing and search.
//!
//! Run with: cargo bench --bench query_benchmarks

use chrono::{DateTime, Duration, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use scribe::domain::{NoteDraft, NoteQuery, UserId, Username};
use scribe::store::{NoteRepository, SqliteStore, UserRepository};

// =============================================================================
// Test Data Generation
// =============================================================================

/// Sample words for generating note titles and bodies
const WORDS: &[&str] = &[
    "groceries", "meeting", "Rust", "database", "recipe", "travel", "budget", "reading",
    "garden", "workout", "Straße", "project", "release", "invoice", "birthday", "ideas",
];

/// Number of other users whose notes share the table
const OTHER_USERS: usize = 4;

fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn draft_for(index: usize) -> NoteDraft {
    let title = format!("Note {} about {}", index, WORDS[index % WORDS.len()]);
    let body: Vec<&str> = (0..40).map(|j| WORDS[(index + j) % WORDS.len()]).collect();
    NoteDraft::new(title, Some(body.join(" "))).unwrap()
}

/// Set up a store where the measured user owns `count` notes and each
/// other user owns as many again.
fn setup_store(count: usize) -> (SqliteStore, UserId) {
    let mut store = SqliteStore::open_in_memory().expect("Failed to open store");
    let mut users = Vec::new();
    for u in 0..=OTHER_USERS {
        let name = Username::new(&format!("user{u}")).unwrap();
        users.push(store.create_user(&name, "hash", base_time()).unwrap().id());
    }

    for i in 0..count {
        let at = base_time() + Duration::seconds(i as i64);
        for user in &users {
            store.create_note(*user, &draft_for(i), at).unwrap();
        }
    }

    (store, users[0])
}

// =============================================================================
// Listing Benchmarks
// =============================================================================

fn bench_list_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_notes");

    for size in [100, 500, 1000] {
        let (store, owner) = setup_store(size);
        let query = NoteQuery::for_owner(owner);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("notes", size), &size, |b, _| {
            b.iter(|| store.list_notes(&query).unwrap());
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_notes");

    for size in [100, 500, 1000] {
        let (store, owner) = setup_store(size);

        group.throughput(Throughput::Elements(size as u64));
        for term in ["rust", "strasse", "no-such-word"] {
            let query = NoteQuery::for_owner(owner).search(term);
            group.bench_with_input(BenchmarkId::new(term, size), &size, |b, _| {
                b.iter(|| store.list_notes(&query).unwrap());
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_list_all, bench_search);
criterion_main!(benches);
