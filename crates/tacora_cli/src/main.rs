//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tacora_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use tacora_core::{
    Clock, ConflictPolicy, MemoryTaskRepository, Priority, SystemClock, TaskDraft, TaskKind,
    TaskService,
};

fn main() {
    let mut service = TaskService::new(MemoryTaskRepository::new());

    let now_ms = SystemClock.now_ms();
    let hour_ms: i64 = 3_600_000;

    let drafts = [
        TaskDraft {
            title: "finish project report".to_string(),
            kind: TaskKind::School,
            due_at_ms: now_ms + hour_ms,
            estimated_mins: 60,
            priority: Priority::High,
        },
        TaskDraft {
            title: "club budget review".to_string(),
            kind: TaskKind::Club,
            due_at_ms: now_ms + 2 * hour_ms,
            estimated_mins: 30,
            priority: Priority::Medium,
        },
    ];

    for draft in &drafts {
        if let Err(err) = service.create_task(draft) {
            eprintln!("tacora_core create failed: {err}");
            std::process::exit(1);
        }
    }

    let policy = ConflictPolicy::default();
    match service.counts(&policy) {
        Ok(counts) => {
            println!("tacora_core version={}", tacora_core::core_version());
            println!(
                "tasks total={} conflicting={}",
                counts.total, counts.conflicting
            );
        }
        Err(err) => {
            eprintln!("tacora_core counts failed: {err}");
            std::process::exit(1);
        }
    }
}
