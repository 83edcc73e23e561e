//! Fork-join serializer.
//!
//! Each object or array child that is itself a container is rendered as an
//! independent task on a scoped thread; scalar children render inline with
//! no scheduling overhead. The parent blocks only while assembling its own
//! output, joining child tasks in the order the children appear, so the
//! result is byte-identical to the sequential strategy regardless of how
//! the scheduler interleaves the tasks. A failure inside a child task
//! propagates on join; rendering is total, so none is expected.
//!
//! The number of live tasks is bounded by a fork budget sized from the
//! machine's available parallelism. Once the budget is exhausted, children
//! render inline; a finished task returns its permit.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use super::{escape_into, leaf_text, JsonSerialize};
use crate::value::JsonValue;

/// Concurrent serialization strategy for large documents.
#[derive(Debug, Clone, Copy)]
pub struct ForkJoinSerializer {
    workers: usize,
}

impl ForkJoinSerializer {
    /// Strategy sized to the machine's available parallelism.
    pub fn new() -> Self {
        let workers = thread::available_parallelism().map(|n| n.get()).unwrap_or(2);
        Self { workers }
    }

    /// Strategy with an explicit worker count (minimum one).
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }
}

impl Default for ForkJoinSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonSerialize for ForkJoinSerializer {
    fn serialize(&self, value: &JsonValue) -> String {
        let budget = AtomicUsize::new(self.workers.saturating_sub(1));
        thread::scope(|scope| render(value, scope, &budget))
    }
}

/// A child rendering that is either already computed or still running.
enum Pending<'scope> {
    Inline(String),
    Forked(thread::ScopedJoinHandle<'scope, String>),
}

impl Pending<'_> {
    fn join(self) -> String {
        match self {
            Pending::Inline(text) => text,
            Pending::Forked(handle) => match handle.join() {
                Ok(text) => text,
                Err(payload) => std::panic::resume_unwind(payload),
            },
        }
    }
}

fn try_acquire(budget: &AtomicUsize) -> bool {
    budget
        .fetch_update(Ordering::Acquire, Ordering::Relaxed, |n| n.checked_sub(1))
        .is_ok()
}

fn fork_child<'scope, 'env>(
    child: &'env JsonValue,
    scope: &'scope thread::Scope<'scope, 'env>,
    budget: &'env AtomicUsize,
) -> Pending<'scope> {
    let is_container = child.is_object() || child.is_array();
    if is_container && try_acquire(budget) {
        Pending::Forked(scope.spawn(move || {
            let text = render(child, scope, budget);
            budget.fetch_add(1, Ordering::Release);
            text
        }))
    } else {
        Pending::Inline(render(child, scope, budget))
    }
}

fn render<'scope, 'env>(
    value: &'env JsonValue,
    scope: &'scope thread::Scope<'scope, 'env>,
    budget: &'env AtomicUsize,
) -> String {
    match value {
        JsonValue::Object(entries) => {
            let children: Vec<(&String, Pending<'_>)> = entries
                .iter()
                .map(|(key, child)| (key, fork_child(child, scope, budget)))
                .collect();
            let mut out = String::new();
            out.push('{');
            for (i, (key, pending)) in children.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('"');
                escape_into(key, &mut out);
                out.push_str("\":");
                out.push_str(&pending.join());
            }
            out.push('}');
            out
        }
        JsonValue::Array(elements) => {
            let children: Vec<Pending<'_>> = elements
                .iter()
                .map(|child| fork_child(child, scope, budget))
                .collect();
            let mut out = String::new();
            out.push('[');
            for (i, pending) in children.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&pending.join());
            }
            out.push(']');
            out
        }
        leaf => leaf_text(leaf),
    }
}
