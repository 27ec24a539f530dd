//! Task ordering rules.
//!
//! Every list keeps its tasks ranked by an integer `order`. This module holds
//! the rules that storage adapters apply inside their per-list critical
//! section:
//!
//! - [`next_order`] picks the rank for a task created without one: one past
//!   the current maximum, or `0` for an empty list.
//! - [`apply_reorder`] rewrites the ranks of a batch of tasks, skipping
//!   identifiers the list does not contain.
//! - [`display_cmp`] is the total display order: rank, then creation time,
//!   then task identifier.
//!
//! The functions are pure. Adapters own the locking or transaction that makes
//! the read-modify-write sequence atomic.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::{DateTime, Utc};

use super::{TaskId, TodoTask};

/// Rank for a task appended to a list whose current ranks are `existing`.
///
/// # Examples
/// ```
/// use todo_backend::domain::ordering::next_order;
///
/// assert_eq!(next_order(Vec::<i32>::new()), 0);
/// assert_eq!(next_order([0, 4, 2]), 5);
/// ```
pub fn next_order<I>(existing: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    existing
        .into_iter()
        .max()
        .map_or(0, |max| max.saturating_add(1))
}

/// Final rank for a new task: the requested one verbatim, or the next free
/// rank when none was requested.
///
/// A requested rank is not checked against existing ranks, so it may collide.
pub fn resolve_order<I>(requested: Option<i32>, existing: impl FnOnce() -> I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    requested.unwrap_or_else(|| next_order(existing()))
}

/// Display ordering: `order` ascending, then `created_at`, then `task_id`.
pub fn display_cmp(a: &TodoTask, b: &TodoTask) -> Ordering {
    a.order
        .cmp(&b.order)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.task_id.cmp(&b.task_id))
}

/// Sort tasks into display order.
pub fn sort_for_display(tasks: &mut [TodoTask]) {
    tasks.sort_by(display_cmp);
}

/// Why a reorder batch was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    /// The batch named no tasks.
    #[error("Task orders are required")]
    Empty,
    /// The same task appeared more than once.
    #[error("Task {task_id} appears more than once in taskOrders")]
    DuplicateTask {
        /// Repeated task identifier.
        task_id: TaskId,
    },
}

/// Validated, non-empty batch of rank assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAssignments {
    orders: HashMap<TaskId, i32>,
}

impl OrderAssignments {
    /// Build a batch from `(task, rank)` pairs.
    ///
    /// # Errors
    /// Rejects an empty batch and batches naming a task twice.
    pub fn new<I>(pairs: I) -> Result<Self, ReorderError>
    where
        I: IntoIterator<Item = (TaskId, i32)>,
    {
        let mut orders = HashMap::new();
        for (task_id, order) in pairs {
            match orders.entry(task_id) {
                Entry::Occupied(entry) => {
                    return Err(ReorderError::DuplicateTask {
                        task_id: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(order);
                }
            }
        }
        if orders.is_empty() {
            return Err(ReorderError::Empty);
        }
        Ok(Self { orders })
    }

    /// Rank assigned to `task_id`, if the batch names it.
    pub fn order_for(&self, task_id: &TaskId) -> Option<i32> {
        self.orders.get(task_id).copied()
    }

    /// Number of assignments in the batch.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Always `false`; an empty batch cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Iterate over `(task, rank)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&TaskId, i32)> {
        self.orders.iter().map(|(task_id, order)| (task_id, *order))
    }
}

/// Rewrite the rank of every task named in `assignments`, stamping `at` as
/// its update time.
///
/// Tasks the batch does not name are left untouched, and names that match no
/// task are ignored. Returns how many tasks changed.
pub fn apply_reorder<'a, I>(tasks: I, assignments: &OrderAssignments, at: DateTime<Utc>) -> usize
where
    I: IntoIterator<Item = &'a mut TodoTask>,
{
    let mut applied = 0;
    for task in tasks {
        if let Some(order) = assignments.order_for(&task.task_id) {
            task.order = order;
            task.updated_at = at;
            applied += 1;
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ListId, UserId};
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    fn task(id: &str, order: i32, created_offset_secs: i64) -> TodoTask {
        let base = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        let created_at = base + Duration::seconds(created_offset_secs);
        TodoTask {
            user_id: UserId::new("user").expect("user id"),
            list_id: ListId::new("list").expect("list id"),
            task_id: TaskId::new(id).expect("task id"),
            description: id.to_owned(),
            completed: false,
            order,
            created_at,
            updated_at: created_at,
        }
    }

    fn ids(tasks: &[TodoTask]) -> Vec<&str> {
        tasks.iter().map(|task| task.task_id.as_str()).collect()
    }

    #[fixture]
    fn three_tasks() -> Vec<TodoTask> {
        vec![task("t0", 0, 0), task("t1", 1, 1), task("t2", 2, 2)]
    }

    #[rstest]
    #[case(vec![], 0)]
    #[case(vec![0], 1)]
    #[case(vec![3, 1, 2], 4)]
    #[case(vec![-5, -2], -1)]
    #[case(vec![i32::MAX], i32::MAX)]
    fn next_order_is_one_past_max(#[case] existing: Vec<i32>, #[case] expected: i32) {
        assert_eq!(next_order(existing), expected);
    }

    #[rstest]
    fn requested_order_is_used_verbatim() {
        let order = resolve_order(Some(1), || -> Vec<i32> { panic!("existing ranks not needed") });
        assert_eq!(order, 1);
    }

    #[rstest]
    fn missing_order_falls_back_to_next() {
        assert_eq!(resolve_order(None, || vec![0, 1]), 2);
    }

    #[rstest]
    fn ties_break_on_creation_time_then_id() {
        let mut tasks = vec![task("b", 1, 5), task("c", 1, 5), task("a", 1, 9), task("z", 0, 20)];
        sort_for_display(&mut tasks);
        assert_eq!(ids(&tasks), vec!["z", "b", "c", "a"]);
    }

    #[rstest]
    fn reorder_rewrites_named_tasks(mut three_tasks: Vec<TodoTask>) {
        let at = Utc::now();
        let assignments = OrderAssignments::new([
            (TaskId::new("t2").expect("id"), 0),
            (TaskId::new("t0").expect("id"), 2),
        ])
        .expect("valid batch");

        let applied = apply_reorder(three_tasks.iter_mut(), &assignments, at);
        sort_for_display(&mut three_tasks);

        assert_eq!(applied, 2);
        assert_eq!(ids(&three_tasks), vec!["t2", "t1", "t0"]);
        let untouched = three_tasks
            .iter()
            .find(|task| task.task_id.as_str() == "t1")
            .expect("t1 present");
        assert_ne!(untouched.updated_at, at);
    }

    #[rstest]
    fn reorder_ignores_unknown_ids(mut three_tasks: Vec<TodoTask>) {
        let assignments = OrderAssignments::new([
            (TaskId::new("ghost").expect("id"), 0),
            (TaskId::new("t1").expect("id"), 9),
        ])
        .expect("valid batch");

        let applied = apply_reorder(three_tasks.iter_mut(), &assignments, Utc::now());
        sort_for_display(&mut three_tasks);

        assert_eq!(applied, 1);
        assert_eq!(ids(&three_tasks), vec!["t0", "t2", "t1"]);
    }

    #[rstest]
    fn empty_batch_is_rejected() {
        assert_eq!(
            OrderAssignments::new(Vec::new()),
            Err(ReorderError::Empty)
        );
    }

    #[rstest]
    fn duplicate_task_in_batch_is_rejected() {
        let id = TaskId::new("t0").expect("id");
        let err = OrderAssignments::new([(id.clone(), 1), (id.clone(), 2)])
            .expect_err("duplicate rejected");
        assert_eq!(err, ReorderError::DuplicateTask { task_id: id });
    }
}
