//! Ordering and cascade behaviour of the SQLite task repository.
//!
//! Each test migrates a fresh database file in a temporary directory and
//! drives the Diesel adapters through the repository ports.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Duration, Utc};
use futures::future::join_all;
use pagination::PageRequest;
use tempfile::TempDir;
use todo_backend::domain::ordering::OrderAssignments;
use todo_backend::domain::ports::{
    TaskFilter, TaskPatch, TodoListRepository, TodoTaskPersistenceError, TodoTaskRepository,
    UserRepository,
};
use todo_backend::domain::{ListId, TaskId, TodoList, TodoTask, User, UserId};
use todo_backend::outbound::persistence::{
    DbPool, DieselTodoListRepository, DieselTodoTaskRepository, DieselUserRepository, PoolConfig,
    run_migrations,
};

struct Harness {
    _dir: TempDir,
    users: DieselUserRepository,
    lists: DieselTodoListRepository,
    tasks: Arc<DieselTodoTaskRepository>,
    user_id: UserId,
    list_id: ListId,
}

async fn harness() -> Harness {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = dir
        .path()
        .join("ordering.db")
        .to_str()
        .expect("utf-8 temp path")
        .to_owned();
    run_migrations(&url).expect("migrations apply");
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(4))
        .await
        .expect("pool builds");

    let users = DieselUserRepository::new(pool.clone());
    let lists = DieselTodoListRepository::new(pool.clone());
    let tasks = Arc::new(DieselTodoTaskRepository::new(pool));

    let now = Utc::now();
    let user = User {
        id: UserId::random(),
        username: "ada".to_owned(),
        email: "ada@example.com".to_owned(),
        created_at: now,
    };
    users.insert(&user).await.expect("insert user");
    let list = TodoList {
        user_id: user.id.clone(),
        list_id: ListId::random(),
        name: "Chores".to_owned(),
        description: None,
        created_at: now,
        updated_at: now,
    };
    lists.insert(&list).await.expect("insert list");

    Harness {
        _dir: dir,
        users,
        lists,
        tasks,
        user_id: user.id,
        list_id: list.list_id,
    }
}

impl Harness {
    fn draft(&self, description: &str) -> TodoTask {
        let now = Utc::now();
        TodoTask {
            user_id: self.user_id.clone(),
            list_id: self.list_id.clone(),
            task_id: TaskId::random(),
            description: description.to_owned(),
            completed: false,
            order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    async fn all_tasks(&self) -> Vec<TodoTask> {
        let page = self
            .tasks
            .list(
                &self.user_id,
                &self.list_id,
                TaskFilter::default(),
                PageRequest::at(0, 100).expect("page"),
            )
            .await
            .expect("list tasks");
        page.into_parts().0
    }
}

fn descriptions(tasks: &[TodoTask]) -> Vec<&str> {
    tasks.iter().map(|task| task.description.as_str()).collect()
}

#[tokio::test]
async fn appended_tasks_take_consecutive_orders() {
    let h = harness().await;
    for name in ["a", "b", "c"] {
        h.tasks.create(h.draft(name), None).await.expect("create");
    }
    let tasks = h.all_tasks().await;
    assert_eq!(descriptions(&tasks), ["a", "b", "c"]);
    let orders: Vec<i32> = tasks.iter().map(|task| task.order).collect();
    assert_eq!(orders, [0, 1, 2]);
}

#[tokio::test]
async fn append_continues_after_explicit_order() {
    let h = harness().await;
    h.tasks.create(h.draft("pinned"), Some(10)).await.expect("create");
    let next = h.tasks.create(h.draft("next"), None).await.expect("create");
    assert_eq!(next.order, 11);
}

#[tokio::test]
async fn append_after_maximum_rank_is_capped() {
    let h = harness().await;
    h.tasks
        .create(h.draft("last"), Some(i32::MAX))
        .await
        .expect("create");
    let next = h.tasks.create(h.draft("after"), None).await.expect("create");
    assert_eq!(next.order, i32::MAX);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_appends_receive_distinct_orders() {
    let h = harness().await;
    let count: i32 = 12;
    let handles: Vec<_> = (0..count)
        .map(|n| {
            let tasks = Arc::clone(&h.tasks);
            let task = h.draft(&format!("task {n}"));
            tokio::spawn(async move { tasks.create(task, None).await })
        })
        .collect();
    for outcome in join_all(handles).await {
        outcome.expect("join").expect("create");
    }

    let orders: BTreeSet<i32> = h.all_tasks().await.iter().map(|task| task.order).collect();
    assert_eq!(orders, (0..count).collect::<BTreeSet<_>>());
}

#[tokio::test]
async fn reorder_applies_batch_and_ignores_unknown_tasks() {
    let h = harness().await;
    let a = h.tasks.create(h.draft("a"), None).await.expect("create");
    let b = h.tasks.create(h.draft("b"), None).await.expect("create");
    let c = h.tasks.create(h.draft("c"), None).await.expect("create");

    let assignments = OrderAssignments::new([
        (a.task_id.clone(), 2),
        (c.task_id.clone(), 0),
        (TaskId::random(), 7),
    ])
    .expect("valid batch");
    let at = Utc::now() + Duration::seconds(5);
    let reordered = h
        .tasks
        .reorder(&h.user_id, &h.list_id, &assignments, at)
        .await
        .expect("reorder");

    assert_eq!(descriptions(&reordered), ["c", "b", "a"]);
    assert_eq!(reordered.len(), 3);
    let untouched = reordered
        .iter()
        .find(|task| task.task_id == b.task_id)
        .expect("b present");
    assert_eq!(untouched.order, 1);
    assert_eq!(descriptions(&h.all_tasks().await), ["c", "b", "a"]);
}

#[tokio::test]
async fn colliding_orders_fall_back_to_creation_time() {
    let h = harness().await;
    let mut first = h.draft("first");
    first.created_at -= Duration::seconds(10);
    h.tasks.create(first, Some(3)).await.expect("create");
    h.tasks.create(h.draft("second"), Some(3)).await.expect("create");
    assert_eq!(descriptions(&h.all_tasks().await), ["first", "second"]);
}

#[tokio::test]
async fn completed_filter_keeps_display_order() {
    let h = harness().await;
    let done = h.tasks.create(h.draft("done"), None).await.expect("create");
    h.tasks.create(h.draft("open"), None).await.expect("create");
    let patch = TaskPatch {
        description: None,
        completed: Some(true),
        order: None,
        updated_at: Utc::now(),
    };
    h.tasks
        .update(&h.user_id, &h.list_id, &done.task_id, &patch)
        .await
        .expect("update")
        .expect("task present");

    let page = h
        .tasks
        .list(
            &h.user_id,
            &h.list_id,
            TaskFilter {
                completed: Some(false),
            },
            PageRequest::at(0, 10).expect("page"),
        )
        .await
        .expect("list");
    assert_eq!(descriptions(page.items()), ["open"]);
}

#[tokio::test]
async fn deleting_list_removes_its_tasks() {
    let h = harness().await;
    let task = h.tasks.create(h.draft("a"), None).await.expect("create");
    h.lists
        .delete(&h.user_id, &h.list_id)
        .await
        .expect("delete list");

    let found = h
        .tasks
        .find(&h.user_id, &h.list_id, &task.task_id)
        .await
        .expect("find");
    assert!(found.is_none());
}

#[tokio::test]
async fn deleting_user_removes_lists_and_tasks() {
    let h = harness().await;
    let task = h.tasks.create(h.draft("a"), None).await.expect("create");
    h.users.delete(&h.user_id).await.expect("delete user");

    let list = h.lists.find(&h.user_id, &h.list_id).await.expect("find list");
    assert!(list.is_none());
    let found = h
        .tasks
        .find(&h.user_id, &h.list_id, &task.task_id)
        .await
        .expect("find task");
    assert!(found.is_none());
}

#[tokio::test]
async fn description_update_keeps_rank_from_later_reorder() {
    let h = harness().await;
    let task = h.tasks.create(h.draft("milk"), None).await.expect("create");
    let snapshot = h
        .tasks
        .find(&h.user_id, &h.list_id, &task.task_id)
        .await
        .expect("find")
        .expect("task present");
    let assignments = OrderAssignments::new([(task.task_id.clone(), 7)]).expect("batch");
    h.tasks
        .reorder(&h.user_id, &h.list_id, &assignments, Utc::now())
        .await
        .expect("reorder");

    let patch = TaskPatch {
        description: Some("oat milk".to_owned()),
        completed: None,
        order: None,
        updated_at: Utc::now() + Duration::seconds(1),
    };
    let updated = h
        .tasks
        .update(&h.user_id, &h.list_id, &snapshot.task_id, &patch)
        .await
        .expect("update")
        .expect("task present");

    assert_eq!(snapshot.order, 0);
    assert_eq!(updated.order, 7);
    assert_eq!(updated.description, "oat milk");
    assert!(!updated.completed);
    let stored = h.all_tasks().await;
    assert_eq!(stored.first().map(|task| task.order), Some(7));
}

#[tokio::test]
async fn update_of_missing_task_returns_none() {
    let h = harness().await;
    let patch = TaskPatch {
        description: Some("ghost".to_owned()),
        completed: None,
        order: None,
        updated_at: Utc::now(),
    };
    let outcome = h
        .tasks
        .update(&h.user_id, &h.list_id, &TaskId::random(), &patch)
        .await
        .expect("update");
    assert!(outcome.is_none());
}

#[tokio::test]
async fn token_beyond_sql_integer_range_yields_empty_page() {
    let h = harness().await;
    h.tasks.create(h.draft("a"), None).await.expect("create");
    let page = PageRequest::new(None, Some("9223372036854775808")).expect("page");

    let tasks = h
        .tasks
        .list(&h.user_id, &h.list_id, TaskFilter::default(), page)
        .await
        .expect("list tasks");
    assert!(tasks.items().is_empty());
    assert!(tasks.next_token().is_none());

    let lists = h
        .lists
        .list_for_user(&h.user_id, page)
        .await
        .expect("list lists");
    assert!(lists.items().is_empty());
}

#[tokio::test]
async fn page_size_beyond_sql_integer_range_returns_everything() {
    let h = harness().await;
    for name in ["a", "b"] {
        h.tasks.create(h.draft(name), None).await.expect("create");
    }
    let page = PageRequest::new(Some(usize::MAX), None).expect("page");

    let tasks = h
        .tasks
        .list(&h.user_id, &h.list_id, TaskFilter::default(), page)
        .await
        .expect("list tasks");
    assert_eq!(descriptions(tasks.items()), ["a", "b"]);
    assert!(tasks.next_token().is_none());

    let lists = h
        .lists
        .list_for_user(&h.user_id, page)
        .await
        .expect("list lists");
    assert_eq!(lists.items().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn readers_never_observe_half_applied_reorder() {
    let h = Arc::new(harness().await);
    let a = h.tasks.create(h.draft("a"), None).await.expect("create a");
    let b = h.tasks.create(h.draft("b"), None).await.expect("create b");

    let writer = {
        let h = Arc::clone(&h);
        tokio::spawn(async move {
            for round in 1..=50 {
                let assignments = OrderAssignments::new([
                    (a.task_id.clone(), round * 10),
                    (b.task_id.clone(), round * 10 + 1),
                ])
                .expect("batch");
                h.tasks
                    .reorder(&h.user_id, &h.list_id, &assignments, Utc::now())
                    .await
                    .expect("reorder");
            }
        })
    };

    let reader = {
        let h = Arc::clone(&h);
        tokio::spawn(async move {
            for _ in 0..50 {
                let orders: Vec<i32> = h.all_tasks().await.iter().map(|task| task.order).collect();
                // Each batch moves both tasks to adjacent ranks.
                assert_eq!(orders.len(), 2);
                assert_eq!(orders[1] - orders[0], 1, "observed partial reorder: {orders:?}");
            }
        })
    };

    writer.await.expect("writer");
    reader.await.expect("reader");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn appends_interleaved_with_reorders_stay_distinct() {
    let h = Arc::new(harness().await);
    let pinned = h.tasks.create(h.draft("pinned"), None).await.expect("create");

    let reorders = {
        let h = Arc::clone(&h);
        tokio::spawn(async move {
            for round in 1..=10 {
                let assignments =
                    OrderAssignments::new([(pinned.task_id.clone(), -round)]).expect("batch");
                h.tasks
                    .reorder(&h.user_id, &h.list_id, &assignments, Utc::now())
                    .await
                    .expect("reorder");
            }
        })
    };
    let count: i32 = 10;
    let appends: Vec<_> = (0..count)
        .map(|n| {
            let h = Arc::clone(&h);
            tokio::spawn(async move { h.tasks.create(h.draft(&format!("task {n}")), None).await })
        })
        .collect();

    let mut appended = BTreeSet::new();
    for outcome in join_all(appends).await {
        appended.insert(outcome.expect("join").expect("create").order);
    }
    reorders.await.expect("reorders");

    assert_eq!(appended.len(), 10);
    let stored = h.all_tasks().await;
    assert_eq!(stored.len(), 11);
    assert_eq!(stored.first().map(|task| task.order), Some(-10));
    let stored_orders: BTreeSet<i32> = stored.iter().skip(1).map(|task| task.order).collect();
    assert_eq!(stored_orders, appended);
}

#[tokio::test]
async fn create_in_deleted_list_reports_missing_list() {
    let h = harness().await;
    h.lists
        .delete(&h.user_id, &h.list_id)
        .await
        .expect("delete list");

    let err = h
        .tasks
        .create(h.draft("late"), None)
        .await
        .expect_err("list is gone");
    assert!(matches!(err, TodoTaskPersistenceError::MissingList { .. }));

    let explicit = h
        .tasks
        .create(h.draft("late pinned"), Some(3))
        .await
        .expect_err("list is gone");
    assert!(matches!(explicit, TodoTaskPersistenceError::MissingList { .. }));
}
