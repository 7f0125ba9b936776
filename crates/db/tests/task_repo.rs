//! Integration tests for the task repository against a real database:
//! - Filter combinations on the list query
//! - Ordering and pagination
//! - Reminder creation alongside due-dated tasks
//! - Partial updates and clearing of nullable columns
//! - List and detail response assembly

use chrono::{Duration, TimeZone, Utc};
use sqlx::PgPool;
use taskflow_core::pagination::PageWindow;
use taskflow_db::models::project::CreateProject;
use taskflow_db::models::status::{TaskPriority, TaskStatus};
use taskflow_db::models::task::{CreateTask, TaskFilter, TaskListParams, UpdateTask};
use taskflow_db::repositories::{ProjectRepo, ReminderRepo, TaskRepo};

const DEMO_USER: i64 = 1;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_task(title: &str) -> CreateTask {
    CreateTask {
        title: title.to_string(),
        ..Default::default()
    }
}

async fn seed(pool: &PgPool, input: CreateTask) -> i64 {
    TaskRepo::create(pool, DEMO_USER, &input).await.unwrap().id
}

async fn set_status(pool: &PgPool, id: i64, status: TaskStatus) {
    let update = UpdateTask {
        status: Some(status),
        ..Default::default()
    };
    TaskRepo::update(pool, id, &update).await.unwrap().unwrap();
}

async fn titles(pool: &PgPool, filter: &TaskFilter) -> Vec<String> {
    TaskRepo::list(pool, filter, PageWindow::default())
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect()
}

fn filter_from(pairs: &[(&str, &str)]) -> TaskFilter {
    let map: serde_json::Map<String, serde_json::Value> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect();
    let params: TaskListParams = serde_json::from_value(serde_json::Value::Object(map)).unwrap();
    TaskFilter::from_params(&params).0
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_applies_defaults(pool: PgPool) {
    let task = TaskRepo::create(&pool, DEMO_USER, &new_task("Plain"))
        .await
        .unwrap();

    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.priority, TaskPriority::Medium);
    assert!(!task.is_recurring);
    assert!(!task.is_archived);
    assert!(task.tags.is_empty());
    assert_eq!(task.created_by_id, DEMO_USER);
    assert!(task.completed_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_due_date_creates_one_reminder(pool: PgPool) {
    let due = Utc.with_ymd_and_hms(2026, 6, 15, 9, 0, 0).unwrap();
    let task = TaskRepo::create(
        &pool,
        DEMO_USER,
        &CreateTask {
            due_date: Some(due),
            ..new_task("Ship release")
        },
    )
    .await
    .unwrap();

    let reminders = ReminderRepo::list_for_task(&pool, task.id).await.unwrap();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].trigger_at, due - Duration::hours(24));
    assert_eq!(reminders[0].reminder_type, "notification");
    assert_eq!(
        reminders[0].message.as_deref(),
        Some("Task \"Ship release\" is due tomorrow")
    );
    assert!(!reminders[0].is_sent);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_due_date_creates_no_reminder(pool: PgPool) {
    let id = seed(&pool, new_task("Someday")).await;
    let reminders = ReminderRepo::list_for_task(&pool, id).await.unwrap();
    assert!(reminders.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_unknown_project_is_fk_violation(pool: PgPool) {
    let result = TaskRepo::create(
        &pool,
        DEMO_USER,
        &CreateTask {
            project_id: Some(999_999),
            ..new_task("Orphan")
        },
    )
    .await;

    let err = result.unwrap_err();
    let code = err
        .as_database_error()
        .and_then(|e| e.code())
        .map(|c| c.to_string());
    assert_eq!(code.as_deref(), Some("23503"));

    let total = TaskRepo::count(&pool, &TaskFilter::default()).await.unwrap();
    assert_eq!(total, 0, "failed insert must not leave rows behind");
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_matches_description_case_insensitively(pool: PgPool) {
    seed(
        &pool,
        CreateTask {
            description: Some("Implement Authentication flow".to_string()),
            ..new_task("Login page")
        },
    )
    .await;
    seed(&pool, new_task("Unrelated")).await;
    seed(
        &pool,
        CreateTask {
            notes: Some("remember OAUTH scopes".to_string()),
            ..new_task("Scopes")
        },
    )
    .await;

    let found = titles(&pool, &filter_from(&[("search", "auth")])).await;
    assert_eq!(found.len(), 2);
    assert!(found.contains(&"Login page".to_string()));
    assert!(found.contains(&"Scopes".to_string()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_wildcards_match_literally(pool: PgPool) {
    seed(&pool, new_task("50% off banner")).await;
    seed(&pool, new_task("500 errors")).await;

    let found = titles(&pool, &filter_from(&[("search", "50%")])).await;
    assert_eq!(found, vec!["50% off banner".to_string()]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filters_are_anded(pool: PgPool) {
    let high = seed(
        &pool,
        CreateTask {
            priority: Some(TaskPriority::High),
            tags: Some(vec!["backend".into()]),
            ..new_task("High backend")
        },
    )
    .await;
    seed(
        &pool,
        CreateTask {
            priority: Some(TaskPriority::High),
            tags: Some(vec!["design".into()]),
            ..new_task("High design")
        },
    )
    .await;
    seed(
        &pool,
        CreateTask {
            priority: Some(TaskPriority::Low),
            tags: Some(vec!["backend".into(), "ops".into()]),
            ..new_task("Low backend")
        },
    )
    .await;
    set_status(&pool, high, TaskStatus::InProgress).await;

    let found = titles(
        &pool,
        &filter_from(&[("priority", "high"), ("tags", "backend,security")]),
    )
    .await;
    assert_eq!(found, vec!["High backend".to_string()]);

    let found = titles(
        &pool,
        &filter_from(&[("status", "in_progress"), ("priority", "all")]),
    )
    .await;
    assert_eq!(found, vec!["High backend".to_string()]);

    let found = titles(&pool, &filter_from(&[("status", "todo,in_progress")])).await;
    assert_eq!(found.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tag_named_all_is_matched_literally(pool: PgPool) {
    seed(
        &pool,
        CreateTask {
            tags: Some(vec!["all".into()]),
            ..new_task("Tagged all")
        },
    )
    .await;
    seed(
        &pool,
        CreateTask {
            tags: Some(vec!["other".into()]),
            ..new_task("Tagged other")
        },
    )
    .await;

    let filter = filter_from(&[("tags", "all")]);
    assert_eq!(titles(&pool, &filter).await, vec!["Tagged all".to_string()]);
    assert_eq!(TaskRepo::count(&pool, &filter).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_and_assignee_filters(pool: PgPool) {
    let project = ProjectRepo::create(
        &pool,
        DEMO_USER,
        &CreateProject {
            name: "Website".into(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    seed(
        &pool,
        CreateTask {
            project_id: Some(project.id),
            assignee_id: Some(DEMO_USER),
            ..new_task("In project")
        },
    )
    .await;
    seed(&pool, new_task("Inbox")).await;

    let project_id = project.id.to_string();
    let by_project = filter_from(&[("projectId", project_id.as_str())]);
    assert_eq!(titles(&pool, &by_project).await, vec!["In project".to_string()]);

    let by_assignee = filter_from(&[("assigneeId", "1")]);
    assert_eq!(titles(&pool, &by_assignee).await, vec!["In project".to_string()]);

    let all = filter_from(&[("projectId", "all")]);
    assert_eq!(titles(&pool, &all).await.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_due_window_estimate_and_overdue(pool: PgPool) {
    let past = Utc::now() - Duration::days(3);
    let future = Utc::now() + Duration::days(10);

    seed(
        &pool,
        CreateTask {
            due_date: Some(past),
            estimated_time: Some(30),
            ..new_task("Late")
        },
    )
    .await;
    let late_done = seed(
        &pool,
        CreateTask {
            due_date: Some(past),
            ..new_task("Late but done")
        },
    )
    .await;
    seed(
        &pool,
        CreateTask {
            due_date: Some(future),
            estimated_time: Some(240),
            ..new_task("Later")
        },
    )
    .await;
    set_status(&pool, late_done, TaskStatus::Completed).await;

    let overdue = titles(&pool, &filter_from(&[("overdue", "true")])).await;
    assert_eq!(overdue, vec!["Late".to_string()]);

    let short = titles(&pool, &filter_from(&[("estimatedMax", "60")])).await;
    assert_eq!(short, vec!["Late".to_string()]);

    let from = (Utc::now() + Duration::days(1)).to_rfc3339();
    let upcoming = titles(&pool, &filter_from(&[("dueFrom", from.as_str())])).await;
    assert_eq!(upcoming, vec!["Later".to_string()]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_has_comments_filter(pool: PgPool) {
    let discussed = seed(&pool, new_task("Discussed")).await;
    seed(&pool, new_task("Quiet")).await;

    sqlx::query("INSERT INTO comments (task_id, author_id, content) VALUES ($1, $2, 'hi')")
        .bind(discussed)
        .bind(DEMO_USER)
        .execute(&pool)
        .await
        .unwrap();

    let with = titles(&pool, &filter_from(&[("hasComments", "true")])).await;
    assert_eq!(with, vec!["Discussed".to_string()]);

    let without = titles(&pool, &filter_from(&[("hasComments", "false")])).await;
    assert_eq!(without, vec!["Quiet".to_string()]);
}

// ---------------------------------------------------------------------------
// Ordering and pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_orders_by_priority_then_due_date(pool: PgPool) {
    let soon = Utc::now() + Duration::days(1);
    let later = Utc::now() + Duration::days(5);

    seed(
        &pool,
        CreateTask {
            priority: Some(TaskPriority::Low),
            ..new_task("low")
        },
    )
    .await;
    seed(
        &pool,
        CreateTask {
            priority: Some(TaskPriority::High),
            ..new_task("high undated")
        },
    )
    .await;
    seed(
        &pool,
        CreateTask {
            priority: Some(TaskPriority::High),
            due_date: Some(later),
            ..new_task("high later")
        },
    )
    .await;
    seed(
        &pool,
        CreateTask {
            priority: Some(TaskPriority::High),
            due_date: Some(soon),
            ..new_task("high soon")
        },
    )
    .await;
    seed(
        &pool,
        CreateTask {
            priority: Some(TaskPriority::Urgent),
            ..new_task("urgent")
        },
    )
    .await;

    let found = titles(&pool, &TaskFilter::default()).await;
    assert_eq!(
        found,
        vec!["urgent", "high soon", "high later", "high undated", "low"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pagination_and_has_more(pool: PgPool) {
    for title in ["a", "b", "c"] {
        seed(&pool, new_task(title)).await;
    }
    let filter = TaskFilter::default();
    let total = TaskRepo::count(&pool, &filter).await.unwrap();
    assert_eq!(total, 3);

    let first = PageWindow { limit: 2, offset: 0 };
    let page = TaskRepo::list(&pool, &filter, first).await.unwrap();
    assert_eq!(page.len(), 2);
    assert!(first.has_more(total));

    let second = PageWindow { limit: 2, offset: 2 };
    let page = TaskRepo::list(&pool, &filter, second).await.unwrap();
    assert_eq!(page.len(), 1);
    assert!(!second.has_more(total));
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_clears_and_keeps_fields(pool: PgPool) {
    let due = Utc::now() + Duration::days(2);
    let id = seed(
        &pool,
        CreateTask {
            description: Some("keep me".into()),
            due_date: Some(due),
            tags: Some(vec!["x".into()]),
            ..new_task("Original")
        },
    )
    .await;

    let update: UpdateTask = serde_json::from_value(serde_json::json!({
        "title": "Renamed",
        "dueDate": null,
        "tags": null,
        "estimatedTime": "90",
        "status": "completed"
    }))
    .unwrap();
    let task = TaskRepo::update(&pool, id, &update).await.unwrap().unwrap();

    assert_eq!(task.title, "Renamed");
    assert_eq!(task.description.as_deref(), Some("keep me"));
    assert!(task.due_date.is_none());
    assert!(task.tags.is_empty());
    assert_eq!(task.estimated_time, Some(90));
    assert_eq!(task.status, TaskStatus::Completed);
    assert!(task.completed_at.is_none(), "completedAt is caller-managed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nonexistent_returns_none(pool: PgPool) {
    let update = UpdateTask {
        title: Some("Nope".into()),
        ..Default::default()
    };
    let result = TaskRepo::update(&pool, 424_242, &update).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_reminders_and_detaches_children(pool: PgPool) {
    let parent = seed(
        &pool,
        CreateTask {
            due_date: Some(Utc::now() + Duration::days(1)),
            ..new_task("Parent")
        },
    )
    .await;
    let child = seed(
        &pool,
        CreateTask {
            parent_id: Some(parent),
            ..new_task("Child")
        },
    )
    .await;

    assert!(TaskRepo::delete(&pool, parent).await.unwrap());
    assert!(!TaskRepo::delete(&pool, parent).await.unwrap());

    assert!(ReminderRepo::list_for_task(&pool, parent).await.unwrap().is_empty());
    let child = TaskRepo::find_by_id(&pool, child).await.unwrap().unwrap();
    assert!(child.parent_id.is_none());
}

// ---------------------------------------------------------------------------
// Response assembly
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_items_carry_children_dependencies_and_counts(pool: PgPool) {
    let parent = seed(&pool, new_task("Parent")).await;
    let blocker = seed(&pool, new_task("Blocker")).await;
    seed(
        &pool,
        CreateTask {
            parent_id: Some(parent),
            assignee_id: Some(DEMO_USER),
            ..new_task("Child")
        },
    )
    .await;

    sqlx::query("INSERT INTO task_dependencies (task_id, depends_on_task_id) VALUES ($1, $2)")
        .bind(parent)
        .bind(blocker)
        .execute(&pool)
        .await
        .unwrap();

    let task = TaskRepo::find_by_id(&pool, parent).await.unwrap().unwrap();
    let items = TaskRepo::list_items(&pool, vec![task]).await.unwrap();
    let item = &items[0];

    assert_eq!(item.children.len(), 1);
    assert_eq!(item.children[0].task.title, "Child");
    assert_eq!(item.children[0].assignee.as_ref().map(|u| u.id), Some(DEMO_USER));
    assert_eq!(item.dependencies.len(), 1);
    assert_eq!(item.dependencies[0].depends_on_task.title, "Blocker");
    assert_eq!(item.counts.children, 1);
    assert_eq!(item.counts.comments, 0);
    assert_eq!(item.task.created_by.as_ref().map(|u| u.id), Some(DEMO_USER));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_detail_orders_collections(pool: PgPool) {
    let id = seed(
        &pool,
        CreateTask {
            due_date: Some(Utc::now() + Duration::days(3)),
            ..new_task("Detailed")
        },
    )
    .await;

    for (content, offset) in [("first", 2), ("second", 1)] {
        sqlx::query(
            "INSERT INTO comments (task_id, author_id, content, created_at)
             VALUES ($1, $2, $3, NOW() - make_interval(mins => $4))",
        )
        .bind(id)
        .bind(DEMO_USER)
        .bind(content)
        .bind(offset)
        .execute(&pool)
        .await
        .unwrap();
    }
    for hours_ago in [5, 1] {
        sqlx::query(
            "INSERT INTO time_entries (task_id, user_id, start_time)
             VALUES ($1, $2, NOW() - make_interval(hours => $3))",
        )
        .bind(id)
        .bind(DEMO_USER)
        .bind(hours_ago)
        .execute(&pool)
        .await
        .unwrap();
    }

    let detail = TaskRepo::find_detail(&pool, id).await.unwrap().unwrap();
    let comments: Vec<&str> = detail
        .comments
        .iter()
        .map(|c| c.comment.content.as_str())
        .collect();
    assert_eq!(comments, vec!["first", "second"]);
    assert!(detail.comments[0].author.is_some());
    assert!(detail.time_entries[0].start_time > detail.time_entries[1].start_time);
    assert_eq!(detail.reminders.len(), 1);

    assert!(TaskRepo::find_detail(&pool, id + 1000).await.unwrap().is_none());
}
