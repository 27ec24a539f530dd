//! Diesel table definitions mirroring `migrations/`.

diesel::table! {
    users (user_id) {
        user_id -> Text,
        username -> Text,
        email -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    todo_lists (user_id, list_id) {
        user_id -> Text,
        list_id -> Text,
        name -> Text,
        description -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    todo_tasks (user_id, list_id, task_id) {
        user_id -> Text,
        list_id -> Text,
        task_id -> Text,
        description -> Text,
        completed -> Bool,
        sort_order -> Integer,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, todo_lists, todo_tasks);
