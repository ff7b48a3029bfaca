//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Autoincrement primary key.
        id -> Integer,
        /// Unique, case-sensitive login name.
        name -> Text,
        /// Unique contact address.
        email -> Text,
        /// Argon2id PHC string.
        password -> Text,
    }
}

diesel::table! {
    /// Per-user task list entries.
    tasks (task_id) {
        task_id -> Integer,
        name -> Text,
        /// Calendar date, stored as `YYYY-MM-DD` text.
        due_date -> Date,
        /// 1 (lowest) to 10 (highest).
        priority -> Integer,
        /// 1 while open, 0 once completed.
        status -> Integer,
        /// Owning user.
        user_id -> Integer,
    }
}

diesel::joinable!(tasks -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(tasks, users);
