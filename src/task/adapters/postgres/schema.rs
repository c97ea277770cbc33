//! Diesel schema for task persistence.

diesel::table! {
    /// Task records and their optional AI summary.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Insertion sequence used for stable listing order.
        seq -> Int8,
        /// Task title.
        title -> Varchar,
        /// Task description, empty when absent.
        description -> Text,
        /// AI summary, set at most once.
        ai_summary -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
