//! Diesel schema for task persistence.

diesel::table! {
    /// Task records owned by application users.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user identifier.
        owner_id -> Uuid,
        /// Task title.
        title -> Text,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Completion status.
        #[max_length = 16]
        status -> Varchar,
        /// Priority level.
        #[max_length = 16]
        priority -> Varchar,
        /// Category label.
        category -> Text,
        /// Optional start date.
        start_date -> Nullable<Date>,
        /// Optional deadline.
        deadline -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
