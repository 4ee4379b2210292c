//! Diesel schema for user persistence.

diesel::table! {
    /// Registered application users.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        name -> Text,
        /// Normalized login email, unique.
        email -> Text,
        /// Argon2id PHC string.
        password_hash -> Text,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}
