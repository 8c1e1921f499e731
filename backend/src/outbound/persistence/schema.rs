//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. The
//! `diesel print-schema` command can regenerate them from a live database.

diesel::table! {
    /// User accounts.
    ///
    /// `username` and `email` carry the `users_username_key` and
    /// `users_email_key` unique constraints.
    users (id) {
        /// Primary key assigned from a sequence; never reused.
        id -> Int8,
        username -> Varchar,
        email -> Varchar,
        name -> Varchar,
        created_at -> Timestamptz,
        /// Refreshed by every update.
        updated_at -> Timestamptz,
    }
}
