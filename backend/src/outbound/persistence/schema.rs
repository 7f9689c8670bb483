//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly.

diesel::table! {
    /// Enrollments of remote users in remote courses.
    enrollments (id) {
        /// Primary key, generated by the database.
        id -> Uuid,
        /// Identifier owned by the user service.
        user_id -> Varchar,
        /// Identifier owned by the course service.
        course_id -> Varchar,
        /// Status code (`P`, `A`, `S` or `I`).
        #[max_length = 2]
        status -> Varchar,
        /// Creation timestamp, generated by the database.
        created_at -> Timestamptz,
    }
}
