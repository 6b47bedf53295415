//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Requesting client.
        client_id -> Uuid,
        /// Requested service offering.
        service_id -> Uuid,
        /// Home the service applies to.
        home_id -> Uuid,
        /// Workflow status.
        #[max_length = 50]
        status -> Varchar,
        /// Preferred window start.
        preferred_start -> Timestamptz,
        /// Preferred window end.
        preferred_end -> Timestamptz,
        /// Proposed visit date, if a proposal is outstanding or accepted.
        proposed_date -> Nullable<Timestamptz>,
        /// Proposed visit time (`HH:MM`), set together with the date.
        #[max_length = 5]
        proposed_time -> Nullable<Varchar>,
        /// Timestamp of the first approval.
        approved_at -> Nullable<Timestamptz>,
        /// Completion timestamp.
        completed_at -> Nullable<Timestamptz>,
        /// Client's free-text notes.
        client_notes -> Nullable<Text>,
        /// Contractor's free-text notes.
        contractor_notes -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task-contractor assignment records, unique per pair.
    task_assignments (id) {
        /// Assignment identifier.
        id -> Uuid,
        /// Assigned task.
        task_id -> Uuid,
        /// Assigned contractor.
        contractor_id -> Uuid,
        /// Actor that made the assignment.
        assigned_by -> Uuid,
        /// Assignment timestamp.
        assigned_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only timeline audit log.
    task_timeline (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Task the entry belongs to.
        task_id -> Uuid,
        /// Recorded lifecycle action.
        #[max_length = 50]
        action -> Varchar,
        /// Acting user.
        performed_by -> Uuid,
        /// Free-text details.
        details -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Platform user accounts (the slice the task core reads).
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Account role.
        #[max_length = 20]
        role -> Varchar,
    }
}

diesel::joinable!(task_assignments -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_assignments);
