//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    /// Travel postings; only the columns the enrollment workflow reads.
    travels (number) {
        number -> Int4,
        /// Host of the travel.
        user_number -> Int4,
        title -> Varchar,
        max_person -> Int4,
        status -> Varchar,
        enrollments_last_viewed_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    enrollments (number) {
        number -> Int8,
        travel_number -> Int4,
        /// Applicant.
        user_number -> Int4,
        message -> Nullable<Varchar>,
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Accepted applicants. Unique on `(travel_number, user_number)`.
    companions (number) {
        number -> Int8,
        travel_number -> Int4,
        user_number -> Int4,
    }
}

diesel::table! {
    notifications (number) {
        number -> Int8,
        receiver_user_number -> Int4,
        travel_number -> Int4,
        kind -> Varchar,
        title -> Varchar,
        content -> Text,
        is_read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(enrollments -> travels (travel_number));
diesel::joinable!(companions -> travels (travel_number));
diesel::joinable!(notifications -> travels (travel_number));

diesel::allow_tables_to_appear_in_same_query!(travels, enrollments, companions, notifications);
