//! Internal Diesel row structs. Never exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{companions, enrollments, notifications, travels};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = travels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TravelRow {
    pub number: i32,
    pub user_number: i32,
    pub title: String,
    pub max_person: i32,
    pub status: String,
    pub enrollments_last_viewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EnrollmentRow {
    pub number: i64,
    pub travel_number: i32,
    pub user_number: i32,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = enrollments)]
pub(crate) struct NewEnrollmentRow<'a> {
    pub travel_number: i32,
    pub user_number: i32,
    pub message: Option<&'a str>,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = companions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CompanionRow {
    pub number: i64,
    pub travel_number: i32,
    pub user_number: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = companions)]
pub(crate) struct NewCompanionRow {
    pub travel_number: i32,
    pub user_number: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub(crate) struct NewNotificationRow<'a> {
    pub receiver_user_number: i32,
    pub travel_number: i32,
    pub kind: &'a str,
    pub title: &'a str,
    pub content: &'a str,
}
