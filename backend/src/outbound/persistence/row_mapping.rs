//! Conversions from Diesel rows to domain snapshots.
//!
//! Rows are validated on the way in; a row that fails validation is reported
//! as a corrupt-data message which each adapter wraps in its own query error.

use tracing::warn;

use crate::domain::{
    Companion, CompanionNumber, Enrollment, EnrollmentMessage, EnrollmentNumber, EnrollmentStatus,
    NewEnrollment, Travel, TravelDraft, TravelNumber, TravelStatus, UserNumber,
};

use super::models::{CompanionRow, EnrollmentRow, TravelRow};

fn corrupt(table: &str, number: impl std::fmt::Display, detail: impl std::fmt::Display) -> String {
    warn!(table, %number, %detail, "stored row failed validation");
    format!("invalid {table} row {number}: {detail}")
}

pub(crate) fn travel_from_row(row: TravelRow) -> Result<Travel, String> {
    let host = UserNumber::new(row.user_number).map_err(|err| corrupt("travel", row.number, err))?;
    let status: TravelStatus = row
        .status
        .parse()
        .map_err(|err| corrupt("travel", row.number, err))?;
    let max_person = u32::try_from(row.max_person)
        .map_err(|_| corrupt("travel", row.number, "negative max_person"))?;
    Ok(Travel::new(TravelDraft {
        number: TravelNumber::new(row.number),
        host,
        title: row.title,
        max_person,
        status,
        enrollments_last_viewed_at: row.enrollments_last_viewed_at,
    }))
}

pub(crate) fn enrollment_from_row(row: EnrollmentRow) -> Result<Enrollment, String> {
    let applicant =
        UserNumber::new(row.user_number).map_err(|err| corrupt("enrollment", row.number, err))?;
    let status: EnrollmentStatus = row
        .status
        .parse()
        .map_err(|err| corrupt("enrollment", row.number, err))?;
    let message = row
        .message
        .map(EnrollmentMessage::new)
        .transpose()
        .map_err(|err| corrupt("enrollment", row.number, err))?;
    Ok(Enrollment::from_parts(
        EnrollmentNumber::new(row.number),
        NewEnrollment::pending(
            TravelNumber::new(row.travel_number),
            applicant,
            message,
            row.created_at,
        ),
        status,
    ))
}

pub(crate) fn companion_from_row(row: CompanionRow) -> Result<Companion, String> {
    let user_number =
        UserNumber::new(row.user_number).map_err(|err| corrupt("companion", row.number, err))?;
    Ok(Companion {
        number: CompanionNumber::new(row.number),
        travel_number: TravelNumber::new(row.travel_number),
        user_number,
    })
}
