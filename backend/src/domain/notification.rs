//! User-facing notification messages triggered by the enrollment workflow.

use serde::{Deserialize, Serialize};

/// Event that caused a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelNotificationKind {
    /// Sent to the host when someone applies.
    HostApplication,
    /// Sent to the applicant after submitting.
    ApplicantSubmission,
    Accepted,
    Rejected,
}

impl TravelNotificationKind {
    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HostApplication => "HOST_APPLICATION",
            Self::ApplicantSubmission => "APPLICANT_SUBMISSION",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::HostApplication => "New applicant",
            Self::ApplicantSubmission => "Enrollment submitted",
            Self::Accepted => "Enrollment accepted",
            Self::Rejected => "Enrollment rejected",
        }
    }

    /// Message body for a travel titled `travel_title`.
    ///
    /// # Examples
    /// ```
    /// use companion_backend::domain::TravelNotificationKind;
    ///
    /// assert_eq!(
    ///     TravelNotificationKind::Accepted.content("Jeju"),
    ///     "Your participation in [Jeju] is confirmed."
    /// );
    /// ```
    pub fn content(self, travel_title: &str) -> String {
        match self {
            Self::HostApplication => {
                format!("[{travel_title}] has a new applicant. Check the enrollment list.")
            }
            Self::ApplicantSubmission => format!(
                "Your application to [{travel_title}] is complete. \
                 We will let you know once the host responds."
            ),
            Self::Accepted => format!("Your participation in [{travel_title}] is confirmed."),
            Self::Rejected => {
                format!("Unfortunately your application to [{travel_title}] was not accepted.")
            }
        }
    }
}
