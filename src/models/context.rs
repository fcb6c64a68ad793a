//! Who is submitting.

use serde::{Deserialize, Serialize};

use crate::error::SubmissionError;

/// The signed-in employee on whose behalf a submission is checked.
///
/// Passed explicitly to every check that needs to fetch the employee's
/// other requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Employee id, when the session has one.
    #[serde(default)]
    pub employee_id: Option<String>,
}

impl SessionContext {
    /// A context for the given employee.
    pub fn for_employee(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: Some(employee_id.into()),
        }
    }

    /// The employee id, or [`SubmissionError::EmployeeIdUnavailable`] when it
    /// is missing or blank.
    ///
    /// ```
    /// use kintai_core::models::SessionContext;
    ///
    /// assert_eq!(SessionContext::for_employee("E001").employee_id().unwrap(), "E001");
    /// assert!(SessionContext::default().employee_id().is_err());
    /// ```
    pub fn employee_id(&self) -> Result<&str, SubmissionError> {
        self.employee_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(SubmissionError::EmployeeIdUnavailable)
    }
}
