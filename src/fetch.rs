use serde::Serialize;

use crate::error::AppError;
use crate::models::Schedule;

pub const EMPTY_MESSAGE: &str = "Tidak ada data.";

/// State of a single retrieval. Only `Loading` can move on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FetchResult {
    Loading,
    Failure { message: String },
    Success { schedules: Vec<Schedule> },
}

impl FetchResult {
    pub fn resolve(self, outcome: Result<Vec<Schedule>, AppError>) -> Self {
        match self {
            FetchResult::Loading => match outcome {
                Ok(schedules) => FetchResult::Success { schedules },
                Err(e) => FetchResult::Failure {
                    message: format!("Error getting data: {}", e),
                },
            },
            resolved => resolved,
        }
    }

    pub fn view(&self) -> ScreenView<'_> {
        match self {
            FetchResult::Loading => ScreenView::Loading,
            FetchResult::Failure { message } => ScreenView::Error { message },
            FetchResult::Success { schedules } if schedules.is_empty() => ScreenView::Empty {
                message: EMPTY_MESSAGE,
            },
            FetchResult::Success { schedules } => ScreenView::Populated { schedules },
        }
    }
}

/// What the list screen draws for a given result.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ScreenView<'a> {
    Loading,
    Error { message: &'a str },
    Empty { message: &'static str },
    Populated { schedules: &'a [Schedule] },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(day: &str) -> Schedule {
        Schedule {
            day: day.to_string(),
            ..Schedule::default()
        }
    }

    #[test]
    fn test_loading_resolves_to_success() {
        let result = FetchResult::Loading.resolve(Ok(vec![schedule("Senin")]));
        assert_eq!(
            result,
            FetchResult::Success {
                schedules: vec![schedule("Senin")]
            }
        );
    }

    #[test]
    fn test_loading_resolves_to_failure_with_message() {
        let result = FetchResult::Loading.resolve(Err(AppError::Remote {
            status: 401,
            message: "Permission denied".to_string(),
        }));
        assert_eq!(
            result,
            FetchResult::Failure {
                message: "Error getting data: Firebase error 401: Permission denied".to_string()
            }
        );
    }

    #[test]
    fn test_resolved_result_ignores_later_outcomes() {
        let success = FetchResult::Loading.resolve(Ok(vec![]));
        let still = success.clone().resolve(Err(AppError::FetchFailed("late".to_string())));
        assert_eq!(still, success);

        let failure = FetchResult::Loading.resolve(Err(AppError::FetchFailed("down".to_string())));
        let still = failure.clone().resolve(Ok(vec![schedule("Selasa")]));
        assert_eq!(still, failure);
    }

    #[test]
    fn test_empty_success_is_not_an_error_view() {
        let result = FetchResult::Loading.resolve(Ok(vec![]));
        assert_eq!(
            result.view(),
            ScreenView::Empty {
                message: EMPTY_MESSAGE
            }
        );
    }

    #[test]
    fn test_views() {
        assert_eq!(FetchResult::Loading.view(), ScreenView::Loading);

        let failure = FetchResult::Failure {
            message: "boom".to_string(),
        };
        assert_eq!(failure.view(), ScreenView::Error { message: "boom" });

        let schedules = vec![schedule("Jumat")];
        let success = FetchResult::Success {
            schedules: schedules.clone(),
        };
        assert_eq!(
            success.view(),
            ScreenView::Populated {
                schedules: &schedules
            }
        );
    }
}
