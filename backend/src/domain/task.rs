//! Task list model.

use std::fmt;

use chrono::NaiveDate;

use super::user::UserId;

/// Longest accepted task name, in characters.
pub const TASK_NAME_MAX: usize = 200;
/// Lowest priority value.
pub const PRIORITY_MIN: i32 = 1;
/// Highest priority value.
pub const PRIORITY_MAX: i32 = 10;

const DUE_DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

/// Reasons a new-task form is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskValidationError {
    /// Name was blank once trimmed.
    #[error("Task name is required")]
    EmptyName,
    /// Name exceeded [`TASK_NAME_MAX`] characters.
    #[error("Task name must be at most {max} characters")]
    NameTooLong { max: usize },
    /// Due date matched neither accepted format.
    #[error("Due date must look like MM/DD/YYYY")]
    InvalidDueDate,
    /// Priority was not an integer in range.
    #[error("Priority must be a number between {min} and {max}")]
    InvalidPriority { min: i32, max: i32 },
}

/// Store-assigned task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(i32);

impl TaskId {
    /// Wrap a raw row identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw row identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority from 1 (lowest) to 10 (highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority(i32);

impl Priority {
    /// Validate a priority value.
    pub fn new(value: i32) -> Result<Self, TaskValidationError> {
        if (PRIORITY_MIN..=PRIORITY_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TaskValidationError::InvalidPriority {
                min: PRIORITY_MIN,
                max: PRIORITY_MAX,
            })
        }
    }

    /// Clamp an arbitrary value into the accepted range.
    #[must_use]
    pub fn saturating(value: i32) -> Self {
        Self(value.clamp(PRIORITY_MIN, PRIORITY_MAX))
    }

    /// Numeric value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Whether a task still needs doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Still to do; stored as 1.
    Open,
    /// Completed; stored as 0.
    Closed,
}

impl TaskStatus {
    /// Integer flag stored in `tasks.status`.
    #[must_use]
    pub const fn as_flag(self) -> i32 {
        match self {
            Self::Open => 1,
            Self::Closed => 0,
        }
    }

    /// Decode the stored flag; any non-zero value counts as open.
    #[must_use]
    pub const fn from_flag(flag: i32) -> Self {
        if flag == 0 { Self::Closed } else { Self::Open }
    }
}

/// Persisted task owned by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: TaskStatus,
    pub owner: UserId,
}

/// Validated task awaiting insertion.
///
/// # Examples
/// ```
/// use taskr::domain::TaskDraft;
///
/// let draft = TaskDraft::try_from_parts("Write tests", "03/15/2025", "3").expect("valid task");
/// assert_eq!(draft.name(), "Write tests");
/// assert_eq!(draft.priority().get(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    name: String,
    due_date: NaiveDate,
    priority: Priority,
}

impl TaskDraft {
    /// Validate raw form fields.
    pub fn try_from_parts(
        name: &str,
        due_date: &str,
        priority: &str,
    ) -> Result<Self, TaskValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TaskValidationError::EmptyName);
        }
        if name.chars().count() > TASK_NAME_MAX {
            return Err(TaskValidationError::NameTooLong { max: TASK_NAME_MAX });
        }
        let due_date = parse_due_date(due_date)?;
        let priority = priority
            .trim()
            .parse::<i32>()
            .map_err(|_| TaskValidationError::InvalidPriority {
                min: PRIORITY_MIN,
                max: PRIORITY_MAX,
            })
            .and_then(Priority::new)?;

        Ok(Self {
            name: name.to_owned(),
            due_date,
            priority,
        })
    }

    /// Task name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Due date.
    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Priority.
    pub fn priority(&self) -> Priority {
        self.priority
    }
}

fn parse_due_date(raw: &str) -> Result<NaiveDate, TaskValidationError> {
    let raw = raw.trim();
    DUE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .ok_or(TaskValidationError::InvalidDueDate)
}

/// A user's tasks split by status, each ordered by due date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    pub open: Vec<Task>,
    pub closed: Vec<Task>,
}

impl TaskList {
    /// Partition tasks by status, keeping the incoming order within each side.
    #[must_use]
    pub fn partition(tasks: Vec<Task>) -> Self {
        let (open, closed) = tasks
            .into_iter()
            .partition(|task| task.status == TaskStatus::Open);
        Self { open, closed }
    }
}
