//! Batch validation for workouts and their entries.

use std::collections::HashMap;

use super::{
    NewWorkout, TITLE_MAX, WorkoutDraft, WorkoutEntry, WorkoutEntryDraft,
    WorkoutValidationError,
};

/// Validate every draft in submission order.
///
/// Fails on the first invalid entry, reporting its zero-based position, and
/// rejects `order_index` collisions within the batch.
pub fn validate_entries(
    drafts: Vec<WorkoutEntryDraft>,
) -> Result<Vec<WorkoutEntry>, WorkoutValidationError> {
    let mut seen: HashMap<i32, usize> = HashMap::with_capacity(drafts.len());
    let mut entries = Vec::with_capacity(drafts.len());

    for (index, draft) in drafts.into_iter().enumerate() {
        let entry = WorkoutEntry::try_from(draft)
            .map_err(|reason| WorkoutValidationError::InvalidEntry { index, reason })?;
        if let Some(first) = seen.insert(entry.order_index(), index) {
            return Err(WorkoutValidationError::DuplicateOrderIndex {
                order_index: entry.order_index(),
                first,
                second: index,
            });
        }
        entries.push(entry);
    }

    Ok(entries)
}

impl TryFrom<WorkoutDraft> for NewWorkout {
    type Error = WorkoutValidationError;

    fn try_from(value: WorkoutDraft) -> Result<Self, Self::Error> {
        if value.title.trim().is_empty() {
            return Err(WorkoutValidationError::EmptyTitle);
        }
        if value.title.chars().count() > TITLE_MAX {
            return Err(WorkoutValidationError::TitleTooLong { max: TITLE_MAX });
        }
        if value.duration_minutes <= 0 {
            return Err(WorkoutValidationError::NonPositiveDuration {
                minutes: value.duration_minutes,
            });
        }
        if value.calories_burned < 0 {
            return Err(WorkoutValidationError::NegativeCalories {
                calories: value.calories_burned,
            });
        }
        let entries = validate_entries(value.entries)?;

        Ok(Self {
            title: value.title,
            description: value.description,
            duration_minutes: value.duration_minutes,
            calories_burned: value.calories_burned,
            entries,
        })
    }
}
