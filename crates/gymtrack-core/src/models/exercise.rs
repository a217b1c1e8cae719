// ABOUTME: Exercise library models
// ABOUTME: Exercise record, source tagging, creation input, and free exercise DB import records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GymId;
use crate::constants::exercise_vocabulary::IMPORTED_IMAGE_BASE_URL;

/// Where an exercise came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseSource {
    /// Bulk imported from the free exercise database
    Imported,
    /// Created by a trainer
    #[default]
    Custom,
}

impl ExerciseSource {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Imported => "IMPORTED",
            Self::Custom => "CUSTOM",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "IMPORTED" => Self::Imported,
            _ => Self::Custom,
        }
    }
}

/// Creator of a custom exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseCreator {
    /// User id
    pub id: Uuid,
    /// Display name
    pub name: String,
}

/// An exercise in the library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Step-by-step instructions
    pub instructions: Option<String>,
    /// Category (strength, cardio, ...)
    pub category: Option<String>,
    /// Main muscle worked
    pub primary_muscle: Option<String>,
    /// Required equipment
    pub equipment: Option<String>,
    /// Image URLs
    pub images: Vec<String>,
    /// Origin of the record
    pub source: ExerciseSource,
    /// Identifier in the source dataset
    pub source_id: Option<String>,
    /// Offered in the workout editor
    pub is_active: bool,
    /// Visible to every gym
    pub is_global: bool,
    /// Owning gym for custom exercises
    pub gym_id: Option<GymId>,
    /// Who created it
    pub created_by: Option<ExerciseCreator>,
    /// When it was created
    pub created_at: DateTime<Utc>,
}

/// Input for inserting an exercise
#[derive(Debug, Clone, Default)]
pub struct NewExercise {
    /// Display name
    pub name: String,
    /// Instructions
    pub instructions: Option<String>,
    /// Category
    pub category: Option<String>,
    /// Main muscle worked
    pub primary_muscle: Option<String>,
    /// Required equipment
    pub equipment: Option<String>,
    /// Image URLs
    pub images: Vec<String>,
    /// Origin of the record
    pub source: ExerciseSource,
    /// Identifier in the source dataset
    pub source_id: Option<String>,
    /// Visible to every gym
    pub is_global: bool,
    /// Owning gym
    pub gym_id: Option<GymId>,
    /// Creating user
    pub created_by_id: Option<Uuid>,
}

/// One record of the free exercise database JSON export
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedExercise {
    /// Dataset id
    pub id: String,
    /// Display name
    pub name: String,
    /// push / pull / static
    pub force: Option<String>,
    /// beginner / intermediate / expert
    pub level: Option<String>,
    /// compound / isolation
    pub mechanic: Option<String>,
    /// Required equipment
    pub equipment: Option<String>,
    /// Muscles worked, most important first
    #[serde(default)]
    pub primary_muscles: Vec<String>,
    /// Secondary muscles
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
    /// Instruction steps
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Category
    pub category: Option<String>,
    /// Image paths relative to the dataset root
    #[serde(default)]
    pub images: Vec<String>,
}

impl ImportedExercise {
    /// Convert to a global imported library entry
    #[must_use]
    pub fn into_new_exercise(self) -> NewExercise {
        let instructions = if self.instructions.is_empty() {
            None
        } else {
            Some(self.instructions.join("\n\n"))
        };
        NewExercise {
            name: self.name,
            instructions,
            category: self.category.filter(|c| !c.is_empty()),
            primary_muscle: self.primary_muscles.into_iter().next(),
            equipment: self.equipment.filter(|e| !e.is_empty()),
            images: self
                .images
                .iter()
                .map(|path| format!("{IMPORTED_IMAGE_BASE_URL}/{path}"))
                .collect(),
            source: ExerciseSource::Imported,
            source_id: Some(self.id),
            is_global: true,
            gym_id: None,
            created_by_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imported_record_conversion() {
        let json = r#"{
            "id": "Barbell_Squat",
            "name": "Barbell Squat",
            "force": "push",
            "level": "beginner",
            "mechanic": "compound",
            "equipment": "barbell",
            "primaryMuscles": ["quadriceps", "glutes"],
            "secondaryMuscles": ["hamstrings"],
            "instructions": ["Set up the bar.", "Squat down."],
            "category": "strength",
            "images": ["Barbell_Squat/0.jpg"]
        }"#;
        let record: ImportedExercise = serde_json::from_str(json).unwrap();
        let exercise = record.into_new_exercise();

        assert_eq!(exercise.name, "Barbell Squat");
        assert_eq!(exercise.primary_muscle.as_deref(), Some("quadriceps"));
        assert_eq!(
            exercise.instructions.as_deref(),
            Some("Set up the bar.\n\nSquat down.")
        );
        assert_eq!(
            exercise.images,
            vec![format!("{IMPORTED_IMAGE_BASE_URL}/Barbell_Squat/0.jpg")]
        );
        assert_eq!(exercise.source, ExerciseSource::Imported);
        assert_eq!(exercise.source_id.as_deref(), Some("Barbell_Squat"));
        assert!(exercise.is_global);
    }

    #[test]
    fn test_imported_record_with_missing_lists() {
        let record: ImportedExercise =
            serde_json::from_str(r#"{"id": "x", "name": "Plank", "category": "strength"}"#).unwrap();
        let exercise = record.into_new_exercise();
        assert!(exercise.instructions.is_none());
        assert!(exercise.primary_muscle.is_none());
        assert!(exercise.images.is_empty());
    }
}
