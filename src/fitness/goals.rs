use std::str::FromStr;

use serde::Serialize;

use super::routines::{WorkoutDay, CUTTING, GAIN_WEIGHT, LOSE_FAT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Goal {
    LoseFat,
    GainWeight,
    Cutting,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown goal: {0}")]
pub struct UnknownGoal(pub String);

impl FromStr for Goal {
    type Err = UnknownGoal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "loseFat" => Ok(Goal::LoseFat),
            "gainWeight" => Ok(Goal::GainWeight),
            "cutting" => Ok(Goal::Cutting),
            other => Err(UnknownGoal(other.to_string())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Suggestion {
    pub goal: Goal,
    pub daily_calories: u32,
    pub workouts: &'static [&'static str],
    pub routine: &'static [WorkoutDay],
}

const LOSE_FAT_WORKOUTS: &[&str] = &["Cardio", "Strength Training", "High-Intensity Interval Training"];
const GAIN_WEIGHT_WORKOUTS: &[&str] = &["Weightlifting", "Compound Exercises", "Calorie-Dense Meals"];
const CUTTING_WORKOUTS: &[&str] = &["HIIT", "Bodyweight Exercises", "Moderate Cardio"];

impl Goal {
    pub fn suggestion(self) -> Suggestion {
        let (daily_calories, workouts, routine) = match self {
            Goal::LoseFat => (1500, LOSE_FAT_WORKOUTS, LOSE_FAT),
            Goal::GainWeight => (2500, GAIN_WEIGHT_WORKOUTS, GAIN_WEIGHT),
            Goal::Cutting => (1800, CUTTING_WORKOUTS, CUTTING),
        };
        Suggestion {
            goal: self,
            daily_calories,
            workouts,
            routine,
        }
    }
}
