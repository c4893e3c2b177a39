//! Resting and total daily energy expenditure (Mifflin-St Jeor).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalculatorInput {
    pub sex: Sex,
    pub age: f64,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity: ActivityLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyEstimate {
    pub bmr: f64,
    pub tdee: f64,
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("{0} must be a positive number")]
pub struct InvalidInput(pub &'static str);

pub fn estimate(input: &CalculatorInput) -> Result<EnergyEstimate, InvalidInput> {
    for (name, v) in [
        ("age", input.age),
        ("weight_kg", input.weight_kg),
        ("height_cm", input.height_cm),
    ] {
        if !v.is_finite() || v <= 0.0 {
            return Err(InvalidInput(name));
        }
    }

    let offset = match input.sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    let bmr = 10.0 * input.weight_kg + 6.25 * input.height_cm - 5.0 * input.age + offset;
    let tdee = bmr * input.activity.multiplier();
    Ok(EnergyEstimate {
        bmr: bmr.round(),
        tdee: tdee.round(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(sex: Sex, activity: ActivityLevel) -> CalculatorInput {
        CalculatorInput {
            sex,
            age: 30.0,
            weight_kg: 80.0,
            height_cm: 180.0,
            activity,
        }
    }

    #[test]
    fn male_sedentary() {
        // 800 + 1125 - 150 + 5
        let e = estimate(&input(Sex::Male, ActivityLevel::Sedentary)).unwrap();
        assert_eq!(e, EnergyEstimate { bmr: 1780.0, tdee: 2136.0 });
    }

    #[test]
    fn female_very_active() {
        let e = estimate(&input(Sex::Female, ActivityLevel::VeryActive)).unwrap();
        assert_eq!(e.bmr, 1614.0);
        assert_eq!(e.tdee, (1614.0_f64 * 1.9).round());
    }

    #[test]
    fn rejects_non_positive_values() {
        let mut bad = input(Sex::Male, ActivityLevel::Light);
        bad.weight_kg = 0.0;
        assert_eq!(estimate(&bad).unwrap_err(), InvalidInput("weight_kg"));
        bad.weight_kg = 70.0;
        bad.age = -1.0;
        assert_eq!(
            estimate(&bad).unwrap_err().to_string(),
            "age must be a positive number"
        );
    }

    #[test]
    fn parses_request_body() {
        let i: CalculatorInput = serde_json::from_str(
            r#"{"sex":"female","age":25,"weight_kg":60,"height_cm":165,"activity":"very_active"}"#,
        )
        .unwrap();
        assert_eq!(i.sex, Sex::Female);
        assert_eq!(i.activity, ActivityLevel::VeryActive);
    }
}
