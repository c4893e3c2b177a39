//! Nutrition totals over a list of meals.

use serde::Serialize;

use super::repo_types::Meal;

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Sums a nutrient column; missing and NaN entries count as zero.
pub fn sum_nutrient<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    values
        .into_iter()
        .map(|v| match v {
            Some(x) if !x.is_nan() => x,
            _ => 0.0,
        })
        .sum()
}

/// `"0"` for zero or NaN, otherwise one decimal place with halves rounded away from zero.
pub fn format_total(v: f64) -> String {
    if v == 0.0 || v.is_nan() {
        "0".to_string()
    } else {
        format!("{:.1}", (v * 10.0).round() / 10.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl NutritionTotals {
    pub fn from_meals(meals: &[Meal]) -> Self {
        Self {
            calories: sum_nutrient(meals.iter().map(|m| m.calories)),
            protein: sum_nutrient(meals.iter().map(|m| m.protein)),
            carbs: sum_nutrient(meals.iter().map(|m| m.carbs)),
            fat: sum_nutrient(meals.iter().map(|m| m.fat)),
        }
    }

    pub fn formatted(&self) -> FormattedTotals {
        FormattedTotals {
            calories: format_total(self.calories),
            protein: format_total(self.protein),
            carbs: format_total(self.carbs),
            fat: format_total(self.fat),
        }
    }

    /// Share of calories from each macro, rounded to whole percent.
    pub fn macro_split(&self) -> MacroSplit {
        if self.calories.is_nan() || self.calories <= 0.0 {
            return MacroSplit::default();
        }
        let pct = |grams: f64, kcal_per_g: f64| {
            (grams * kcal_per_g / self.calories * 100.0).round() as i64
        };
        MacroSplit {
            protein: pct(self.protein, KCAL_PER_G_PROTEIN),
            carbs: pct(self.carbs, KCAL_PER_G_CARBS),
            fat: pct(self.fat, KCAL_PER_G_FAT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedTotals {
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MacroSplit {
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

#[derive(Debug, Serialize)]
pub struct MealSummary {
    pub meal_count: usize,
    pub totals: NutritionTotals,
    pub formatted: FormattedTotals,
    pub macro_split: MacroSplit,
}

impl MealSummary {
    pub fn of(meals: &[Meal]) -> Self {
        let totals = NutritionTotals::from_meals(meals);
        Self {
            meal_count: meals.len(),
            formatted: totals.formatted(),
            macro_split: totals.macro_split(),
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn meal(calories: Option<f64>, protein: Option<f64>, carbs: Option<f64>, fat: Option<f64>) -> Meal {
        let now = OffsetDateTime::now_utc();
        Meal {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: "meal".into(),
            calories,
            protein,
            carbs,
            fat,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn missing_values_count_as_zero() {
        let meals = vec![
            meal(Some(100.0), None, None, None),
            meal(None, Some(20.0), None, None),
        ];
        let t = NutritionTotals::from_meals(&meals);
        assert_eq!(t.calories, 100.0);
        assert_eq!(t.protein, 20.0);
        assert_eq!(t.carbs, 0.0);
        assert_eq!(t.fat, 0.0);
    }

    #[test]
    fn nan_counts_as_zero() {
        assert_eq!(sum_nutrient([Some(f64::NAN), Some(2.5), None]), 2.5);
    }

    #[test]
    fn formatting() {
        assert_eq!(format_total(0.0), "0");
        assert_eq!(format_total(f64::NAN), "0");
        assert_eq!(format_total(12.345), "12.3");
        assert_eq!(format_total(7.0), "7.0");
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(format_total(12.25), "12.3");
        assert_eq!(format_total(0.25), "0.3");
        assert_eq!(format_total(0.75), "0.8");
        assert_eq!(format_total(2.45), "2.5");
    }

    #[test]
    fn macro_split_uses_energy_per_gram() {
        let meals = vec![meal(Some(400.0), Some(25.0), Some(50.0), Some(12.0))];
        let split = NutritionTotals::from_meals(&meals).macro_split();
        assert_eq!(split, MacroSplit { protein: 25, carbs: 50, fat: 27 });
    }

    #[test]
    fn macro_split_without_calories_is_zero() {
        let meals = vec![meal(None, Some(25.0), Some(50.0), Some(10.0))];
        assert_eq!(NutritionTotals::from_meals(&meals).macro_split(), MacroSplit::default());
    }

    #[test]
    fn summary_of_empty_list() {
        let s = MealSummary::of(&[]);
        assert_eq!(s.meal_count, 0);
        assert_eq!(s.formatted.calories, "0");
    }
}
