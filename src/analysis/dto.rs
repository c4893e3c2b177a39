use bytes::Bytes;
use serde::{Serialize, Serializer};

use crate::meals::repo_types::Meal;

/// Tagged outcome of a form action: `{success, data}` or `{success: false, error}`.
#[derive(Debug, Serialize)]
pub struct ActionResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ActionResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Nutrition value shown to the user; missing estimates render as `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NutrientValue {
    Amount(f64),
    NotAvailable,
}

impl From<Option<f64>> for NutrientValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(NutrientValue::NotAvailable, NutrientValue::Amount)
    }
}

impl Serialize for NutrientValue {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            NutrientValue::Amount(v) => s.serialize_f64(*v),
            NutrientValue::NotAvailable => s.serialize_str("N/A"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MacroValues {
    pub protein: NutrientValue,
    pub carbs: NutrientValue,
    pub fat: NutrientValue,
}

#[derive(Debug, Serialize)]
pub struct AnalyzedMeal {
    pub name: String,
    pub calories: NutrientValue,
    pub macros: MacroValues,
}

impl From<&Meal> for AnalyzedMeal {
    fn from(m: &Meal) -> Self {
        Self {
            name: m.name.clone(),
            calories: m.calories.into(),
            macros: MacroValues {
                protein: m.protein.into(),
                carbs: m.carbs.into(),
                fat: m.fat.into(),
            },
        }
    }
}

/// The `image` part of the upload form.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub body: Bytes,
    pub content_type: String,
}
