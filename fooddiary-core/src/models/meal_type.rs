use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed meal classification. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// All meal types in display order
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealType::ALL
            .into_iter()
            .find(|meal| meal.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Invalid meal type '{}'. Valid options: breakfast, lunch, dinner, snack",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_display() {
        assert_eq!(format!("{}", MealType::Breakfast), "breakfast");
        assert_eq!(format!("{}", MealType::Lunch), "lunch");
        assert_eq!(format!("{}", MealType::Dinner), "dinner");
        assert_eq!(format!("{}", MealType::Snack), "snack");
    }

    #[test]
    fn test_meal_type_from_str() {
        assert_eq!(
            MealType::from_str("breakfast").unwrap(),
            MealType::Breakfast
        );
        assert_eq!(MealType::from_str("LUNCH").unwrap(), MealType::Lunch);
        assert_eq!(MealType::from_str(" Dinner ").unwrap(), MealType::Dinner);
        assert_eq!(MealType::from_str("snack").unwrap(), MealType::Snack);
    }

    #[test]
    fn test_meal_type_from_str_invalid() {
        let err = MealType::from_str("brunch").unwrap_err();
        assert!(err.contains("brunch"));
        assert!(MealType::from_str("").is_err());
    }

    #[test]
    fn test_meal_type_all_in_display_order() {
        let mut sorted = MealType::ALL;
        sorted.sort();
        assert_eq!(sorted, MealType::ALL);
        assert_eq!(MealType::ALL[0], MealType::Breakfast);
    }

    #[test]
    fn test_meal_type_json() {
        let json = serde_json::to_string(&MealType::Snack).unwrap();
        assert_eq!(json, "\"snack\"");
        let parsed: MealType = serde_json::from_str("\"lunch\"").unwrap();
        assert_eq!(parsed, MealType::Lunch);
    }
}
