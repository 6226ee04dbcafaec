use chrono::Local;
use clap::Args;

use fooddiary_core::{
    DiaryController, EntryId, FoodEntry, FoodEntryPatch, FoodEntryStore, MealType, NewFoodEntry,
};

use super::parse_date;

#[derive(Args)]
pub struct AddArgs {
    /// Food name
    pub name: String,

    /// Meal (breakfast, lunch, dinner, snack)
    #[arg(long = "meal", short = 'm', value_name = "MEAL")]
    pub meal_type: MealType,

    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long, short)]
    pub date: Option<String>,

    /// Quantity in `unit`
    #[arg(long, short, default_value_t = 1.0)]
    pub quantity: f64,

    /// Unit (serving, cup, piece, slice, bowl, plate, gram, ounce, ...)
    #[arg(long, default_value = "serving")]
    pub unit: String,

    #[arg(long, default_value_t = 0)]
    pub calories: u32,

    /// Protein in grams
    #[arg(long)]
    pub protein: Option<f64>,

    /// Carbohydrates in grams
    #[arg(long)]
    pub carbs: Option<f64>,

    /// Fat in grams
    #[arg(long)]
    pub fat: Option<f64>,

    #[arg(long)]
    pub notes: Option<String>,
}

impl AddArgs {
    fn to_new_entry(&self) -> Result<NewFoodEntry, String> {
        let date = match &self.date {
            Some(d) => parse_date(d)?,
            None => Local::now().date_naive(),
        };

        Ok(NewFoodEntry {
            date,
            meal_type: self.meal_type,
            food_name: self.name.clone(),
            quantity: self.quantity,
            unit: self.unit.clone(),
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            notes: self.notes.clone(),
        })
    }

    pub async fn run<S: FoodEntryStore + ?Sized>(
        &self,
        diary: &mut DiaryController<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let input = self.to_new_entry()?;
        let created = diary.add_entry(input).await?;
        if diary.selected_date() != created.date {
            diary.select_date(created.date).await?;
        }

        println!("Added food entry:");
        println!();
        print_entry_details(&created);
        if let Some(day) = diary.day_view() {
            println!();
            println!("{}: {}", day.date, day.nutrition);
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct EditArgs {
    /// Entry ID (UUID)
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    /// Meal (breakfast, lunch, dinner, snack)
    #[arg(long = "meal", short = 'm', value_name = "MEAL")]
    pub meal_type: Option<MealType>,

    #[arg(long, short)]
    pub quantity: Option<f64>,

    #[arg(long)]
    pub unit: Option<String>,

    #[arg(long)]
    pub calories: Option<u32>,

    #[arg(long, conflicts_with = "clear_macros")]
    pub protein: Option<f64>,

    #[arg(long, conflicts_with = "clear_macros")]
    pub carbs: Option<f64>,

    #[arg(long, conflicts_with = "clear_macros")]
    pub fat: Option<f64>,

    #[arg(long, conflicts_with = "clear_notes")]
    pub notes: Option<String>,

    /// Remove protein, carbs and fat from the entry
    #[arg(long)]
    pub clear_macros: bool,

    /// Remove the entry's notes
    #[arg(long)]
    pub clear_notes: bool,
}

impl EditArgs {
    fn to_patch(&self) -> FoodEntryPatch {
        let macro_value = |value: Option<f64>| {
            if self.clear_macros {
                Some(None)
            } else {
                value.map(Some)
            }
        };

        FoodEntryPatch {
            meal_type: self.meal_type,
            food_name: self.name.clone(),
            quantity: self.quantity,
            unit: self.unit.clone(),
            calories: self.calories,
            protein: macro_value(self.protein),
            carbs: macro_value(self.carbs),
            fat: macro_value(self.fat),
            notes: if self.clear_notes {
                Some(None)
            } else {
                self.notes.clone().map(Some)
            },
        }
    }

    pub async fn run<S: FoodEntryStore + ?Sized>(
        &self,
        diary: &mut DiaryController<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let id = parse_id(&self.id)?;
        let patch = self.to_patch();
        if patch.is_empty() {
            return Err("Nothing to update. Pass at least one field to change.".into());
        }

        let updated = diary.update_entry(id, patch).await?;

        println!("Updated food entry:");
        println!();
        print_entry_details(&updated);
        Ok(())
    }
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Entry ID (UUID)
    pub id: String,
}

impl DeleteArgs {
    pub async fn run<S: FoodEntryStore + ?Sized>(
        &self,
        diary: &mut DiaryController<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let id = parse_id(&self.id)?;
        diary.delete_entry(id).await?;
        println!("Deleted food entry {}", id);
        Ok(())
    }
}

fn parse_id(value: &str) -> Result<EntryId, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid entry ID: {}", value))
}

fn print_entry_details(entry: &FoodEntry) {
    println!("  Food: {}", entry.food_name);
    println!("  Date: {}", entry.date);
    println!("  Meal: {}", entry.meal_type);
    println!("  Amount: {} {}", entry.quantity, entry.unit);
    println!("  Calories: {}", entry.calories);
    if let Some(macros) = entry.macros_line() {
        println!("  {}", macros);
    }
    if let Some(notes) = &entry.notes {
        println!("  Notes: {}", notes);
    }
    println!();
    println!("Entry ID: {}", entry.id);
}
