//! Plain-text renderings of the diary read models.

use chrono::{Datelike, NaiveDate};

use fooddiary_core::{DailyNutrition, DayLog, FoodEntry, MonthView, RangeSummary};

const CELL_WIDTH: usize = 8;

/// The daily log: totals followed by one section per meal
pub fn day_log(log: &DayLog) -> String {
    let mut lines = vec![
        log.date.format("%A, %B %-d, %Y").to_string(),
        log.nutrition.to_string(),
    ];

    for (meal_type, entries) in log.meals.iter() {
        lines.push(String::new());
        lines.push(format!(
            "{} ({})",
            capitalize(meal_type.as_str()),
            items(entries.len())
        ));
        if entries.is_empty() {
            lines.push("  No items logged".to_string());
        }
        for entry in entries {
            lines.extend(entry_lines(entry));
        }
    }
    join(lines)
}

fn entry_lines(entry: &FoodEntry) -> Vec<String> {
    let mut lines = vec![
        format!("  {} [{}]", entry.food_name, entry.id),
        format!(
            "    {} {} \u{2022} {} calories",
            entry.quantity, entry.unit, entry.calories
        ),
    ];
    if let Some(macros) = entry.macros_line() {
        lines.push(format!("    {}", macros));
    }
    if let Some(notes) = &entry.notes {
        lines.push(format!("    {}", notes));
    }
    lines
}

/// One line per day followed by the range total
pub fn range_summary(summary: &RangeSummary) -> String {
    let mut lines = Vec::new();
    let mut total = Totals::default();
    for (date, day) in summary {
        lines.push(format!("{}  {}", date, day));
        total.add(day);
    }

    if let (Some(first), Some(last)) = (summary.keys().next(), summary.keys().next_back()) {
        lines.push(String::new());
        lines.push(format!(
            "Total ({} to {}): Calories: {} | Protein: {:.0}g | Carbs: {:.0}g | Fat: {:.0}g",
            first, last, total.calories, total.protein, total.carbs, total.fat
        ));
        let days = summary.len() as f64;
        lines.push(format!(
            "Daily average: {:.0} calories",
            total.calories as f64 / days
        ));
    }
    join(lines)
}

#[derive(Default)]
struct Totals {
    calories: u64,
    protein: f64,
    carbs: f64,
    fat: f64,
}

impl Totals {
    fn add(&mut self, day: &DailyNutrition) {
        self.calories += day.total_calories;
        self.protein += day.total_protein;
        self.carbs += day.total_carbs;
        self.fat += day.total_fat;
    }
}

/// Month grid with weeks starting on Sunday. Each day cell shows the day
/// number and, below it, the calories logged that day. `selected` is marked
/// with `*`.
pub fn calendar(view: &MonthView, selected: Option<NaiveDate>) -> String {
    let first = view.month.first_day();
    let header: String = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        .iter()
        .map(|name| cell(name))
        .collect();
    let mut lines = vec![first.format("%B %Y").to_string(), header];

    let lead = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; lead];
    cells.extend(view.month.range().days().map(Some));

    for week in cells.chunks(7) {
        let mut days = String::new();
        let mut calories = String::new();
        for date in week {
            let Some(date) = date else {
                days.push_str(&cell(""));
                calories.push_str(&cell(""));
                continue;
            };

            let marker = if Some(*date) == selected { "*" } else { " " };
            days.push_str(&cell(&format!("{}{}", date.day(), marker)));

            let badge = view
                .days
                .get(date)
                .filter(|day| day.total_calories > 0)
                .map(|day| format!("{}cal ", day.total_calories))
                .unwrap_or_default();
            calories.push_str(&cell(&badge));
        }
        lines.push(days.trim_end().to_string());
        lines.push(calories.trim_end().to_string());
    }
    join(lines)
}

fn cell(text: &str) -> String {
    format!("{:>width$}", text, width = CELL_WIDTH)
}

fn join(lines: Vec<String>) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn items(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", count)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
