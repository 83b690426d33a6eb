//! Nutrition label text parsing
//!
//! Extracts nutrient values from OCR'd label text with per-nutrient regexes
//! over English/German keyword sets. Unmatched fields stay at 0; decimal
//! commas are accepted.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::NutritionRecord;

/// Sodium readings above this are assumed to be micrograms from a mis-scaled
/// OCR read and are divided by 1000. Preserved as-is, not applied elsewhere.
const SODIUM_MICROGRAM_THRESHOLD: f64 = 10_000.0;

lazy_static! {
    static ref CALORIES_RE: Regex = nutrient_re("kcal|calories?|kalorien|energie|brennwert");
    static ref PROTEIN_RE: Regex = nutrient_re("proteins?|eiwei(?:ß|ss)");
    static ref CARBS_RE: Regex = nutrient_re("carbohydrates?|carbs?|kohlenhydrate");
    static ref FAT_RE: Regex = nutrient_re("fat|fett");
    static ref FIBER_RE: Regex = nutrient_re("fib(?:er|re)|ballaststoffe");
    static ref SUGAR_RE: Regex = nutrient_re("sugars?|zucker");
    static ref SODIUM_RE: Regex = nutrient_re("sodium|natrium|salt|salz");
    static ref QUANTITY_RE: Regex =
        Regex::new(r"(?i)(?:per|pro|je)\s*(\d+(?:[.,]\d+)?)\s*g").unwrap();
}

/// Keyword followed by the first number on the same stretch of text
fn nutrient_re(keywords: &str) -> Regex {
    Regex::new(&format!(
        r"(?im)(?:{keywords})[^0-9\r\n]*(\d+(?:[.,]\d+)?)"
    ))
    .unwrap()
}

fn extract(re: &Regex, text: &str) -> f64 {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Parse raw label text into a partial record.
///
/// The record gets a fresh id, the given name, and the quantity stated on
/// the label (`per 100g` style), defaulting to 100 g.
pub fn parse_label_text(name: &str, raw_text: &str) -> NutritionRecord {
    let quantity = {
        let q = extract(&QUANTITY_RE, raw_text);
        if q > 0.0 {
            q
        } else {
            100.0
        }
    };

    let mut record = NutritionRecord::new(name, quantity);
    record.calories = extract(&CALORIES_RE, raw_text);
    record.protein = extract(&PROTEIN_RE, raw_text);
    record.carbs = extract(&CARBS_RE, raw_text);
    record.fat = extract(&FAT_RE, raw_text);
    record.fiber = extract(&FIBER_RE, raw_text);
    record.sugar = extract(&SUGAR_RE, raw_text);

    let sodium = extract(&SODIUM_RE, raw_text);
    record.sodium = if sodium > SODIUM_MICROGRAM_THRESHOLD {
        sodium / 1000.0
    } else {
        sodium
    };

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_english_label() {
        let text = "Nutrition Facts per 100g\n\
                    Calories 250 kcal\n\
                    Fat 12 g\n\
                    Carbohydrates 30 g\n\
                    Sugars 8 g\n\
                    Fiber 3 g\n\
                    Protein 6 g\n\
                    Sodium 480 mg";
        let rec = parse_label_text("Crackers", text);

        assert_eq!(rec.name, "Crackers");
        assert_eq!(rec.quantity_grams, 100.0);
        assert_eq!(rec.calories, 250.0);
        assert_eq!(rec.fat, 12.0);
        assert_eq!(rec.carbs, 30.0);
        assert_eq!(rec.sugar, 8.0);
        assert_eq!(rec.fiber, 3.0);
        assert_eq!(rec.protein, 6.0);
        assert_eq!(rec.sodium, 480.0);
    }

    #[test]
    fn test_german_label_with_decimal_commas() {
        let text = "Nährwerte pro 100g\n\
                    Brennwert 412 kcal\n\
                    Fett 18,5 g\n\
                    Kohlenhydrate 52 g\n\
                    Zucker 22,1 g\n\
                    Ballaststoffe 4,2 g\n\
                    Eiweiß 7,5 g\n\
                    Natrium 320 mg";
        let rec = parse_label_text("Kekse", text);

        assert_eq!(rec.calories, 412.0);
        assert_eq!(rec.fat, 18.5);
        assert_eq!(rec.carbs, 52.0);
        assert_eq!(rec.sugar, 22.1);
        assert_eq!(rec.fiber, 4.2);
        assert_eq!(rec.protein, 7.5);
        assert_eq!(rec.sodium, 320.0);
    }

    #[test]
    fn test_sodium_microgram_heuristic() {
        let rec = parse_label_text("Soup", "Sodium 2300000");
        assert_eq!(rec.sodium, 2300.0);

        // At or below the threshold the value passes through untouched
        let rec = parse_label_text("Soup", "Sodium 9500");
        assert_eq!(rec.sodium, 9500.0);
    }

    #[test]
    fn test_unmatched_fields_default_to_zero() {
        let rec = parse_label_text("Mystery", "Calories 100");
        assert_eq!(rec.calories, 100.0);
        assert_eq!(rec.protein, 0.0);
        assert_eq!(rec.carbs, 0.0);
        assert_eq!(rec.fat, 0.0);
        assert_eq!(rec.sodium, 0.0);
    }

    #[test]
    fn test_stated_serving_quantity() {
        let rec = parse_label_text("Bar", "per 45g\nCalories 180");
        assert_eq!(rec.quantity_grams, 45.0);
        assert_eq!(rec.calories, 180.0);
    }

    #[test]
    fn test_garbage_text_yields_empty_record() {
        let rec = parse_label_text("Noise", "lorem ipsum dolor");
        assert_eq!(rec.calories, 0.0);
        assert_eq!(rec.quantity_grams, 100.0);
    }
}
