use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::Item;

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Load catalog items from a JSON array or a CSV file with a header row.
///
/// The format is chosen by file extension. Columns follow the product table:
/// `store,category,name,kcal,price_jpy,meal_slot_hint,protein_g,fat_g,carb_g,fiber_g`.
pub fn load_items<P: AsRef<Path>>(path: P) -> Result<Vec<Item>> {
    let path = path.as_ref();
    let items = if is_csv(path) {
        let mut reader = csv::Reader::from_path(path)?;
        reader
            .deserialize()
            .collect::<std::result::Result<Vec<Item>, csv::Error>>()?
    } else {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    };

    tracing::debug!(path = %path.display(), count = items.len(), "loaded catalog items");
    Ok(items)
}

/// Save catalog items as pretty-printed JSON.
pub fn save_items<P: AsRef<Path>>(path: P, items: &[Item]) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SlotHint;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_load_json_and_save_roundtrip() {
        let json = r#"[
            {"store": "Seven", "category": "rice", "name": "Onigiri", "kcal": 180, "price_jpy": 160,
             "meal_slot_hint": "breakfast", "protein_g": 4.1, "fat_g": 1.2, "carb_g": 39.0, "fiber_g": 0.5}
        ]"#;

        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let items = load_items(file.path()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].slot_hint, SlotHint::Breakfast);
        assert_eq!(items[0].price, 160);

        let out = Builder::new().suffix(".json").tempfile().unwrap();
        save_items(out.path(), &items).unwrap();
        let reloaded = load_items(out.path()).unwrap();
        assert_eq!(reloaded[0].name, "Onigiri");
        assert_eq!(reloaded[0].kcal, 180);
    }

    #[test]
    fn test_load_csv() {
        let csv = "store,category,name,kcal,price_jpy,meal_slot_hint,protein_g,fat_g,carb_g,fiber_g\n\
                   FamilyMart,bento,Karaage Bento,720,550,lunch,28.5,30.1,85.0,3.2\n\
                   FamilyMart,salad,Green Salad,60,298,any,2.0,0.5,9.0,2.8\n";

        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        let items = load_items(file.path()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].slot_hint, SlotHint::Lunch);
        assert_eq!(items[1].slot_hint, SlotHint::Any);
        assert!((items[1].fiber_g - 2.8).abs() < 1e-9);
        assert!(items[1].url.is_none());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{not json").unwrap();
        assert!(load_items(file.path()).is_err());
    }
}
