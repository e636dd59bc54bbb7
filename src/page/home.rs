use crate::waste::bucket::WasteCategory;

pub fn render() -> String {
    let categories: Vec<&str> = WasteCategory::all()
        .iter()
        .map(|category| category.name())
        .collect();

    [
        "Waste Sorter".to_string(),
        String::new(),
        "Snap a photo of your waste and find out which bin it belongs in.".to_string(),
        format!("Categories: {}", categories.join(", ")),
        String::new(),
        "  waste-sorter guide               learn how each category is handled".to_string(),
        "  waste-sorter classify <FILE>...  classify one or more photos".to_string(),
    ]
    .join("\n")
}
