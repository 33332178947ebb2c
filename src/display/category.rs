//! Category display formatting

use crate::models::CategorySet;

/// Format the category list, one per line in display order
pub fn format_category_list(categories: &CategorySet) -> String {
    if categories.is_empty() {
        return "No categories defined.\n\nAdd one with 'budget category add <NAME>'.\n".to_string();
    }

    let last = categories.len() - 1;
    categories
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let prefix = if i == last { "└── " } else { "├── " };
            format!("{}{}\n", prefix, name)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories() {
        let output = format_category_list(&CategorySet::defaults());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "├── Food");
        assert_eq!(lines[4], "└── Other");
    }

    #[test]
    fn test_empty() {
        assert!(format_category_list(&CategorySet::empty()).starts_with("No categories"));
    }
}
