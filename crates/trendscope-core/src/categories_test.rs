use std::io::Write;

use super::*;

fn write_yaml(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn normalize_hashtag_strips_hash_and_lowercases() {
    assert_eq!(normalize_hashtag("#FoodReels"), Some("foodreels".to_string()));
    assert_eq!(normalize_hashtag("  gym "), Some("gym".to_string()));
}

#[test]
fn normalize_hashtag_rejects_blank() {
    assert_eq!(normalize_hashtag("#"), None);
    assert_eq!(normalize_hashtag("   "), None);
}

#[test]
fn normalize_hashtags_keeps_first_seen_order() {
    let tags = normalize_hashtags(["Coffee", "#latteart", "coffee", "", "COFFEESHOP"]);
    assert_eq!(tags, vec!["coffee", "latteart", "coffeeshop"]);
}

#[test]
fn builtin_resolves_known_category() {
    let catalog = CategoryCatalog::builtin();
    let resolved = catalog.resolve("Restaurant");
    assert_eq!(resolved.category, "restaurant");
    assert!(!resolved.used_fallback);
    assert_eq!(resolved.hashtags.first().map(String::as_str), Some("restaurant"));
    assert!(resolved.hashtags.contains(&"forkyeah".to_string()));
}

#[test]
fn builtin_falls_back_to_generic() {
    let catalog = CategoryCatalog::builtin();
    let resolved = catalog.resolve("laundromat");
    assert!(resolved.used_fallback);
    assert_eq!(resolved.category, "laundromat");
    assert_eq!(
        resolved.hashtags,
        vec!["trending", "viral", "explorepage", "reels", "fyp"]
    );
}

#[test]
fn builtin_lists_categories_alphabetically() {
    let catalog = CategoryCatalog::builtin();
    let names: Vec<&str> = catalog.iter().map(|(name, _)| name).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert!(names.contains(&"gym"));
    assert!(names.contains(&GENERIC_CATEGORY));
}

#[test]
fn from_file_loads_and_normalizes() {
    let file = write_yaml(
        "categories:\n  - name: Ramen\n    hashtags: ['#Ramen', 'noodles', 'ramen']\n",
    );
    let catalog = CategoryCatalog::from_file(file.path()).unwrap();
    let resolved = catalog.resolve("ramen");
    assert!(!resolved.used_fallback);
    assert_eq!(resolved.hashtags, vec!["ramen", "noodles"]);
}

#[test]
fn from_file_without_generic_falls_back_to_empty() {
    let file = write_yaml("categories:\n  - name: ramen\n    hashtags: [ramen]\n");
    let catalog = CategoryCatalog::from_file(file.path()).unwrap();
    let resolved = catalog.resolve("sushi");
    assert!(resolved.used_fallback);
    assert!(resolved.hashtags.is_empty());
}

#[test]
fn from_file_rejects_empty_hashtags() {
    let file = write_yaml("categories:\n  - name: ramen\n    hashtags: ['#']\n");
    let err = CategoryCatalog::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("has no hashtags"), "got: {err}");
}

#[test]
fn from_file_rejects_duplicate_names() {
    let file = write_yaml(
        "categories:\n  - name: Ramen\n    hashtags: [a]\n  - name: ramen\n    hashtags: [b]\n",
    );
    let err = CategoryCatalog::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("duplicate category name"), "got: {err}");
}

#[test]
fn from_file_rejects_blank_name() {
    let file = write_yaml("categories:\n  - name: '  '\n    hashtags: [a]\n");
    let err = CategoryCatalog::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("non-empty"), "got: {err}");
}

#[test]
fn from_file_reports_missing_file() {
    let err = CategoryCatalog::from_file(Path::new("/nonexistent/categories.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::CategoriesFileIo { .. }));
}

#[test]
fn load_repository_categories_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("categories.yaml");
    let catalog = CategoryCatalog::load(Some(&path));
    assert!(catalog.is_ok(), "failed to load categories.yaml: {catalog:?}");
    assert!(!catalog.unwrap().resolve(GENERIC_CATEGORY).hashtags.is_empty());
}
