/// Fallback when an aggregator category is unknown
pub const DEFAULT_CATEGORY_ID: &str = "2000";

/// Lowercased aggregator category name → Torznab id
const CATEGORY_IDS: &[(&str, &str)] = &[
    ("movies", "2000"),
    ("movies foreign", "2010"),
    ("movies other", "2020"),
    ("movies sd", "2030"),
    ("movies hd", "2040"),
    ("movies uhd", "2045"),
    ("movies 4k", "2045"),
    ("movies bluray", "2050"),
    ("movies 3d", "2060"),
    ("tv", "5000"),
    ("tv foreign", "5020"),
    ("tv sd", "5030"),
    ("tv hd", "5040"),
    ("tv uhd", "5045"),
    ("tv 4k", "5045"),
    ("tv other", "5050"),
    ("tv sport", "5060"),
    ("tv anime", "5070"),
    ("anime", "5070"),
    ("tv documentary", "5080"),
    ("audio", "3000"),
    ("audio mp3", "3010"),
    ("audio video", "3020"),
    ("audio audiobook", "3030"),
    ("audio lossless", "3040"),
    ("console", "1000"),
    ("pc", "4000"),
    ("xxx", "6000"),
    ("books", "7000"),
    ("other", "8000"),
];

/// Torznab id for an aggregator category name, case-insensitive
pub fn category_id_for(name: &str) -> &'static str {
    let name = name.trim().to_lowercase();
    CATEGORY_IDS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, id)| *id)
        .unwrap_or(DEFAULT_CATEGORY_ID)
}

/// `X000` parent of a Torznab id
pub fn parent_category(id: &str) -> String {
    match id.chars().next() {
        Some(first) => format!("{}000", first),
        None => String::new(),
    }
}

/// True when `id` or its parent was requested
pub fn matches_requested(id: &str, requested: &[String]) -> bool {
    let parent = parent_category(id);
    requested.iter().any(|r| r == id || *r == parent)
}
