use serde::Serialize;

pub const PER_PAGE: u32 = 12;

pub const DEFAULT_QUERY: &str = "travel";

/// Query behind the header's "browse collections" shortcut.
pub const BROWSE_ALL_QUERY: &str = "collections";

pub const CATEGORY_TAGS: [&str; 8] = [
    "Student & School",
    "Technology",
    "Architecture",
    "Nature",
    "Food",
    "Travel",
    "Minimal",
    "Fitness",
];

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuratedCollection {
    pub title: &'static str,
    pub description: &'static str,
    pub vibe: &'static str,
    pub query: &'static str,
}

pub static CURATED_COLLECTIONS: [CuratedCollection; 4] = [
    CuratedCollection {
        title: "Calm Study",
        description: "Focus-friendly desks, books, and soft light.",
        vibe: "STUDY DESK MINIMAL",
        query: "study desk minimal",
    },
    CuratedCollection {
        title: "Smart Work",
        description: "Modern tech, product shots, and sleek setups.",
        vibe: "TECHNOLOGY WORKSPACE",
        query: "technology workspace",
    },
    CuratedCollection {
        title: "Urban Lines",
        description: "Clean architecture with sharp geometry.",
        vibe: "MODERN ARCHITECTURE",
        query: "modern architecture",
    },
    CuratedCollection {
        title: "Green Escape",
        description: "Nature scenes to reset the mood.",
        vibe: "FOREST LANDSCAPE",
        query: "forest landscape",
    },
];

/// The category tag matching `query`, ignoring ASCII case.
pub fn active_category(query: &str) -> Option<&'static str> {
    CATEGORY_TAGS
        .iter()
        .copied()
        .find(|tag| tag.eq_ignore_ascii_case(query))
}

pub fn find_collection(title: &str) -> Option<&'static CuratedCollection> {
    let title = title.trim();
    CURATED_COLLECTIONS
        .iter()
        .find(|collection| collection.title.eq_ignore_ascii_case(title))
}
