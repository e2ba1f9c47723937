use rand::seq::SliceRandom;
use rand::thread_rng;
use serde::{Deserialize, Serialize};

/// Word categories offered during setup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    General,
    Places,
    Objects,
    Animals,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::General,
        Category::Places,
        Category::Objects,
        Category::Animals,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Places => "Places",
            Category::Objects => "Objects",
            Category::Animals => "Animals",
        }
    }
}

const GENERAL: &[&str] = &[
    "Apple", "Book", "Car", "Dog", "Elephant", "Guitar", "House", "Ice Cream", "Pizza", "Sun",
];
const PLACES: &[&str] = &[
    "School", "Hospital", "Park", "Beach", "Cinema", "Library", "Restaurant", "Airport",
];
const OBJECTS: &[&str] = &[
    "Chair", "Table", "Computer", "Phone", "Pen", "Watch", "Shoes", "Glasses",
];
const ANIMALS: &[&str] = &[
    "Cat", "Lion", "Tiger", "Bear", "Rabbit", "Snake", "Bird", "Fish",
];

/// Source of secret words
pub trait WordProvider: Send + Sync {
    /// Draw a word from the given category; never empty
    fn random_word(&self, category: Category) -> String;
}

/// The built-in word lists
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticWordProvider;

impl StaticWordProvider {
    /// Every word in a category
    pub fn words(category: Category) -> &'static [&'static str] {
        match category {
            Category::General => GENERAL,
            Category::Places => PLACES,
            Category::Objects => OBJECTS,
            Category::Animals => ANIMALS,
        }
    }
}

impl WordProvider for StaticWordProvider {
    fn random_word(&self, category: Category) -> String {
        let mut rng = thread_rng();
        // Every list is a non-empty constant
        Self::words(category)
            .choose(&mut rng)
            .copied()
            .unwrap_or(GENERAL[0])
            .to_string()
    }
}
