//! Animal catalog.
//!
//! Animals are immutable catalog entries referenced by value. The catalog
//! is the only source of selectable animals; lookups accept either the
//! stable id or the display name.

use std::fmt;

use serde::Serialize;

/// An animal that can observe or be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    /// Stable identifier (e.g., "dog").
    pub id: &'static str,
    /// Display name (e.g., "House Fly").
    pub name: &'static str,
    /// Emoji glyph shown next to the name.
    pub emoji: &'static str,
    /// Taxonomic name, when one applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<&'static str>,
}

impl Animal {
    const fn new(
        id: &'static str,
        name: &'static str,
        emoji: &'static str,
        scientific_name: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            emoji,
            scientific_name: Some(scientific_name),
        }
    }

    /// Label with emoji prefix, as rendered in selectors.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Every selectable animal, in display order.
pub const ANIMALS: &[Animal] = &[
    Animal::new("human", "Human", "👨‍🔬", "Homo sapiens"),
    Animal::new("dog", "Dog", "🐕", "Canis lupus familiaris"),
    Animal::new("cat", "Cat", "🐈", "Felis catus"),
    Animal::new("eagle", "Eagle", "🦅", "Aquila chrysaetos"),
    Animal::new("fly", "House Fly", "🪰", "Musca domestica"),
    Animal::new("bee", "Honey Bee", "🐝", "Apis mellifera"),
    Animal::new("snake", "Pit Viper", "🐍", "Crotalinae"),
    Animal::new("shark", "Shark", "🦈", "Selachimorpha"),
    Animal::new("frog", "Frog", "🐸", "Anura"),
    Animal::new("cow", "Cow", "🐄", "Bos taurus"),
    Animal::new("spider", "Jumping Spider", "🕷️", "Salticidae"),
    Animal::new("bat", "Bat", "🦇", "Chiroptera"),
];

/// Default first observer (Dog).
#[must_use]
pub fn default_observer_a() -> Animal {
    ANIMALS[1]
}

/// Default second observer (House Fly).
#[must_use]
pub fn default_observer_b() -> Animal {
    ANIMALS[4]
}

/// Look up an animal by id or display name, ignoring case and
/// surrounding whitespace. Hyphens and underscores match spaces.
#[must_use]
pub fn find(query: &str) -> Option<Animal> {
    let needle = normalize(query);
    if needle.is_empty() {
        return None;
    }
    ANIMALS
        .iter()
        .find(|animal| animal.id == needle || normalize(animal.name) == needle)
        .copied()
}

fn normalize(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
}
