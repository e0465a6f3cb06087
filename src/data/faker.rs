//! Tiny fake-text generator for product-like fixtures.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const ADJECTIVES: &[&str] = &[
    "Premium",
    "Ultra",
    "Deluxe",
    "Advanced",
    "Essential",
    "Elegant",
    "Professional",
    "Classic",
    "Modern",
    "Smart",
    "Innovative",
    "Sleek",
    "Compact",
    "Portable",
    "Durable",
    "Efficient",
    "Dynamic",
    "Versatile",
    "Reliable",
    "Powerful",
];

const NOUNS: &[&str] = &[
    "Widget",
    "Device",
    "System",
    "Tool",
    "Solution",
    "Machine",
    "Gadget",
    "Application",
    "Platform",
    "Framework",
    "Package",
    "Component",
    "Module",
    "Extension",
    "Algorithm",
    "Interface",
    "Technology",
    "Hardware",
    "Software",
];

const TYPES: &[&str] = &[
    "Pro",
    "Plus",
    "Max",
    "Ultra",
    "Series",
    "Edition",
    "Version",
    "Kit",
    "Pack",
    "Bundle",
    "Collection",
    "Set",
    "Suite",
    "Package",
    "X",
    "Z",
    "Alpha",
    "Prime",
];

/// Sentences used for descriptions and detail paragraphs.
pub const LOREM: &[&str] = &[
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nullam pulvinar risus non risus hendrerit venenatis.",
    "Pellentesque sit amet hendrerit risus, sed porttitor quam. Interdum et malesuada fames ac ante ipsum primis in faucibus.",
    "Ut viverra, eros in venenatis hendrerit, nisi augue hendrerit nulla, id sagittis metus quam a sem.",
    "Cras non diam ac erat rhoncus dapibus. Donec consectetur mauris in diam condimentum, sit amet tincidunt purus finibus.",
    "Nulla facilisi. In hac habitasse platea dictumst. Curabitur at felis malesuada, mollis nibh vel, volutpat est.",
    "Integer vel diam vitae nisl pellentesque efficitur. Nullam accumsan felis ut tincidunt dapibus.",
];

/// Seeded fake-text generator.
#[derive(Debug, Clone)]
pub struct Faker {
    rng: StdRng,
}

impl Faker {
    /// Creates a generator whose output is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, words: &'static [&'static str]) -> &'static str {
        words.choose(&mut self.rng).copied().unwrap_or_default()
    }

    /// `"{adjective} {noun}"`, followed by a model type half of the time.
    pub fn product_name(&mut self) -> String {
        let adjective = self.pick(ADJECTIVES);
        let noun = self.pick(NOUNS);
        if self.rng.gen_bool(0.5) {
            let kind = self.pick(TYPES);
            format!("{} {} {}", adjective, noun, kind)
        } else {
            format!("{} {}", adjective, noun)
        }
    }

    /// One to three sentences.
    pub fn description(&mut self) -> String {
        let sentences = self.rng.gen_range(1..=3);
        self.paragraph(sentences)
    }

    /// A single sentence.
    pub fn sentence(&mut self) -> String {
        self.pick(LOREM).to_string()
    }

    /// `sentences` sentences joined by spaces.
    pub fn paragraph(&mut self, sentences: usize) -> String {
        (0..sentences)
            .map(|_| self.pick(LOREM))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
