use crate::waste::bucket::Bucket;
use crate::waste::result::{ClassificationResult, ClassificationSource};
use rand::seq::IndexedRandom;

pub struct CatalogEntry {
    pub items: &'static [&'static str],
    pub recommendations: &'static [&'static str],
}

const ORGANIC: CatalogEntry = CatalogEntry {
    items: &[
        "Food scraps",
        "Fruit peels",
        "Vegetable leftovers",
        "Coffee grounds",
        "Eggshells",
        "Tea leaves",
    ],
    recommendations: &[
        "Drain excess liquid before disposal",
        "Place in the green wet-waste bin",
        "Remove plastic bags and other packaging",
        "Consider composting at home",
    ],
};

const RECYCLABLE: CatalogEntry = CatalogEntry {
    items: &[
        "Plastic bottle",
        "Paper",
        "Cardboard",
        "Glass jar",
        "Aluminium can",
        "Metal container",
    ],
    recommendations: &[
        "Rinse containers before recycling",
        "Flatten cardboard boxes",
        "Keep dry waste away from food waste",
        "Place in the blue dry-waste bin",
    ],
};

const ELECTRONIC: CatalogEntry = CatalogEntry {
    items: &[
        "Batteries",
        "Electronic device",
        "Circuit board",
        "Cables",
        "Light bulbs",
    ],
    recommendations: &[
        "Never put it in a regular bin",
        "Take it to an e-waste collection point",
        "Tape battery terminals before disposal",
        "Wipe personal data from devices",
    ],
};

const GENERAL: CatalogEntry = CatalogEntry {
    items: &["Mixed waste", "Wrappers", "Packaging", "Textiles"],
    recommendations: &[
        "Check your local sorting rules",
        "Separate recyclable parts where possible",
        "Place in the blue dry-waste bin",
    ],
};

pub fn entry(bucket: Bucket) -> &'static CatalogEntry {
    match bucket {
        Bucket::Organic => &ORGANIC,
        Bucket::Recyclable => &RECYCLABLE,
        Bucket::Electronic => &ELECTRONIC,
        Bucket::General => &GENERAL,
    }
}

/// Takes the first `count` labels, or a random subset of that size when
/// `randomize` is set.
pub fn pick_items(bucket: Bucket, count: usize, randomize: bool) -> Vec<String> {
    let items = entry(bucket).items;

    if randomize {
        let mut rng = rand::rng();
        items
            .choose_multiple(&mut rng, count)
            .map(|item| item.to_string())
            .collect()
    } else {
        items.iter().take(count).map(|item| item.to_string()).collect()
    }
}

pub fn build_result(
    bucket: Bucket,
    confidence: f32,
    source: ClassificationSource,
    items_per_result: usize,
    randomize: bool,
) -> ClassificationResult {
    let entry = entry(bucket);

    ClassificationResult::new(
        bucket.category(),
        confidence,
        pick_items(bucket, items_per_result, randomize),
        entry
            .recommendations
            .iter()
            .map(|recommendation| recommendation.to_string())
            .collect(),
        source,
    )
}
