use crate::waste::bucket::WasteCategory;

pub struct GuideSection {
    pub category: WasteCategory,
    pub description: &'static str,
    pub examples: &'static [&'static str],
    pub tips: &'static [&'static str],
}

const SECTIONS: &[GuideSection] = &[
    GuideSection {
        category: WasteCategory::Wet,
        description: "Biodegradable kitchen and garden waste that breaks down naturally.",
        examples: &[
            "Fruit and vegetable peels",
            "Leftover food",
            "Tea leaves and coffee grounds",
            "Eggshells",
            "Garden leaves and flowers",
        ],
        tips: &[
            "Keep it free of plastic and foil",
            "Drain liquids before binning",
            "Compost it at home if you can",
        ],
    },
    GuideSection {
        category: WasteCategory::Dry,
        description: "Non-biodegradable waste, much of which can be recycled.",
        examples: &[
            "Plastic bottles and containers",
            "Paper and cardboard",
            "Glass jars",
            "Metal cans",
            "Clean packaging",
        ],
        tips: &[
            "Rinse food residue off containers",
            "Flatten boxes to save space",
            "Keep it dry so paper stays recyclable",
        ],
    },
    GuideSection {
        category: WasteCategory::Hazardous,
        description: "Waste that can harm people or the environment and needs special handling.",
        examples: &[
            "Batteries",
            "Electronic devices and cables",
            "Light bulbs and tubes",
            "Paint and chemicals",
            "Medicines",
        ],
        tips: &[
            "Never mix it with household waste",
            "Use designated collection points",
            "Store it safely until disposal",
        ],
    },
];

pub fn sections() -> &'static [GuideSection] {
    SECTIONS
}

pub fn render() -> String {
    let mut out = String::from("Waste Sorting Guide\n");

    for section in sections() {
        out.push('\n');
        out.push_str(&format!("{}\n", section.category.name()));
        out.push_str(&format!("  {}\n", section.description));
        out.push_str("  Examples:\n");
        for example in section.examples {
            out.push_str(&format!("    - {}\n", example));
        }
        out.push_str("  Tips:\n");
        for tip in section.tips {
            out.push_str(&format!("    - {}\n", tip));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_section_per_category() {
        let categories: Vec<WasteCategory> = sections().iter().map(|s| s.category).collect();
        assert_eq!(categories, WasteCategory::all().to_vec());
    }

    #[test]
    fn test_render_lists_examples_and_tips() {
        let page = render();

        assert!(page.starts_with("Waste Sorting Guide"));
        assert!(page.contains("Hazardous Waste"));
        assert!(page.contains("    - Batteries"));
        assert!(page.contains("    - Flatten boxes to save space"));
    }
}
