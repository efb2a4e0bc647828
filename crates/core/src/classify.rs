// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Subject-area classification of test identifiers.
//!
//! Classification is a first-match-wins scan over [`RULES`]. Keyword sets
//! overlap (`"medical"` is listed for both medicine and science), so rule
//! order is part of the output contract and must not be rearranged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject-area tag assigned to every test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryKey {
    /// Programming, security, machine learning
    ComputerScience,
    /// Mathematics and statistics
    Mathematics,
    /// Medicine, health and clinical practice
    MedicineHealth,
    /// Natural sciences
    Science,
    /// Law, politics and public administration
    LawGovernment,
    /// Philosophy, history and religion
    HumanitiesPhilosophy,
    /// Business, finance and economics
    BusinessEconomics,
    /// Psychology, sociology and geography
    SocialSciences,
    /// Teaching and pedagogy
    Education,
    /// Engineering and applied technology
    EngineeringTechnical,
    /// Arts, crafts and vocational trades
    VocationalArts,
    /// Languages and literature
    LanguagesLiterature,
    /// General knowledge
    Miscellaneous,
    /// No rule matched
    Other,
}

impl CategoryKey {
    /// All tags in declaration order.
    pub const ALL: [CategoryKey; 14] = [
        CategoryKey::ComputerScience,
        CategoryKey::Mathematics,
        CategoryKey::MedicineHealth,
        CategoryKey::Science,
        CategoryKey::LawGovernment,
        CategoryKey::HumanitiesPhilosophy,
        CategoryKey::BusinessEconomics,
        CategoryKey::SocialSciences,
        CategoryKey::Education,
        CategoryKey::EngineeringTechnical,
        CategoryKey::VocationalArts,
        CategoryKey::LanguagesLiterature,
        CategoryKey::Miscellaneous,
        CategoryKey::Other,
    ];

    /// Serialized tag name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ComputerScience => "computerScience",
            Self::Mathematics => "mathematics",
            Self::MedicineHealth => "medicineHealth",
            Self::Science => "science",
            Self::LawGovernment => "lawGovernment",
            Self::HumanitiesPhilosophy => "humanitiesPhilosophy",
            Self::BusinessEconomics => "businessEconomics",
            Self::SocialSciences => "socialSciences",
            Self::Education => "education",
            Self::EngineeringTechnical => "engineeringTechnical",
            Self::VocationalArts => "vocationalArts",
            Self::LanguagesLiterature => "languagesLiterature",
            Self::Miscellaneous => "miscellaneous",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered keyword rules. A test belongs to the first rule with any keyword
/// contained in its lowercased identifier.
pub const RULES: &[(CategoryKey, &[&str])] = &[
    (
        CategoryKey::ComputerScience,
        &[
            "computer",
            "programming",
            "machine_learning",
            "software",
            "algorithm",
            "coding",
            "database",
            "information_technology",
            "artificial_intelligence",
            "cybersecurity",
            "data_structure",
        ],
    ),
    (
        CategoryKey::Mathematics,
        &[
            "math",
            "algebra",
            "calculus",
            "geometry",
            "statistic",
            "probability",
            "arithmetic",
            "trigonometry",
            "number_theory",
            "gsm8k",
        ],
    ),
    (
        CategoryKey::MedicineHealth,
        &[
            "medical",
            "medicine",
            "clinical",
            "anatomy",
            "nutrition",
            "virology",
            "health",
            "pharmacology",
            "pharmacy",
            "nursing",
            "dentistry",
            "veterinary",
            "pathology",
            "physician",
        ],
    ),
    (
        CategoryKey::Science,
        &[
            "physics",
            "chemistry",
            "biology",
            "astronomy",
            "genetics",
            "geology",
            "ecology",
            "natural_science",
            "earth_science",
            "medical",
            "scientific",
        ],
    ),
    (
        CategoryKey::LawGovernment,
        &[
            "law",
            "legal",
            "jurisprudence",
            "government",
            "politic",
            "regulation",
            "taxation",
            "administrative",
            "constitution",
            "public_policy",
        ],
    ),
    (
        CategoryKey::HumanitiesPhilosophy,
        &[
            "philosophy",
            "ethics",
            "moral",
            "religion",
            "history",
            "logic",
            "humanities",
            "archaeology",
        ],
    ),
    (
        CategoryKey::BusinessEconomics,
        &[
            "business",
            "economic",
            "econometrics",
            "finance",
            "financial",
            "accounting",
            "marketing",
            "management",
            "insurance",
            "banking",
            "investment",
            "trade",
        ],
    ),
    (
        CategoryKey::SocialSciences,
        &[
            "psychology",
            "sociology",
            "social",
            "geography",
            "anthropology",
            "demography",
            "human_sexuality",
            "security_studies",
            "public_relations",
        ],
    ),
    (
        CategoryKey::Education,
        &["education", "pedagogy", "teaching", "teacher", "curriculum"],
    ),
    (
        CategoryKey::EngineeringTechnical,
        &[
            "engineering",
            "electrical",
            "mechanical",
            "electronic",
            "civil",
            "architecture",
            "technical",
            "technology",
            "automotive",
            "construction",
            "manufacturing",
        ],
    ),
    (
        CategoryKey::VocationalArts,
        &[
            "fine_arts",
            "art_",
            "arts",
            "music",
            "design",
            "culinary",
            "cooking",
            "fashion",
            "agriculture",
            "horticulture",
            "vocational",
            "craft",
            "sport",
            "tourism",
            "hospitality",
        ],
    ),
    (
        CategoryKey::LanguagesLiterature,
        &[
            "language",
            "literature",
            "linguistic",
            "chinese",
            "english",
            "grammar",
            "reading",
            "writing",
            "poetry",
            "translation",
            "vocabulary",
            "idiom",
        ],
    ),
    (
        CategoryKey::Miscellaneous,
        &["misc", "global_facts", "general", "common_sense", "trivia"],
    ),
];

/// Classify a test identifier (category path or filename).
///
/// ```
/// use llm_leaderboard_core::classify::{categorize_test, CategoryKey};
///
/// assert_eq!(categorize_test("medical_ethics"), CategoryKey::MedicineHealth);
/// assert_eq!(categorize_test("mmlu/xyz"), CategoryKey::Other);
/// ```
pub fn categorize_test(test: &str) -> CategoryKey {
    let lowered = test.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(key, _)| *key)
        .unwrap_or(CategoryKey::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medical_prefers_medicine_over_science() {
        assert_eq!(categorize_test("medical_ethics"), CategoryKey::MedicineHealth);
        assert_eq!(categorize_test("mmlu/medical_genetics"), CategoryKey::MedicineHealth);
    }

    #[test]
    fn test_rule_order_computer_before_science() {
        assert_eq!(categorize_test("mmlu/college_computer_science"), CategoryKey::ComputerScience);
        assert_eq!(categorize_test("mmlu/machine_learning"), CategoryKey::ComputerScience);
    }

    #[test]
    fn test_representative_subjects() {
        let cases = [
            ("mmlu/abstract_algebra", CategoryKey::Mathematics),
            ("mmlu/high_school_statistics", CategoryKey::Mathematics),
            ("mmlu/college_physics", CategoryKey::Science),
            ("tw-legal-benchmark-v1/benchmark", CategoryKey::LawGovernment),
            ("mmlu/professional_law", CategoryKey::LawGovernment),
            ("mmlu/philosophy", CategoryKey::HumanitiesPhilosophy),
            ("mmlu/prehistory", CategoryKey::HumanitiesPhilosophy),
            ("mmlu/econometrics", CategoryKey::BusinessEconomics),
            ("mmlu/high_school_psychology", CategoryKey::SocialSciences),
            ("tmmluplus/pedagogy", CategoryKey::Education),
            ("tmmluplus/educational_psychology", CategoryKey::SocialSciences),
            ("tmmluplus/mechanical", CategoryKey::EngineeringTechnical),
            ("tmmluplus/music", CategoryKey::VocationalArts),
            ("tmmluplus/chinese_language", CategoryKey::LanguagesLiterature),
            ("mmlu/global_facts", CategoryKey::Miscellaneous),
        ];
        for (test, expected) in cases {
            assert_eq!(categorize_test(test), expected, "{test}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(categorize_test("MMLU/Anatomy"), CategoryKey::MedicineHealth);
    }

    #[test]
    fn test_no_match_is_other() {
        assert_eq!(categorize_test(""), CategoryKey::Other);
        assert_eq!(categorize_test("xyz/default"), CategoryKey::Other);
    }

    #[test]
    fn test_every_rule_key_is_distinct_and_not_other() {
        let mut seen = std::collections::HashSet::new();
        for (key, keywords) in RULES {
            assert_ne!(*key, CategoryKey::Other);
            assert!(!keywords.is_empty());
            assert!(seen.insert(*key));
        }
        assert_eq!(seen.len(), CategoryKey::ALL.len() - 1);
    }

    #[test]
    fn test_category_key_serializes_camel_case() {
        for key in CategoryKey::ALL {
            let json = serde_json::to_value(key).unwrap();
            assert_eq!(json, key.as_str());
        }
    }
}
