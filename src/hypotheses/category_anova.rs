//! All-category comparison
//!
//! One-way ANOVA on view counts across every category present in the table.
//! Purely descriptive: the result carries a binary significance call and no
//! directional claim.

use serde::{Deserialize, Serialize};

use super::{TestOutcome, ALPHA};
use crate::stats::one_way_anova;
use crate::types::{AnalysisRecord, Category};

/// One category and how many items it holds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Result of the all-category ANOVA
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAnovaResult {
    /// Categories present in the table, in priority order
    pub groups: Vec<CategoryCount>,
    pub f_statistic: f64,
    pub p_value: f64,
    pub significant: bool,
}

/// ANOVA of view counts across all present categories.
pub fn test_category_anova(table: &[AnalysisRecord]) -> TestOutcome<CategoryAnovaResult> {
    let mut groups: Vec<(Category, Vec<f64>)> = Vec::new();
    for category in Category::ALL {
        let views: Vec<f64> = table
            .iter()
            .filter(|r| r.category == category)
            .map(|r| r.views() as f64)
            .collect();
        if !views.is_empty() {
            groups.push((category, views));
        }
    }

    if groups.len() < 2 {
        return TestOutcome::indeterminate(format!(
            "need at least 2 categories present, found {}",
            groups.len()
        ));
    }

    let refs: Vec<&[f64]> = groups.iter().map(|(_, v)| v.as_slice()).collect();
    let Some(anova) = one_way_anova(&refs) else {
        return TestOutcome::indeterminate(
            "too few observations across category groups for ANOVA",
        );
    };

    TestOutcome::Completed(CategoryAnovaResult {
        groups: groups
            .iter()
            .map(|(category, views)| CategoryCount {
                category: *category,
                count: views.len(),
            })
            .collect(),
        f_statistic: anova.f_statistic,
        p_value: anova.p_value,
        significant: anova.p_value < ALPHA,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureDeriver;
    use crate::record::RawItem;

    fn make_item(id: usize, title: &str, views: u64) -> RawItem {
        RawItem {
            id: format!("v{id}"),
            title: title.to_string(),
            views,
            likes: 0,
            comments: 0,
            duration: "PT10M".to_string(),
            published: "2023-05-01T15:00:00Z".to_string(),
            description: None,
            tags: None,
        }
    }

    #[test]
    fn test_separated_categories_are_significant() {
        let mut items = Vec::new();
        for (i, v) in [50_000, 51_000, 49_500, 50_500].iter().enumerate() {
            items.push(make_item(i, "Python Tutorial", *v));
        }
        for (i, v) in [900, 1_100, 950, 1_050].iter().enumerate() {
            items.push(make_item(100 + i, "Career panel", *v));
        }
        for (i, v) in [400, 600, 450, 550].iter().enumerate() {
            items.push(make_item(200 + i, "Channel news", *v));
        }
        let table = FeatureDeriver::derive(&items).unwrap();

        let outcome = test_category_anova(&table);
        let result = outcome.completed().expect("test should complete");
        assert!(result.significant);
        assert_eq!(result.groups.len(), 3);
        // priority order: Tutorial before Career before Other
        assert_eq!(result.groups[0].category, Category::Tutorial);
        assert_eq!(result.groups[2].category, Category::Other);
    }

    #[test]
    fn test_single_category_is_indeterminate() {
        let items: Vec<RawItem> = (0..5)
            .map(|i| make_item(i, "SQL Tutorial", 1_000 + i as u64))
            .collect();
        let table = FeatureDeriver::derive(&items).unwrap();
        assert!(test_category_anova(&table).is_indeterminate());
    }

    #[test]
    fn test_similar_categories_are_not_significant() {
        let mut items = Vec::new();
        for (i, v) in [1_000, 1_050, 980, 1_020, 990].iter().enumerate() {
            items.push(make_item(i, "Excel guide", *v));
        }
        for (i, v) in [1_010, 1_040, 975, 1_030, 995].iter().enumerate() {
            items.push(make_item(100 + i, "Hiring stories", *v));
        }
        let table = FeatureDeriver::derive(&items).unwrap();

        let result = test_category_anova(&table);
        let result = result.completed().unwrap();
        assert!(!result.significant);
    }
}
