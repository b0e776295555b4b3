//! Post-layout measure of how tightly categories cluster

use crate::spatial::registry::{CategoryId, ItemRegistry};

/// Distance summary of one category in a finished layout
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryCohesion {
    /// Category measured
    pub category: CategoryId,
    /// Number of placed members
    pub members: usize,
    /// Mean distance of members to their own centroid
    pub own_distance: f64,
    /// Mean distance of members to the centroids of every other category
    pub foreign_distance: Option<f64>,
}

fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]).hypot(a[1] - b[1])
}

/// Centroid of the placed members of every category, indexed by `CategoryId`
pub fn category_centroids(registry: &ItemRegistry) -> Vec<Option<[f64; 2]>> {
    let mut sums = vec![([0.0_f64; 2], 0_usize); registry.category_count()];

    for item in registry.items() {
        let Some(placement) = item.placement() else {
            continue;
        };
        if let Some((sum, count)) = sums.get_mut(item.category.0) {
            sum[0] += f64::from(placement.center[0]);
            sum[1] += f64::from(placement.center[1]);
            *count += 1;
        }
    }

    sums.into_iter()
        .map(|(sum, count)| (count > 0).then(|| sum.map(|s| s / count as f64)))
        .collect()
}

/// Compare each category's spread around its own centroid with its distance to others
///
/// A clustered layout has `own_distance` below `foreign_distance` for most
/// categories. Categories without placed members are skipped.
pub fn measure_cohesion(registry: &ItemRegistry) -> Vec<CategoryCohesion> {
    let centroids = category_centroids(registry);
    let mut report = Vec::new();

    for (index, centroid) in centroids.iter().enumerate() {
        let Some(own_centroid) = centroid else {
            continue;
        };
        let category = CategoryId(index);

        let members: Vec<[f64; 2]> = registry
            .items()
            .iter()
            .filter(|item| item.category == category)
            .filter_map(|item| item.placement())
            .map(|placement| placement.center.map(f64::from))
            .collect();

        let own_distance = members
            .iter()
            .map(|&m| distance(m, *own_centroid))
            .sum::<f64>()
            / members.len() as f64;

        let foreign: Vec<f64> = centroids
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != index)
            .filter_map(|(_, c)| *c)
            .flat_map(|other_centroid| members.iter().map(move |&m| distance(m, other_centroid)))
            .collect();

        let foreign_distance =
            (!foreign.is_empty()).then(|| foreign.iter().sum::<f64>() / foreign.len() as f64);

        report.push(CategoryCohesion {
            category,
            members: members.len(),
            own_distance,
            foreign_distance,
        });
    }

    report
}

/// Fraction of measured categories that sit closer to themselves than to others
///
/// Returns `None` when fewer than two categories have placed members.
pub fn cohesion_score(report: &[CategoryCohesion]) -> Option<f64> {
    let comparable: Vec<&CategoryCohesion> = report
        .iter()
        .filter(|c| c.foreign_distance.is_some())
        .collect();
    if comparable.is_empty() {
        return None;
    }

    let cohesive = comparable
        .iter()
        .filter(|c| c.foreign_distance.is_some_and(|f| c.own_distance < f))
        .count();
    Some(cohesive as f64 / comparable.len() as f64)
}
