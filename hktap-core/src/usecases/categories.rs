use std::collections::HashMap;

use super::prelude::*;
use crate::util::{matching::match_quality, sort::MostVoted};

fn count_categories(locations: &[Location]) -> Vec<CategoryFrequency> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for category in locations
        .iter()
        .map(|l| l.category.trim())
        .filter(|c| !c.is_empty())
    {
        *counts.entry(category).or_default() += 1;
    }
    let mut frequencies: Vec<_> = counts
        .into_iter()
        .map(|(category, count)| CategoryFrequency {
            category: category.to_owned(),
            count,
        })
        .collect();
    frequencies.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.category.cmp(&b.category))
    });
    frequencies
}

pub fn category_frequencies<R: LocationRepo>(repo: &R) -> Result<Vec<CategoryFrequency>> {
    let locations = repo.all_locations(&LocationFilter::default())?;
    Ok(count_categories(&locations))
}

/// The `n` most frequent categories, each with the photo
/// of its most voted location.
pub fn top_categories<R: LocationRepo>(repo: &R, n: usize) -> Result<Vec<TopCategory>> {
    if n == 0 {
        return Err(Error::InvalidLimit);
    }
    let locations = repo.all_locations(&LocationFilter::default())?;
    Ok(count_categories(&locations)
        .into_iter()
        .take(n)
        .map(|CategoryFrequency { category, count }| {
            let photo = locations
                .iter()
                .filter(|l| l.has_photo() && l.category.trim() == category)
                .min_by(|a, b| a.cmp_by_votes_desc(b))
                .and_then(|l| l.photo.clone());
            TopCategory {
                category,
                count,
                photo,
            }
        })
        .collect())
}

pub fn search_categories<R: LocationRepo>(repo: &R, query: &str) -> Result<Vec<CategoryFrequency>> {
    let frequencies = category_frequencies(repo)?;
    if query.trim().is_empty() {
        return Ok(frequencies);
    }
    let mut matches: Vec<_> = frequencies
        .into_iter()
        .filter_map(|f| match_quality(&f.category, query).map(|q| (q, f)))
        .collect();
    // Frequencies are already ordered by count and name
    matches.sort_by(|(a, _), (b, _)| b.cmp(a));
    Ok(matches.into_iter().map(|(_, f)| f).collect())
}
