//! Rating distribution shown above the review list

use super::listing::Review;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingBucket {
    /// Star count, 5 down to 1
    pub stars: u8,
    pub count: usize,
    /// Share of all reviews, 0 to 100
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub review_count: usize,
    /// Mean of the review ratings, `None` without reviews
    pub average: Option<f64>,
    /// Always five buckets, highest rating first
    pub distribution: Vec<RatingBucket>,
}

impl RatingSummary {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut counts = [0usize; 5];
        for review in reviews {
            if (1..=5).contains(&review.rating) {
                counts[usize::from(review.rating) - 1] += 1;
            }
        }

        let total: usize = counts.iter().sum();
        let distribution = (1..=5u8)
            .rev()
            .map(|stars| {
                let count = counts[usize::from(stars) - 1];
                let percentage = if total > 0 {
                    count as f64 / total as f64 * 100.0
                } else {
                    0.0
                };
                RatingBucket {
                    stars,
                    count,
                    percentage,
                }
            })
            .collect();

        let average = (total > 0).then(|| {
            let sum: usize = counts
                .iter()
                .enumerate()
                .map(|(i, count)| (i + 1) * count)
                .sum();
            sum as f64 / total as f64
        });

        Self {
            review_count: total,
            average,
            distribution,
        }
    }
}
