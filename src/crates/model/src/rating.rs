use crate::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// 某个资源的评分统计，平均分保留一位小数
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RatingStats {
    pub average_score: f64,
    pub rating_count: i64,
}

impl RatingStats {
    pub fn new(raw_average: f64, rating_count: i64) -> Self {
        Self {
            average_score: round_one_decimal(raw_average),
            rating_count,
        }
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// 当前用户对某资源的评分，未评分时为 0
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UserScore {
    pub score: f64,
}

/// 带评分统计的列表条目
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rated<T> {
    #[serde(flatten)]
    pub item: T,
    pub average_score: f64,
    pub rating_count: i64,
}

impl<T> Rated<T> {
    pub fn new(item: T, stats: RatingStats) -> Self {
        Self {
            item,
            average_score: stats.average_score,
            rating_count: stats.rating_count,
        }
    }
}

/// 按评分排序后的一页条目
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPage<T> {
    pub items: Vec<Rated<T>>,
    pub pagination: Pagination,
}
