use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    pub puuid: String,
    pub match_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareRequest {
    pub puuid1: String,
    pub puuid2: String,
    pub match_count: u32,
}

// Wire models. Every field the service may omit or null out is an Option;
// defaulting happens where the value is consumed.

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct MatchPoint {
    pub timestamp: Option<i64>,
    pub kills: Option<u32>,
    pub deaths: Option<u32>,
    pub assists: Option<u32>,
    pub kda: Option<f64>,
    pub damage: Option<u64>,
    pub cs: Option<u32>,
    pub vision_score: Option<u32>,
    pub win: Option<bool>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct Trends {
    pub average_kda: Option<f64>,
    pub recent_kda: Option<f64>,
    pub trending_up: Option<bool>,
    pub kda_variance: Option<f64>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct ProgressResponse {
    #[serde(default)]
    pub time_series: Vec<MatchPoint>,
    #[serde(default)]
    pub rolling_averages: Vec<f64>,
    pub trends: Option<Trends>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct EarlyGameMetrics {
    pub avg_kills: Option<f64>,
    pub avg_deaths: Option<f64>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct MidGameMetrics {
    pub avg_kills: Option<f64>,
    pub avg_assists: Option<f64>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct ConsistencyMetrics {
    pub max_win_streak: Option<u32>,
    pub max_loss_streak: Option<u32>,
    pub kda_variance: Option<f64>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct DetailedMetrics {
    pub early_game: Option<EarlyGameMetrics>,
    pub mid_game: Option<MidGameMetrics>,
    pub consistency: Option<ConsistencyMetrics>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerStats {
    pub games_played: Option<u32>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct StrengthsResponse {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub improvement_tips: Vec<String>,
    pub detailed_metrics: Option<DetailedMetrics>,
    pub stats: Option<PlayerStats>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerSummary {
    pub win_rate: Option<f64>,
    pub avg_kda: Option<f64>,
    pub damage_per_min: Option<f64>,
    pub cs_per_min: Option<f64>,
    pub main_role: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct ComparisonDeltas {
    pub win_rate_diff: Option<f64>,
    pub kda_diff: Option<f64>,
    pub damage_diff: Option<f64>,
    pub cs_diff: Option<f64>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct Compatibility {
    pub score: Option<f64>,
    pub role_compatible: Option<bool>,
    pub skill_level_similar: Option<bool>,
    pub playstyle_complementary: Option<bool>,
    pub recommendation: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct ComparisonResponse {
    pub player1: Option<PlayerSummary>,
    pub player2: Option<PlayerSummary>,
    pub comparison: Option<ComparisonDeltas>,
    pub compatibility: Option<Compatibility>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct ShareableCard {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub stat: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct ShareableMomentsResponse {
    #[serde(default)]
    pub shareable_cards: Vec<ShareableCard>,
}

/// One chart row: a MatchPoint normalized for plotting. The rolling average
/// is positional and 0 where the rolling window hasn't filled yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRecord {
    pub game: u32,
    pub date: String,
    pub kda: f64,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub damage: u64,
    pub cs: u32,
    pub vision_score: u32,
    pub rolling_avg: f64,
    pub win: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_progress_with_missing_and_null_fields() {
        let payload = r#"{
            "time_series": [
                {"timestamp": 1700000000000, "kills": 5, "deaths": null, "kda": 2.5, "win": true},
                {}
            ],
            "rolling_averages": [2.1]
        }"#;
        let decoded: ProgressResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(decoded.time_series.len(), 2);
        assert_eq!(decoded.time_series[0].kills, Some(5));
        assert_eq!(decoded.time_series[0].deaths, None);
        assert_eq!(decoded.time_series[1], MatchPoint::default());
        assert_eq!(decoded.rolling_averages, vec![2.1]);
        assert!(decoded.trends.is_none());
    }

    #[test]
    fn decodes_empty_progress_object() {
        let decoded: ProgressResponse = serde_json::from_str("{}").unwrap();
        assert!(decoded.time_series.is_empty());
        assert!(decoded.rolling_averages.is_empty());
    }

    #[test]
    fn decodes_comparison_with_partial_blocks() {
        let payload = r#"{
            "player1": {"win_rate": 54.2, "main_role": "JUNGLE"},
            "comparison": {"win_rate_diff": -3.5}
        }"#;
        let decoded: ComparisonResponse = serde_json::from_str(payload).unwrap();
        let p1 = decoded.player1.unwrap();
        assert_eq!(p1.win_rate, Some(54.2));
        assert_eq!(p1.avg_kda, None);
        assert_eq!(decoded.comparison.unwrap().win_rate_diff, Some(-3.5));
        assert!(decoded.player2.is_none());
        assert!(decoded.compatibility.is_none());
    }

    #[test]
    fn decodes_shareable_cards_with_defaults() {
        let payload = r#"{"shareable_cards": [{"title": "Pentakill!"}]}"#;
        let decoded: ShareableMomentsResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(decoded.shareable_cards[0].title, "Pentakill!");
        assert_eq!(decoded.shareable_cards[0].subtitle, "");
        assert_eq!(decoded.shareable_cards[0].color, "");
    }

    #[test]
    fn serializes_analysis_request_body() {
        let body = AnalysisRequest {
            puuid: "abc".to_string(),
            match_count: 50,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"puuid":"abc","match_count":50}"#);
    }
}
