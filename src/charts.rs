use chrono::{Local, TimeZone};

use crate::models::{MatchPoint, PlotRecord};

/// Builds the chart rows for a progress view: one PlotRecord per MatchPoint,
/// in order, with the rolling average joined by position. The rolling list is
/// allowed to be shorter than the series (the window needs games to fill);
/// positions past its end read as 0.
pub fn build_plot_records(time_series: &[MatchPoint], rolling_averages: &[f64]) -> Vec<PlotRecord> {
    time_series
        .iter()
        .enumerate()
        .map(|(idx, point)| PlotRecord {
            game: idx as u32 + 1,
            date: format_match_date(point.timestamp),
            kda: point.kda.unwrap_or(0.0),
            kills: point.kills.unwrap_or(0),
            deaths: point.deaths.unwrap_or(0),
            assists: point.assists.unwrap_or(0),
            damage: point.damage.unwrap_or(0),
            cs: point.cs.unwrap_or(0),
            vision_score: point.vision_score.unwrap_or(0),
            rolling_avg: rolling_averages.get(idx).copied().unwrap_or(0.0),
            win: if point.win.unwrap_or(false) { 1 } else { 0 },
        })
        .collect()
}

fn format_match_date(timestamp_millis: Option<i64>) -> String {
    timestamp_millis
        .and_then(|millis| Local.timestamp_millis_opt(millis).single())
        .map(|datetime| datetime.format("%x").to_string())
        .unwrap_or_else(|| String::from("-"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub key: &'static str,
    pub display_name: &'static str,
    pub color: &'static str,
    /// Name of the overlay series to draw alongside, when there is one.
    pub overlay: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    Kda,
    Kills,
    Damage,
    Cs,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Kda, Metric::Kills, Metric::Damage, Metric::Cs];

    /// Unknown keys fall back to KDA; out-of-set input never fails the view.
    pub fn parse(key: &str) -> Metric {
        match key {
            "kda" => Metric::Kda,
            "kills" => Metric::Kills,
            "damage" => Metric::Damage,
            "cs" => Metric::Cs,
            _ => Metric::Kda,
        }
    }

    pub fn descriptor(&self) -> MetricDescriptor {
        match self {
            Metric::Kda => MetricDescriptor {
                key: "kda",
                display_name: "KDA",
                color: "#10B981",
                overlay: Some("rolling_avg"),
            },
            Metric::Kills => MetricDescriptor {
                key: "kills",
                display_name: "Kills",
                color: "#EF4444",
                overlay: None,
            },
            Metric::Damage => MetricDescriptor {
                key: "damage",
                display_name: "Damage",
                color: "#F59E0B",
                overlay: None,
            },
            Metric::Cs => MetricDescriptor {
                key: "cs",
                display_name: "CS",
                color: "#3B82F6",
                overlay: None,
            },
        }
    }

    /// The plotted value for this metric on one chart row.
    pub fn value_of(&self, record: &PlotRecord) -> f64 {
        match self {
            Metric::Kda => record.kda,
            Metric::Kills => record.kills as f64,
            Metric::Damage => record.damage as f64,
            Metric::Cs => record.cs as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn point(kda: f64, win: bool) -> MatchPoint {
        MatchPoint {
            timestamp: Some(1_700_000_000_000),
            kills: Some(4),
            deaths: Some(2),
            assists: Some(6),
            kda: Some(kda),
            damage: Some(18_500),
            cs: Some(170),
            vision_score: Some(22),
            win: Some(win),
        }
    }

    #[test]
    fn one_record_per_point_with_one_based_game_index() {
        let series = vec![point(2.0, true), point(3.0, false), point(4.0, true)];
        let records = build_plot_records(&series, &[]);
        assert_eq!(records.len(), series.len());
        for (idx, record) in records.iter().enumerate() {
            assert_eq!(record.game, idx as u32 + 1);
        }
    }

    #[test]
    fn rolling_average_is_positional_and_zero_past_the_end() {
        let series = vec![point(2.0, true), point(3.0, false), point(4.0, true)];
        let records = build_plot_records(&series, &[1.5, 2.5]);
        assert_eq!(records[0].rolling_avg, 1.5);
        assert_eq!(records[1].rolling_avg, 2.5);
        assert_eq!(records[2].rolling_avg, 0.0);
    }

    #[test]
    fn win_coerces_to_zero_or_one() {
        let records = build_plot_records(&[point(2.0, true), point(2.0, false)], &[]);
        assert_eq!(records[0].win, 1);
        assert_eq!(records[1].win, 0);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let records = build_plot_records(&[MatchPoint::default()], &[]);
        let record = &records[0];
        assert_eq!(record.kda, 0.0);
        assert_eq!(record.kills, 0);
        assert_eq!(record.deaths, 0);
        assert_eq!(record.assists, 0);
        assert_eq!(record.damage, 0);
        assert_eq!(record.cs, 0);
        assert_eq!(record.vision_score, 0);
        assert_eq!(record.win, 0);
        assert_eq!(record.date, "-");
    }

    #[test]
    fn empty_series_builds_empty_output() {
        assert!(build_plot_records(&[], &[1.0, 2.0]).is_empty());
    }

    #[test]
    fn builder_is_idempotent() {
        let series = vec![point(2.0, true), point(3.0, false)];
        let rolling = vec![2.2];
        assert_eq!(
            build_plot_records(&series, &rolling),
            build_plot_records(&series, &rolling)
        );
    }

    #[test]
    fn every_known_key_selects_itself() {
        for metric in Metric::ALL {
            let descriptor = metric.descriptor();
            assert_eq!(Metric::parse(descriptor.key), metric);
        }
    }

    #[test]
    fn unknown_keys_fall_back_to_kda() {
        assert_eq!(Metric::parse("vision_score"), Metric::Kda);
        assert_eq!(Metric::parse(""), Metric::Kda);
        assert_eq!(Metric::parse("KDA"), Metric::Kda);
    }

    #[test]
    fn only_kda_carries_the_rolling_overlay() {
        assert_eq!(Metric::Kda.descriptor().overlay, Some("rolling_avg"));
        assert_eq!(Metric::Kills.descriptor().overlay, None);
        assert_eq!(Metric::Damage.descriptor().overlay, None);
        assert_eq!(Metric::Cs.descriptor().overlay, None);
    }

    #[test]
    fn value_of_reads_the_plotted_field() {
        let record = &build_plot_records(&[point(3.5, true)], &[])[0];
        assert_eq!(Metric::Kda.value_of(record), 3.5);
        assert_eq!(Metric::Kills.value_of(record), 4.0);
        assert_eq!(Metric::Damage.value_of(record), 18_500.0);
        assert_eq!(Metric::Cs.value_of(record), 170.0);
    }
}
