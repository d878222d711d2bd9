use tracing::error;

use crate::api::{AnalyticsClient, MATCH_COUNT};
use crate::charts::{build_plot_records, Metric};
use crate::compare::{classify, format_signed_stat, Delta};
use crate::models::{
    ComparisonResponse, PlayerSummary, ProgressResponse, ShareableMomentsResponse,
    StrengthsResponse,
};
use crate::share::{share_intent_url, share_text};

pub async fn progress(client: &AnalyticsClient, puuid: &str, metric: Metric) -> String {
    match client.progress(puuid, MATCH_COUNT).await {
        Result::Ok(data) => render_progress(&data, metric),
        Result::Err(e) => {
            error!("Progress fetch failed: {}", e);
            format!("Error loading data: {}", e)
        }
    }
}

pub async fn strengths(client: &AnalyticsClient, puuid: &str) -> String {
    match client.strengths_weaknesses(puuid, MATCH_COUNT).await {
        Result::Ok(data) => render_strengths(&data),
        Result::Err(e) => {
            error!("Strengths/weaknesses fetch failed: {}", e);
            format!("Error loading data: {}", e)
        }
    }
}

pub async fn compare(client: &AnalyticsClient, puuid1: &str, puuid2: &str) -> String {
    let (puuid1, puuid2) = match require_both_puuids(puuid1, puuid2) {
        Result::Ok(pair) => pair,
        Result::Err(message) => return message.to_string(),
    };
    match client.compare(puuid1, puuid2, MATCH_COUNT).await {
        Result::Ok(data) => render_comparison(&data),
        Result::Err(e) => {
            error!("Comparison fetch failed: {}", e);
            format!("Error loading data: {}", e)
        }
    }
}

pub async fn moments(client: &AnalyticsClient, puuid: &str) -> String {
    match client.shareable_moments(puuid, MATCH_COUNT).await {
        Result::Ok(data) => render_moments(&data),
        Result::Err(e) => {
            error!("Shareable moments fetch failed: {}", e);
            format!("Error loading data: {}", e)
        }
    }
}

// The comparison view validates its inputs before anything touches the
// network; a blank PUUID never turns into a request.
fn require_both_puuids<'a>(
    puuid1: &'a str,
    puuid2: &'a str,
) -> Result<(&'a str, &'a str), &'static str> {
    let puuid1 = puuid1.trim();
    let puuid2 = puuid2.trim();
    if puuid1.is_empty() || puuid2.is_empty() {
        return Result::Err("Please enter both player PUUIDs");
    }
    Result::Ok((puuid1, puuid2))
}

fn win_loss_letter(win: u8) -> char {
    if win == 1 {
        'W'
    } else {
        'L'
    }
}

fn delta_marker(delta: Delta) -> &'static str {
    match delta {
        Delta::Positive => "▲",
        Delta::Negative => "▼",
        Delta::Neutral => "•",
    }
}

fn render_progress(data: &ProgressResponse, metric: Metric) -> String {
    let records = build_plot_records(&data.time_series, &data.rolling_averages);
    let descriptor = metric.descriptor();

    let mut lines = Vec::new();
    lines.push(String::from("Player Progress Over Time"));
    lines.push(format!("Metric: {}", descriptor.display_name));
    lines.push(String::new());

    if records.is_empty() {
        lines.push(String::from("No games in the selected window."));
    } else if descriptor.overlay.is_some() {
        lines.push(format!(
            "{:>4}  {:<10}  {:>10}  {:>26}  {}",
            "Game",
            "Date",
            descriptor.display_name,
            "Rolling Average (10 games)",
            "W/L"
        ));
        for record in &records {
            lines.push(format!(
                "{:>4}  {:<10}  {:>10.2}  {:>26.2}  {}",
                record.game,
                record.date,
                metric.value_of(record),
                record.rolling_avg,
                win_loss_letter(record.win)
            ));
        }
    } else {
        lines.push(format!(
            "{:>4}  {:<10}  {:>10}  {}",
            "Game", "Date", descriptor.display_name, "W/L"
        ));
        for record in &records {
            lines.push(format!(
                "{:>4}  {:<10}  {:>10.2}  {}",
                record.game,
                record.date,
                metric.value_of(record),
                win_loss_letter(record.win)
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Win/Loss Pattern: {}",
        records
            .iter()
            .map(|record| win_loss_letter(record.win))
            .collect::<String>()
    ));

    if let Some(trends) = &data.trends {
        lines.push(String::new());
        lines.push(format!(
            "Average KDA: {:.2}",
            trends.average_kda.unwrap_or(0.0)
        ));
        lines.push(format!("Recent KDA: {:.2}", trends.recent_kda.unwrap_or(0.0)));
        lines.push(format!(
            "Trend: {}",
            if trends.trending_up.unwrap_or(false) {
                "📈 Up"
            } else {
                "📉 Down"
            }
        ));
        lines.push(format!(
            "Consistency: {:.2}",
            trends.kda_variance.unwrap_or(0.0)
        ));
    }

    lines.join("\n")
}

fn render_strengths(data: &StrengthsResponse) -> String {
    let mut lines = Vec::new();

    lines.push(String::from("💪 Persistent Strengths"));
    for strength in &data.strengths {
        lines.push(format!("  ✓ {}", strength));
    }

    lines.push(String::new());
    lines.push(String::from("⚠️ Areas for Improvement"));
    for weakness in &data.weaknesses {
        lines.push(format!("  ! {}", weakness));
    }

    if let Some(metrics) = &data.detailed_metrics {
        lines.push(String::new());
        lines.push(String::from("Performance Breakdown"));
        if let Some(early) = &metrics.early_game {
            lines.push(format!(
                "  Early Game (0-15 min): Avg Kills {:.1}, Avg Deaths {:.1}",
                early.avg_kills.unwrap_or(0.0),
                early.avg_deaths.unwrap_or(0.0)
            ));
        }
        if let Some(mid) = &metrics.mid_game {
            lines.push(format!(
                "  Mid Game (15-30 min): Avg Kills {:.1}, Avg Assists {:.1}",
                mid.avg_kills.unwrap_or(0.0),
                mid.avg_assists.unwrap_or(0.0)
            ));
        }
        if let Some(consistency) = &metrics.consistency {
            lines.push(format!(
                "  Consistency: Max Win Streak {}, Max Loss Streak {}, KDA Variance {:.2}",
                consistency.max_win_streak.unwrap_or(0),
                consistency.max_loss_streak.unwrap_or(0),
                consistency.kda_variance.unwrap_or(0.0)
            ));
        }
    }

    if !data.improvement_tips.is_empty() {
        lines.push(String::new());
        lines.push(String::from("💡 Improvement Tips"));
        for tip in &data.improvement_tips {
            lines.push(format!("  → {}", tip));
        }
    }

    if let Some(stats) = &data.stats {
        lines.push(String::new());
        lines.push(format!(
            "Based on {} games ({}W-{}L)",
            stats.games_played.unwrap_or(0),
            stats.wins.unwrap_or(0),
            stats.losses.unwrap_or(0)
        ));
    }

    lines.join("\n")
}

fn push_player_summary(lines: &mut Vec<String>, label: &str, summary: Option<&PlayerSummary>) {
    let empty = PlayerSummary::default();
    let summary = summary.unwrap_or(&empty);
    lines.push(format!("{} Stats", label));
    lines.push(format!("  Win Rate: {:.1}%", summary.win_rate.unwrap_or(0.0)));
    lines.push(format!("  Avg KDA: {:.2}", summary.avg_kda.unwrap_or(0.0)));
    lines.push(format!(
        "  Damage/Min: {:.0}",
        summary.damage_per_min.unwrap_or(0.0)
    ));
    lines.push(format!("  CS/Min: {:.1}", summary.cs_per_min.unwrap_or(0.0)));
    lines.push(format!(
        "  Main Role: {}",
        summary
            .main_role
            .as_deref()
            .filter(|role| !role.is_empty())
            .unwrap_or("N/A")
    ));
}

fn push_delta(lines: &mut Vec<String>, label: &str, value: f64, suffix: &str) {
    lines.push(format!(
        "  {}: {} {}",
        label,
        format_signed_stat(value, suffix),
        delta_marker(classify(value))
    ));
}

fn render_comparison(data: &ComparisonResponse) -> String {
    let mut lines = Vec::new();

    lines.push(String::from("Playstyle Compatibility"));
    let compatibility = data.compatibility.clone().unwrap_or_default();
    lines.push(format!(
        "  Score: {}%",
        compatibility.score.unwrap_or(0.0)
    ));
    if let Some(recommendation) = compatibility
        .recommendation
        .as_deref()
        .filter(|text| !text.is_empty())
    {
        lines.push(format!("  {}", recommendation));
    }
    lines.push(format!(
        "  Role Compatible: {} | Skill Level: {} | Playstyle: {}",
        if compatibility.role_compatible.unwrap_or(false) {
            "Yes"
        } else {
            "No"
        },
        if compatibility.skill_level_similar.unwrap_or(false) {
            "Similar"
        } else {
            "Different"
        },
        if compatibility.playstyle_complementary.unwrap_or(false) {
            "Complementary"
        } else {
            "Similar"
        }
    ));

    lines.push(String::new());
    push_player_summary(&mut lines, "Player 1", data.player1.as_ref());
    lines.push(String::new());
    push_player_summary(&mut lines, "Player 2", data.player2.as_ref());

    lines.push(String::new());
    lines.push(String::from("Comparison (Player 1 vs Player 2)"));
    let deltas = data.comparison.clone().unwrap_or_default();
    push_delta(
        &mut lines,
        "Win Rate Difference",
        deltas.win_rate_diff.unwrap_or(0.0),
        "%",
    );
    push_delta(&mut lines, "KDA Difference", deltas.kda_diff.unwrap_or(0.0), "");
    push_delta(
        &mut lines,
        "Damage/Min Difference",
        deltas.damage_diff.unwrap_or(0.0),
        "",
    );
    push_delta(&mut lines, "CS/Min Difference", deltas.cs_diff.unwrap_or(0.0), "");

    lines.join("\n")
}

fn render_moments(data: &ShareableMomentsResponse) -> String {
    if data.shareable_cards.is_empty() {
        return String::from("No shareable moments found. Play more games to generate moments!");
    }

    let mut lines = Vec::new();
    lines.push(String::from("Shareable Moments"));
    lines.push(String::from(
        "Show off your achievements! Share these moments on social media.",
    ));

    for card in &data.shareable_cards {
        lines.push(String::new());
        lines.push(format!("{} {}", card.emoji, card.title));
        lines.push(format!("   {}", card.subtitle));
        lines.push(format!("   {}", card.stat));
        lines.push(format!("   Share: {}", share_intent_url(card)));
        lines.push(format!("   Copy text: {}", share_text(card).replace('\n', " / ")));
    }

    lines.join("\n")
}
