//! Games doughnut chart
//!
//! Plays per game type.

use super::{
    style, ChartConfig, ChartData, ChartKind, ChartSlot, ChartSurface, ChartUpdate, Dataset,
};
use crate::backend::schema::GameStat;

/// Segment colors, cycled by Chart.js when there are more game types
const PALETTE: [&str; 5] = [
    "#6366f1", // Indigo
    "#ec4899", // Pink
    "#10b981", // Emerald
    "#f59e0b", // Amber
    "#8b5cf6", // Violet
];

/// Full doughnut chart configuration with the dashboard theme
pub fn doughnut_config(labels: Vec<String>, values: Vec<i64>) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: None,
                data: values,
                style: style(serde_json::json!({
                    "backgroundColor": PALETTE,
                    "borderWidth": 0,
                    "hoverOffset": 10
                })),
            }],
        },
        options: serde_json::json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": {
                    "position": "right",
                    "labels": { "usePointStyle": true, "padding": 20 }
                }
            },
            "cutout": "70%"
        }),
    }
}

/// Push per-game play counts into the chart slot
pub fn update_games_chart<S: ChartSurface + ?Sized>(
    slot: &mut ChartSlot,
    surface: &mut S,
    games: &[GameStat],
) -> ChartUpdate {
    let labels = games.iter().map(|g| g.game_type.clone()).collect();
    let values = games.iter().map(|g| g.total_played).collect();

    slot.update(surface, labels, values, doughnut_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::tests::RecordingSurface;

    fn game(kind: &str, played: i64) -> GameStat {
        GameStat {
            game_type: kind.to_string(),
            total_played: played,
            total_wins: 0,
            total_losses: None,
            best_streak: None,
        }
    }

    #[test]
    fn test_doughnut_options() {
        let json = serde_json::to_value(doughnut_config(vec![], vec![])).unwrap();

        assert_eq!(json["type"], "doughnut");
        assert_eq!(json["options"]["cutout"], "70%");
        assert_eq!(json["options"]["plugins"]["legend"]["position"], "right");
        assert_eq!(json["data"]["datasets"][0]["backgroundColor"][1], "#ec4899");
    }

    #[test]
    fn test_games_chart_labels_and_values() {
        let mut surface = RecordingSurface::with_canvas("gamesChart");
        let mut slot = ChartSlot::new("gamesChart");

        update_games_chart(&mut slot, &mut surface, &[game("trivia", 12), game("rps", 4)]);
        update_games_chart(&mut slot, &mut surface, &[game("trivia", 13)]);

        let instance = slot.instance().unwrap();
        assert_eq!(surface.mounts.len(), 1);
        assert_eq!(surface.redraws.len(), 1);
        assert_eq!(instance.config.data.labels, vec!["trivia"]);
        assert_eq!(instance.config.data.datasets[0].data, vec![13]);
    }
}
