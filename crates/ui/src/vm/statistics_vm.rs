use literacy_core::model::{Level, LevelTallies};

/// One bar of the per-level chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelBarVm {
    pub label: &'static str,
    pub count: u32,
    /// Share of the total, rounded down.
    pub percent: u32,
}

#[must_use]
pub fn map_level_bars(tallies: &LevelTallies) -> Vec<LevelBarVm> {
    Level::ALL
        .into_iter()
        .map(|level| {
            let count = tallies.count(level);
            let percent = if tallies.total == 0 {
                0
            } else {
                count.saturating_mul(100) / tallies.total
            };
            LevelBarVm {
                label: level.label(),
                count,
                percent,
            }
        })
        .collect()
}
