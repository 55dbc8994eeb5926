use chrono::{Datelike, NaiveDate};

use crate::model::{DueItem, DueKind, DueSchedule, Id};
use crate::money::format_date;
use crate::state::YearMonth;

#[derive(Clone, Debug, PartialEq)]
pub struct DueRow {
    pub id: Id,
    pub description: String,
    pub kind: DueKind,
    pub schedule: String,
    pub active: bool,
}

pub fn due_rows(items: &[DueItem]) -> Vec<DueRow> {
    items
        .iter()
        .map(|item| DueRow {
            id: item.id,
            description: item.description.clone(),
            kind: item.kind,
            schedule: match item.schedule() {
                DueSchedule::DayOfMonth(day) => format!("Todo dia {}", day),
                DueSchedule::On(date) => format_date(date),
                DueSchedule::Unscheduled => "-".to_string(),
            },
            active: item.active,
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DueWindow {
    Today,
    ThisMonth,
    /// Everything from the first day of next month onwards.
    Upcoming,
}

impl DueWindow {
    pub const ALL: [DueWindow; 3] = [DueWindow::Today, DueWindow::ThisMonth, DueWindow::Upcoming];

    pub fn title(self) -> &'static str {
        match self {
            DueWindow::Today => "🔥 Vencendo hoje",
            DueWindow::ThisMonth => "📅 Vencem este mês",
            DueWindow::Upcoming => "🔮 Próximas contas",
        }
    }
}

/// Active items falling in a window, split into fixed and dated reminders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reminders {
    pub fixed: Vec<String>,
    pub dated: Vec<String>,
}

impl Reminders {
    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty() && self.dated.is_empty()
    }
}

pub fn reminders(items: &[DueItem], today: NaiveDate, window: DueWindow) -> Reminders {
    let mut out = Reminders::default();
    let cutoff = YearMonth::of(today).next().first_day();
    for item in items.iter().filter(|i| i.active) {
        match (item.schedule(), window) {
            (DueSchedule::DayOfMonth(day), DueWindow::Today) if day == today.day() => {
                out.fixed.push(format!("{} (Todo dia {})", item.description, day));
            }
            (DueSchedule::DayOfMonth(day), DueWindow::ThisMonth) if day >= today.day() => {
                out.fixed.push(format!("{} (Dia {})", item.description, day));
            }
            (DueSchedule::DayOfMonth(day), DueWindow::Upcoming) => {
                out.fixed.push(format!("{} (Todo dia {})", item.description, day));
            }
            (DueSchedule::On(date), DueWindow::Today) if date == today => {
                out.dated.push(format!("{} (Vence hoje)", item.description));
            }
            (DueSchedule::On(date), DueWindow::ThisMonth)
                if YearMonth::of(date) == YearMonth::of(today) && date.day() >= today.day() =>
            {
                out.dated
                    .push(format!("{} (Vence dia {})", item.description, date.day()));
            }
            (DueSchedule::On(date), DueWindow::Upcoming)
                if cutoff.map_or(false, |c| date >= c) =>
            {
                out.dated
                    .push(format!("{} ({})", item.description, format_date(date)));
            }
            _ => {}
        }
    }
    out
}

#[derive(Clone, Debug, PartialEq)]
pub struct DueView {
    pub rows: Vec<DueRow>,
    pub windows: Vec<(DueWindow, Reminders)>,
}

pub fn due_view(items: &[DueItem], today: NaiveDate) -> DueView {
    DueView {
        rows: due_rows(items),
        windows: DueWindow::ALL
            .into_iter()
            .map(|w| (w, reminders(items, today, w)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_utils::date;

    fn fixed(id: Id, description: &str, day: u32, active: bool) -> DueItem {
        DueItem {
            id,
            description: description.to_string(),
            kind: DueKind::Fixed,
            day: Some(day),
            date: None,
            active,
        }
    }

    fn dated(id: Id, description: &str, on: NaiveDate, active: bool) -> DueItem {
        DueItem {
            id,
            description: description.to_string(),
            kind: DueKind::Dated,
            day: None,
            date: Some(on),
            active,
        }
    }

    fn items() -> Vec<DueItem> {
        vec![
            fixed(1, "Aluguel", 10, true),
            fixed(2, "Internet", 5, true),
            fixed(3, "Academia", 10, false),
            dated(4, "IPVA", date(2024, 5, 10), true),
            dated(5, "IPTU", date(2024, 5, 28), true),
            dated(6, "Seguro", date(2024, 6, 1), true),
            dated(7, "Licenciamento", date(2024, 4, 30), true),
        ]
    }

    #[test]
    fn rows_describe_schedules() {
        let mut all = items();
        all.push(DueItem {
            date: None,
            ..dated(8, "Multa", date(2024, 1, 1), true)
        });
        let rows = due_rows(&all);
        assert_eq!(rows[0].schedule, "Todo dia 10");
        assert_eq!(rows[3].schedule, "10/05/2024");
        assert_eq!(rows[7].schedule, "-");
        assert!(!rows[2].active);
    }

    #[test]
    fn today_window_matches_day_and_exact_date() {
        let today = reminders(&items(), date(2024, 5, 10), DueWindow::Today);
        assert_eq!(today.fixed, vec!["Aluguel (Todo dia 10)"]);
        assert_eq!(today.dated, vec!["IPVA (Vence hoje)"]);
    }

    #[test]
    fn month_window_keeps_remaining_days_of_current_month() {
        let month = reminders(&items(), date(2024, 5, 10), DueWindow::ThisMonth);
        assert_eq!(month.fixed, vec!["Aluguel (Dia 10)"]);
        assert_eq!(
            month.dated,
            vec!["IPVA (Vence dia 10)", "IPTU (Vence dia 28)"]
        );
    }

    #[test]
    fn upcoming_window_starts_next_month() {
        let upcoming = reminders(&items(), date(2024, 5, 10), DueWindow::Upcoming);
        assert_eq!(
            upcoming.fixed,
            vec!["Aluguel (Todo dia 10)", "Internet (Todo dia 5)"]
        );
        assert_eq!(upcoming.dated, vec!["Seguro (01/06/2024)"]);
    }

    #[test]
    fn december_rolls_into_january() {
        let items = vec![dated(1, "Anuidade", date(2025, 1, 3), true)];
        let upcoming = reminders(&items, date(2024, 12, 20), DueWindow::Upcoming);
        assert_eq!(upcoming.dated, vec!["Anuidade (03/01/2025)"]);
        assert!(reminders(&items, date(2024, 12, 20), DueWindow::ThisMonth).is_empty());
    }

    #[test]
    fn view_lists_all_windows() {
        let view = due_view(&items(), date(2024, 5, 10));
        assert_eq!(view.rows.len(), 7);
        assert_eq!(view.windows.len(), 3);
        assert_eq!(view.windows[0].0, DueWindow::Today);
    }
}
