use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::model::{DueItem, Id};
use crate::planning::PlanningTree;
use crate::store::{ConfigResource, Snapshot};

/// A calendar month, as used by the `YYYY-MM` month filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            YearMonth {
                year: self.year + 1,
                month: 1,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("mês inválido: {}", s))?;
        let year = year.parse().map_err(|_| format!("ano inválido: {}", s))?;
        let month: u32 = month.parse().map_err(|_| format!("mês inválido: {}", s))?;
        if !(1..=12).contains(&month) {
            return Err(format!("mês inválido: {}", s));
        }
        Ok(YearMonth { year, month })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Filters {
    pub month: YearMonth,
    pub account: Option<Id>,
    pub planning_year: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigSelection {
    pub type_id: Option<Id>,
    pub subtype_id: Option<Id>,
}

impl ConfigSelection {
    /// Picking a type always drops the subtype chosen under the previous one.
    pub fn select_type(&mut self, id: Id) {
        self.type_id = Some(id);
        self.subtype_id = None;
    }

    pub fn select_subtype(&mut self, id: Id) {
        self.subtype_id = Some(id);
    }
}

/// A config list row that is showing its "Apagar? Sim / Não" control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConfigRowKey {
    pub resource: ConfigResource,
    pub id: Id,
}

/// The one delete waiting for confirmation in the shared dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingDelete {
    Transaction(Id),
    DueItem(Id),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialog {
    NewTransaction,
    InvoicePayment,
    NewDueItem,
    ConfirmDelete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub snapshot: Snapshot,
    pub due_items: Vec<DueItem>,
    pub years: Vec<i32>,
    pub planning: Option<PlanningTree>,
    pub filters: Filters,
    pub selection: ConfigSelection,
    pub confirming: Option<ConfigRowKey>,
    pub pending_delete: Option<PendingDelete>,
    pub dialog: Option<Dialog>,
    pub today: NaiveDate,
}

impl AppState {
    pub fn new(today: NaiveDate) -> Self {
        AppState {
            snapshot: Snapshot::default(),
            due_items: vec![],
            years: vec![],
            planning: None,
            filters: Filters {
                month: YearMonth::of(today),
                account: None,
                planning_year: today.year(),
            },
            selection: ConfigSelection::default(),
            confirming: None,
            pending_delete: None,
            dialog: None,
            today,
        }
    }

    /// Installs a freshly fetched snapshot. Any row left in confirm mode goes
    /// back to normal, and filters or selections pointing at records the
    /// server no longer lists are dropped.
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        self.confirming = None;
        if let Some(account) = self.filters.account {
            if self.snapshot.account(account).is_none() {
                self.filters.account = None;
            }
        }
        self.prune_selection();
    }

    fn prune_selection(&mut self) {
        let type_id = self
            .selection
            .type_id
            .filter(|id| self.snapshot.type_node(*id).is_some());
        let subtype_id = self.selection.subtype_id.filter(|id| {
            self.snapshot
                .subtype(*id)
                .map_or(false, |s| Some(s.type_id) == type_id)
        });
        self.selection = ConfigSelection {
            type_id,
            subtype_id,
        };
    }

    /// Keeps the selected planning year when the server still lists it,
    /// otherwise falls back to the first listed year.
    pub fn set_years(&mut self, years: Vec<i32>) {
        if !years.contains(&self.filters.planning_year) {
            if let Some(first) = years.first() {
                self.filters.planning_year = *first;
            }
        }
        self.years = years;
    }
}
