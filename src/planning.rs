//! Yearly planning table built from the server's nested monthly totals.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::model::Direction;

/// `type name → subtype name → category name → twelve monthly totals`.
pub type PlanningTree = BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<Decimal>>>>;

pub const MONTHS: usize = 12;
pub const MONTH_LABELS: [&str; MONTHS] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

#[derive(Clone, Debug, PartialEq)]
pub struct PlanningRow {
    pub label: String,
    pub months: [Decimal; MONTHS],
    pub total: Decimal,
}

impl PlanningRow {
    fn new(label: impl Into<String>, values: &[Decimal]) -> Self {
        let mut months = [Decimal::ZERO; MONTHS];
        for (slot, value) in months.iter_mut().zip(values) {
            *slot = *value;
        }
        PlanningRow {
            label: label.into(),
            total: months.iter().copied().sum(),
            months,
        }
    }

    fn add(&mut self, other: &PlanningRow) {
        for (slot, value) in self.months.iter_mut().zip(other.months.iter()) {
            *slot += *value;
        }
        self.total += other.total;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlanningGroup {
    pub subtype: String,
    pub rows: Vec<PlanningRow>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Danger,
    Neutral,
}

impl Tone {
    pub fn css(self) -> &'static str {
        match self {
            Tone::Success => "table-success",
            Tone::Danger => "table-danger",
            Tone::Neutral => "table-secondary",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlanningSection {
    pub type_name: String,
    pub tone: Tone,
    pub groups: Vec<PlanningGroup>,
    pub totals: PlanningRow,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlanningView {
    pub year: i32,
    pub sections: Vec<PlanningSection>,
    /// Inflow minus outflow, month by month.
    pub balance: PlanningRow,
}

fn section(
    type_name: &str,
    subtypes: &BTreeMap<String, BTreeMap<String, Vec<Decimal>>>,
) -> PlanningSection {
    let tone = match type_name {
        Direction::INFLOW_TYPE_NAME => Tone::Success,
        Direction::OUTFLOW_TYPE_NAME => Tone::Danger,
        _ => Tone::Neutral,
    };
    let mut totals = PlanningRow::new(format!("Total {}", type_name), &[]);
    let groups = subtypes
        .iter()
        .map(|(subtype, categories)| PlanningGroup {
            subtype: subtype.clone(),
            rows: categories
                .iter()
                .map(|(category, values)| {
                    let row = PlanningRow::new(category.clone(), values);
                    totals.add(&row);
                    row
                })
                .collect(),
        })
        .collect();
    PlanningSection {
        type_name: type_name.to_string(),
        tone,
        groups,
        totals,
    }
}

/// Sections come in the order Entrada, Saída, then any other type by name.
pub fn planning_view(year: i32, tree: &PlanningTree) -> PlanningView {
    let mut names: Vec<&String> = tree.keys().collect();
    let rank = |name: &str| match name {
        Direction::INFLOW_TYPE_NAME => 0,
        Direction::OUTFLOW_TYPE_NAME => 1,
        _ => 2,
    };
    names.sort_by_key(|name| rank(name.as_str()));

    let sections: Vec<PlanningSection> = names
        .into_iter()
        .map(|name| section(name, &tree[name]))
        .collect();

    let mut balance = PlanningRow::new("Saldo", &[]);
    for s in &sections {
        let sign = match s.type_name.as_str() {
            Direction::INFLOW_TYPE_NAME => Decimal::ONE,
            Direction::OUTFLOW_TYPE_NAME => Decimal::NEGATIVE_ONE,
            _ => continue,
        };
        for (slot, value) in balance.months.iter_mut().zip(s.totals.months.iter()) {
            *slot += *value * sign;
        }
        balance.total += s.totals.total * sign;
    }

    PlanningView {
        year,
        sections,
        balance,
    }
}
