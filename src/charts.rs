//! Chart series for the transactions page and their ECharts rendering.
//!
//! Series are computed from settled transactions only, grouped by subtype or
//! category name. Drawing is delegated to ECharts through `charming`.

use charming::{
    component::Legend,
    element::{Color, JsFunction, Tooltip, Trigger},
    series::Pie,
    Chart, WasmRenderer,
};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use yew::prelude::*;

use crate::model::{Direction, Transaction};

/// Bucket for transactions that have no value for the grouping key.
pub const OTHER_BUCKET: &str = "Outros";

const CHART_WIDTH: u32 = 360;
const CHART_HEIGHT: u32 = 300;

const BALANCE_COLORS: [&str; 2] = ["#198754", "#dc3545"];
const PALETTE: [&str; 8] = [
    "#0d6efd", "#6610f2", "#d63384", "#dc3545", "#ffc107", "#198754", "#20c997", "#0dcaf0",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupKey {
    Subtype,
    Category,
}

impl GroupKey {
    fn label_of<'a>(&self, tx: &'a Transaction) -> Option<&'a str> {
        match self {
            GroupKey::Subtype => tx.subtype.as_deref(),
            GroupKey::Category => tx.category.as_deref(),
        }
    }
}

/// Sums settled amounts of one direction per label, in order of first
/// appearance. Missing or empty labels land in [`OTHER_BUCKET`].
pub fn group_series(
    transactions: &[&Transaction],
    direction: Direction,
    key: GroupKey,
) -> Vec<(String, Decimal)> {
    let mut buckets: Vec<(String, Decimal)> = Vec::new();
    for tx in transactions
        .iter()
        .filter(|t| t.settled && t.direction() == direction)
    {
        let label = key
            .label_of(tx)
            .filter(|l| !l.is_empty())
            .unwrap_or(OTHER_BUCKET);
        match buckets.iter_mut().find(|(name, _)| name == label) {
            Some((_, total)) => *total += tx.amount,
            None => buckets.push((label.to_string(), tx.amount)),
        }
    }
    buckets
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChartSpec {
    /// Inflow against outflow, as a pie.
    Balance { inflow: Decimal, outflow: Decimal },
    /// One grouped series, as a doughnut.
    Breakdown {
        id: &'static str,
        title: &'static str,
        series: Vec<(String, Decimal)>,
    },
}

impl ChartSpec {
    pub fn id(&self) -> &'static str {
        match self {
            ChartSpec::Balance { .. } => "chart-balanco",
            ChartSpec::Breakdown { id, .. } => id,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartSpec::Balance { .. } => "Entradas x Saídas",
            ChartSpec::Breakdown { title, .. } => title,
        }
    }

    /// Tooltip values are formatted in `currency_code`.
    pub fn to_chart(&self, currency_code: &str) -> Chart {
        let (data, colors, doughnut) = match self {
            ChartSpec::Balance { inflow, outflow } => (
                vec![
                    (as_f64(*inflow), "Entradas".to_string()),
                    (as_f64(*outflow), "Saídas".to_string()),
                ],
                &BALANCE_COLORS[..],
                false,
            ),
            ChartSpec::Breakdown { series, .. } => (
                series
                    .iter()
                    .map(|(label, total)| (as_f64(*total), label.clone()))
                    .collect(),
                &PALETTE[..],
                true,
            ),
        };

        let mut pie = Pie::new().name(self.title()).data(data);
        if doughnut {
            pie = pie.radius(vec!["40%", "70%"]);
        }

        Chart::new()
            .color(colors.iter().map(|c| Color::from(*c)).collect())
            .tooltip(
                Tooltip::new()
                    .trigger(Trigger::Item)
                    .value_formatter(JsFunction::new_with_args(
                        "number",
                        &currency_formatter_body(currency_code),
                    )),
            )
            .legend(Legend::new().bottom("0%"))
            .series(pie)
    }
}

fn as_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

fn currency_formatter_body(currency_code: &str) -> String {
    let code = serde_json::to_string(currency_code).unwrap_or_else(|_| "\"BRL\"".to_string());
    format!(
        "return new Intl.NumberFormat('pt-BR', {{ style: 'currency', currency: {} }}).format(number);",
        code
    )
}

#[derive(Properties, PartialEq)]
pub struct ChartViewProps {
    pub spec: ChartSpec,
    pub currency_code: String,
}

#[function_component(ChartView)]
pub fn chart_view(props: &ChartViewProps) -> Html {
    use_effect_with_deps(
        move |(spec, currency_code): &(ChartSpec, String)| {
            let chart = spec.to_chart(currency_code);
            if let Err(e) = WasmRenderer::new(CHART_WIDTH, CHART_HEIGHT).render(spec.id(), &chart) {
                log::error!("could not draw chart {}: {:?}", spec.id(), e);
            }
            || ()
        },
        (props.spec.clone(), props.currency_code.clone()),
    );

    html! {
        <div class="bg-card rounded-[10px] p-4 border border-border">
            <h4 class="text-sm font-bold text-foreground mb-2">{ props.spec.title() }</h4>
            <div id={props.spec.id()} class="min-h-[300px]"></div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_utils::{date, dec, tx};

    fn labelled(
        id: i64,
        kind: &str,
        amount: &str,
        settled: bool,
        sub: Option<&str>,
        cat: Option<&str>,
    ) -> Transaction {
        let mut t = tx(id, date(2024, 5, 1), kind, amount, settled, None);
        t.subtype = sub.map(str::to_string);
        t.category = cat.map(str::to_string);
        t
    }

    #[test]
    fn groups_keep_first_occurrence_order_and_fall_back_to_other() {
        let txs = vec![
            labelled(1, "Saída", "10", true, Some("Casa"), Some("Aluguel")),
            labelled(2, "Saída", "5", true, Some("Lazer"), Some("")),
            labelled(3, "Saída", "2.5", true, Some("Casa"), None),
            labelled(4, "Entrada", "100", true, Some("Salário"), Some("CLT")),
            labelled(5, "Saída", "70", false, Some("Casa"), Some("Aluguel")),
        ];
        let refs: Vec<&Transaction> = txs.iter().collect();

        let by_subtype = group_series(&refs, Direction::Outflow, GroupKey::Subtype);
        assert_eq!(
            by_subtype,
            vec![
                ("Casa".to_string(), dec("12.5")),
                ("Lazer".to_string(), dec("5")),
            ]
        );

        let by_category = group_series(&refs, Direction::Outflow, GroupKey::Category);
        assert_eq!(
            by_category,
            vec![
                ("Aluguel".to_string(), dec("10")),
                (OTHER_BUCKET.to_string(), dec("7.5")),
            ]
        );
    }

    #[test]
    fn grouped_totals_match_direction_totals() {
        let txs: Vec<Transaction> = (0..30)
            .map(|i| {
                let kind = if i % 2 == 0 { "Entrada" } else { "Saída" };
                let sub = ["A", "B", "", "C"][i as usize % 4];
                let cat = if i % 5 == 0 { None } else { Some("X") };
                labelled(i, kind, &format!("{}.10", i + 1), i % 7 != 0, Some(sub), cat)
            })
            .collect();
        let refs: Vec<&Transaction> = txs.iter().collect();

        for direction in [Direction::Inflow, Direction::Outflow] {
            let expected: Decimal = txs
                .iter()
                .filter(|t| t.settled && t.direction() == direction)
                .map(|t| t.amount)
                .sum();
            for key in [GroupKey::Subtype, GroupKey::Category] {
                let total: Decimal = group_series(&refs, direction, key)
                    .iter()
                    .map(|(_, v)| *v)
                    .sum();
                assert_eq!(total, expected);
            }
        }
    }

    #[test]
    fn breakdown_chart_carries_labels_and_values() {
        let spec = ChartSpec::Breakdown {
            id: "chart-sai-sub",
            title: "Saídas por subtipo",
            series: vec![("Casa".to_string(), dec("12.5"))],
        };
        let json = spec.to_chart("BRL").to_string();
        assert!(json.contains("Casa"));
        assert!(json.contains("12.5"));
        assert!(json.contains("40%"));
        assert_eq!(spec.id(), "chart-sai-sub");
    }

    #[test]
    fn balance_chart_is_a_plain_pie() {
        let spec = ChartSpec::Balance {
            inflow: dec("100"),
            outflow: dec("40"),
        };
        let json = spec.to_chart("BRL").to_string();
        assert!(json.contains("Entradas"));
        assert!(json.contains("Saídas"));
        assert!(!json.contains("40%"));
    }

    #[test]
    fn tooltip_formatter_uses_the_chosen_currency() {
        let body = currency_formatter_body("USD");
        assert!(body.contains("currency: \"USD\""));
        assert!(!body.contains("BRL"));
        assert!(currency_formatter_body("EUR").contains("\"EUR\""));
    }
}
