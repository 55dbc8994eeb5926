//! Monthly transaction list and the summary cards above it.
//!
//! Only settled transactions move money: unsettled ones are listed but add
//! nothing to any total or chart.

use rust_decimal::Decimal;

use crate::charts::{group_series, ChartSpec, GroupKey};
use crate::model::{Direction, Id, Transaction};
use crate::money::{format_currency, format_date};
use crate::settings::AppSettings;
use crate::state::{AppState, YearMonth};
use crate::store::Snapshot;

/// Transactions in `month` (and `account`, when given), newest first.
/// Same-day entries keep their server order.
pub fn select_transactions(
    transactions: &[Transaction],
    month: YearMonth,
    account: Option<Id>,
) -> Vec<&Transaction> {
    let mut selected: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.date.map_or(false, |d| month.contains(d)))
        .filter(|t| account.is_none() || t.account_id == account)
        .collect();
    selected.sort_by(|a, b| b.date.cmp(&a.date));
    selected
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub inflow: Decimal,
    pub outflow: Decimal,
    /// Money on hand: settled movements on non-credit accounts.
    pub available: Decimal,
    /// Outstanding invoice: card purchases minus payments received by cards.
    pub card_balance: Decimal,
}

impl Summary {
    pub fn compute(transactions: &[&Transaction], snapshot: &Snapshot) -> Self {
        let mut summary = Summary::default();
        for tx in transactions.iter().filter(|t| t.settled) {
            let direction = tx.direction();
            match direction {
                Direction::Inflow => summary.inflow += tx.amount,
                Direction::Outflow => summary.outflow += tx.amount,
            }
            if snapshot.is_credit_card(tx.account_id) {
                match direction {
                    Direction::Outflow => summary.card_balance += tx.amount,
                    Direction::Inflow => summary.card_balance -= tx.amount,
                }
            } else {
                match direction {
                    Direction::Inflow => summary.available += tx.amount,
                    Direction::Outflow => summary.available -= tx.amount,
                }
            }
        }
        summary
    }

    pub fn net(&self) -> Decimal {
        self.available - self.card_balance
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransactionRow {
    pub id: Id,
    pub date: String,
    pub account_icon: &'static str,
    pub account_label: String,
    pub description: String,
    pub attachment_url: Option<String>,
    pub type_name: String,
    pub subtype: String,
    pub category: String,
    pub amount: String,
    pub direction: Direction,
    pub settled: bool,
}

impl TransactionRow {
    fn build(tx: &Transaction, snapshot: &Snapshot, settings: &AppSettings) -> Self {
        let account_label = tx
            .account_name
            .clone()
            .or_else(|| {
                tx.account_id
                    .and_then(|id| snapshot.account(id))
                    .map(|a| a.name.clone())
            })
            .unwrap_or_else(|| "Geral".to_string());
        TransactionRow {
            id: tx.id,
            date: tx.date.map(format_date).unwrap_or_else(|| "-".to_string()),
            account_icon: if snapshot.is_credit_card(tx.account_id) {
                "💳"
            } else {
                "🏦"
            },
            account_label,
            description: tx.description.clone(),
            attachment_url: tx
                .attachment
                .as_ref()
                .filter(|f| !f.is_empty())
                .map(|f| settings.url(&format!("/uploads/{}", f))),
            type_name: tx.type_name.clone(),
            subtype: tx.subtype.clone().unwrap_or_default(),
            category: tx.category.clone().unwrap_or_default(),
            amount: format_currency(tx.amount, &settings.currency_symbol),
            direction: tx.direction(),
            settled: tx.settled,
        }
    }
}

/// Everything the transactions page draws for the current filters.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerView {
    pub rows: Vec<TransactionRow>,
    pub summary: Summary,
    pub charts: Vec<ChartSpec>,
}

pub fn ledger_view(state: &AppState, settings: &AppSettings) -> LedgerView {
    let snapshot = &state.snapshot;
    let selected = select_transactions(
        &snapshot.transactions,
        state.filters.month,
        state.filters.account,
    );
    let summary = Summary::compute(&selected, snapshot);
    let settled: Vec<&Transaction> = selected.iter().copied().filter(|t| t.settled).collect();

    let breakdown = |id: &'static str, title: &'static str, direction, key| ChartSpec::Breakdown {
        id,
        title,
        series: group_series(&settled, direction, key),
    };
    let charts = vec![
        ChartSpec::Balance {
            inflow: summary.inflow,
            outflow: summary.outflow,
        },
        breakdown(
            "chart-ent-sub",
            "Entradas por subtipo",
            Direction::Inflow,
            GroupKey::Subtype,
        ),
        breakdown(
            "chart-ent-cat",
            "Entradas por categoria",
            Direction::Inflow,
            GroupKey::Category,
        ),
        breakdown(
            "chart-sai-sub",
            "Saídas por subtipo",
            Direction::Outflow,
            GroupKey::Subtype,
        ),
        breakdown(
            "chart-sai-cat",
            "Saídas por categoria",
            Direction::Outflow,
            GroupKey::Category,
        ),
    ];

    LedgerView {
        rows: selected
            .iter()
            .map(|tx| TransactionRow::build(tx, snapshot, settings))
            .collect(),
        summary,
        charts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_utils::{date, dec, sample_snapshot, tx, CHECKING, VISA};

    fn may() -> YearMonth {
        YearMonth {
            year: 2024,
            month: 5,
        }
    }

    #[test]
    fn unsettled_outflow_does_not_reduce_available_balance() {
        let snapshot = sample_snapshot();
        let txs = vec![
            tx(1, date(2024, 5, 1), "Entrada", "100", true, Some(CHECKING)),
            tx(2, date(2024, 5, 2), "Saída", "40", true, Some(CHECKING)),
            tx(3, date(2024, 5, 3), "Saída", "25", false, Some(CHECKING)),
        ];
        let selected = select_transactions(&txs, may(), None);
        assert_eq!(selected.len(), 3);

        let summary = Summary::compute(&selected, &snapshot);
        assert_eq!(summary.available, dec("60"));
        assert_eq!(summary.inflow, dec("100"));
        assert_eq!(summary.outflow, dec("40"));
        assert_eq!(summary.card_balance, dec("0"));
        assert_eq!(summary.net(), dec("60"));
    }

    #[test]
    fn card_balance_grows_with_purchases_and_shrinks_with_payments() {
        let snapshot = sample_snapshot();
        let txs = vec![
            tx(1, date(2024, 5, 1), "Saída", "300", true, Some(VISA)),
            tx(2, date(2024, 5, 5), "Entrada", "200", true, Some(VISA)),
            tx(3, date(2024, 5, 5), "Saída", "200", true, Some(CHECKING)),
            tx(4, date(2024, 5, 6), "Saída", "999", false, Some(VISA)),
            tx(5, date(2024, 5, 7), "Entrada", "1000", true, Some(CHECKING)),
        ];
        let selected = select_transactions(&txs, may(), None);
        let summary = Summary::compute(&selected, &snapshot);

        assert_eq!(summary.card_balance, dec("100"));
        assert_eq!(summary.available, dec("800"));
        assert_eq!(summary.net(), dec("700"));
        assert_eq!(summary.inflow, dec("1200"));
        assert_eq!(summary.outflow, dec("500"));
    }

    #[test]
    fn available_balance_is_signed_sum_of_settled_non_credit_entries() {
        let snapshot = sample_snapshot();
        let txs: Vec<Transaction> = (0..20)
            .map(|i| {
                let kind = if i % 3 == 0 { "Entrada" } else { "Saída" };
                let account = match i % 4 {
                    0 => Some(VISA),
                    1 => None,
                    _ => Some(CHECKING),
                };
                tx(
                    i,
                    date(2024, 5, 1 + (i as u32 % 28)),
                    kind,
                    &format!("{}.25", i),
                    i % 5 != 0,
                    account,
                )
            })
            .collect();
        let selected = select_transactions(&txs, may(), None);
        let summary = Summary::compute(&selected, &snapshot);

        let signed = |t: &&Transaction| match t.direction() {
            Direction::Inflow => t.amount,
            Direction::Outflow => -t.amount,
        };
        let expected_available: Decimal = txs
            .iter()
            .filter(|t| t.settled && !snapshot.is_credit_card(t.account_id))
            .map(|t| signed(&t))
            .sum();
        let expected_card: Decimal = txs
            .iter()
            .filter(|t| t.settled && snapshot.is_credit_card(t.account_id))
            .map(|t| -signed(&t))
            .sum();
        assert_eq!(summary.available, expected_available);
        assert_eq!(summary.card_balance, expected_card);
    }

    #[test]
    fn selection_filters_month_and_account_and_sorts_newest_first() {
        let txs = vec![
            tx(1, date(2024, 5, 3), "Saída", "1", true, Some(CHECKING)),
            tx(2, date(2024, 5, 20), "Saída", "2", true, Some(VISA)),
            tx(3, date(2024, 4, 30), "Saída", "3", true, Some(CHECKING)),
            tx(4, date(2024, 5, 20), "Saída", "4", true, Some(CHECKING)),
            tx(5, date(2023, 5, 20), "Saída", "5", true, Some(CHECKING)),
        ];
        let ids: Vec<Id> = select_transactions(&txs, may(), None)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![2, 4, 1]);

        let ids: Vec<Id> = select_transactions(&txs, may(), Some(CHECKING))
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![4, 1]);
    }

    #[test]
    fn undated_transactions_fall_in_no_month() {
        let mut undated = tx(2, date(2024, 5, 1), "Saída", "9", true, Some(CHECKING));
        undated.date = None;
        let txs = vec![
            tx(1, date(2024, 5, 3), "Saída", "1", true, Some(CHECKING)),
            undated,
        ];
        let selected = select_transactions(&txs, may(), None);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, 1);
        assert_eq!(Summary::compute(&selected, &sample_snapshot()).outflow, dec("1"));
    }

    #[test]
    fn ledger_view_rows_resolve_accounts_and_attachments() {
        let mut state = AppState::new(date(2024, 5, 10));
        let mut snapshot = sample_snapshot();
        let mut with_file = tx(1, date(2024, 5, 2), "Saída", "10", true, Some(VISA));
        with_file.attachment = Some("1700_nota.pdf".to_string());
        snapshot.transactions = vec![
            with_file,
            tx(2, date(2024, 5, 1), "Entrada", "50", false, None),
        ];
        state.replace_snapshot(snapshot);
        let settings = AppSettings::default().with_base_url("http://localhost:5000");

        let view = ledger_view(&state, &settings);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].account_icon, "💳");
        assert_eq!(view.rows[0].account_label, "Visa");
        assert_eq!(
            view.rows[0].attachment_url.as_deref(),
            Some("http://localhost:5000/uploads/1700_nota.pdf")
        );
        assert_eq!(view.rows[0].date, "02/05/2024");
        assert_eq!(view.rows[1].account_label, "Geral");
        assert_eq!(view.rows[1].amount, "R$ 50,00");
        assert_eq!(view.summary.inflow, dec("0"));
        assert_eq!(view.charts.len(), 5);
    }
}
