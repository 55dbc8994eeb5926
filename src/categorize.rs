//! Automatic classification for the credit-card invoice payment.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::UiError;
use crate::model::{Direction, Id, NewTransaction};
use crate::store::Snapshot;

pub const TRANSFER_SUBTYPE_HINT: &str = "Transferência";
pub const INVOICE_CATEGORY_HINT: &str = "Pagamento Fatura";

/// The first candidate whose name contains `label` (ignoring case), else the
/// first candidate at all.
pub fn best_match<'a, I>(candidates: I, label: &str) -> Option<Id>
where
    I: IntoIterator<Item = (Id, &'a str)>,
{
    let needle = label.to_lowercase();
    let mut first = None;
    for (id, name) in candidates {
        if name.to_lowercase().contains(&needle) {
            return Some(id);
        }
        first.get_or_insert(id);
    }
    first
}

#[derive(Clone, Debug, PartialEq)]
pub struct InvoicePayment {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub card_id: Id,
    pub source_id: Id,
}

/// Both legs of an invoice payment: the outflow leaving the funding account
/// and the inflow credited to the card.
#[derive(Clone, Debug, PartialEq)]
pub struct InvoiceLegs {
    pub outflow: NewTransaction,
    pub inflow: NewTransaction,
}

pub fn invoice_payment(
    snapshot: &Snapshot,
    payment: &InvoicePayment,
) -> Result<InvoiceLegs, UiError> {
    let card = snapshot
        .account(payment.card_id)
        .filter(|a| a.kind.is_credit())
        .ok_or(UiError::MissingSelection("Selecione o cartão de destino."))?;
    let source = snapshot
        .account(payment.source_id)
        .filter(|a| !a.kind.is_credit())
        .ok_or(UiError::MissingSelection("Selecione a conta de origem."))?;
    if payment.amount <= Decimal::ZERO {
        return Err(UiError::Invalid("Informe um valor maior que zero.".to_string()));
    }

    let leg = |direction: Direction,
               account_id: Id,
               description: String|
     -> Result<NewTransaction, UiError> {
        let type_id = snapshot.type_for(direction);
        let subtype_id = best_match(
            snapshot.subtypes_of(type_id).map(|s| (s.id, s.name.as_str())),
            TRANSFER_SUBTYPE_HINT,
        )
        .ok_or_else(|| {
            UiError::Invalid(format!(
                "Cadastre um subtipo de {} para registrar o pagamento.",
                direction.type_name()
            ))
        })?;
        let category_id = best_match(
            snapshot
                .categories_of(subtype_id)
                .map(|c| (c.id, c.name.as_str())),
            INVOICE_CATEGORY_HINT,
        );
        Ok(NewTransaction {
            date: payment.date,
            description,
            amount: payment.amount,
            type_id,
            subtype_id,
            category_id,
            account_id: Some(account_id),
            installments: 1,
            attachment: None,
        })
    };

    Ok(InvoiceLegs {
        outflow: leg(
            Direction::Outflow,
            source.id,
            format!("Pagamento Fatura {}", card.name),
        )?,
        inflow: leg(
            Direction::Inflow,
            card.id,
            format!("Pagamento Recebido (de {})", source.name),
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_utils::{date, dec, sample_snapshot, CHECKING, VISA};

    #[test]
    fn best_match_is_case_insensitive_and_falls_back_to_first() {
        let candidates = [(1, "Casa"), (2, "TRANSFERÊNCIAS"), (3, "Transferência PIX")];
        assert_eq!(best_match(candidates, "transferência"), Some(2));
        assert_eq!(best_match(candidates, "mercado"), Some(1));
        assert_eq!(best_match(std::iter::empty(), "mercado"), None);
    }

    #[test]
    fn invoice_payment_produces_matching_legs() {
        let snapshot = sample_snapshot();
        let payment = InvoicePayment {
            date: date(2024, 5, 15),
            amount: dec("200"),
            card_id: VISA,
            source_id: CHECKING,
        };
        let legs = invoice_payment(&snapshot, &payment).unwrap();

        assert_eq!(legs.outflow.date, legs.inflow.date);
        assert_eq!(legs.outflow.amount, dec("200"));
        assert_eq!(legs.inflow.amount, dec("200"));

        assert_eq!(legs.outflow.type_id, 2);
        assert_eq!(legs.outflow.account_id, Some(CHECKING));
        assert_eq!(legs.outflow.subtype_id, 21);
        assert_eq!(legs.outflow.category_id, Some(210));
        assert_eq!(legs.outflow.description, "Pagamento Fatura Visa");

        assert_eq!(legs.inflow.type_id, 1);
        assert_eq!(legs.inflow.account_id, Some(VISA));
        assert_eq!(legs.inflow.subtype_id, 11);
        assert_eq!(legs.inflow.category_id, Some(111));
        assert_eq!(legs.inflow.description, "Pagamento Recebido (de Checking)");
    }

    #[test]
    fn invoice_payment_uses_first_subtype_without_a_transfer_match() {
        let mut snapshot = sample_snapshot();
        snapshot.subtypes.retain(|s| s.id != 11 && s.id != 21);
        let payment = InvoicePayment {
            date: date(2024, 5, 15),
            amount: dec("200"),
            card_id: VISA,
            source_id: CHECKING,
        };
        let legs = invoice_payment(&snapshot, &payment).unwrap();
        assert_eq!(legs.outflow.subtype_id, 20);
        assert_eq!(legs.outflow.category_id, Some(200));
        assert_eq!(legs.inflow.subtype_id, 10);
        assert_eq!(legs.inflow.category_id, Some(100));
    }

    #[test]
    fn invoice_payment_rejects_wrong_accounts_and_missing_subtypes() {
        let snapshot = sample_snapshot();
        let swapped = InvoicePayment {
            date: date(2024, 5, 15),
            amount: dec("200"),
            card_id: CHECKING,
            source_id: VISA,
        };
        assert!(matches!(
            invoice_payment(&snapshot, &swapped),
            Err(UiError::MissingSelection(_))
        ));

        let mut empty = sample_snapshot();
        empty.subtypes.clear();
        let payment = InvoicePayment {
            card_id: VISA,
            source_id: CHECKING,
            ..swapped
        };
        assert!(matches!(
            invoice_payment(&empty, &payment),
            Err(UiError::Invalid(_))
        ));

        let zero = InvoicePayment {
            amount: dec("0"),
            ..payment
        };
        assert!(matches!(
            invoice_payment(&snapshot, &zero),
            Err(UiError::Invalid(_))
        ));
    }
}
