//! Records exchanged with the finance API.
//!
//! Field names on the wire are the server's (Portuguese); the Rust side uses
//! English names and maps them with `serde(rename)`.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

pub type Id = i64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Inflow,
    Outflow,
}

impl Direction {
    pub const INFLOW_TYPE_NAME: &'static str = "Entrada";
    pub const OUTFLOW_TYPE_NAME: &'static str = "Saída";

    /// Only the exact `Entrada` type is an inflow; every other type counts
    /// as an outflow.
    pub fn from_type_name(name: &str) -> Self {
        if name == Self::INFLOW_TYPE_NAME {
            Direction::Inflow
        } else {
            Direction::Outflow
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            Direction::Inflow => Self::INFLOW_TYPE_NAME,
            Direction::Outflow => Self::OUTFLOW_TYPE_NAME,
        }
    }

    /// Ids the server seeds for the two built-in types.
    pub fn seeded_type_id(self) -> Id {
        match self {
            Direction::Inflow => 1,
            Direction::Outflow => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Transaction {
    pub id: Id,
    /// `None` when the server holds something that is not a date; such rows
    /// fall in no month.
    #[serde(rename = "data", default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub type_name: String,
    #[serde(rename = "subtipo", default)]
    pub subtype: Option<String>,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(rename = "valor")]
    pub amount: Decimal,
    #[serde(rename = "efetivado", default)]
    pub settled: bool,
    #[serde(rename = "comprovante", default)]
    pub attachment: Option<String>,
    #[serde(rename = "conta_id", default)]
    pub account_id: Option<Id>,
    #[serde(rename = "conta", default)]
    pub account_name: Option<String>,
}

impl Transaction {
    pub fn direction(&self) -> Direction {
        Direction::from_type_name(&self.type_name)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TypeNode {
    pub id: Id,
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Subtype {
    pub id: Id,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo_id")]
    pub type_id: Id,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Category {
    pub id: Id,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "subtipo_id")]
    pub subtype_id: Id,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    #[serde(rename = "banco")]
    Bank,
    #[serde(rename = "cartao_credito")]
    CreditCard,
    #[serde(rename = "vale")]
    Voucher,
    #[serde(rename = "investimento")]
    Investment,
    #[serde(rename = "carteira")]
    CashWallet,
    #[serde(other)]
    Other,
}

impl AccountKind {
    /// Kinds offered when creating an account.
    pub const SELECTABLE: [AccountKind; 5] = [
        AccountKind::Bank,
        AccountKind::CreditCard,
        AccountKind::Voucher,
        AccountKind::Investment,
        AccountKind::CashWallet,
    ];

    pub fn is_credit(self) -> bool {
        self == AccountKind::CreditCard
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            AccountKind::Bank => "banco",
            AccountKind::CreditCard => "cartao_credito",
            AccountKind::Voucher => "vale",
            AccountKind::Investment => "investimento",
            AccountKind::CashWallet => "carteira",
            AccountKind::Other => "outro",
        }
    }

    pub fn from_wire_name(name: &str) -> Self {
        Self::SELECTABLE
            .into_iter()
            .find(|k| k.wire_name() == name)
            .unwrap_or(AccountKind::Other)
    }

    pub fn icon(self) -> &'static str {
        match self {
            AccountKind::CreditCard => "💳",
            AccountKind::Investment => "📈",
            AccountKind::Voucher => "🍽️",
            AccountKind::CashWallet => "💵",
            AccountKind::Bank | AccountKind::Other => "💰",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            AccountKind::Bank => "Conta",
            AccountKind::CreditCard => "Crédito",
            AccountKind::Voucher => "Vale",
            AccountKind::Investment => "Inv.",
            AccountKind::CashWallet => "Físico",
            AccountKind::Other => "Outro",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AccountKind::Bank => "Conta bancária",
            AccountKind::CreditCard => "Cartão de crédito",
            AccountKind::Voucher => "Vale",
            AccountKind::Investment => "Investimento",
            AccountKind::CashWallet => "Carteira",
            AccountKind::Other => "Outro",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Account {
    pub id: Id,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: AccountKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DueKind {
    /// Same day every month.
    #[serde(rename = "fixo")]
    Fixed,
    /// One specific date.
    #[serde(rename = "variavel")]
    Dated,
    #[serde(other)]
    Other,
}

impl DueKind {
    pub fn wire_name(self) -> &'static str {
        match self {
            DueKind::Fixed => "fixo",
            DueKind::Dated => "variavel",
            DueKind::Other => "outro",
        }
    }
}

impl fmt::Display for DueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DueItem {
    pub id: Id,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub kind: DueKind,
    #[serde(rename = "dia", default)]
    pub day: Option<u32>,
    #[serde(rename = "data_vencimento", default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "ativo", default)]
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DueSchedule {
    DayOfMonth(u32),
    On(NaiveDate),
    Unscheduled,
}

impl DueItem {
    pub fn schedule(&self) -> DueSchedule {
        match (self.kind, self.day, self.date) {
            (DueKind::Fixed, Some(day), _) => DueSchedule::DayOfMonth(day),
            (DueKind::Dated, _, Some(date)) => DueSchedule::On(date),
            _ => DueSchedule::Unscheduled,
        }
    }
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewSubtype {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo_id")]
    pub type_id: Id,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewCategory {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "subtipo_id")]
    pub subtype_id: Id,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewAccount {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: AccountKind,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewDueItem {
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub kind: DueKind,
    #[serde(rename = "dia")]
    pub day: Option<u32>,
    #[serde(rename = "data_vencimento")]
    pub date: Option<String>,
}

/// A transaction ready to be posted as multipart form data.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub type_id: Id,
    pub subtype_id: Id,
    pub category_id: Option<Id>,
    pub account_id: Option<Id>,
    pub installments: u32,
    pub attachment: Option<web_sys::File>,
}

impl NewTransaction {
    /// Text fields of the multipart body, in the order the server reads them.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let optional = |id: Option<Id>| id.map(|i| i.to_string()).unwrap_or_default();
        vec![
            ("data", self.date.format("%Y-%m-%d").to_string()),
            ("descricao", self.description.clone()),
            ("valor", self.amount.normalize().to_string()),
            ("tipo_id", self.type_id.to_string()),
            ("subtipo_id", self.subtype_id.to_string()),
            ("categoria_id", optional(self.category_id)),
            ("conta_id", optional(self.account_id)),
            ("parcelas", self.installments.to_string()),
        ]
    }
}

/// `{"msg": ...}` on success, `{"erro": ...}` on failure.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub erro: Option<String>,
}
