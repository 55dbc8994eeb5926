//! Turns user actions into state changes plus the requests they require.
//!
//! `dispatch` never touches the network: it edits [`AppState`] and returns
//! [`Effects`] for the controller to run. Every write is followed by a reload
//! of whatever it changed.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::api::ApiRequest;
use crate::categorize::{invoice_payment, InvoicePayment};
use crate::error::UiError;
use crate::model::{
    AccountKind, ApiMessage, DueKind, Id, NewAccount, NewCategory, NewDueItem, NewSubtype,
    NewTransaction,
};
use crate::money::parse_amount;
use crate::state::{AppState, ConfigRowKey, Dialog, PendingDelete, YearMonth};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionForm {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub type_id: Option<Id>,
    pub subtype_id: Option<Id>,
    pub category_id: Option<Id>,
    pub account_id: Option<Id>,
    pub installments: String,
    pub attachment: Option<web_sys::File>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DueItemForm {
    pub description: String,
    pub kind: DueKind,
    pub day: String,
    pub date: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InvoicePaymentForm {
    pub date: String,
    pub amount: String,
    pub card_id: Option<Id>,
    pub source_id: Option<Id>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Initialize,
    SetMonth(YearMonth),
    SetAccountFilter(Option<Id>),
    SetPlanningYear(i32),
    SelectType(Id),
    SelectSubtype(Id),
    AskConfigDelete(ConfigRowKey),
    CancelConfigDelete,
    ConfirmConfigDelete,
    AddSubtype { name: String },
    AddCategory { name: String },
    AddAccount { name: String, kind: AccountKind },
    OpenDialog(Dialog),
    CloseDialog,
    SubmitTransaction(TransactionForm),
    ToggleSettled(Id),
    AskDeleteTransaction(Id),
    AskDeleteDueItem(Id),
    ConfirmPendingDelete,
    CancelPendingDelete,
    AddDueItem(DueItemForm),
    ToggleDueItem(Id),
    PayInvoice(InvoicePaymentForm),
    Restore(web_sys::File),
    ResetAll,
}

/// What to fetch again once the requests have gone through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reload {
    Nothing,
    /// Snapshot, available years and due items.
    Startup,
    /// Snapshot and available years.
    Snapshot,
    DueItems,
    Planning,
    /// The whole page, after the server data was replaced.
    Page,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Effects {
    pub requests: Vec<ApiRequest>,
    pub reload: Reload,
    pub close_dialog: bool,
    /// Shown once every request succeeded.
    pub notice: Option<String>,
}

impl Effects {
    pub fn none() -> Self {
        Effects {
            requests: vec![],
            reload: Reload::Nothing,
            close_dialog: false,
            notice: None,
        }
    }

    pub fn reload(reload: Reload) -> Self {
        Effects {
            reload,
            ..Effects::none()
        }
    }

    fn write(requests: Vec<ApiRequest>, reload: Reload) -> Self {
        Effects {
            requests,
            reload,
            ..Effects::none()
        }
    }

    fn closing_dialog(self) -> Self {
        Effects {
            close_dialog: true,
            ..self
        }
    }
}

pub fn dispatch(state: &mut AppState, command: Command) -> Result<Effects, UiError> {
    match command {
        Command::Initialize => Ok(Effects::reload(Reload::Startup)),
        Command::SetMonth(month) => {
            state.filters.month = month;
            Ok(Effects::none())
        }
        Command::SetAccountFilter(account) => {
            state.filters.account = account;
            Ok(Effects::none())
        }
        Command::SetPlanningYear(year) => {
            state.filters.planning_year = year;
            Ok(Effects::reload(Reload::Planning))
        }
        Command::SelectType(id) => {
            state.selection.select_type(id);
            state.confirming = None;
            Ok(Effects::none())
        }
        Command::SelectSubtype(id) => {
            state.selection.select_subtype(id);
            state.confirming = None;
            Ok(Effects::none())
        }
        Command::AskConfigDelete(key) => {
            state.confirming = Some(key);
            Ok(Effects::none())
        }
        Command::CancelConfigDelete => {
            state.confirming = None;
            Ok(Effects::none())
        }
        Command::ConfirmConfigDelete => match state.confirming.take() {
            Some(key) if state.snapshot.contains(key.resource, key.id) => Ok(Effects::write(
                vec![ApiRequest::DeleteConfig(key.resource, key.id)],
                Reload::Snapshot,
            )),
            _ => Ok(Effects::none()),
        },
        Command::AddSubtype { name } => {
            let type_id = state
                .selection
                .type_id
                .filter(|id| state.snapshot.type_node(*id).is_some())
                .ok_or(UiError::MissingSelection("Selecione Tipo."))?;
            Ok(Effects::write(
                vec![ApiRequest::CreateSubtype(NewSubtype {
                    name: required_name(&name)?,
                    type_id,
                })],
                Reload::Snapshot,
            ))
        }
        Command::AddCategory { name } => {
            let subtype_id = state
                .selection
                .subtype_id
                .filter(|id| state.snapshot.subtype(*id).is_some())
                .ok_or(UiError::MissingSelection("Selecione Subtipo."))?;
            Ok(Effects::write(
                vec![ApiRequest::CreateCategory(NewCategory {
                    name: required_name(&name)?,
                    subtype_id,
                })],
                Reload::Snapshot,
            ))
        }
        Command::AddAccount { name, kind } => Ok(Effects::write(
            vec![ApiRequest::CreateAccount(NewAccount {
                name: required_name(&name)?,
                kind,
            })],
            Reload::Snapshot,
        )),
        Command::OpenDialog(dialog) => {
            state.dialog = Some(dialog);
            Ok(Effects::none())
        }
        Command::CloseDialog => {
            state.dialog = None;
            Ok(Effects::none())
        }
        Command::SubmitTransaction(form) => {
            let tx = validate_transaction(form)?;
            Ok(
                Effects::write(vec![ApiRequest::CreateTransaction(tx)], Reload::Snapshot)
                    .closing_dialog(),
            )
        }
        Command::ToggleSettled(id) => Ok(Effects::write(
            vec![ApiRequest::ToggleSettled(id)],
            Reload::Snapshot,
        )),
        Command::AskDeleteTransaction(id) => {
            state.pending_delete = Some(PendingDelete::Transaction(id));
            state.dialog = Some(Dialog::ConfirmDelete);
            Ok(Effects::none())
        }
        Command::AskDeleteDueItem(id) => {
            state.pending_delete = Some(PendingDelete::DueItem(id));
            state.dialog = Some(Dialog::ConfirmDelete);
            Ok(Effects::none())
        }
        Command::ConfirmPendingDelete => {
            state.dialog = None;
            match state.pending_delete.take() {
                Some(PendingDelete::Transaction(id)) => Ok(Effects::write(
                    vec![ApiRequest::DeleteTransaction(id)],
                    Reload::Snapshot,
                )),
                Some(PendingDelete::DueItem(id)) => Ok(Effects::write(
                    vec![ApiRequest::DeleteDueItem(id)],
                    Reload::DueItems,
                )),
                None => Ok(Effects::none()),
            }
        }
        Command::CancelPendingDelete => {
            state.pending_delete = None;
            state.dialog = None;
            Ok(Effects::none())
        }
        Command::AddDueItem(form) => {
            let item = validate_due_item(form)?;
            Ok(
                Effects::write(vec![ApiRequest::CreateDueItem(item)], Reload::DueItems)
                    .closing_dialog(),
            )
        }
        Command::ToggleDueItem(id) => Ok(Effects::write(
            vec![ApiRequest::ToggleDueItem(id)],
            Reload::DueItems,
        )),
        Command::PayInvoice(form) => {
            let payment = InvoicePayment {
                date: parse_date(&form.date)?,
                amount: parse_positive_amount(&form.amount)?,
                card_id: form
                    .card_id
                    .ok_or(UiError::MissingSelection("Selecione o cartão de destino."))?,
                source_id: form
                    .source_id
                    .ok_or(UiError::MissingSelection("Selecione a conta de origem."))?,
            };
            let legs = invoice_payment(&state.snapshot, &payment)?;
            Ok(Effects {
                notice: Some("Pagamento registrado com sucesso! ✅".to_string()),
                ..Effects::write(
                    vec![
                        ApiRequest::CreateTransaction(legs.outflow),
                        ApiRequest::CreateTransaction(legs.inflow),
                    ],
                    Reload::Snapshot,
                )
                .closing_dialog()
            })
        }
        Command::Restore(file) => Ok(Effects::write(vec![ApiRequest::Restore(file)], Reload::Page)),
        Command::ResetAll => Ok(Effects::write(vec![ApiRequest::Reset], Reload::Page)),
    }
}

fn required_name(name: &str) -> Result<String, UiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(UiError::Invalid("Informe um nome.".to_string()));
    }
    Ok(name.to_string())
}

fn parse_date(raw: &str) -> Result<NaiveDate, UiError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| UiError::Invalid("Informe uma data válida.".to_string()))
}

fn parse_positive_amount(raw: &str) -> Result<Decimal, UiError> {
    parse_amount(raw)
        .filter(|a| *a > Decimal::ZERO)
        .ok_or_else(|| UiError::Invalid("Informe um valor maior que zero.".to_string()))
}

fn validate_transaction(form: TransactionForm) -> Result<NewTransaction, UiError> {
    let description = form.description.trim().to_string();
    if description.is_empty() {
        return Err(UiError::Invalid("Informe a descrição.".to_string()));
    }
    let installments = match form.installments.trim() {
        "" => 1,
        raw => raw
            .parse::<u32>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| UiError::Invalid("Número de parcelas inválido.".to_string()))?,
    };
    Ok(NewTransaction {
        date: parse_date(&form.date)?,
        description,
        amount: parse_positive_amount(&form.amount)?,
        type_id: form.type_id.ok_or(UiError::MissingSelection("Selecione o tipo."))?,
        subtype_id: form
            .subtype_id
            .ok_or(UiError::MissingSelection("Selecione o subtipo."))?,
        category_id: form.category_id,
        account_id: form.account_id,
        installments,
        attachment: form.attachment,
    })
}

fn validate_due_item(form: DueItemForm) -> Result<NewDueItem, UiError> {
    let description = form.description.trim().to_string();
    if description.is_empty() {
        return Err(UiError::Invalid("Informe a descrição.".to_string()));
    }
    let (day, date) = match form.kind {
        DueKind::Fixed => {
            let day = form
                .day
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|d| (1..=31).contains(d))
                .ok_or_else(|| UiError::Invalid("Informe um dia entre 1 e 31.".to_string()))?;
            (Some(day), None)
        }
        DueKind::Dated => {
            let date = parse_date(&form.date)?;
            (None, Some(date.format("%Y-%m-%d").to_string()))
        }
        DueKind::Other => return Err(UiError::Invalid("Escolha o tipo.".to_string())),
    };
    Ok(NewDueItem {
        description,
        kind: form.kind,
        day,
        date,
    })
}

/// How a batch of requests ended.
#[derive(Clone, Debug, PartialEq)]
pub enum Settlement {
    Completed(Vec<ApiMessage>),
    /// Some requests went through; the data changed but not as intended.
    Partial(UiError),
    /// Nothing went through.
    Failed(UiError),
}

impl Settlement {
    /// Whether the server state may have changed and must be reloaded.
    pub fn changed_data(&self) -> bool {
        !matches!(self, Settlement::Failed(_))
    }
}

pub fn settle(requests: &[ApiRequest], results: Vec<Result<ApiMessage, UiError>>) -> Settlement {
    let mut recorded = Vec::new();
    let mut failed = Vec::new();
    let mut messages = Vec::new();
    let mut first_error = None;
    for (request, result) in requests.iter().zip(results) {
        match result {
            Ok(message) => {
                recorded.push(request.describe());
                messages.push(message);
            }
            Err(err) => {
                failed.push(request.describe());
                first_error.get_or_insert(err);
            }
        }
    }
    match first_error {
        None => Settlement::Completed(messages),
        Some(err) if recorded.is_empty() => Settlement::Failed(err),
        Some(_) => Settlement::Partial(UiError::PartialFailure { recorded, failed }),
    }
}
