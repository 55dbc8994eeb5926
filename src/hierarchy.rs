//! View-models for the Type → Subtype → Category editor, the accounts list
//! and the cascaded selects of the transaction form.

use crate::model::{AccountKind, Id};
use crate::state::{AppState, ConfigRowKey};
use crate::store::{ConfigResource, Snapshot};

/// A deletable row either shows its name or the "Apagar? Sim / Não" prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowMode {
    Normal,
    ConfirmDelete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfigItem {
    pub id: Id,
    pub label: String,
    pub active: bool,
    /// `None` for rows that cannot be deleted from the client (types).
    pub key: Option<ConfigRowKey>,
    pub mode: RowMode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AccountItem {
    pub key: ConfigRowKey,
    pub icon: &'static str,
    pub name: String,
    pub kind_label: &'static str,
    pub mode: RowMode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfigView {
    pub types: Vec<ConfigItem>,
    /// `None` until a type is selected.
    pub subtypes: Option<Vec<ConfigItem>>,
    /// `None` until a subtype is selected.
    pub categories: Option<Vec<ConfigItem>>,
    pub accounts: Vec<AccountItem>,
    pub selected_type_label: String,
    pub selected_subtype_label: String,
}

const NOTHING_SELECTED: &str = "---";

pub fn config_view(state: &AppState) -> ConfigView {
    let snapshot = &state.snapshot;
    let selection = state.selection;
    let mode_of = |key: ConfigRowKey| {
        if state.confirming == Some(key) {
            RowMode::ConfirmDelete
        } else {
            RowMode::Normal
        }
    };
    let deletable = |resource: ConfigResource, id: Id, label: &str, active: bool| {
        let key = ConfigRowKey { resource, id };
        ConfigItem {
            id,
            label: label.to_string(),
            active,
            key: Some(key),
            mode: mode_of(key),
        }
    };

    let types = snapshot
        .types
        .iter()
        .map(|t| ConfigItem {
            id: t.id,
            label: t.name.clone(),
            active: selection.type_id == Some(t.id),
            key: None,
            mode: RowMode::Normal,
        })
        .collect();

    let subtypes = selection.type_id.map(|type_id| {
        snapshot
            .subtypes_of(type_id)
            .map(|s| {
                deletable(
                    ConfigResource::Subtypes,
                    s.id,
                    &s.name,
                    selection.subtype_id == Some(s.id),
                )
            })
            .collect()
    });

    let categories = selection.subtype_id.map(|subtype_id| {
        snapshot
            .categories_of(subtype_id)
            .map(|c| deletable(ConfigResource::Categories, c.id, &c.name, false))
            .collect()
    });

    let accounts = snapshot
        .accounts
        .iter()
        .map(|a| {
            let key = ConfigRowKey {
                resource: ConfigResource::Accounts,
                id: a.id,
            };
            AccountItem {
                key,
                icon: a.kind.icon(),
                name: a.name.clone(),
                kind_label: a.kind.short_label(),
                mode: mode_of(key),
            }
        })
        .collect();

    ConfigView {
        types,
        subtypes,
        categories,
        accounts,
        selected_type_label: selection
            .type_id
            .and_then(|id| snapshot.type_node(id))
            .map(|t| t.name.clone())
            .unwrap_or_else(|| NOTHING_SELECTED.to_string()),
        selected_subtype_label: selection
            .subtype_id
            .and_then(|id| snapshot.subtype(id))
            .map(|s| s.name.clone())
            .unwrap_or_else(|| NOTHING_SELECTED.to_string()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub id: Id,
    pub label: String,
}

pub fn type_options(snapshot: &Snapshot) -> Vec<SelectOption> {
    snapshot
        .types
        .iter()
        .map(|t| SelectOption {
            id: t.id,
            label: t.name.clone(),
        })
        .collect()
}

pub fn subtype_options(snapshot: &Snapshot, type_id: Option<Id>) -> Vec<SelectOption> {
    match type_id {
        Some(type_id) => snapshot
            .subtypes_of(type_id)
            .map(|s| SelectOption {
                id: s.id,
                label: s.name.clone(),
            })
            .collect(),
        None => vec![],
    }
}

pub fn category_options(snapshot: &Snapshot, subtype_id: Option<Id>) -> Vec<SelectOption> {
    match subtype_id {
        Some(subtype_id) => snapshot
            .categories_of(subtype_id)
            .map(|c| SelectOption {
                id: c.id,
                label: c.name.clone(),
            })
            .collect(),
        None => vec![],
    }
}

/// Accounts filtered by whether they are credit cards.
pub fn account_options(snapshot: &Snapshot, credit: Option<bool>) -> Vec<SelectOption> {
    snapshot
        .accounts
        .iter()
        .filter(|a| credit.map_or(true, |c| a.kind.is_credit() == c))
        .map(|a| SelectOption {
            id: a.id,
            label: a.name.clone(),
        })
        .collect()
}

pub fn account_kind_options() -> Vec<(AccountKind, &'static str)> {
    AccountKind::SELECTABLE
        .into_iter()
        .map(|k| (k, k.label()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;
    use serde::Serialize;

    use crate::model::{Account, Category, NewAccount, NewCategory, NewSubtype, Subtype};
    use crate::store::test_utils::{date, sample_snapshot, CHECKING, VISA};

    fn state() -> AppState {
        let mut state = AppState::new(date(2024, 5, 10));
        state.replace_snapshot(sample_snapshot());
        state
    }

    #[test]
    fn lists_are_empty_until_parents_are_selected() {
        let state = state();
        let view = config_view(&state);
        assert_eq!(view.types.len(), 2);
        assert!(view.types.iter().all(|t| !t.active && t.key.is_none()));
        assert_eq!(view.subtypes, None);
        assert_eq!(view.categories, None);
        assert_eq!(view.selected_type_label, "---");
        assert_eq!(view.selected_subtype_label, "---");
        assert_eq!(view.accounts.len(), 2);
    }

    #[test]
    fn drilling_down_shows_children_of_the_selection() {
        let mut state = state();
        state.selection.select_type(2);
        state.selection.select_subtype(21);
        let view = config_view(&state);

        assert!(view.types[1].active);
        let subtypes = view.subtypes.unwrap();
        assert_eq!(
            subtypes.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![20, 21]
        );
        assert!(subtypes[1].active);
        let categories = view.categories.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].label, "Pagamento Fatura");
        assert_eq!(view.selected_type_label, "Saída");
        assert_eq!(view.selected_subtype_label, "Transferência entre contas");
    }

    /// The body as a server would list it back: the same fields plus an id.
    fn listed<T: DeserializeOwned>(body: &impl Serialize, id: Id) -> T {
        let mut value = serde_json::to_value(body).unwrap();
        value["id"] = serde_json::json!(id);
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn created_nodes_come_back_with_their_fields() {
        let mut state = state();
        let subtype: Subtype = listed(
            &NewSubtype {
                name: "Lazer".to_string(),
                type_id: 2,
            },
            22,
        );
        let category: Category = listed(
            &NewCategory {
                name: "Cinema".to_string(),
                subtype_id: 22,
            },
            220,
        );
        let account: Account = listed(
            &NewAccount {
                name: "Vale Refeição".to_string(),
                kind: AccountKind::Voucher,
            },
            3,
        );
        assert_eq!((subtype.name.as_str(), subtype.type_id), ("Lazer", 2));
        assert_eq!((category.name.as_str(), category.subtype_id), ("Cinema", 22));
        assert_eq!((account.name.as_str(), account.kind), ("Vale Refeição", AccountKind::Voucher));

        let mut snapshot = sample_snapshot();
        snapshot.subtypes.push(subtype);
        snapshot.categories.push(category);
        snapshot.accounts.push(account);
        state.replace_snapshot(snapshot);
        state.selection.select_type(2);
        state.selection.select_subtype(22);

        let view = config_view(&state);
        assert!(view.subtypes.unwrap().iter().any(|s| s.id == 22 && s.label == "Lazer"));
        assert_eq!(
            view.categories.unwrap().iter().map(|c| c.label.as_str()).collect::<Vec<_>>(),
            vec!["Cinema"]
        );
        let listed_account = view.accounts.iter().find(|a| a.key.id == 3).unwrap();
        assert_eq!(listed_account.name, "Vale Refeição");
        assert_eq!(listed_account.kind_label, "Vale");
    }

    #[test]
    fn only_the_confirming_row_shows_the_prompt() {
        let mut state = state();
        state.selection.select_type(2);
        state.confirming = Some(ConfigRowKey {
            resource: ConfigResource::Subtypes,
            id: 20,
        });
        let view = config_view(&state);
        let subtypes = view.subtypes.unwrap();
        assert_eq!(subtypes[0].mode, RowMode::ConfirmDelete);
        assert_eq!(subtypes[1].mode, RowMode::Normal);
        assert!(view.accounts.iter().all(|a| a.mode == RowMode::Normal));
    }

    #[test]
    fn accounts_show_icon_and_short_kind() {
        let view = config_view(&state());
        let visa = view.accounts.iter().find(|a| a.key.id == VISA).unwrap();
        assert_eq!(visa.icon, "💳");
        assert_eq!(visa.kind_label, "Crédito");
        let checking = view.accounts.iter().find(|a| a.key.id == CHECKING).unwrap();
        assert_eq!(checking.kind_label, "Conta");
    }

    #[test]
    fn form_selects_cascade() {
        let snapshot = sample_snapshot();
        assert_eq!(type_options(&snapshot).len(), 2);
        assert!(subtype_options(&snapshot, None).is_empty());
        assert_eq!(subtype_options(&snapshot, Some(1)).len(), 2);
        assert!(category_options(&snapshot, None).is_empty());
        assert_eq!(category_options(&snapshot, Some(11)).len(), 2);

        let cards = account_options(&snapshot, Some(true));
        assert_eq!(cards, vec![SelectOption { id: VISA, label: "Visa".to_string() }]);
        let sources = account_options(&snapshot, Some(false));
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].id, CHECKING);
        assert_eq!(account_options(&snapshot, None).len(), 2);
        assert_eq!(account_kind_options().len(), 5);
    }
}
