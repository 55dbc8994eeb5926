use crate::model::{Account, Category, Direction, Id, Subtype, Transaction, TypeNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigResource {
    Subtypes,
    Categories,
    Accounts,
}

impl ConfigResource {
    pub fn path_segment(self) -> &'static str {
        match self {
            ConfigResource::Subtypes => "subtipos",
            ConfigResource::Categories => "categorias",
            ConfigResource::Accounts => "contas",
        }
    }
}

/// Read-only mirror of the server state. Replaced wholesale after every
/// mutation; nothing patches it in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub types: Vec<TypeNode>,
    pub subtypes: Vec<Subtype>,
    pub categories: Vec<Category>,
    pub accounts: Vec<Account>,
}

impl Snapshot {
    pub fn account(&self, id: Id) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Unknown or missing accounts are not credit cards.
    pub fn is_credit_card(&self, account_id: Option<Id>) -> bool {
        account_id
            .and_then(|id| self.account(id))
            .map(|a| a.kind.is_credit())
            .unwrap_or(false)
    }

    pub fn type_node(&self, id: Id) -> Option<&TypeNode> {
        self.types.iter().find(|t| t.id == id)
    }

    pub fn subtype(&self, id: Id) -> Option<&Subtype> {
        self.subtypes.iter().find(|s| s.id == id)
    }

    pub fn category(&self, id: Id) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn subtypes_of(&self, type_id: Id) -> impl Iterator<Item = &Subtype> + '_ {
        self.subtypes.iter().filter(move |s| s.type_id == type_id)
    }

    pub fn categories_of(&self, subtype_id: Id) -> impl Iterator<Item = &Category> + '_ {
        self.categories
            .iter()
            .filter(move |c| c.subtype_id == subtype_id)
    }

    /// Type id used for a direction: looked up by name, else the seeded id.
    pub fn type_for(&self, direction: Direction) -> Id {
        self.types
            .iter()
            .find(|t| t.name == direction.type_name())
            .map(|t| t.id)
            .unwrap_or_else(|| direction.seeded_type_id())
    }

    pub fn contains(&self, resource: ConfigResource, id: Id) -> bool {
        match resource {
            ConfigResource::Subtypes => self.subtype(id).is_some(),
            ConfigResource::Categories => self.category(id).is_some(),
            ConfigResource::Accounts => self.account(id).is_some(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_utils::*;
    use super::*;

    #[test]
    fn credit_card_lookup_ignores_unknown_accounts() {
        let snapshot = sample_snapshot();
        assert!(snapshot.is_credit_card(Some(VISA)));
        assert!(!snapshot.is_credit_card(Some(CHECKING)));
        assert!(!snapshot.is_credit_card(Some(99)));
        assert!(!snapshot.is_credit_card(None));
    }

    #[test]
    fn hierarchy_children_are_filtered_by_parent() {
        let snapshot = sample_snapshot();
        let ids: Vec<Id> = snapshot.subtypes_of(2).map(|s| s.id).collect();
        assert_eq!(ids, vec![20, 21]);
        let ids: Vec<Id> = snapshot.categories_of(11).map(|c| c.id).collect();
        assert_eq!(ids, vec![110, 111]);
    }

    #[test]
    fn type_for_direction_prefers_names_over_seeded_ids() {
        let mut snapshot = sample_snapshot();
        assert_eq!(snapshot.type_for(Direction::Outflow), 2);
        snapshot.types[1].id = 42;
        assert_eq!(snapshot.type_for(Direction::Outflow), 42);
        snapshot.types.clear();
        assert_eq!(snapshot.type_for(Direction::Inflow), 1);
    }

    #[test]
    fn contains_checks_the_right_collection() {
        let snapshot = sample_snapshot();
        assert!(snapshot.contains(ConfigResource::Subtypes, 20));
        assert!(!snapshot.contains(ConfigResource::Categories, 20));
        assert!(snapshot.contains(ConfigResource::Accounts, VISA));
    }
}
