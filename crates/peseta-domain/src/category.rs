use serde::Serialize;

/// Identifier of an entry in the fixed category catalog.
pub type CategoryId = u32;

/// Sentinel sent by clients when no category has been picked yet.
pub const UNSELECTED_CATEGORY: CategoryId = 0;

/// An expense category budgets can be attached to.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ExpenseCategory {
    pub id: CategoryId,
    pub name: &'static str,
}

const fn category(id: CategoryId, name: &'static str) -> ExpenseCategory {
    ExpenseCategory { id, name }
}

/// Catalog order matches the order categories are offered to users.
pub const EXPENSE_CATEGORIES: &[ExpenseCategory] = &[
    category(1, "Comida"),
    category(2, "Transporte"),
    category(3, "Salud"),
    category(4, "Educación"),
    category(5, "Entretenimiento"),
    category(6, "Ropa"),
    category(7, "Alquiler"),
    category(8, "Servicios"),
    category(14, "Seguros"),
    category(16, "Subscripciones"),
    category(17, "Cuidado Personal"),
    category(18, "Mascotas"),
    category(19, "Hogar"),
    category(20, "Deuda"),
    category(15, "Otro"),
];

impl ExpenseCategory {
    pub fn from_id(id: CategoryId) -> Option<Self> {
        EXPENSE_CATEGORIES.iter().copied().find(|entry| entry.id == id)
    }

    pub fn all() -> &'static [ExpenseCategory] {
        EXPENSE_CATEGORIES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_categories() {
        assert_eq!(ExpenseCategory::from_id(1).map(|c| c.name), Some("Comida"));
        assert_eq!(ExpenseCategory::from_id(15).map(|c| c.name), Some("Otro"));
    }

    #[test]
    fn income_only_and_sentinel_ids_are_absent() {
        // 9 is a salary category and never carries a budget.
        assert!(ExpenseCategory::from_id(9).is_none());
        assert!(ExpenseCategory::from_id(UNSELECTED_CATEGORY).is_none());
    }

    #[test]
    fn catalog_ids_are_unique() {
        let mut ids: Vec<_> = EXPENSE_CATEGORIES.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), EXPENSE_CATEGORIES.len());
    }
}
