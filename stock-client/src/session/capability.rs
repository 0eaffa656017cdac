//! Role capability matrix

use serde::{Deserialize, Serialize};

/// Read-only views of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Dashboard,
    Products,
    Suppliers,
    Transactions,
    Reports,
    Users,
}

impl View {
    pub fn requires_admin(&self) -> bool {
        matches!(self, Self::Users)
    }
}

/// Mutating actions gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Record a stock movement (any signed-in user)
    RecordTransaction,
    ManageProducts,
    ManageSuppliers,
    /// Amend or delete recorded transactions
    EditTransactions,
    ManageUsers,
}

impl Action {
    pub fn requires_admin(&self) -> bool {
        !matches!(self, Self::RecordTransaction)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RecordTransaction => "record transactions",
            Self::ManageProducts => "manage products",
            Self::ManageSuppliers => "manage suppliers",
            Self::EditTransactions => "edit transactions",
            Self::ManageUsers => "manage users",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
