//! List filters used by the list views

use crate::models::{Product, Supplier, Transaction, User};
use crate::types::TypeFilter;

/// Keep transactions matching `filter`; `All` returns the input unchanged.
pub fn filter_by_type(transactions: &[Transaction], filter: TypeFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| filter.matches(tx.kind))
        .cloned()
        .collect()
}

/// Entity exposing named string fields to text search
pub trait Searchable {
    type Field: Copy;

    fn search_field(&self, field: Self::Field) -> Option<&str>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Category,
    Sku,
    Description,
}

impl ProductField {
    /// Fields searched by the product list
    pub const LIST: [Self; 3] = [Self::Name, Self::Category, Self::Sku];
}

impl Searchable for Product {
    type Field = ProductField;

    fn search_field(&self, field: ProductField) -> Option<&str> {
        match field {
            ProductField::Name => Some(&self.name),
            ProductField::Category => self.category.as_deref(),
            ProductField::Sku => self.sku.as_deref(),
            ProductField::Description => self.description.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplierField {
    Name,
    ContactPerson,
    Email,
    Phone,
}

impl SupplierField {
    pub const LIST: [Self; 4] = [Self::Name, Self::ContactPerson, Self::Email, Self::Phone];
}

impl Searchable for Supplier {
    type Field = SupplierField;

    fn search_field(&self, field: SupplierField) -> Option<&str> {
        match field {
            SupplierField::Name => Some(&self.name),
            SupplierField::ContactPerson => self.contact_person.as_deref(),
            SupplierField::Email => self.email.as_deref(),
            SupplierField::Phone => self.phone.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Username,
    FullName,
    Email,
}

impl UserField {
    pub const LIST: [Self; 3] = [Self::Username, Self::FullName, Self::Email];
}

impl Searchable for User {
    type Field = UserField;

    fn search_field(&self, field: UserField) -> Option<&str> {
        match field {
            UserField::Username => Some(&self.username),
            UserField::FullName => self.full_name.as_deref(),
            UserField::Email => self.email.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionField {
    ProductName,
    Username,
    ReferenceNumber,
    Notes,
}

impl TransactionField {
    pub const LIST: [Self; 4] = [
        Self::ProductName,
        Self::Username,
        Self::ReferenceNumber,
        Self::Notes,
    ];
}

impl Searchable for Transaction {
    type Field = TransactionField;

    fn search_field(&self, field: TransactionField) -> Option<&str> {
        match field {
            TransactionField::ProductName => self.product_name.as_deref(),
            TransactionField::Username => self.username.as_deref(),
            TransactionField::ReferenceNumber => self.reference_number.as_deref(),
            TransactionField::Notes => self.notes.as_deref(),
        }
    }
}

/// Case-insensitive substring match on any of `fields`.
///
/// A blank query matches everything; missing fields never match.
pub fn filter_by_text_query<T>(entities: &[T], query: &str, fields: &[T::Field]) -> Vec<T>
where
    T: Searchable + Clone,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entities.to_vec();
    }

    entities
        .iter()
        .filter(|entity| {
            fields.iter().any(|&field| {
                entity
                    .search_field(field)
                    .is_some_and(|value| value.to_lowercase().contains(&needle))
            })
        })
        .cloned()
        .collect()
}
