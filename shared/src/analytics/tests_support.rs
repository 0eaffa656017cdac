//! Fixture builders for engine tests

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::models::{
    Product, StockReportRow, Supplier, Transaction, TransactionSummaryRow, TransactionType,
};

fn at(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .unwrap()
}

pub fn product(id: i64, name: &str, stock: i32, minimum_stock: i32) -> Product {
    Product {
        id,
        name: name.to_string(),
        category: None,
        sku: None,
        description: None,
        price_in: Decimal::from(2),
        price_out: Decimal::from(3),
        stock,
        minimum_stock,
        supplier_id: None,
        supplier_name: None,
        active: true,
        created_at: None,
        updated_at: None,
    }
}

pub fn supplier(id: i64, name: &str) -> Supplier {
    Supplier {
        id,
        name: name.to_string(),
        contact_person: None,
        phone: None,
        email: None,
        address: None,
        active: true,
        created_at: None,
        updated_at: None,
    }
}

pub fn transaction(id: i64, kind: TransactionType) -> Transaction {
    Transaction {
        id,
        product_id: 1,
        product_name: Some("Bolt".into()),
        kind,
        quantity: 1,
        unit_price: Decimal::ONE,
        total_price: Decimal::ONE,
        supplier_id: None,
        supplier_name: None,
        user_id: 1,
        username: Some("admin".into()),
        transaction_date: at(1),
        reference_number: None,
        notes: None,
    }
}

pub fn stock_row(
    id: i64,
    category: Option<&str>,
    stock_value: i64,
    current_stock: i32,
    minimum_stock: i32,
    low_stock: bool,
) -> StockReportRow {
    StockReportRow {
        product_id: id,
        product_name: format!("Product {id}"),
        category: category.map(str::to_string),
        sku: None,
        current_stock,
        minimum_stock,
        price_in: None,
        price_out: None,
        supplier_name: None,
        stock_value: Decimal::from(stock_value),
        low_stock,
    }
}

pub fn summary_row(day: u32, in_value: i64, out_value: i64, net_value: i64) -> TransactionSummaryRow {
    TransactionSummaryRow {
        date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        period: Some("DAILY".into()),
        total_transactions: 2,
        in_transactions: 1,
        out_transactions: 1,
        total_in_value: Decimal::from(in_value),
        total_out_value: Decimal::from(out_value),
        net_value: Decimal::from(net_value),
    }
}
