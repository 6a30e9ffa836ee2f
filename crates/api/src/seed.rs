//! Demo customers and products loaded at startup.

use domain::{Customer, Money};
use orchestrator::CatalogProduct;

pub fn demo_customers() -> Vec<Customer> {
    vec![
        Customer::new("7", "Ada", "Lovelace", "ada@example.com"),
        Customer::new("8", "Alan", "Turing", "alan@example.com"),
        Customer::new("9", "Grace", "Hopper", "grace@example.com"),
    ]
}

pub fn demo_products() -> Vec<CatalogProduct> {
    vec![
        CatalogProduct::new(
            101,
            "Mechanical keyboard",
            "Tenkeyless keyboard with brown switches",
            Money::from_units(50),
            500,
        ),
        CatalogProduct::new(
            102,
            "Wireless mouse",
            "Ergonomic wireless mouse",
            Money::from_units(50),
            500,
        ),
        CatalogProduct::new(
            103,
            "USB-C hub",
            "7-in-1 USB-C hub",
            Money::from_cents(3499),
            200,
        ),
        CatalogProduct::new(
            104,
            "27\" monitor",
            "1440p IPS monitor",
            Money::from_units(289),
            50,
        ),
    ]
}
