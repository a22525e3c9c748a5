//! # Demo Seed Data
//!
//! The dataset the app boots with: five customers, seven catalog entries
//! and five sales across every status.
//!
//! Timestamps are relative to "now" so the dashboard's 30-day windows stay
//! meaningful no matter when the demo runs. Two customer documents carry
//! deliberately wrong check digits (the classic "123.456.789-00" style
//! placeholders) — editing those customers exercises the validation path.
//!
//! Stock movements start empty: the history only records what happens
//! after boot, seeded balances are the opening count.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use balcao_core::{
    Customer, CustomerSnapshot, CustomerType, Money, PaymentMethod, Product, ProductSnapshot,
    ProductType, Sale, SaleItem, SaleStatus,
};

use crate::store::Collections;

/// Builds the demo dataset.
pub fn demo_collections() -> Collections {
    let customers = vec![
        customer(
            "João Silva",
            CustomerType::Physical,
            "joao@example.com",
            "(11) 98765-4321",
            "123.456.789-00",
            200,
        ),
        customer(
            "Maria Oliveira",
            CustomerType::Physical,
            "maria@example.com",
            "(11) 91234-5678",
            "987.654.321-00",
            160,
        ),
        customer(
            "Tech Solutions Ltda",
            CustomerType::Legal,
            "contato@techsolutions.com",
            "(11) 3456-7890",
            "12.345.678/0001-90",
            140,
        ),
        customer(
            "Ana Ferreira",
            CustomerType::Physical,
            "ana@example.com",
            "(11) 99876-5432",
            "111.222.333-44",
            120,
        ),
        customer(
            "Inovação Digital S.A.",
            CustomerType::Legal,
            "contato@inovacaodigital.com",
            "(11) 2345-6789",
            "98.765.432/0001-10",
            90,
        ),
    ];

    let products = vec![
        product(
            "NOT001",
            "Notebook Dell XPS 13",
            "Notebook premium com processador Intel Core i7, 16GB RAM e 512GB SSD",
            759_999,
            Some(620_000),
            Some(10),
            Some(3),
            Some("Dell"),
            210,
        ),
        product(
            "MON001",
            "Monitor Ultrawide 34\"",
            "Monitor ultrawide de 34 polegadas com resolução 3440x1440",
            289_999,
            Some(220_000),
            Some(8),
            Some(2),
            Some("LG"),
            205,
        ),
        product(
            "MOUSE001",
            "Mouse Sem Fio",
            "Mouse sem fio com sensor de alta precisão",
            14_999,
            Some(8_000),
            Some(30),
            Some(10),
            Some("Logitech"),
            200,
        ),
        product(
            "TEC001",
            "Teclado Mecânico",
            "Teclado mecânico RGB com switches Cherry MX Blue",
            34_999,
            Some(20_000),
            Some(12),
            Some(5),
            Some("HyperX"),
            180,
        ),
        product(
            "HEAD001",
            "Headset Gamer 7.1",
            "Headset gamer com som surround 7.1 e microfone removível",
            39_999,
            Some(24_000),
            Some(15),
            Some(5),
            Some("Razer"),
            175,
        ),
        service(
            "SERV001",
            "Instalação de Software",
            "Serviço de instalação e configuração de software",
            15_000,
            150,
        ),
        service(
            "SERV002",
            "Manutenção Preventiva",
            "Serviço de manutenção preventiva para computadores",
            25_000,
            130,
        ),
    ];

    let sales = vec![
        sale(
            "VND-001",
            2,
            &customers[0],
            vec![sale_item(&products[0], 1)],
            Money::zero(),
            SaleStatus::Completed,
            PaymentMethod::CreditCard,
        ),
        sale(
            "VND-002",
            3,
            &customers[1],
            vec![sale_item(&products[2], 2)],
            Money::from_cents(2_000),
            SaleStatus::Completed,
            PaymentMethod::Cash,
        ),
        sale(
            "VND-003",
            4,
            &customers[2],
            vec![sale_item(&products[1], 1), sale_item(&products[3], 1)],
            Money::from_cents(15_000),
            SaleStatus::Pending,
            PaymentMethod::BankTransfer,
        ),
        sale(
            "VND-004",
            5,
            &customers[3],
            vec![sale_item(&products[4], 1)],
            Money::zero(),
            SaleStatus::Canceled,
            PaymentMethod::CreditCard,
        ),
        sale(
            "VND-005",
            6,
            &customers[4],
            vec![sale_item(&products[0], 2), sale_item(&products[5], 1)],
            Money::from_cents(50_000),
            SaleStatus::Completed,
            PaymentMethod::Pix,
        ),
    ];

    let mut data = Collections::default();
    data.customers = customers;
    data.products = products;
    data.sales = sales;
    data.set_sale_sequence(5);
    data
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

fn customer(
    name: &str,
    customer_type: CustomerType,
    email: &str,
    phone: &str,
    document: &str,
    age_days: i64,
) -> Customer {
    let when = days_ago(age_days);
    Customer {
        id: new_id(),
        name: name.to_string(),
        customer_type,
        document: Some(document.to_string()),
        email: Some(email.to_string()),
        phone: Some(phone.to_string()),
        notes: None,
        is_active: true,
        created_at: when,
        updated_at: when,
    }
}

fn product(
    sku: &str,
    name: &str,
    description: &str,
    price_cents: i64,
    cost_cents: Option<i64>,
    stock: Option<i64>,
    min_stock: Option<i64>,
    brand: Option<&str>,
    age_days: i64,
) -> Product {
    let when = days_ago(age_days);
    Product {
        id: new_id(),
        sku: sku.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        product_type: ProductType::Product,
        price: Money::from_cents(price_cents),
        cost_price: cost_cents.map(Money::from_cents),
        stock,
        min_stock,
        unit: Some("un".to_string()),
        brand: brand.map(String::from),
        is_active: true,
        created_at: when,
        updated_at: when,
    }
}

fn service(sku: &str, name: &str, description: &str, price_cents: i64, age_days: i64) -> Product {
    Product {
        product_type: ProductType::Service,
        cost_price: None,
        stock: None,
        min_stock: None,
        unit: None,
        brand: None,
        ..product(sku, name, description, price_cents, None, None, None, None, age_days)
    }
}

fn sale_item(product: &Product, quantity: i64) -> SaleItem {
    SaleItem {
        id: new_id(),
        product: ProductSnapshot {
            id: product.id.clone(),
            name: product.name.clone(),
        },
        quantity,
        price: product.price,
        discount: Money::zero(),
        notes: String::new(),
        total: product.price.multiply_quantity(quantity),
    }
}

fn sale(
    code: &str,
    age_days: i64,
    customer: &Customer,
    items: Vec<SaleItem>,
    discount: Money,
    status: SaleStatus,
    payment_method: PaymentMethod,
) -> Sale {
    let when = days_ago(age_days);
    let subtotal: Money = items.iter().map(|i| i.total).sum();
    Sale {
        id: new_id(),
        code: code.to_string(),
        date: when.date_naive(),
        customer: CustomerSnapshot {
            id: customer.id.clone(),
            name: customer.name.clone(),
            email: customer.email.clone(),
        },
        items,
        subtotal,
        discount,
        total: (subtotal - discount).floor_at_zero(),
        status,
        payment_method,
        notes: String::new(),
        created_at: when,
        updated_at: when,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use balcao_core::document::is_valid_document;

    #[test]
    fn test_demo_counts() {
        let data = demo_collections();
        assert_eq!(data.customers.len(), 5);
        assert_eq!(data.products.len(), 7);
        assert_eq!(data.sales.len(), 5);
        assert!(data.stock_movements.is_empty());
    }

    #[test]
    fn test_demo_documents_fail_check_digit_validation() {
        // The placeholder documents are intentionally invalid, so editing a
        // seeded customer forces the operator through the document check.
        let data = demo_collections();
        for customer in &data.customers {
            let document = customer.document.as_deref().unwrap();
            assert!(
                !is_valid_document(customer.document_kind(), document),
                "{document} should not pass validation"
            );
        }
    }

    #[test]
    fn test_demo_sales_hold_the_totals_invariant() {
        let data = demo_collections();
        for sale in &data.sales {
            let items_total: Money = sale.items.iter().map(|i| i.total).sum();
            assert_eq!(sale.subtotal, items_total, "{}", sale.code);
            assert_eq!(
                sale.total,
                (sale.subtotal - sale.discount).floor_at_zero(),
                "{}",
                sale.code
            );
        }
    }

    #[test]
    fn test_code_sequence_continues_after_seeded_sales() {
        let mut data = demo_collections();
        assert_eq!(data.next_sale_code(), "VND-006");
    }

    #[test]
    fn test_every_sale_status_is_represented() {
        let data = demo_collections();
        for status in [
            SaleStatus::Pending,
            SaleStatus::Completed,
            SaleStatus::Canceled,
        ] {
            assert!(data.sales.iter().any(|s| s.status == status));
        }
    }
}
