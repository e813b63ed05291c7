//! Order validation, message composition and the messaging hand-off link.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::StoreSettings;

use super::{
    OrderingError,
    cart::{Cart, CartItem},
    checkout::{CheckoutTotals, compute_totals},
    gate::ensure_open,
    money::format_currency,
};

/// Host of the chat deep-link service orders are handed to.
pub const HANDOFF_HOST: &str = "wa.me";

const RULE: &str = "*-------------------------*";

/// How the customer intends to pay when the order is settled over chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Pix,
    Cash,
    CreditCard,
    DebitCard,
    Other,
}

impl PaymentMethod {
    pub const DEFAULT_CODE: &'static str = "pix";

    /// Map a form code to a method. Unknown codes become [`PaymentMethod::Other`].
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "pix" => Self::Pix,
            "money" => Self::Cash,
            "credit" => Self::CreditCard,
            "debit" => Self::DebitCard,
            _ => Self::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pix => "PIX",
            Self::Cash => "Cash",
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::Other => "Other",
        }
    }
}

/// A field the customer must fill in before the order can be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Name,
    Phone,
    Address,
    PaymentMethod,
}

impl RequiredField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::PaymentMethod => "payment method",
        }
    }

    pub fn join(fields: &[RequiredField]) -> String {
        fields
            .iter()
            .map(|field| field.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the customer typed into the checkout form.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CustomerDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub observation: String,
    #[serde(default = "default_payment_code")]
    pub payment_method: String,
}

fn default_payment_code() -> String {
    PaymentMethod::DEFAULT_CODE.to_string()
}

impl Default for CustomerDetails {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            address: String::new(),
            observation: String::new(),
            payment_method: default_payment_code(),
        }
    }
}

/// Customer details plus a snapshot of the cart and totals, taken at submit time.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub customer: CustomerDetails,
    pub items: Vec<CartItem>,
    pub totals: CheckoutTotals,
}

impl OrderDraft {
    pub fn new(customer: CustomerDetails, cart: &Cart, delivery_fee: Decimal) -> Self {
        Self {
            customer,
            items: cart.items().to_vec(),
            totals: compute_totals(cart, delivery_fee),
        }
    }

    pub fn payment_method(&self) -> PaymentMethod {
        PaymentMethod::from_code(&self.customer.payment_method)
    }
}

/// The missing required fields, in form order. Empty when the draft is valid.
pub fn validate(draft: &OrderDraft) -> Vec<RequiredField> {
    let customer = &draft.customer;
    [
        (RequiredField::Name, customer.name.as_str()),
        (RequiredField::Phone, customer.phone.as_str()),
        (RequiredField::Address, customer.address.as_str()),
        (RequiredField::PaymentMethod, customer.payment_method.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect()
}

/// Render the order as the line-oriented chat message sent to the store.
pub fn compose_message(store_name: &str, draft: &OrderDraft) -> String {
    let customer = &draft.customer;
    let totals = &draft.totals;
    let mut lines = vec![
        format!("*NEW ORDER - {store_name}*"),
        String::new(),
        format!("*Customer:* {}", customer.name.trim()),
        format!("*WhatsApp:* {}", customer.phone.trim()),
        format!("*Address:* {}", customer.address.trim()),
    ];

    let observation = customer.observation.trim();
    if !observation.is_empty() {
        lines.push(format!("*Observation:* {observation}"));
    }

    lines.push(String::new());
    lines.push(RULE.to_string());
    lines.push("*ORDER ITEMS:*".to_string());
    lines.extend(draft.items.iter().map(|item| {
        format!(
            "{}x {} - {}",
            item.quantity,
            item.product.name,
            format_currency(item.line_total())
        )
    }));
    lines.push(RULE.to_string());
    lines.push(format!("Subtotal: {}", format_currency(totals.subtotal)));
    if totals.delivery_fee_to_be_calculated() {
        lines.push("Delivery fee: to be calculated".to_string());
    } else {
        lines.push(format!(
            "Delivery fee: {}",
            format_currency(totals.delivery_fee)
        ));
    }
    lines.push(format!("*TOTAL: {}*", format_currency(totals.total)));
    lines.push(RULE.to_string());
    lines.push(format!("*Payment method:* {}", draft.payment_method().label()));

    let mut message = lines.join("\n");
    message.push('\n');
    message
}

/// Deep link that opens a chat with `phone_number` pre-filled with `message`.
///
/// Every non-digit is stripped from the number. An empty number yields a
/// degenerate link; store configuration is not checked here.
pub fn build_handoff_url(phone_number: &str, message: &str) -> String {
    let digits: String = phone_number.chars().filter(char::is_ascii_digit).collect();
    format!(
        "https://{HANDOFF_HOST}/{digits}?text={}",
        urlencoding::encode(message)
    )
}

/// A composed order ready to be handed off.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmittedOrder {
    pub message: String,
    pub handoff_url: String,
    pub totals: CheckoutTotals,
}

/// Validate and compose an order from the current cart.
///
/// The cart is only read. The caller clears it once this succeeds, so a
/// rejected submission leaves everything editable.
pub fn submit(
    settings: &StoreSettings,
    customer: CustomerDetails,
    cart: &Cart,
) -> Result<SubmittedOrder, OrderingError> {
    ensure_open(settings)?;

    let draft = OrderDraft::new(customer, cart, settings.delivery_fee);
    let missing = validate(&draft);
    if !missing.is_empty() {
        return Err(OrderingError::MissingFields(missing));
    }
    if draft.items.is_empty() {
        return Err(OrderingError::EmptyCart);
    }

    let message = compose_message(&settings.name, &draft);
    let handoff_url = build_handoff_url(&settings.whatsapp, &message);
    Ok(SubmittedOrder {
        message,
        handoff_url,
        totals: draft.totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::catalog::test_support::{open_store, product};

    fn customer() -> CustomerDetails {
        CustomerDetails {
            name: "Maria".into(),
            phone: "(55) 91234-0000".into(),
            address: "Rua A, 10".into(),
            ..CustomerDetails::default()
        }
    }

    fn soup_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_quantity(&product("Soup", Decimal::new(1000, 2), 1), 2);
        cart
    }

    #[test]
    fn validate_reports_exactly_the_missing_fields() {
        let details = CustomerDetails {
            name: "   ".into(),
            address: String::new(),
            ..customer()
        };
        let draft = OrderDraft::new(details, &soup_cart(), Decimal::ZERO);

        assert_eq!(
            validate(&draft),
            vec![RequiredField::Name, RequiredField::Address]
        );
    }

    #[test]
    fn observation_is_optional() {
        let draft = OrderDraft::new(customer(), &soup_cart(), Decimal::ZERO);
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn payment_codes_map_to_labels() {
        assert_eq!(PaymentMethod::from_code("pix").label(), "PIX");
        assert_eq!(PaymentMethod::from_code("money").label(), "Cash");
        assert_eq!(PaymentMethod::from_code("credit").label(), "Credit Card");
        assert_eq!(PaymentMethod::from_code("debit").label(), "Debit Card");
        assert_eq!(PaymentMethod::from_code("voucher").label(), "Other");
    }

    #[test]
    fn message_lists_items_and_totals() {
        let draft = OrderDraft::new(customer(), &soup_cart(), Decimal::new(500, 2));
        let message = compose_message("Almeidas", &draft);

        assert!(message.starts_with("*NEW ORDER - Almeidas*\n"));
        assert!(message.contains("*Customer:* Maria\n"));
        assert!(message.contains("2x Soup - R$ 20.00\n"));
        assert!(message.contains("Subtotal: R$ 20.00\n"));
        assert!(message.contains("Delivery fee: R$ 5.00\n"));
        assert!(message.contains("*TOTAL: R$ 25.00*\n"));
        assert!(message.ends_with("*Payment method:* PIX\n"));
        assert!(!message.contains("Observation"));
    }

    #[test]
    fn zero_fee_prints_the_to_be_calculated_marker() {
        let details = CustomerDetails {
            observation: "no onions".into(),
            payment_method: "money".into(),
            ..customer()
        };
        let draft = OrderDraft::new(details, &soup_cart(), Decimal::ZERO);
        let message = compose_message("Almeidas", &draft);

        assert!(message.contains("Delivery fee: to be calculated\n"));
        assert!(!message.contains("R$ 0.00"));
        assert!(message.contains("*Observation:* no onions\n"));
        assert!(message.contains("*Payment method:* Cash\n"));
    }

    #[test]
    fn composing_is_deterministic() {
        let draft = OrderDraft::new(customer(), &soup_cart(), Decimal::ONE);
        assert_eq!(
            compose_message("Almeidas", &draft),
            compose_message("Almeidas", &draft)
        );
    }

    #[test]
    fn handoff_url_strips_non_digits_and_encodes_text() {
        let url = build_handoff_url("(55) 98765-4321", "2x Soup & bread\n");
        assert_eq!(
            url,
            "https://wa.me/55987654321?text=2x%20Soup%20%26%20bread%0A"
        );
    }

    #[test]
    fn submit_checks_gate_then_fields_then_items() {
        let mut settings = open_store(Decimal::ZERO);
        let cart = soup_cart();

        settings.is_open = false;
        assert_eq!(
            submit(&settings, customer(), &cart).map(|_| ()),
            Err(OrderingError::StoreClosed)
        );

        settings.is_open = true;
        let anonymous = CustomerDetails {
            name: String::new(),
            ..customer()
        };
        assert_eq!(
            submit(&settings, anonymous, &cart).map(|_| ()),
            Err(OrderingError::MissingFields(vec![RequiredField::Name]))
        );
        assert_eq!(
            submit(&settings, customer(), &Cart::new()).map(|_| ()),
            Err(OrderingError::EmptyCart)
        );

        let order = submit(&settings, customer(), &cart).expect("valid order");
        assert!(order.handoff_url.starts_with("https://wa.me/5598765432"));
        assert_eq!(order.totals.total, Decimal::new(2000, 2));
        assert_eq!(cart.item_count(), 2);
    }
}
