//! Session state
//!
//! Everything the front end shows lives in one immutable [`SessionState`]
//! snapshot. Each user or network event produces a new snapshot plus a list
//! of [`Effect`]s for the driver to run; nothing here does I/O or touches a
//! clock, so every transition is testable on its own.

use crate::printing::{PRINT_SENT_MESSAGE, print_failure_message};
use crate::registration::{registration_failure_message, registration_success_message};
use crate::resolver::ClearPolicy;
use crate::{ClientError, ClientResult};
use shared::{BridgeMessage, Product, ProductCreate, ProductCreated};
use std::time::Duration;

/// Active screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Search,
    Register,
}

/// Registration form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Barcode,
    Brand,
    Name,
    Weight,
    Price,
}

impl std::str::FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "barcode" => Ok(Self::Barcode),
            "brand" => Ok(Self::Brand),
            "name" => Ok(Self::Name),
            "weight" => Ok(Self::Weight),
            "price" => Ok(Self::Price),
            other => Err(format!("unknown field: {}", other)),
        }
    }
}

/// Registration form contents, sent as-is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub barcode: String,
    pub brand: String,
    pub name: String,
    pub weight: String,
    pub price: String,
}

impl RegistrationForm {
    fn with_field(&self, field: FormField, value: String) -> Self {
        let mut form = self.clone();
        match field {
            FormField::Barcode => form.barcode = value,
            FormField::Brand => form.brand = value,
            FormField::Name => form.name = value,
            FormField::Weight => form.weight = value,
            FormField::Price => form.price = value,
        }
        form
    }

    pub fn to_create(&self) -> ProductCreate {
        ProductCreate {
            barcode: self.barcode.clone(),
            product_brand: self.brand.clone(),
            product_name: self.name.clone(),
            product_weight: self.weight.clone(),
            retail_price: self.price.clone(),
        }
    }
}

/// Something that happened
#[derive(Debug)]
pub enum SessionEvent {
    /// Scanner or keyboard changed the barcode field
    InputChanged(String),
    /// A lookup finished
    LookupCompleted(ClientResult<Product>),
    /// A clear timer fired
    InputCleared,
    /// Resolver finished its start-up load (catalog download)
    ResolverLoaded(ClientResult<()>),
    TabSwitched(Tab),
    FormEdited(FormField, String),
    PrintRequested,
    PrintCompleted(ClientResult<Option<BridgeMessage>>),
    SubmitRequested,
    ProductAdded(ClientResult<ProductCreated>),
}

/// Work the driver must do after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Resolve a barcode (debounced by the driver)
    Lookup(String),
    /// Emit [`SessionEvent::InputCleared`] after the delay
    ClearInputAfter(Duration),
    SendPrint(Product),
    Register(ProductCreate),
    /// Blocking notification
    Alert(String),
}

/// Result of applying one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(state: SessionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Snapshot of what the operator sees
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub tab: Tab,
    /// Barcode field
    pub input: String,
    pub product: Option<Product>,
    /// Inline error, replaces the product
    pub error: Option<String>,
    pub success: Option<String>,
    pub form: RegistrationForm,
    pub clear_policy: ClearPolicy,
}

impl SessionState {
    pub fn new(clear_policy: ClearPolicy) -> Self {
        Self {
            clear_policy,
            ..Default::default()
        }
    }

    /// Apply one event
    pub fn apply(&self, event: SessionEvent) -> Transition {
        match event {
            SessionEvent::InputChanged(raw) => self.on_input(&raw),
            SessionEvent::LookupCompleted(result) => self.on_lookup(result),
            SessionEvent::InputCleared => Transition::to(Self {
                input: String::new(),
                ..self.clone()
            }),
            SessionEvent::ResolverLoaded(Ok(())) => Transition::to(self.clone()),
            SessionEvent::ResolverLoaded(Err(e)) => Transition::to(Self {
                product: None,
                error: Some(format!("Could not load the product list: {}", e.detail())),
                ..self.clone()
            }),
            SessionEvent::TabSwitched(tab) => Transition::to(Self {
                tab,
                input: String::new(),
                product: None,
                error: None,
                form: RegistrationForm::default(),
                ..self.clone()
            }),
            SessionEvent::FormEdited(field, value) => Transition::to(Self {
                form: self.form.with_field(field, value),
                ..self.clone()
            }),
            SessionEvent::PrintRequested => match &self.product {
                Some(product) => {
                    Transition::to(self.clone()).with(Effect::SendPrint(product.clone()))
                }
                None => Transition::to(self.clone()),
            },
            SessionEvent::PrintCompleted(Ok(_)) => {
                Transition::to(self.clone()).with(Effect::Alert(PRINT_SENT_MESSAGE.to_string()))
            }
            SessionEvent::PrintCompleted(Err(e)) => {
                Transition::to(self.clone()).with(Effect::Alert(print_failure_message(&e)))
            }
            SessionEvent::SubmitRequested => {
                Transition::to(self.clone()).with(Effect::Register(self.form.to_create()))
            }
            SessionEvent::ProductAdded(Ok(created)) => Transition::to(Self {
                success: Some(registration_success_message(&created)),
                error: None,
                input: String::new(),
                form: RegistrationForm::default(),
                ..self.clone()
            }),
            SessionEvent::ProductAdded(Err(e)) => Transition::to(Self {
                success: None,
                error: Some(registration_failure_message(&e)),
                ..self.clone()
            }),
        }
    }

    fn on_input(&self, raw: &str) -> Transition {
        // the add tab has no search; scanned codes fill the form
        if self.tab == Tab::Register {
            return Transition::to(Self {
                form: self.form.with_field(FormField::Barcode, raw.trim().to_string()),
                ..self.clone()
            });
        }

        match shared::barcode::normalize(raw) {
            Some(barcode) => Transition::to(Self {
                input: barcode.to_string(),
                ..self.clone()
            })
            .with(Effect::Lookup(barcode.to_string())),
            None => Transition::to(Self {
                input: String::new(),
                product: None,
                error: Some(ClientError::EmptyInput.to_string()),
                ..self.clone()
            }),
        }
    }

    fn on_lookup(&self, result: ClientResult<Product>) -> Transition {
        let policy = self.clear_policy;
        let (product, error, delay) = match result {
            Ok(product) => (Some(product), None, policy.found),
            Err(e @ ClientError::NotFound) => (None, Some(e.to_string()), policy.not_found),
            Err(e) => (None, Some(e.to_string()), policy.error),
        };

        Transition::to(Self {
            product,
            error,
            ..self.clone()
        })
        .with(Effect::ClearInputAfter(delay))
    }

    /// Price line for the shown product
    pub fn display_price(&self) -> Option<String> {
        self.product.as_ref().map(Product::display_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn product(barcode: &str, price: &str) -> Product {
        Product {
            barcode: barcode.into(),
            product_name: "Smør".into(),
            brand_name: Some("Lurpak".into()),
            product_weight: "250g".into(),
            retail_price: price.into(),
            image_url: None,
        }
    }

    #[test]
    fn test_input_schedules_lookup() {
        let t = SessionState::default().apply(SessionEvent::InputChanged(" 5740900 \n".into()));
        assert_eq!(t.state.input, "5740900");
        assert_eq!(t.effects, vec![Effect::Lookup("5740900".into())]);
    }

    #[test]
    fn test_blank_input_is_rejected_without_lookup() {
        let start = SessionState {
            product: Some(product("1", "10")),
            ..Default::default()
        };
        let t = start.apply(SessionEvent::InputChanged("   ".into()));
        assert!(t.effects.is_empty());
        assert!(t.state.product.is_none());
        assert_eq!(t.state.error.as_deref(), Some("Please enter a barcode."));
    }

    #[test]
    fn test_found_shows_product_and_clears_per_policy() {
        let state = SessionState::new(ClearPolicy::CATALOG);
        let t = state.apply(SessionEvent::LookupCompleted(Ok(product("1", "123,45"))));
        assert_eq!(t.state.display_price().as_deref(), Some("123.45 DKK"));
        assert!(t.state.error.is_none());
        assert_eq!(
            t.effects,
            vec![Effect::ClearInputAfter(Duration::from_millis(500))]
        );
    }

    #[test]
    fn test_not_found_replaces_product() {
        let state = SessionState {
            product: Some(product("1", "10")),
            clear_policy: ClearPolicy::CATALOG,
            ..Default::default()
        };
        let t = state.apply(SessionEvent::LookupCompleted(Err(ClientError::NotFound)));
        assert!(t.state.product.is_none());
        assert_eq!(t.state.error.as_deref(), Some("Product not found!"));
        assert_eq!(
            t.effects,
            vec![Effect::ClearInputAfter(Duration::from_millis(100))]
        );
    }

    #[test]
    fn test_network_variant_clears_immediately() {
        let state = SessionState::new(ClearPolicy::IMMEDIATE);
        let err = ClientError::Remote {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "db down".into(),
        };
        let t = state.apply(SessionEvent::LookupCompleted(Err(err)));
        assert_eq!(t.state.error.as_deref(), Some("Server error: 500 - db down"));
        assert_eq!(t.effects, vec![Effect::ClearInputAfter(Duration::ZERO)]);
    }

    #[test]
    fn test_input_cleared_keeps_result() {
        let state = SessionState {
            input: "1".into(),
            product: Some(product("1", "10")),
            ..Default::default()
        };
        let t = state.apply(SessionEvent::InputCleared);
        assert!(t.state.input.is_empty());
        assert!(t.state.product.is_some());
    }

    #[test]
    fn test_print_requires_product() {
        let t = SessionState::default().apply(SessionEvent::PrintRequested);
        assert!(t.effects.is_empty());

        let p = product("1", "99,00");
        let state = SessionState {
            product: Some(p.clone()),
            ..Default::default()
        };
        let t = state.apply(SessionEvent::PrintRequested);
        assert_eq!(t.effects, vec![Effect::SendPrint(p)]);
    }

    #[test]
    fn test_print_results_alert() {
        let ok = SessionState::default().apply(SessionEvent::PrintCompleted(Ok(Some(
            BridgeMessage::new("Print command received"),
        ))));
        assert_eq!(ok.effects, vec![Effect::Alert(PRINT_SENT_MESSAGE.into())]);

        let err = ClientError::Remote {
            status: StatusCode::BAD_REQUEST,
            body: r#"{"message":"Invalid command"}"#.into(),
        };
        let failed = SessionState::default().apply(SessionEvent::PrintCompleted(Err(err)));
        assert_eq!(
            failed.effects,
            vec![Effect::Alert(
                "An error occurred while sending: Invalid command".into()
            )]
        );
        // print errors never land inline
        assert!(failed.state.error.is_none());
    }

    #[test]
    fn test_registration_flow() {
        let mut state = SessionState::default()
            .apply(SessionEvent::TabSwitched(Tab::Register))
            .state;
        for (field, value) in [
            (FormField::Barcode, "42"),
            (FormField::Brand, "Arla"),
            (FormField::Name, "Mælk"),
            (FormField::Weight, "1l"),
            (FormField::Price, "12,95"),
        ] {
            state = state.apply(SessionEvent::FormEdited(field, value.into())).state;
        }

        let t = state.apply(SessionEvent::SubmitRequested);
        let Effect::Register(body) = &t.effects[0] else {
            panic!("expected register effect");
        };
        assert_eq!(body.product_brand, "Arla");
        assert_eq!(body.retail_price, "12,95");

        let failed = state.apply(SessionEvent::ProductAdded(Err(
            ClientError::NetworkUnreachable("refused".into()),
        )));
        assert_eq!(failed.state.form, state.form);
        assert_eq!(
            failed.state.error.as_deref(),
            Some("No response from the server. Check your server connection.")
        );

        let added = failed.state.apply(SessionEvent::ProductAdded(Ok(ProductCreated {
            product_id: shared::ProductId::Number(7),
        })));
        assert_eq!(added.state.form, RegistrationForm::default());
        assert!(added.state.error.is_none());
        assert_eq!(
            added.state.success.as_deref(),
            Some("Product added successfully with ID: 7")
        );
    }

    #[test]
    fn test_tab_switch_resets_view() {
        let state = SessionState {
            input: "1".into(),
            product: Some(product("1", "10")),
            error: Some("x".into()),
            ..Default::default()
        };
        let t = state.apply(SessionEvent::TabSwitched(Tab::Register));
        assert_eq!(t.state.tab, Tab::Register);
        assert!(t.state.product.is_none());
        assert!(t.state.error.is_none());
        assert!(t.state.input.is_empty());
    }

    #[test]
    fn test_catalog_load_failure_surfaces() {
        let t = SessionState::new(ClearPolicy::CATALOG).apply(SessionEvent::ResolverLoaded(Err(
            ClientError::NetworkUnreachable("dns error".into()),
        )));
        assert_eq!(
            t.state.error.as_deref(),
            Some("Could not load the product list: dns error")
        );
    }

    #[test]
    fn test_scan_on_add_tab_fills_form_barcode() {
        let state = SessionState::default().apply(SessionEvent::TabSwitched(Tab::Register)).state;
        let t = state.apply(SessionEvent::InputChanged("42\r\n".into()));
        assert!(t.effects.is_empty());
        assert_eq!(t.state.form.barcode, "42");
        assert!(t.state.product.is_none());
        assert!(t.state.error.is_none());
    }

    #[test]
    fn test_form_field_from_str() {
        assert_eq!("Price".parse::<FormField>(), Ok(FormField::Price));
        assert!("colour".parse::<FormField>().is_err());
    }
}
