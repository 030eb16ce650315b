//! Delivery and service fee calculation
//!
//! Fees are recomputed only when the trigger key changes: cart contents,
//! order value, delivery address, address validity, coordinates, local
//! government or vendor. Each request takes a generation number; a response that comes
//! back after a newer calculation started is dropped.

use jara_client::FeeApi;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use shared::models::{
    Business, CartState, Coordinates, DeliveryAddress, FeeCalculationRequest, FeeQuote,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Everything a fee calculation depends on
#[derive(Debug, Clone)]
pub struct FeeInputs {
    pub cart: CartState,
    pub address: DeliveryAddress,
    pub business: Option<Business>,
    /// Items subtotal (after discount) sent as the order value
    pub order_value: Decimal,
}

impl FeeInputs {
    fn trigger_key(&self) -> String {
        let coords = self
            .address
            .coordinates
            .map(|c| format!("{:.6},{:.6}", c.latitude, c.longitude))
            .unwrap_or_default();
        format!(
            "{}|{}|{}|{}|{}|{}|{}",
            self.cart.contents_key(),
            self.order_value.normalize(),
            self.address.context_address,
            self.address.is_address_valid,
            coords,
            self.address.local_government_id().unwrap_or_default(),
            self.business.as_ref().map(|b| b.id.as_str()).unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeState {
    pub delivery_fee: Decimal,
    pub service_fee: Decimal,
    pub is_calculating_fees: bool,
    pub fee_error: Option<String>,
}

impl FeeState {
    pub fn quote(&self) -> FeeQuote {
        FeeQuote {
            delivery_fee: self.delivery_fee,
            service_fee: self.service_fee,
        }
    }

    /// Order placement is blocked while fees are missing or in flight
    pub fn blocks_checkout(&self) -> bool {
        self.is_calculating_fees || self.fee_error.is_some()
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            fee_error: Some(message.into()),
            ..Self::default()
        }
    }
}

pub struct FeeCalculator {
    api: Arc<dyn FeeApi>,
    default_origin: Coordinates,
    state: Mutex<FeeState>,
    last_key: Mutex<Option<String>>,
    generation: AtomicU64,
}

impl FeeCalculator {
    pub fn new(api: Arc<dyn FeeApi>, default_origin: Coordinates) -> Self {
        Self {
            api,
            default_origin,
            state: Mutex::new(FeeState::default()),
            last_key: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> FeeState {
        self.state.lock().clone()
    }

    /// Recalculate if the trigger key differs from the last calculation
    pub async fn on_inputs_changed(&self, inputs: &FeeInputs) -> FeeState {
        if self.last_key.lock().as_deref() == Some(inputs.trigger_key().as_str()) {
            return self.state();
        }
        self.recalculate(inputs).await
    }

    /// Recalculate unconditionally ("Try again")
    pub async fn recalculate(&self, inputs: &FeeInputs) -> FeeState {
        let generation = {
            let mut last = self.last_key.lock();
            *last = Some(inputs.trigger_key());
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let request = match self.build_request(inputs) {
            Ok(Some(request)) => request,
            Ok(None) => return self.publish(generation, FeeState::default()),
            Err(message) => {
                tracing::debug!(reason = %message, "Fee calculation preconditions not met");
                return self.publish(generation, FeeState::failed(message));
            }
        };

        {
            let mut state = self.state.lock();
            state.is_calculating_fees = true;
            state.fee_error = None;
        }
        tracing::debug!(
            generation,
            num_packs = request.num_packs,
            local_government_id = %request.local_government_id,
            "Calculating fees"
        );

        let next = match self.api.calculate_fees(&request).await {
            Ok(quote) => FeeState {
                delivery_fee: quote.delivery_fee,
                service_fee: quote.service_fee,
                is_calculating_fees: false,
                fee_error: None,
            },
            Err(e) => {
                tracing::warn!(generation, error = %e, "Fee calculation failed");
                FeeState::failed(e.user_message())
            }
        };
        self.publish(generation, next)
    }

    /// Write `next` unless a newer calculation has started
    fn publish(&self, generation: u64, next: FeeState) -> FeeState {
        let mut state = self.state.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "Discarding stale fee result");
            return state.clone();
        }
        *state = next;
        state.clone()
    }

    /// `Ok(None)` when the cart is empty (no fees, no error)
    fn build_request(&self, inputs: &FeeInputs) -> Result<Option<FeeCalculationRequest>, String> {
        if inputs.cart.is_empty() {
            return Ok(None);
        }
        let address = &inputs.address;
        if !address.is_address_valid || address.context_address.trim().is_empty() {
            return Err("Please select a valid delivery address to calculate fees".into());
        }
        let Some(business) = inputs.business.as_ref().filter(|b| !b.id.trim().is_empty()) else {
            return Err("Vendor information is missing. Please reload the page".into());
        };
        let Some(local_government_id) = address.local_government_id() else {
            return Err(
                "We couldn't determine the local government for this address. Please select a different address"
                    .into(),
            );
        };
        let Some(delivery_coordinates) = address.coordinates else {
            return Err("Location coordinates are missing for this address. Please reselect it".into());
        };

        Ok(Some(FeeCalculationRequest {
            business_id: business.id.clone(),
            business_address: business.address.clone().unwrap_or_default(),
            business_coordinates: business.coordinates.unwrap_or(self.default_origin),
            delivery_address: address.context_address.clone(),
            delivery_coordinates,
            num_packs: inputs.cart.packs.iter().filter(|p| !p.is_empty()).count(),
            order_value: inputs.order_value,
            local_government_id: local_government_id.to_string(),
        }))
    }
}
