//! Operator-edited request configuration

use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};
use crate::types::blood::{BloodGroup, BloodProduct, Urgency};

/// Smallest number of units a request may ask for
pub const MIN_UNITS: u32 = 1;

/// Largest number of units a request may ask for
pub const MAX_UNITS: u32 = 50;

/// Parameters of a blood request, shared by every dispatch until edited.
///
/// Each dispatch takes its own copy, so editing the configuration never
/// changes a request that is already in flight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RequestConfigFields")]
pub struct RequestConfig {
    blood_group: BloodGroup,
    products: Vec<BloodProduct>,
    urgency: Urgency,
    units_needed: u32,
}

/// Unchecked serialized form, validated through `RequestConfig::new`
#[derive(Deserialize)]
struct RequestConfigFields {
    blood_group: BloodGroup,
    products: Vec<BloodProduct>,
    urgency: Urgency,
    units_needed: u32,
}

impl TryFrom<RequestConfigFields> for RequestConfig {
    type Error = SharedError;

    fn try_from(fields: RequestConfigFields) -> SharedResult<Self> {
        Self::new(fields.blood_group, fields.products, fields.urgency, fields.units_needed)
    }
}

impl RequestConfig {
    pub fn new(
        blood_group: BloodGroup,
        products: Vec<BloodProduct>,
        urgency: Urgency,
        units_needed: u32,
    ) -> SharedResult<Self> {
        let mut config = Self {
            blood_group,
            products: Vec::new(),
            urgency,
            units_needed: MIN_UNITS,
        };
        config.set_units_needed(units_needed)?;
        for product in products {
            if !config.products.contains(&product) {
                config.products.push(product);
            }
        }
        Ok(config)
    }

    pub fn blood_group(&self) -> BloodGroup {
        self.blood_group
    }

    pub fn products(&self) -> &[BloodProduct] {
        &self.products
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    pub fn units_needed(&self) -> u32 {
        self.units_needed
    }

    pub fn set_blood_group(&mut self, blood_group: BloodGroup) {
        self.blood_group = blood_group;
    }

    pub fn set_urgency(&mut self, urgency: Urgency) {
        self.urgency = urgency;
    }

    /// Set the unit count, rejecting anything outside `MIN_UNITS..=MAX_UNITS`
    pub fn set_units_needed(&mut self, units: u32) -> SharedResult<()> {
        if !(MIN_UNITS..=MAX_UNITS).contains(&units) {
            return Err(SharedError::invalid_config("units_needed", units));
        }
        self.units_needed = units;
        Ok(())
    }

    /// Select the product if absent, deselect it if present.
    ///
    /// Returns whether the product is selected afterwards. Newly selected
    /// products go to the end so the message keeps selection order.
    pub fn toggle_product(&mut self, product: BloodProduct) -> bool {
        if let Some(position) = self.products.iter().position(|p| *p == product) {
            self.products.remove(position);
            false
        } else {
            self.products.push(product);
            true
        }
    }

    /// Human-readable message sent along with every request
    pub fn compose_message(&self) -> String {
        let products = self
            .products
            .iter()
            .map(BloodProduct::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Urgent blood request: {} units of {} ({}) - Priority: {}",
            self.units_needed, self.blood_group, products, self.urgency
        )
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            blood_group: BloodGroup::APositive,
            products: vec![BloodProduct::WholeBlood],
            urgency: Urgency::High,
            units_needed: MIN_UNITS,
        }
    }
}
