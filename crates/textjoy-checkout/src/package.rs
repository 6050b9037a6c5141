//! Packages and Pricing
//!
//! Fixed package catalogs and the lookup from a package id to its price.

use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, Result};

/// Charge currency
///
/// Only pounds sterling are sold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "GBP")]
    Gbp,
}

impl Currency {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Gbp => "GBP",
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Gbp => "£",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount in minor currency units (pence)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub minor_units: u32,
    pub currency: Currency,
}

impl Price {
    pub const fn gbp(minor_units: u32) -> Self {
        Self {
            minor_units,
            currency: Currency::Gbp,
        }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}.{:02}",
            self.currency.symbol(),
            self.minor_units / 100,
            self.minor_units % 100
        )
    }
}

/// Package identifier (e.g. `sixMonths`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A purchasable package tier
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Package {
    pub id: &'static str,
    pub name: &'static str,
    pub price_minor_units: u32,
    pub display_price: &'static str,
}

impl Package {
    pub const fn price(&self) -> Price {
        Price::gbp(self.price_minor_units)
    }

    /// Label shown in the package selector
    pub fn label(&self) -> String {
        format!("{} - Only {}", self.name, self.display_price)
    }

    pub fn selection(&self) -> PackageSelection {
        PackageSelection {
            id: PackageId::new(self.id),
            label: self.label(),
        }
    }
}

const SIX_MONTHS: Package = Package {
    id: "sixMonths",
    name: "Six Months",
    price_minor_units: 299,
    display_price: "£2.99",
};

const TWELVE_MONTHS: Package = Package {
    id: "twelveMonths",
    name: "Twelve Months",
    price_minor_units: 499,
    display_price: "£4.99",
};

const GIFT: Package = Package {
    id: "gift",
    name: "Gift Collection",
    price_minor_units: 300,
    display_price: "£3.00",
};

/// The package chosen in the form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSelection {
    pub id: PackageId,
    pub label: String,
}

/// Immutable list of packages offered by one checkout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageCatalog {
    packages: Vec<Package>,
}

impl PackageCatalog {
    /// Catalog must hold at least one package; the first is the default.
    pub fn new(packages: Vec<Package>) -> Result<Self> {
        if packages.is_empty() {
            return Err(CheckoutError::Config("package catalog is empty".into()));
        }
        Ok(Self { packages })
    }

    /// Six and twelve month subscriptions
    pub fn subscription() -> Self {
        Self {
            packages: vec![SIX_MONTHS, TWELVE_MONTHS],
        }
    }

    /// Single fixed-price gift
    pub fn gift() -> Self {
        Self {
            packages: vec![GIFT],
        }
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Package preselected by a fresh form
    pub fn default_package(&self) -> &Package {
        &self.packages[0]
    }

    pub fn get(&self, id: &PackageId) -> Result<&Package> {
        self.packages
            .iter()
            .find(|p| p.id == id.as_str())
            .ok_or_else(|| CheckoutError::UnknownPackage(id.to_string()))
    }

    /// Resolve a package id to its price
    pub fn resolve(&self, id: &PackageId) -> Result<Price> {
        self.get(id).map(Package::price)
    }
}

impl Default for PackageCatalog {
    fn default() -> Self {
        Self::subscription()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_months_resolves_to_299_gbp() {
        let price = PackageCatalog::subscription()
            .resolve(&PackageId::new("sixMonths"))
            .unwrap();
        assert_eq!(price.minor_units, 299);
        assert_eq!(price.currency.code(), "GBP");
    }

    #[test]
    fn test_unknown_package_is_an_error() {
        let err = PackageCatalog::subscription()
            .resolve(&PackageId::new("lifetime"))
            .unwrap_err();
        assert!(matches!(err, CheckoutError::UnknownPackage(id) if id == "lifetime"));
    }

    #[test]
    fn test_gift_catalog_has_single_fixed_amount() {
        let catalog = PackageCatalog::gift();
        assert_eq!(catalog.packages().len(), 1);
        assert_eq!(catalog.default_package().price().minor_units, 300);
    }

    #[test]
    fn test_labels_and_display() {
        assert_eq!(TWELVE_MONTHS.label(), "Twelve Months - Only £4.99");
        assert_eq!(Price::gbp(299).to_string(), "£2.99");
        assert_eq!(Price::gbp(300).to_string(), "£3.00");
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(PackageCatalog::new(Vec::new()).is_err());
    }
}
