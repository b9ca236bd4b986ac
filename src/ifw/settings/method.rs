//! Component packaging method.

use crate::ifw::{
    error::{Error, Result},
    options::keys,
};

/// How components are folded into installer packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackagingMethod {
    /// Everything installs into the root package (`ALL_COMPONENTS_IN_ONE`).
    OnePackage,
    /// Components share their group's package (`ONE_PER_GROUP`).
    OnePackagePerGroup,
    /// Every component gets its own package (`IGNORE` or unset).
    #[default]
    OnePackagePerComponent,
}

impl PackagingMethod {
    /// Parses a `CPACK_COMPONENTS_GROUPING` value, ignoring case.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_uppercase().as_str() {
            "ALL_COMPONENTS_IN_ONE" => Ok(Self::OnePackage),
            "ONE_PER_GROUP" => Ok(Self::OnePackagePerGroup),
            "IGNORE" => Ok(Self::OnePackagePerComponent),
            _ => Err(Error::InvalidOption {
                key: keys::COMPONENTS_GROUPING.to_string(),
                reason: format!(
                    "\"{value}\" is not one of ALL_COMPONENTS_IN_ONE, ONE_PER_GROUP, IGNORE"
                ),
            }),
        }
    }
}
