//! Cloud provider identification.
//!
//! This module defines [`CloudProvider`], the closed set of providers the
//! compiler can target. The names match external configuration strings
//! (lowercase).

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// The cloud provider an architecture is compiled for.
///
/// Every compile request names exactly one provider; the provider selects
/// which resource generator interprets the diagram's node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    /// Amazon Web Services
    Aws,
    /// Microsoft Azure
    Azure,
    /// Google Cloud Platform
    Gcp,
}

impl CloudProvider {
    /// All providers with builtin generator support.
    pub const ALL: [CloudProvider; 3] = [Self::Aws, Self::Azure, Self::Gcp];
}

impl FromStr for CloudProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aws" => Ok(Self::Aws),
            "azure" => Ok(Self::Azure),
            "gcp" => Ok(Self::Gcp),
            _ => Err(format!(
                "invalid provider `{s}`, valid values: aws, azure, gcp"
            )),
        }
    }
}

impl From<CloudProvider> for &'static str {
    fn from(val: CloudProvider) -> Self {
        match val {
            CloudProvider::Aws => "aws",
            CloudProvider::Azure => "azure",
            CloudProvider::Gcp => "gcp",
        }
    }
}

impl Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}
