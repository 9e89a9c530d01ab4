//! Closed set of address categories understood by the HAPI contract.

use serde::{Deserialize, Serialize};

use crate::TypesError;

/// Risk classification attached to a reported address.
///
/// Variants are declared in display order. The serialized form is the variant
/// name verbatim, which is what the contract stores and returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Explicitly unclassified.
    None,

    // Tier 0
    Safe,

    // Tier 1 - Low risk
    /// Custodial or mixed wallets.
    WalletService,
    MerchantService,
    MiningPool,
    /// Exchange with high KYC standards.
    LowRiskExchange,

    // Tier 2 - Medium risk
    MediumRiskExchange,
    DeFi,
    OTCBroker,
    /// Cryptocurrency ATM.
    ATM,
    Gambling,

    // Tier 3 - High risk
    IllicitOrganization,
    Mixer,
    /// Darknet market or service.
    DarknetService,
    Scam,
    Ransomware,
    /// Stolen funds.
    Theft,

    // Tier 4 - Severe risk
    TerroristFinancing,
    Sanctions,
    /// Child abuse and porn materials.
    ChildAbuse,
}

/// Severity grouping of a [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskTier {
    Safe = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    Severe = 4,
}

impl Category {
    pub const ALL: [Category; 20] = [
        Category::None,
        Category::Safe,
        Category::WalletService,
        Category::MerchantService,
        Category::MiningPool,
        Category::LowRiskExchange,
        Category::MediumRiskExchange,
        Category::DeFi,
        Category::OTCBroker,
        Category::ATM,
        Category::Gambling,
        Category::IllicitOrganization,
        Category::Mixer,
        Category::DarknetService,
        Category::Scam,
        Category::Ransomware,
        Category::Theft,
        Category::TerroristFinancing,
        Category::Sanctions,
        Category::ChildAbuse,
    ];

    /// Wire literal, identical to the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Safe => "Safe",
            Self::WalletService => "WalletService",
            Self::MerchantService => "MerchantService",
            Self::MiningPool => "MiningPool",
            Self::LowRiskExchange => "LowRiskExchange",
            Self::MediumRiskExchange => "MediumRiskExchange",
            Self::DeFi => "DeFi",
            Self::OTCBroker => "OTCBroker",
            Self::ATM => "ATM",
            Self::Gambling => "Gambling",
            Self::IllicitOrganization => "IllicitOrganization",
            Self::Mixer => "Mixer",
            Self::DarknetService => "DarknetService",
            Self::Scam => "Scam",
            Self::Ransomware => "Ransomware",
            Self::Theft => "Theft",
            Self::TerroristFinancing => "TerroristFinancing",
            Self::Sanctions => "Sanctions",
            Self::ChildAbuse => "ChildAbuse",
        }
    }

    /// `None` for [`Category::None`], which carries no risk assessment.
    pub const fn tier(self) -> Option<RiskTier> {
        match self {
            Self::None => None,
            Self::Safe => Some(RiskTier::Safe),
            Self::WalletService
            | Self::MerchantService
            | Self::MiningPool
            | Self::LowRiskExchange => Some(RiskTier::Low),
            Self::MediumRiskExchange
            | Self::DeFi
            | Self::OTCBroker
            | Self::ATM
            | Self::Gambling => Some(RiskTier::Medium),
            Self::IllicitOrganization
            | Self::Mixer
            | Self::DarknetService
            | Self::Scam
            | Self::Ransomware
            | Self::Theft => Some(RiskTier::High),
            Self::TerroristFinancing | Self::Sanctions | Self::ChildAbuse => {
                Some(RiskTier::Severe)
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| TypesError::UnknownCategory(s.to_string()))
    }
}

impl RiskTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Severe => "severe",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tier {} ({})", *self as u8, self.label())
    }
}
