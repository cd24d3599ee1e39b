//! Fixed enumerations of the ledger domain

use serde::{Deserialize, Serialize};

/// Expense classification, a closed five-value set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseType {
    Essencial,
    Besteira,
    Investimento,
    Lazer,
    Outros,
}

impl ExpenseType {
    /// Every type, in presentation order
    pub const ALL: [ExpenseType; 5] = [
        ExpenseType::Essencial,
        ExpenseType::Besteira,
        ExpenseType::Investimento,
        ExpenseType::Lazer,
        ExpenseType::Outros,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseType::Essencial => "Essencial",
            ExpenseType::Besteira => "Besteira",
            ExpenseType::Investimento => "Investimento",
            ExpenseType::Lazer => "Lazer",
            ExpenseType::Outros => "Outros",
        }
    }
}

impl std::str::FromStr for ExpenseType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Essencial" => Ok(ExpenseType::Essencial),
            "Besteira" => Ok(ExpenseType::Besteira),
            "Investimento" => Ok(ExpenseType::Investimento),
            "Lazer" => Ok(ExpenseType::Lazer),
            "Outros" => Ok(ExpenseType::Outros),
            _ => Err("type must be one of: Essencial, Besteira, Investimento, Lazer, Outros.".to_string()),
        }
    }
}

impl std::fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method shared by every ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Pix,
    Card,
    Cash,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "Pix",
            PaymentMethod::Card => "Card",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Other => "Other",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pix" => Ok(PaymentMethod::Pix),
            "Card" => Ok(PaymentMethod::Card),
            "Cash" => Ok(PaymentMethod::Cash),
            "Other" => Ok(PaymentMethod::Other),
            _ => Err("method must be one of: Pix, Card, Cash, Other.".to_string()),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a reserve movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReserveMovement {
    Contribution,
    Withdrawal,
}

impl ReserveMovement {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReserveMovement::Contribution => "contribution",
            ReserveMovement::Withdrawal => "withdrawal",
        }
    }
}

impl std::str::FromStr for ReserveMovement {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contribution" => Ok(ReserveMovement::Contribution),
            "withdrawal" => Ok(ReserveMovement::Withdrawal),
            _ => Err("movement_type must be one of: contribution, withdrawal.".to_string()),
        }
    }
}

impl std::fmt::Display for ReserveMovement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the salary figures of a month came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeSource {
    /// The settings singleton
    Default,
    /// A per-month income override
    Monthly,
}

impl std::fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncomeSource::Default => write!(f, "default"),
            IncomeSource::Monthly => write!(f, "monthly"),
        }
    }
}
