//! The closed set of remote commands understood by the CoinPayments API.
//!
//! Each [`Command`] maps to the wire value sent in the `cmd` field. Parsing
//! an unknown name fails with [`ValidationError::UnknownCommand`], which is
//! the same error the dispatcher reports before any network I/O.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::ValidationError;
use crate::registry::{self, Requirement};

/// A remote CoinPayments API command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `balances` — coin balances.
    Balances,
    /// `rates` — exchange rates / coin list.
    Rates,
    /// `get_tx_info` — single transaction information.
    GetTxInfo,
    /// `get_basic_info` — basic account information.
    GetBasicInfo,
    /// `get_callback_address` — callback address with an IPN URL.
    GetCallbackAddress,
    /// `get_deposit_address` — deposit address for a currency.
    GetDepositAddress,
    /// `create_transaction` — start a buyer transaction.
    CreateTransaction,
    /// `create_withdrawal` — withdraw to an address.
    CreateWithdrawal,
    /// `create_mass_withdrawal` — several withdrawals in one call.
    CreateMassWithdrawal,
    /// `get_withdrawal_info` — single withdrawal information.
    GetWithdrawalInfo,
    /// `get_withdrawal_history` — paginated withdrawal history.
    GetWithdrawalHistory,
    /// `get_tx_info_multi` — information for several transactions.
    GetTxInfoMulti,
    /// `get_tx_ids` — paginated transaction identifiers.
    GetTxIds,
    /// `create_transfer` — merchant-to-merchant transfer.
    CreateTransfer,
    /// `convert` — coin conversion.
    Convert,
    /// `get_conversion_info` — single conversion information.
    GetConversionInfo,
    /// `get_pbn_info` — `$PayByName` profile information.
    GetPbnInfo,
    /// `get_pbn_list` — owned `$PayByName` tags.
    GetPbnList,
    /// `update_pbn_tag` — update a `$PayByName` profile.
    UpdatePbnTag,
    /// `claim_pbn_tag` — claim a `$PayByName` tag.
    ClaimPbnTag,
}

impl Command {
    /// Every command, in catalog order.
    pub const ALL: [Self; 20] = [
        Self::Balances,
        Self::Rates,
        Self::GetTxInfo,
        Self::GetBasicInfo,
        Self::GetCallbackAddress,
        Self::GetDepositAddress,
        Self::CreateTransaction,
        Self::CreateWithdrawal,
        Self::CreateMassWithdrawal,
        Self::GetWithdrawalInfo,
        Self::GetWithdrawalHistory,
        Self::GetTxInfoMulti,
        Self::GetTxIds,
        Self::CreateTransfer,
        Self::Convert,
        Self::GetConversionInfo,
        Self::GetPbnInfo,
        Self::GetPbnList,
        Self::UpdatePbnTag,
        Self::ClaimPbnTag,
    ];

    /// Returns the wire name sent in the `cmd` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Balances => "balances",
            Self::Rates => "rates",
            Self::GetTxInfo => "get_tx_info",
            Self::GetBasicInfo => "get_basic_info",
            Self::GetCallbackAddress => "get_callback_address",
            Self::GetDepositAddress => "get_deposit_address",
            Self::CreateTransaction => "create_transaction",
            Self::CreateWithdrawal => "create_withdrawal",
            Self::CreateMassWithdrawal => "create_mass_withdrawal",
            Self::GetWithdrawalInfo => "get_withdrawal_info",
            Self::GetWithdrawalHistory => "get_withdrawal_history",
            Self::GetTxInfoMulti => "get_tx_info_multi",
            Self::GetTxIds => "get_tx_ids",
            Self::CreateTransfer => "create_transfer",
            Self::Convert => "convert",
            Self::GetConversionInfo => "get_conversion_info",
            Self::GetPbnInfo => "get_pbn_info",
            Self::GetPbnList => "get_pbn_list",
            Self::UpdatePbnTag => "update_pbn_tag",
            Self::ClaimPbnTag => "claim_pbn_tag",
        }
    }

    /// Returns the requirement groups this command declares.
    ///
    /// See [`registry`] for the table itself.
    #[must_use]
    pub const fn requirements(self) -> &'static [Requirement] {
        registry::requirements(self)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Command {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownCommand(s.to_owned()))
    }
}

impl Serialize for Command {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Command {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip_through_from_str() {
        for command in Command::ALL {
            assert_eq!(command.as_str().parse::<Command>().unwrap(), command);
        }
    }

    #[test]
    fn wire_names_are_unique() {
        let mut names: Vec<_> = Command::ALL.iter().map(|c| c.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Command::ALL.len());
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "bogus_cmd".parse::<Command>().unwrap_err();
        assert!(matches!(err, ValidationError::UnknownCommand(ref name) if name == "bogus_cmd"));
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!("Balances".parse::<Command>().is_err());
    }

    #[test]
    fn serializes_as_wire_name() {
        let json = serde_json::to_string(&Command::CreateTransfer).unwrap();
        assert_eq!(json, "\"create_transfer\"");
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Command::CreateTransfer);
        assert!(serde_json::from_str::<Command>("\"nope\"").is_err());
    }
}
