//! Required-parameter table for every [`Command`].
//!
//! A command declares an ordered list of [`Requirement`] groups. A group is
//! either one mandatory key or a set of alternatives of which at least one
//! must be present. Only presence is checked: a key mapped to an empty string
//! satisfies its group.

use std::fmt;

use crate::command::Command;
use crate::error::ValidationError;
use crate::params::Params;

/// One requirement group of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The key must be present.
    Field(&'static str),
    /// At least one of the keys must be present.
    AnyOf(&'static [&'static str]),
}

impl Requirement {
    /// Returns `true` if `params` satisfies this group.
    #[must_use]
    pub fn is_satisfied_by(&self, params: &Params) -> bool {
        match self {
            Self::Field(key) => params.contains_key(key),
            Self::AnyOf(keys) => keys.iter().any(|key| params.contains_key(key)),
        }
    }

    /// Returns the keys named by this group.
    #[must_use]
    pub fn keys(&self) -> &[&'static str] {
        match self {
            Self::Field(key) => std::slice::from_ref(key),
            Self::AnyOf(keys) => keys,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(key) => f.write_str(key),
            Self::AnyOf(keys) => f.write_str(&keys.join(" | ")),
        }
    }
}

const NONE: &[Requirement] = &[];

/// Returns the requirement groups for `command`.
#[must_use]
pub const fn requirements(command: Command) -> &'static [Requirement] {
    use Requirement::{AnyOf, Field};

    match command {
        Command::Balances
        | Command::Rates
        | Command::GetBasicInfo
        | Command::CreateMassWithdrawal
        | Command::GetWithdrawalHistory
        | Command::GetTxIds
        | Command::GetPbnList => NONE,
        Command::GetTxInfo | Command::GetTxInfoMulti => &[Field("txid")],
        Command::GetCallbackAddress | Command::GetDepositAddress => &[Field("currency")],
        Command::CreateTransaction => &[Field("amount"), Field("currency1"), Field("currency2")],
        Command::CreateWithdrawal => &[Field("amount"), Field("currency"), Field("address")],
        Command::GetWithdrawalInfo | Command::GetConversionInfo => &[Field("id")],
        Command::CreateTransfer => &[
            Field("amount"),
            Field("currency"),
            AnyOf(&["merchant", "pbntag"]),
        ],
        Command::Convert => &[Field("amount"), Field("from"), Field("to")],
        Command::GetPbnInfo => &[Field("pbntag")],
        Command::UpdatePbnTag => &[Field("tagid")],
        Command::ClaimPbnTag => &[Field("tagid"), Field("name")],
    }
}

/// Looks up the requirement groups for a command by wire name.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownCommand`] if `command` is not part of
/// the catalog.
pub fn requirements_for(command: &str) -> Result<&'static [Requirement], ValidationError> {
    command.parse::<Command>().map(Command::requirements)
}

/// Checks that `params` satisfies every requirement group of `command`.
///
/// Groups are checked in declared order and the first unmet one is reported.
///
/// # Errors
///
/// Returns [`ValidationError::MissingParameter`] naming the unmet key, or the
/// alternatives joined with `" | "` for an alternative group.
pub fn validate(command: Command, params: &Params) -> Result<(), ValidationError> {
    match command
        .requirements()
        .iter()
        .find(|requirement| !requirement.is_satisfied_by(params))
    {
        Some(unmet) => {
            #[cfg(feature = "telemetry")]
            tracing::debug!(cmd = %command, missing = %unmet, "request failed validation");
            Err(ValidationError::MissingParameter(unmet.to_string()))
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_with(keys: &[&str]) -> Params {
        let mut params = Params::new();
        for key in keys {
            params.insert(*key, "x");
        }
        params
    }

    #[test]
    fn catalog_matches_remote_command_set() {
        let expected: &[(&str, &[&str])] = &[
            ("balances", &[]),
            ("rates", &[]),
            ("get_tx_info", &["txid"]),
            ("get_basic_info", &[]),
            ("get_callback_address", &["currency"]),
            ("get_deposit_address", &["currency"]),
            ("create_transaction", &["amount", "currency1", "currency2"]),
            ("create_withdrawal", &["amount", "currency", "address"]),
            ("create_mass_withdrawal", &[]),
            ("get_withdrawal_info", &["id"]),
            ("get_withdrawal_history", &[]),
            ("get_tx_info_multi", &["txid"]),
            ("get_tx_ids", &[]),
            ("create_transfer", &["amount", "currency", "merchant | pbntag"]),
            ("convert", &["amount", "from", "to"]),
            ("get_conversion_info", &["id"]),
            ("get_pbn_info", &["pbntag"]),
            ("get_pbn_list", &[]),
            ("update_pbn_tag", &["tagid"]),
            ("claim_pbn_tag", &["tagid", "name"]),
        ];
        assert_eq!(expected.len(), Command::ALL.len());
        for (name, groups) in expected {
            let rendered: Vec<String> = requirements_for(name)
                .unwrap()
                .iter()
                .map(ToString::to_string)
                .collect();
            assert_eq!(&rendered, groups, "requirements for {name}");
        }
    }

    #[test]
    fn unknown_command_has_no_requirements() {
        let err = requirements_for("bogus_cmd").unwrap_err();
        assert!(matches!(err, ValidationError::UnknownCommand(_)));
    }

    #[test]
    fn every_command_accepts_its_required_fields() {
        for command in Command::ALL {
            let keys: Vec<&str> = command
                .requirements()
                .iter()
                .map(|group| group.keys()[0])
                .collect();
            assert!(
                validate(command, &params_with(&keys)).is_ok(),
                "{command} should validate"
            );
        }
    }

    #[test]
    fn omitting_any_single_field_is_reported() {
        for command in Command::ALL {
            let groups = command.requirements();
            for (skip, group) in groups.iter().enumerate() {
                let keys: Vec<&str> = groups
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip)
                    .map(|(_, g)| g.keys()[0])
                    .collect();
                let err = validate(command, &params_with(&keys)).unwrap_err();
                assert_eq!(
                    err,
                    ValidationError::MissingParameter(group.to_string()),
                    "{command} without {group}"
                );
            }
        }
    }

    #[test]
    fn first_unmet_group_wins() {
        let err = validate(Command::ClaimPbnTag, &Params::new()).unwrap_err();
        assert_eq!(err, ValidationError::MissingParameter("tagid".into()));
    }

    #[test]
    fn transfer_needs_merchant_or_pbntag() {
        let err = validate(Command::CreateTransfer, &params_with(&["amount", "currency"]))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingParameter("merchant | pbntag".into())
        );

        let merchant = params_with(&["amount", "currency", "merchant"]);
        assert!(validate(Command::CreateTransfer, &merchant).is_ok());

        let pbntag = params_with(&["amount", "currency", "pbntag"]);
        assert!(validate(Command::CreateTransfer, &pbntag).is_ok());
    }

    #[test]
    fn empty_values_count_as_present() {
        let mut params = Params::new();
        params.insert("txid", "");
        assert!(validate(Command::GetTxInfo, &params).is_ok());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let params = params_with(&["unrelated", "all"]);
        assert!(validate(Command::Balances, &params).is_ok());
    }
}
