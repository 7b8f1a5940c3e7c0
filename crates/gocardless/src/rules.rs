//! Country rule table and bank identifier formatting.
//!
//! Adding a country is a data change here, not a code change anywhere else.

use common_enums::{BankIdentifierField, Currency, DirectDebitScheme};

/// Scheme, currency and identifier-field selection for one country.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CountryRule {
    pub scheme: DirectDebitScheme,
    pub currency: Currency,
    pub identifier_field: BankIdentifierField,
}

/// Applied to any country code outside the supported table.
pub const DEFAULT_RULE: CountryRule = CountryRule {
    scheme: DirectDebitScheme::Bacs,
    currency: Currency::GBP,
    identifier_field: BankIdentifierField::BranchCode,
};

const fn rule(
    scheme: DirectDebitScheme,
    currency: Currency,
    identifier_field: BankIdentifierField,
) -> CountryRule {
    CountryRule {
        scheme,
        currency,
        identifier_field,
    }
}

/// Resolve the rule for a raw ISO-3166 alpha-2 code. Total: case and
/// surrounding whitespace are ignored, unrecognized codes get
/// [`DEFAULT_RULE`].
pub fn resolve_rule(country_code: &str) -> CountryRule {
    use BankIdentifierField::{BankCode, BranchCode};
    use Currency::{AUD, CAD, DKK, EUR, GBP, NOK, NZD, SEK, USD};
    use DirectDebitScheme::{Ach, Bacs, SepaCore};

    match normalize(country_code).as_str() {
        "US" => rule(Ach, USD, BankCode),
        "CA" => rule(Ach, CAD, BankCode),
        "AU" => rule(Ach, AUD, BankCode),
        "NZ" => rule(Ach, NZD, BankCode),
        "GB" => rule(Bacs, GBP, BranchCode),
        "DE" | "FR" | "IT" | "ES" | "NL" | "BE" | "AT" | "IE" | "PT" | "FI" | "LU" => {
            rule(SepaCore, EUR, BranchCode)
        }
        "SE" => rule(SepaCore, SEK, BranchCode),
        "DK" => rule(SepaCore, DKK, BranchCode),
        "NO" => rule(SepaCore, NOK, BranchCode),
        _ => DEFAULT_RULE,
    }
}

/// Whether the country is in the supported table at all.
pub fn is_supported_country(country_code: &str) -> bool {
    matches!(
        normalize(country_code).as_str(),
        "US" | "CA"
            | "AU"
            | "NZ"
            | "GB"
            | "DE"
            | "FR"
            | "IT"
            | "ES"
            | "NL"
            | "BE"
            | "AT"
            | "IE"
            | "PT"
            | "FI"
            | "LU"
            | "SE"
            | "DK"
            | "NO"
    )
}

/// The one per-country exception on bank account creation: GB accounts are
/// rejected by the provider when an account type is set.
pub fn requires_account_type(country_code: &str) -> bool {
    normalize(country_code) != "GB"
}

/// Normalize a caller-supplied bank code into the provider's identifier slot.
///
/// Pure and total for any printable-ASCII input. Canadian and Australian
/// native identifiers are longer routing numbers of which the provider slot
/// takes the first 4 characters; recognized compact national codes pass
/// through unchanged; unrecognized countries are truncated only when the
/// input overflows the 4-character slot.
pub fn format_bank_identifier(raw_code: &str, country_code: &str) -> String {
    match normalize(country_code).as_str() {
        "CA" | "AU" => first_four(raw_code),
        _ if is_supported_country(country_code) => raw_code.to_owned(),
        _ if raw_code.chars().count() > 4 => first_four(raw_code),
        _ => raw_code.to_owned(),
    }
}

fn first_four(raw_code: &str) -> String {
    raw_code.chars().take(4).collect()
}

fn normalize(country_code: &str) -> String {
    country_code.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use BankIdentifierField::{BankCode, BranchCode};
    use Currency::{AUD, CAD, DKK, EUR, GBP, NOK, NZD, SEK, USD};
    use DirectDebitScheme::{Ach, Bacs, SepaCore};

    #[test_case("US", Ach, USD, BankCode)]
    #[test_case("CA", Ach, CAD, BankCode)]
    #[test_case("AU", Ach, AUD, BankCode)]
    #[test_case("NZ", Ach, NZD, BankCode)]
    #[test_case("GB", Bacs, GBP, BranchCode)]
    #[test_case("DE", SepaCore, EUR, BranchCode)]
    #[test_case("FR", SepaCore, EUR, BranchCode)]
    #[test_case("IT", SepaCore, EUR, BranchCode)]
    #[test_case("ES", SepaCore, EUR, BranchCode)]
    #[test_case("NL", SepaCore, EUR, BranchCode)]
    #[test_case("BE", SepaCore, EUR, BranchCode)]
    #[test_case("AT", SepaCore, EUR, BranchCode)]
    #[test_case("IE", SepaCore, EUR, BranchCode)]
    #[test_case("PT", SepaCore, EUR, BranchCode)]
    #[test_case("FI", SepaCore, EUR, BranchCode)]
    #[test_case("LU", SepaCore, EUR, BranchCode)]
    #[test_case("SE", SepaCore, SEK, BranchCode)]
    #[test_case("DK", SepaCore, DKK, BranchCode)]
    #[test_case("NO", SepaCore, NOK, BranchCode)]
    fn supported_country_rules(
        country: &str,
        scheme: DirectDebitScheme,
        currency: Currency,
        identifier_field: BankIdentifierField,
    ) {
        let resolved = resolve_rule(country);
        assert_eq!(resolved.scheme, scheme);
        assert_eq!(resolved.currency, currency);
        assert_eq!(resolved.identifier_field, identifier_field);
    }

    #[test_case("ZZ")]
    #[test_case("")]
    #[test_case("XX")]
    #[test_case("not a country")]
    fn unrecognized_codes_resolve_to_the_default(country: &str) {
        assert_eq!(resolve_rule(country), DEFAULT_RULE);
    }

    #[test]
    fn rule_resolution_ignores_case_and_whitespace() {
        assert_eq!(resolve_rule("us"), resolve_rule("US"));
        assert_eq!(resolve_rule(" gb "), resolve_rule("GB"));
    }

    #[test_case("00412345678", "CA", "0041"; "canadian transit numbers are truncated")]
    #[test_case("082902", "AU", "0829"; "australian bsb is truncated")]
    #[test_case("021000021", "US", "021000021"; "us routing numbers pass through")]
    #[test_case("200000", "GB", "200000"; "uk sort codes pass through")]
    #[test_case("37040044", "DE", "37040044"; "sepa bank codes pass through")]
    #[test_case("123456", "ZZ", "1234"; "unknown country overflow is truncated")]
    #[test_case("1234", "ZZ", "1234"; "unknown country short codes pass through")]
    fn bank_identifier_formatting(raw: &str, country: &str, expected: &str) {
        assert_eq!(format_bank_identifier(raw, country), expected);
    }

    #[test]
    fn formatter_is_total_over_arbitrary_input() {
        for raw in ["", "x", "!@#$%^&*()", "0123456789abcdef"] {
            for country in ["CA", "AU", "US", "GB", "ZZ", ""] {
                let formatted = format_bank_identifier(raw, country);
                if matches!(country, "CA" | "AU") {
                    assert!(formatted.chars().count() <= 4);
                }
            }
        }
    }

    #[test]
    fn account_type_exception_is_gb_only() {
        assert!(!requires_account_type("GB"));
        assert!(!requires_account_type("gb"));
        assert!(requires_account_type("US"));
        assert!(requires_account_type("ZZ"));
    }
}
