// crates/hardness-core/src/accounts.rs
//! Fixed account list and the account -> industry auto-mapping.

use crate::types::{SELECT_ACCOUNT, SELECT_INDUSTRY};
use once_cell::sync::Lazy;

/// Static account -> industry map. Industry is locked to the mapped value
/// whenever the selected account appears here (other than the placeholder).
pub const ACCOUNT_INDUSTRY_MAP: &[(&str, &str)] = &[
    ("Abbott Ireland", "Pharma"),
    ("Abbott Laboratories", "Pharma"),
    ("Abbvie", "Pharma"),
    ("BMS Germany", "Pharma"),
    ("BMS Japan", "Pharma"),
    ("Bristol-Myers Squibb", "Pharma"),
    ("Envista", "Healthcare"),
    ("Gilead Sciences, Inc.", "Pharma"),
    ("J&J Inc", "Pharma"),
    ("J&J Japan", "Pharma"),
    ("J&J Singapore", "Pharma"),
    ("Novartis", "Pharma"),
    ("Sanofi", "Pharma"),
    ("Dell", "Technology"),
    ("Microsoft", "Technology"),
    ("RECURSION", "Technology"),
    ("Chevron India", "Energy"),
    ("CHEVRON U.S.A. INC.", "Energy"),
    ("OXY", "Energy"),
    ("SABIC", "Energy"),
    ("BMO", "Finance"),
    ("Citigroup", "Finance"),
    ("Coles", "Retail"),
    ("Home Depot", "Retail"),
    ("Nike", "Consumer Goods"),
    ("THD", "Retail"),
    ("Walmart", "Retail"),
    ("Walmart Mexico", "Retail"),
    ("ADM", "Food & Beverage"),
    ("Mars", "Consumer Goods"),
    ("MARS China", "Consumer Goods"),
    ("Southwest", "Airlines"),
    ("T Mobile", "Telecom"),
    ("NCLH", "Hospitality"),
    ("RTX", "Aerospace"),
    ("Itkan", "Technology"),
    ("Loyalty Pacific", "Services"),
    ("Skills Development", "Education"),
];

/// Unmapped catch-all account. Selecting it leaves the industry editable.
pub const OTHERS_ACCOUNT: &str = "Others";

/// Ordered account list: placeholder first, then alphabetical, "Others" last.
pub static ACCOUNTS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut names: Vec<&str> = ACCOUNT_INDUSTRY_MAP.iter().map(|(a, _)| *a).collect();
    names.sort_unstable();
    let mut accounts = vec![SELECT_ACCOUNT];
    accounts.extend(names);
    accounts.push(OTHERS_ACCOUNT);
    accounts
});

/// Ordered industry list: placeholder first, then sorted unique industries,
/// including the "Other" bucket.
pub static INDUSTRIES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut names: Vec<&str> = ACCOUNT_INDUSTRY_MAP.iter().map(|(_, i)| *i).collect();
    names.push("Other");
    names.sort_unstable();
    names.dedup();
    let mut industries = vec![SELECT_INDUSTRY];
    industries.extend(names);
    industries
});

/// The mapped industry for an account, if the account is auto-mapped.
pub fn industry_for(account: &str) -> Option<&'static str> {
    ACCOUNT_INDUSTRY_MAP
        .iter()
        .find(|(a, _)| *a == account)
        .map(|(_, i)| *i)
}

/// Whether selecting this account locks the industry control.
pub fn is_auto_mapped(account: &str) -> bool {
    account != SELECT_ACCOUNT && industry_for(account).is_some()
}

pub fn is_known_account(account: &str) -> bool {
    ACCOUNTS.contains(&account)
}

pub fn is_known_industry(industry: &str) -> bool {
    INDUSTRIES.contains(&industry)
}
