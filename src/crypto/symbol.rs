/// Extracts a ticker from a free-form asset name.
///
/// `"Bitcoin (BTC)"` yields `BTC`. Failing that, a name that is itself a
/// 2 to 10 character alphanumeric code is taken as the ticker.
pub fn symbol_from_asset_name(name: &str) -> Option<String> {
    for (open, _) in name.match_indices('(') {
        let rest = &name[open + 1..];
        let Some(close) = rest.find(')') else {
            break;
        };
        let inner = &rest[..close];
        if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Some(inner.to_ascii_uppercase());
        }
    }

    let bare = name.trim();
    if (2..=10).contains(&bare.len()) && bare.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some(bare.to_ascii_uppercase());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_in_parentheses() {
        assert_eq!(symbol_from_asset_name("Bitcoin (BTC)"), Some("BTC".into()));
        assert_eq!(symbol_from_asset_name("Ether (eth) on ledger"), Some("ETH".into()));
        assert_eq!(
            symbol_from_asset_name("Staked (cold storage) (SOL)"),
            Some("SOL".into())
        );
    }

    #[test]
    fn test_bare_symbol() {
        assert_eq!(symbol_from_asset_name(" doge "), Some("DOGE".into()));
        assert_eq!(symbol_from_asset_name("1INCH"), Some("1INCH".into()));
    }

    #[test]
    fn test_no_symbol() {
        assert_eq!(symbol_from_asset_name("Savings account"), None);
        assert_eq!(symbol_from_asset_name("X"), None);
        assert_eq!(symbol_from_asset_name("ABCDEFGHIJK"), None);
        assert_eq!(symbol_from_asset_name("Bitcoin ()"), None);
        assert_eq!(symbol_from_asset_name("Bitcoin (BTC"), None);
    }
}
